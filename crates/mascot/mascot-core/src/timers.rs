//! One-shot timers owned by a scheduler instance.
//!
//! Replaces host `setTimeout` handles: the owner advances its clock and pops
//! whatever is due. Ordering is by deadline, then by arming order.

use serde::{Deserialize, Serialize};

use crate::ids::{IdAllocator, TimerId};
use crate::state::AnimationState;

/// What a timer does when it fires.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerKind {
    /// Auto-expiry of the given current state.
    Expiry(AnimationState),
    /// Involuntary blink.
    Blink,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Timer {
    pub id: TimerId,
    pub deadline_ms: f64,
    pub kind: TimerKind,
}

#[derive(Debug, Default)]
pub struct TimerQueue {
    ids: IdAllocator,
    pending: Vec<Timer>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a timer firing at `deadline_ms` on the owner's clock.
    pub fn arm(&mut self, deadline_ms: f64, kind: TimerKind) -> TimerId {
        let id = self.ids.alloc_timer();
        self.pending.push(Timer {
            id,
            deadline_ms,
            kind,
        });
        id
    }

    /// Cancel a pending timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.id != id);
        self.pending.len() != before
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|t| t.id == id)
    }

    /// Remove and return the earliest timer due at or before `until_ms`.
    pub fn pop_due(&mut self, until_ms: f64) -> Option<Timer> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, t)| t.deadline_ms <= until_ms)
            .min_by(|(_, a), (_, b)| {
                a.deadline_ms
                    .total_cmp(&b.deadline_ms)
                    .then(a.id.cmp(&b.id))
            })
            .map(|(idx, _)| idx)?;
        Some(self.pending.swap_remove(idx))
    }

    pub fn next_deadline(&self) -> Option<f64> {
        self.pending
            .iter()
            .map(|t| t.deadline_ms)
            .min_by(|a, b| a.total_cmp(b))
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_deadline_then_arming_order() {
        let mut q = TimerQueue::new();
        let late = q.arm(500.0, TimerKind::Blink);
        let first = q.arm(100.0, TimerKind::Expiry(AnimationState::Wave));
        let tie = q.arm(100.0, TimerKind::Blink);

        assert_eq!(q.next_deadline(), Some(100.0));
        assert!(q.pop_due(50.0).is_none());
        assert_eq!(q.pop_due(1000.0).map(|t| t.id), Some(first));
        assert_eq!(q.pop_due(1000.0).map(|t| t.id), Some(tie));
        assert_eq!(q.pop_due(1000.0).map(|t| t.id), Some(late));
        assert!(q.is_empty());
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut q = TimerQueue::new();
        let id = q.arm(10.0, TimerKind::Blink);
        assert!(q.is_pending(id));
        assert!(q.cancel(id));
        assert!(!q.cancel(id));
        assert!(q.pop_due(100.0).is_none());
    }

    #[test]
    fn clear_drops_everything() {
        let mut q = TimerQueue::new();
        q.arm(1.0, TimerKind::Blink);
        q.arm(2.0, TimerKind::Blink);
        assert_eq!(q.len(), 2);
        q.clear();
        assert!(q.is_empty());
        assert_eq!(q.next_deadline(), None);
    }
}

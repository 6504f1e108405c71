//! Semantic events emitted by the scheduler.
//!
//! Hosts drain these after each request/advance to mirror state changes in
//! their UI (or ship them across the wasm boundary).

use serde::{Deserialize, Serialize};

use crate::state::AnimationState;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[non_exhaustive]
pub enum SchedulerEvent {
    /// `state` became current, replacing `previous`.
    Started {
        state: AnimationState,
        previous: AnimationState,
        at_ms: f64,
    },
    /// `state` lost the priority comparison against `current` and was parked.
    Deferred {
        state: AnimationState,
        current: AnimationState,
        at_ms: f64,
    },
    /// `state` timed out (or was ended explicitly) and the scheduler returned to idle.
    Expired { state: AnimationState, at_ms: f64 },
    /// A deferred `state` was picked on the return to idle.
    Promoted { state: AnimationState, at_ms: f64 },
    Disposed { at_ms: f64 },
}

impl SchedulerEvent {
    pub fn state(&self) -> Option<AnimationState> {
        match self {
            Self::Started { state, .. }
            | Self::Deferred { state, .. }
            | Self::Expired { state, .. }
            | Self::Promoted { state, .. } => Some(*state),
            Self::Disposed { .. } => None,
        }
    }
}

/// Per-scheduler event buffer.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<SchedulerEvent>,
}

impl EventLog {
    #[inline]
    pub fn push(&mut self, event: SchedulerEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn drain(&mut self) -> Vec<SchedulerEvent> {
        std::mem::take(&mut self.events)
    }

    #[inline]
    pub fn as_slice(&self) -> &[SchedulerEvent] {
        &self.events
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

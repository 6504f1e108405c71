//! Identifiers and a simple allocator for scheduler-owned timers.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct TimerId(pub u32);

/// Monotonic allocator for TimerId. Ids are never reused within one scheduler,
/// so a stale handle can't cancel a newer timer.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_timer: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_timer(&mut self) -> TimerId {
        let id = TimerId(self.next_timer);
        self.next_timer = self.next_timer.wrapping_add(1);
        id
    }
}

//! Single-slot-per-type timed event queue.
//!
//! Each event kind owns exactly one deadline slot.  Queuing a kind that is
//! already pending overwrites its deadline, so at most one instance of each
//! kind is ever outstanding and the queue needs no allocation.
//!
//! ```text
//!   slot:      0              1                 N-1
//!   deadline: [t0 | UNSET] [t1 | UNSET] ... [tn | UNSET]
//!
//!   execute_all(now):
//!     while min(deadline) <= now:
//!       clear slot, handler(queue, kind, deadline)   // may re-que
//! ```
//!
//! Due events fire in non-decreasing deadline order; equal deadlines fire in
//! declaration order.  A handler that re-queues its own kind at or before
//! `now` fires again within the same call, which is how periodic events
//! catch up after a long stall.

use core::marker::PhantomData;

use embassy_time::Instant;
use log::debug;

// ═══════════════════════════════════════════════════════════════
//  Time points
// ═══════════════════════════════════════════════════════════════

/// A totally ordered instant with a maximal "unset" sentinel.
///
/// A deadline equal to `UNSET` is indistinguishable from no deadline.
pub trait TimePoint: Copy + Ord {
    const UNSET: Self;
}

impl TimePoint for Instant {
    const UNSET: Self = Instant::MAX;
}

impl TimePoint for core::time::Duration {
    const UNSET: Self = core::time::Duration::MAX;
}

impl TimePoint for u64 {
    const UNSET: Self = u64::MAX;
}

// ═══════════════════════════════════════════════════════════════
//  Event kinds
// ═══════════════════════════════════════════════════════════════

/// A closed set of event kinds, each mapped to one queue slot.
///
/// `ALL[k.slot()] == k` must hold for every kind.
pub trait EventKind: Copy + Eq + core::fmt::Debug + 'static {
    /// Every kind, in slot order.  Slot order is the tie-break order.
    const ALL: &'static [Self];

    fn slot(self) -> usize;
}

// ═══════════════════════════════════════════════════════════════
//  Queue
// ═══════════════════════════════════════════════════════════════

pub struct TimedEventQueue<E: EventKind, T: TimePoint, const N: usize> {
    deadlines: [T; N],
    _kinds: PhantomData<E>,
}

impl<E: EventKind, T: TimePoint, const N: usize> Default for TimedEventQueue<E, T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EventKind, T: TimePoint, const N: usize> TimedEventQueue<E, T, N> {
    /// Every slot unset.
    pub fn new() -> Self {
        const { assert!(N == E::ALL.len(), "queue size must match the number of event kinds") }
        debug_assert!(E::ALL.iter().enumerate().all(|(i, k)| k.slot() == i));
        Self { deadlines: [T::UNSET; N], _kinds: PhantomData }
    }

    /// Schedule `event` at `at`, replacing any pending deadline for it.
    pub fn que(&mut self, event: E, at: T) {
        self.deadlines[event.slot()] = at;
    }

    /// Drop any pending deadline for `event`.
    pub fn unque(&mut self, event: E) {
        self.deadlines[event.slot()] = T::UNSET;
    }

    pub fn deadline(&self, event: E) -> Option<T> {
        let at = self.deadlines[event.slot()];
        (at != T::UNSET).then_some(at)
    }

    pub fn is_queued(&self, event: E) -> bool {
        self.deadline(event).is_some()
    }

    /// Number of kinds with a pending deadline.
    pub fn pending(&self) -> usize {
        self.deadlines.iter().filter(|&&at| at != T::UNSET).count()
    }

    /// Earliest pending deadline.
    pub fn next(&self) -> Option<T> {
        self.earliest().map(|slot| self.deadlines[slot])
    }

    /// Fire every event due at `now`, earliest first.  The slot is cleared
    /// before `handler` runs, so the handler may re-queue its own kind.
    /// Returns the number of events fired.
    pub fn execute_all(&mut self, now: T, mut handler: impl FnMut(&mut Self, E, T)) -> usize {
        let mut fired = 0;
        while let Some(slot) = self.earliest() {
            let at = self.deadlines[slot];
            if at > now {
                break;
            }
            self.deadlines[slot] = T::UNSET;
            let event = E::ALL[slot];
            debug!("Queue: firing {:?}", event);
            handler(self, event, at);
            fired += 1;
        }
        fired
    }

    /// Slot of the earliest pending deadline, lowest slot on ties.
    fn earliest(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (slot, &at) in self.deadlines.iter().enumerate() {
            if at == T::UNSET {
                continue;
            }
            match best {
                Some(b) if self.deadlines[b] <= at => {}
                _ => best = Some(slot),
            }
        }
        best
    }
}

//! Virtual-time task queue.
//!
//! The scheduler never reads a wall clock. Its owner moves time forward and
//! drains whatever came due, which keeps every timer-driven transition
//! deterministic and testable without sleeping.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::time::Duration;
use tracing::{instrument, trace};

/// Handle to a scheduled task, used for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Min-heap of tasks keyed by due time.
///
/// Tasks due at the same instant fire in the order they were scheduled.
/// Cancelled tasks stay in the heap until popped and are skipped then.
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now: Duration,
    next_seq: u64,
    queue: BinaryHeap<Reverse<(Duration, u64)>>,
    live: HashMap<u64, T>,
}

impl<T> Scheduler<T> {
    /// Creates an empty scheduler at time zero.
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            queue: BinaryHeap::new(),
            live: HashMap::new(),
        }
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of tasks still waiting to fire.
    pub fn pending(&self) -> usize {
        self.live.len()
    }

    /// True if the task has neither fired nor been cancelled.
    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.live.contains_key(&id.0)
    }

    /// Schedules `task` to fire `delay` after the current time.
    ///
    /// Due times saturate at `Duration::MAX`.
    pub fn schedule_after(&mut self, delay: Duration, task: T) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        let due = self.now.saturating_add(delay);
        self.queue.push(Reverse((due, seq)));
        self.live.insert(seq, task);
        trace!(seq, ?due, "Scheduled task");
        TimerId(seq)
    }

    /// Cancels a task, returning it if it was still pending.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        self.live.remove(&id.0)
    }

    /// Drops every pending task.
    #[instrument(skip(self), fields(pending = self.live.len()))]
    pub fn clear(&mut self) {
        self.queue.clear();
        self.live.clear();
    }

    /// Pops the earliest live task due at or before `until`.
    ///
    /// Virtual time moves to the popped task's due time, so tasks scheduled
    /// by its handler are measured from the moment it fired.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TimerId, T)> {
        while let Some(Reverse((due, seq))) = self.queue.peek().copied() {
            if due > until {
                return None;
            }
            self.queue.pop();
            if let Some(task) = self.live.remove(&seq) {
                self.now = self.now.max(due);
                return Some((TimerId(seq), task));
            }
        }
        None
    }

    /// Moves virtual time forward to `until` without firing anything.
    pub fn advance_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

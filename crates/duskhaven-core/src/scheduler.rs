//! Virtual-time task scheduler.
//!
//! Deferred world work (combat turns, respawns, dialogue continuations) is
//! queued here instead of on wall-clock timers. The host advances the clock;
//! tasks come back out in fire-time order, ties broken by scheduling order.
//! Time only moves forward through [`Scheduler::advance_to`] and
//! [`Scheduler::pop_due`], so tests can drive it precisely.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Handle to a scheduled task, usable for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

#[derive(Debug)]
struct ScheduledTask<T> {
    due_ms: u64,
    seq: u64,
    task: T,
}

impl<T> PartialEq for ScheduledTask<T> {
    fn eq(&self, other: &Self) -> bool {
        self.due_ms == other.due_ms && self.seq == other.seq
    }
}

impl<T> Eq for ScheduledTask<T> {}

impl<T> PartialOrd for ScheduledTask<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for ScheduledTask<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.due_ms
            .cmp(&other.due_ms)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Priority queue of tasks ordered by virtual fire time.
#[derive(Debug)]
pub struct Scheduler<T> {
    now_ms: u64,
    next_seq: u64,
    queue: BinaryHeap<Reverse<ScheduledTask<T>>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    /// Creates an empty scheduler at virtual time zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_seq: 1,
            queue: BinaryHeap::new(),
        }
    }

    /// Current virtual time in milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of tasks still queued.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Schedules `task` to fire at absolute virtual time `due_ms`.
    pub fn schedule_at(&mut self, due_ms: u64, task: T) -> TaskId {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.saturating_add(1);
        self.queue.push(Reverse(ScheduledTask {
            due_ms: due_ms.max(self.now_ms),
            seq,
            task,
        }));
        TaskId(seq)
    }

    /// Schedules `task` to fire `delay_ms` after the current virtual time.
    pub fn schedule_in(&mut self, delay_ms: u64, task: T) -> TaskId {
        self.schedule_at(self.now_ms.saturating_add(delay_ms), task)
    }

    /// Cancels one task. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.queue.len();
        self.queue.retain(|Reverse(scheduled)| scheduled.seq != id.0);
        self.queue.len() != before
    }

    /// Cancels every queued task matching `predicate`. Returns how many.
    pub fn cancel_where(&mut self, mut predicate: impl FnMut(&T) -> bool) -> usize {
        let before = self.queue.len();
        self.queue.retain(|Reverse(scheduled)| !predicate(&scheduled.task));
        before - self.queue.len()
    }

    /// Returns `true` if any queued task matches `predicate`.
    pub fn any(&self, mut predicate: impl FnMut(&T) -> bool) -> bool {
        self.queue
            .iter()
            .any(|Reverse(scheduled)| predicate(&scheduled.task))
    }

    /// Pops the earliest task due at or before `until_ms`, moving the clock
    /// forward to that task's fire time. Returns `None` when nothing is due.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<T> {
        let due_ms = self.queue.peek().map(|Reverse(next)| next.due_ms)?;
        if due_ms > until_ms {
            return None;
        }
        let Reverse(scheduled) = self.queue.pop()?;
        self.now_ms = self.now_ms.max(scheduled.due_ms);
        Some(scheduled.task)
    }

    /// Moves the clock to `target_ms` without firing anything. Callers drain
    /// [`Scheduler::pop_due`] first so that due tasks observe their own
    /// fire time. The clock never moves backwards.
    pub fn advance_to(&mut self, target_ms: u64) {
        self.now_ms = self.now_ms.max(target_ms);
    }
}

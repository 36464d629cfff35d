//! Cancelable one-shot tasks on the scene clock.
//!
//! The scheduler never looks at the wall clock. The host advances it through
//! the scene's `tick`, which makes firing order and timing exact: a task is
//! due when the clock reaches `scheduled_at + delay`, tasks fire in due order
//! (creation order on ties), and a cancelled task never fires.

use std::collections::{BTreeMap, HashMap};

use instant::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

#[derive(Debug)]
pub struct Scheduler<T> {
    now: Duration,
    next_seq: u64,
    queue: BTreeMap<(Duration, u64), T>,
    due_times: HashMap<u64, Duration>,
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            queue: BTreeMap::new(),
            due_times: HashMap::new(),
        }
    }

    /// Current scene time.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn schedule(&mut self, delay: Duration, task: T) -> TaskHandle {
        let seq = self.next_seq;
        self.next_seq += 1;
        let due = self.now.saturating_add(delay);
        self.queue.insert((due, seq), task);
        self.due_times.insert(seq, due);
        TaskHandle(seq)
    }

    /// Returns the task if it was still pending.
    pub fn cancel(&mut self, handle: TaskHandle) -> Option<T> {
        let due = self.due_times.remove(&handle.0)?;
        self.queue.remove(&(due, handle.0))
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.due_times.contains_key(&handle.0)
    }

    /// Time at which `handle` fires, if it is still pending.
    pub fn due_at(&self, handle: TaskHandle) -> Option<Duration> {
        self.due_times.get(&handle.0).copied()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Pops the earliest task due at or before `until` and moves the clock to its due time.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TaskHandle, T)> {
        let (&(due, seq), _) = self.queue.first_key_value()?;
        if due > until {
            return None;
        }
        let task = self.queue.remove(&(due, seq))?;
        self.due_times.remove(&seq);
        self.now = self.now.max(due);
        Some((TaskHandle(seq), task))
    }

    /// Moves the clock forward once all tasks up to `until` are handled.
    pub fn advance_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    pub fn clear(&mut self) {
        self.queue.clear();
        self.due_times.clear();
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

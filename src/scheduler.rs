//! Delayed-callback capability used to drive frame ticks.
//!
//! Everything runs on one thread: a [`Scheduler`] runs its tasks on the same
//! thread that draws. Implementations must not hold internal borrows while a
//! task runs, since tasks schedule their successor from inside the callback.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::time::Duration;

/// A one-shot callback.
pub type Task = Box<dyn FnOnce()>;

/// Identifies a scheduled task so it can be cancelled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskToken(pub u64);

pub trait Scheduler {
    /// Run `task` once after `delay`.
    fn schedule(&self, delay: Duration, task: Task) -> TaskToken;

    /// Drop a pending task. Unknown or already-fired tokens are ignored.
    fn cancel(&self, token: TaskToken);
}

/// Scheduler with a virtual clock advanced by the caller.
///
/// Tasks fire in deadline order (ties in scheduling order) when the clock is
/// moved past their deadline. Useful for hosts that already own a frame loop
/// and for deterministic tests.
#[derive(Default)]
pub struct ManualScheduler {
    now: Cell<Duration>,
    next_id: Cell<u64>,
    queue: RefCell<BTreeMap<(Duration, TaskToken), Task>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now.get()
    }

    /// Number of tasks waiting to fire.
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Move the clock forward by `by`, running every task that becomes due,
    /// including tasks scheduled by those tasks. Returns how many ran.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now.get() + by;
        let mut ran = 0;
        while let Some((due, task)) = self.pop_due(target) {
            self.now.set(due);
            task();
            ran += 1;
        }
        self.now.set(target);
        ran
    }

    /// Jump straight to the earliest pending task and run it.
    pub fn run_next(&self) -> bool {
        let first = self.queue.borrow().keys().next().map(|(due, _)| *due);
        match first {
            Some(due) => self.advance(due.saturating_sub(self.now.get())) > 0,
            None => false,
        }
    }

    fn pop_due(&self, target: Duration) -> Option<(Duration, Task)> {
        let mut queue = self.queue.borrow_mut();
        let key = *queue.keys().next()?;
        if key.0 > target {
            return None;
        }
        queue.remove(&key).map(|task| (key.0, task))
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TaskToken {
        let token = TaskToken(self.next_id.get());
        self.next_id.set(token.0 + 1);
        let due = self.now.get() + delay;
        self.queue.borrow_mut().insert((due, token), task);
        token
    }

    fn cancel(&self, token: TaskToken) {
        self.queue.borrow_mut().retain(|(_, t), _| *t != token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_tasks_fire_in_deadline_order() {
        let scheduler = ManualScheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for (delay, label) in [(30, "c"), (10, "a"), (20, "b")] {
            let log = Rc::clone(&log);
            scheduler.schedule(
                Duration::from_millis(delay),
                Box::new(move || log.borrow_mut().push(label)),
            );
        }

        assert_eq!(scheduler.advance(Duration::from_millis(25)), 2);
        assert_eq!(*log.borrow(), vec!["a", "b"]);
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(scheduler.now(), Duration::from_millis(25));
    }

    #[test]
    fn test_cancel_drops_task() {
        let scheduler = ManualScheduler::new();
        let fired = Rc::new(Cell::new(false));
        let flag = Rc::clone(&fired);
        let token = scheduler.schedule(Duration::from_millis(5), Box::new(move || flag.set(true)));

        scheduler.cancel(token);
        scheduler.cancel(token);
        scheduler.advance(Duration::from_millis(50));
        assert!(!fired.get());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_task_can_reschedule_itself() {
        fn arm(scheduler: Rc<ManualScheduler>, count: Rc<Cell<u32>>) {
            let next = Rc::clone(&scheduler);
            scheduler.schedule(
                Duration::from_millis(16),
                Box::new(move || {
                    count.set(count.get() + 1);
                    arm(next, count);
                }),
            );
        }

        let scheduler = Rc::new(ManualScheduler::new());
        let count = Rc::new(Cell::new(0));
        arm(Rc::clone(&scheduler), Rc::clone(&count));

        scheduler.advance(Duration::from_millis(100));
        assert_eq!(count.get(), 6);
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn test_run_next() {
        let scheduler = ManualScheduler::new();
        assert!(!scheduler.run_next());
        scheduler.schedule(Duration::from_millis(40), Box::new(|| {}));
        assert!(scheduler.run_next());
        assert_eq!(scheduler.now(), Duration::from_millis(40));
    }
}

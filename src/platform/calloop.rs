//! [`Scheduler`] backed by calloop timers.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use calloop::timer::{TimeoutAction, Timer};
use calloop::{LoopHandle, RegistrationToken};

use crate::scheduler::{Scheduler, Task, TaskToken};

/// Runs tasks as one-shot timers on a calloop event loop.
///
/// Deadlines come from the loop's monotonic clock, so wall clock changes do
/// not disturb the animation.
pub struct CalloopScheduler<D: 'static> {
    handle: LoopHandle<'static, D>,
    registrations: Rc<RefCell<HashMap<u64, RegistrationToken>>>,
    next_id: Cell<u64>,
}

impl<D: 'static> CalloopScheduler<D> {
    pub fn new(handle: LoopHandle<'static, D>) -> Self {
        Self {
            handle,
            registrations: Rc::new(RefCell::new(HashMap::new())),
            next_id: Cell::new(0),
        }
    }

    /// Number of timers still registered.
    pub fn pending(&self) -> usize {
        self.registrations.borrow().len()
    }
}

impl<D: 'static> Scheduler for CalloopScheduler<D> {
    fn schedule(&self, delay: Duration, task: Task) -> TaskToken {
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let registrations = Rc::clone(&self.registrations);
        let mut task = Some(task);
        let inserted = self.handle.insert_source(
            Timer::from_duration(delay),
            move |_deadline, _, _data: &mut D| {
                registrations.borrow_mut().remove(&id);
                if let Some(task) = task.take() {
                    task();
                }
                TimeoutAction::Drop
            },
        );

        match inserted {
            Ok(registration) => {
                self.registrations.borrow_mut().insert(id, registration);
            }
            Err(err) => {
                log::error!("failed to register frame timer: {}", err.error);
            }
        }
        TaskToken(id)
    }

    fn cancel(&self, token: TaskToken) {
        let registration = self.registrations.borrow_mut().remove(&token.0);
        if let Some(registration) = registration {
            self.handle.remove(registration);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calloop::EventLoop;

    fn dispatch_until(event_loop: &mut EventLoop<'static, u32>, data: &mut u32, target: u32) {
        for _ in 0..20 {
            if *data >= target {
                break;
            }
            event_loop
                .dispatch(Some(Duration::from_millis(20)), data)
                .unwrap();
        }
    }

    #[test]
    fn test_timer_runs_task() {
        let mut event_loop: EventLoop<'static, u32> = EventLoop::try_new().unwrap();
        let scheduler = CalloopScheduler::new(event_loop.handle());
        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        scheduler.schedule(
            Duration::from_millis(1),
            Box::new(move || counter.set(counter.get() + 1)),
        );
        assert_eq!(scheduler.pending(), 1);

        let mut data = 0;
        for _ in 0..20 {
            if fired.get() > 0 {
                break;
            }
            event_loop
                .dispatch(Some(Duration::from_millis(20)), &mut data)
                .unwrap();
        }
        assert_eq!(fired.get(), 1);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let mut event_loop: EventLoop<'static, u32> = EventLoop::try_new().unwrap();
        let scheduler = CalloopScheduler::new(event_loop.handle());
        let fired = Rc::new(Cell::new(false));
        let flag = Rc::clone(&fired);
        let token = scheduler.schedule(Duration::from_millis(1), Box::new(move || flag.set(true)));
        scheduler.cancel(token);
        scheduler.cancel(token);

        // a second timer proves the loop did get past the first deadline
        let handle = event_loop.handle();
        handle
            .insert_source(
                Timer::from_duration(Duration::from_millis(5)),
                |_, _, data: &mut u32| {
                    *data += 1;
                    TimeoutAction::Drop
                },
            )
            .unwrap();

        let mut data = 0;
        dispatch_until(&mut event_loop, &mut data, 1);
        assert_eq!(data, 1);
        assert!(!fired.get());
        assert_eq!(scheduler.pending(), 0);
    }
}

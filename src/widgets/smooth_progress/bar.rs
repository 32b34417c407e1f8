use std::cell::{Ref, RefCell};
use std::rc::{Rc, Weak};

use super::drawable::SmoothProgressDrawable;
use super::style::ProgressStyle;
use crate::animation::FRAME_DURATION;
use crate::error::Result;
use crate::invalidation::ChangeFlags;
use crate::renderer::Canvas;
use crate::scheduler::{Scheduler, TaskToken};
use crate::widgets::Rect;

type InvalidateHook = Rc<dyn Fn()>;

/// A drawable bound to a scheduler that animates it.
///
/// Clones share the same drawable. Pending ticks only hold weak references,
/// so dropping every handle ends the animation at the next tick.
#[derive(Clone)]
pub struct SmoothProgressBar {
    drawable: Rc<RefCell<SmoothProgressDrawable>>,
    scheduler: Rc<dyn Scheduler>,
    on_invalidate: Option<InvalidateHook>,
}

impl SmoothProgressBar {
    pub fn new(drawable: SmoothProgressDrawable, scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            drawable: Rc::new(RefCell::new(drawable)),
            scheduler,
            on_invalidate: None,
        }
    }

    /// Called whenever the bar needs a repaint: after every tick and after
    /// configuration changes made through [`update`](Self::update).
    pub fn on_invalidate(mut self, hook: impl Fn() + 'static) -> Self {
        self.on_invalidate = Some(Rc::new(hook));
        self
    }

    pub fn drawable(&self) -> Ref<'_, SmoothProgressDrawable> {
        self.drawable.borrow()
    }

    pub fn is_running(&self) -> bool {
        self.drawable.borrow().is_running()
    }

    /// Begin ticking. Does nothing if already running.
    pub fn start(&self) {
        {
            let mut drawable = self.drawable.borrow_mut();
            if drawable.is_running() {
                return;
            }
            let token = schedule_tick(TickContext {
                drawable: Rc::downgrade(&self.drawable),
                scheduler: Rc::downgrade(&self.scheduler),
                on_invalidate: self.on_invalidate.clone(),
            });
            let Some(token) = token else {
                return;
            };
            drawable.driver_mut().arm(token);
            drawable.invalidate(ChangeFlags::NEEDS_PAINT);
            log::debug!("progress animation started");
        }
        self.notify();
    }

    /// Stop ticking. The offset and colors stay where they are.
    pub fn stop(&self) {
        let token = self.drawable.borrow_mut().driver_mut().disarm();
        if let Some(token) = token {
            self.scheduler.cancel(token);
            log::debug!("progress animation stopped");
        }
    }

    /// Mutate the drawable, notifying the host if anything changed.
    pub fn update<R>(&self, f: impl FnOnce(&mut SmoothProgressDrawable) -> R) -> R {
        let (result, changed) = {
            let mut drawable = self.drawable.borrow_mut();
            let before = drawable.generation();
            let result = f(&mut drawable);
            (result, drawable.generation() != before)
        };
        if changed {
            self.notify();
        }
        result
    }

    pub fn apply_style(&self, style: &ProgressStyle) -> Result<()> {
        self.update(|drawable| style.apply(drawable))
    }

    pub fn draw(&self, canvas: &mut dyn Canvas, bounds: Rect) {
        self.drawable.borrow_mut().draw(canvas, bounds);
    }

    fn notify(&self) {
        if let Some(hook) = &self.on_invalidate {
            hook();
        }
    }
}

impl std::fmt::Debug for SmoothProgressBar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmoothProgressBar")
            .field("drawable", &self.drawable)
            .finish_non_exhaustive()
    }
}

/// Everything a pending tick needs, without keeping the bar alive.
#[derive(Clone)]
struct TickContext {
    drawable: Weak<RefCell<SmoothProgressDrawable>>,
    scheduler: Weak<dyn Scheduler>,
    on_invalidate: Option<InvalidateHook>,
}

fn schedule_tick(ctx: TickContext) -> Option<TaskToken> {
    let scheduler = ctx.scheduler.upgrade()?;
    Some(scheduler.schedule(FRAME_DURATION, Box::new(move || run_tick(ctx))))
}

fn run_tick(ctx: TickContext) {
    let Some(drawable) = ctx.drawable.upgrade() else {
        log::trace!("progress bar dropped, tick discarded");
        return;
    };
    {
        let mut drawable = drawable.borrow_mut();
        if !drawable.is_running() {
            return;
        }
        drawable.advance_frame();
        match schedule_tick(ctx.clone()) {
            Some(token) => drawable.driver_mut().arm(token),
            None => {
                drawable.driver_mut().disarm();
            }
        }
    }
    if let Some(hook) = &ctx.on_invalidate {
        hook();
    }
}

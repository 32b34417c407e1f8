//! Smooth, indeterminate progress bars.
//!
//! A strip of colored sections slides along its width while an easing curve
//! stretches and squeezes each section. The crate computes the geometry and
//! paints it onto a [`Canvas`](renderer::Canvas); the host supplies the
//! canvas and a [`Scheduler`](scheduler::Scheduler) for frame ticks.
//!
//! ```
//! use std::rc::Rc;
//! use std::time::Duration;
//! use smooth_progress::prelude::*;
//!
//! let scheduler = Rc::new(ManualScheduler::new());
//! let bar = SmoothProgressBar::new(SmoothProgressDrawable::builder().build(), scheduler.clone());
//! bar.start();
//! scheduler.advance(Duration::from_millis(160));
//!
//! let mut ctx = PaintContext::new();
//! bar.draw(&mut ctx, Rect::new(0.0, 0.0, 320.0, 4.0));
//! assert!(!ctx.commands().is_empty());
//! ```

pub mod animation;
pub mod error;
pub mod invalidation;
pub mod platform;
pub mod renderer;
pub mod scheduler;
pub mod transform;
pub mod widgets;

pub mod prelude {
    pub use crate::animation::{Interpolator, TimingFunction, FRAME_DURATION};
    pub use crate::error::ConfigError;
    pub use crate::invalidation::ChangeFlags;
    pub use crate::platform::CalloopScheduler;
    pub use crate::renderer::{Canvas, DrawCommand, PaintContext, RasterCanvas, Stroke};
    pub use crate::scheduler::{ManualScheduler, Scheduler, TaskToken};
    pub use crate::widgets::smooth_progress::Segment;
    pub use crate::widgets::{
        Builder, Color, ProgressConfig, ProgressStyle, Rect, SmoothProgressBar,
        SmoothProgressDrawable,
    };
}

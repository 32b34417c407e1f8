//! Indeterminate progress strip made of scrolling colored sections.
//!
//! [`SmoothProgressDrawable`] holds the configuration and animation state and
//! paints onto any [`Canvas`](crate::renderer::Canvas). [`SmoothProgressBar`]
//! pairs a drawable with a [`Scheduler`](crate::scheduler::Scheduler) that
//! ticks it every [`FRAME_DURATION`](crate::animation::FRAME_DURATION).

mod bar;
mod config;
mod drawable;
mod geometry;
mod style;

pub use bar::SmoothProgressBar;
pub use config::{
    dp_to_px_offset, dp_to_px_size, Builder, ProgressConfig, DEFAULT_COLOR,
    DEFAULT_SECTIONS_COUNT, DEFAULT_SEPARATOR_LENGTH_DP, DEFAULT_SPEED, DEFAULT_STROKE_WIDTH_DP,
};
pub use drawable::SmoothProgressDrawable;
pub use geometry::{compute_segments, compute_segments_into, Segment, SegmentLayout};
pub use style::ProgressStyle;

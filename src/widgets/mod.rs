pub mod smooth_progress;
pub mod widget;

pub use smooth_progress::{Builder, ProgressConfig, ProgressStyle, SmoothProgressBar, SmoothProgressDrawable};
pub use widget::{Color, Rect};

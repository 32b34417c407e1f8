pub mod driver;
mod timing;

pub use driver::{AnimationDriver, DriverPhase, Tick, FRAME_DURATION, OFFSET_PER_FRAME};
pub use timing::{Interpolator, TimingFunction, UnknownTimingFunction};

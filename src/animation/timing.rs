//! Timing functions (easing curves) that shape section widths.
//!
//! The geometry engine samples an easing curve across the strip, so a
//! non-linear curve makes sections grow or shrink as they travel.
//!
//! ## Built-in Curves
//!
//! - [`TimingFunction::Linear`] - Constant width (no easing)
//! - [`TimingFunction::EaseIn`] - Narrow sections first, wide at the end
//! - [`TimingFunction::EaseOut`] - Wide sections first, narrow at the end
//! - [`TimingFunction::EaseInOut`] - Narrow at both edges, wide in the middle
//! - [`TimingFunction::Accelerate`] / [`TimingFunction::Decelerate`] - Same
//!   shapes as ease in/out with an adjustable factor
//!
//! Anything implementing [`Interpolator`] can be used instead, including plain
//! closures:
//!
//! ```
//! use smooth_progress::animation::Interpolator;
//!
//! let cubic = |t: f32| t * t * t;
//! assert_eq!(cubic.interpolate(0.5), 0.125);
//! ```

use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Maps normalized progress in `[0, 1]` to normalized output in `[0, 1]`.
///
/// Output outside `[0, 1]` is not checked on the render path.
pub trait Interpolator {
    fn interpolate(&self, input: f32) -> f32;
}

impl<F> Interpolator for F
where
    F: Fn(f32) -> f32,
{
    fn interpolate(&self, input: f32) -> f32 {
        self(input)
    }
}

/// Built-in easing curves
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TimingFunction {
    /// Linear interpolation (constant speed)
    Linear,
    /// Starts slow, ends fast (`t²`)
    EaseIn,
    /// Starts fast, ends slow (`1 - (1 - t)²`)
    EaseOut,
    /// Starts slow, speeds up, then slows down (cosine curve)
    EaseInOut,
    /// `t^(2 * factor)`
    Accelerate(f32),
    /// `1 - (1 - t)^(2 * factor)`
    Decelerate(f32),
}

impl TimingFunction {
    /// Evaluate the curve at `t`.
    pub fn evaluate(&self, t: f32) -> f32 {
        match *self {
            TimingFunction::Linear => t,
            TimingFunction::EaseIn => t * t,
            TimingFunction::EaseOut => t * (2.0 - t),
            TimingFunction::EaseInOut => ((t + 1.0) * PI).cos() / 2.0 + 0.5,
            TimingFunction::Accelerate(factor) => accelerate(t, factor),
            TimingFunction::Decelerate(factor) => decelerate(t, factor),
        }
    }

    /// Name accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            TimingFunction::Linear => "linear",
            TimingFunction::EaseIn | TimingFunction::Accelerate(_) => "accelerate",
            TimingFunction::EaseOut | TimingFunction::Decelerate(_) => "decelerate",
            TimingFunction::EaseInOut => "accelerate_decelerate",
        }
    }
}

impl Default for TimingFunction {
    fn default() -> Self {
        TimingFunction::EaseIn
    }
}

impl Interpolator for TimingFunction {
    fn interpolate(&self, input: f32) -> f32 {
        self.evaluate(input)
    }
}

fn accelerate(t: f32, factor: f32) -> f32 {
    if factor == 1.0 {
        t * t
    } else {
        t.powf(2.0 * factor)
    }
}

fn decelerate(t: f32, factor: f32) -> f32 {
    if factor == 1.0 {
        1.0 - (1.0 - t) * (1.0 - t)
    } else {
        1.0 - (1.0 - t).powf(2.0 * factor)
    }
}

/// Returned when a curve name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown timing function: {0}")]
pub struct UnknownTimingFunction(pub String);

impl FromStr for TimingFunction {
    type Err = UnknownTimingFunction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "linear" => Ok(TimingFunction::Linear),
            "accelerate" | "ease_in" => Ok(TimingFunction::EaseIn),
            "decelerate" | "ease_out" => Ok(TimingFunction::EaseOut),
            "accelerate_decelerate" | "ease_in_out" => Ok(TimingFunction::EaseInOut),
            _ => Err(UnknownTimingFunction(s.to_string())),
        }
    }
}

impl fmt::Display for TimingFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_linear() {
        assert_eq!(TimingFunction::Linear.evaluate(0.0), 0.0);
        assert_eq!(TimingFunction::Linear.evaluate(0.5), 0.5);
        assert_eq!(TimingFunction::Linear.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_ease_in() {
        let result = TimingFunction::EaseIn.evaluate(0.5);
        assert!(result < 0.5); // Should be slower at start
        assert!(approx_eq(result, 0.25));
    }

    #[test]
    fn test_ease_out() {
        let result = TimingFunction::EaseOut.evaluate(0.5);
        assert!(result > 0.5); // Should be faster at start
        assert!(approx_eq(result, 0.75));
    }

    #[test]
    fn test_ease_in_out_endpoints() {
        let curve = TimingFunction::EaseInOut;
        assert!(approx_eq(curve.evaluate(0.0), 0.0));
        assert!(approx_eq(curve.evaluate(0.5), 0.5));
        assert!(approx_eq(curve.evaluate(1.0), 1.0));
        assert!(curve.evaluate(0.25) < 0.25);
    }

    #[test]
    fn test_factor_one_matches_named_curves() {
        for t in [0.0, 0.1, 0.33, 0.5, 0.9, 1.0] {
            assert!(approx_eq(
                TimingFunction::Accelerate(1.0).evaluate(t),
                TimingFunction::EaseIn.evaluate(t)
            ));
            assert!(approx_eq(
                TimingFunction::Decelerate(1.0).evaluate(t),
                TimingFunction::EaseOut.evaluate(t)
            ));
        }
        assert!(approx_eq(TimingFunction::Accelerate(2.0).evaluate(0.5), 0.0625));
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("linear".parse::<TimingFunction>(), Ok(TimingFunction::Linear));
        assert_eq!("Ease-In".parse::<TimingFunction>(), Ok(TimingFunction::EaseIn));
        assert_eq!(
            "accelerate_decelerate".parse::<TimingFunction>(),
            Ok(TimingFunction::EaseInOut)
        );
        assert!("bounce".parse::<TimingFunction>().is_err());
    }

    #[test]
    fn test_closure_interpolator() {
        let half = |t: f32| t / 2.0;
        assert_eq!(half.interpolate(1.0), 0.5);
    }
}

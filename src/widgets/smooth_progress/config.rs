use std::fmt;
use std::rc::Rc;

use super::drawable::SmoothProgressDrawable;
use super::style::ProgressStyle;
use crate::animation::{Interpolator, TimingFunction};
use crate::error::{ConfigError, Result};
use crate::widgets::Color;

/// Default section color (`#33b5e5`)
pub const DEFAULT_COLOR: Color = Color::from_hex(0x33b5e5);
pub const DEFAULT_SECTIONS_COUNT: u32 = 4;
pub const DEFAULT_SPEED: f32 = 1.0;
/// Default stroke width in density-independent pixels
pub const DEFAULT_STROKE_WIDTH_DP: f32 = 4.0;
/// Default separator length in density-independent pixels
pub const DEFAULT_SEPARATOR_LENGTH_DP: f32 = 4.0;

/// Validated parameters of a progress bar.
///
/// Every value held here already passed the same checks the setters apply,
/// so a config can be handed to the geometry engine without re-checking.
#[derive(Clone)]
pub struct ProgressConfig {
    pub(crate) interpolator: Rc<dyn Interpolator>,
    pub(crate) colors: Vec<Color>,
    pub(crate) sections_count: u32,
    pub(crate) separator_length: u32,
    pub(crate) stroke_width: f32,
    pub(crate) speed: f32,
    pub(crate) reversed: bool,
    pub(crate) mirror_mode: bool,
}

impl ProgressConfig {
    /// Defaults with dp dimensions converted for `scale_factor` device pixels
    /// per dp.
    pub fn for_scale_factor(scale_factor: f32) -> Self {
        Self {
            interpolator: Rc::new(TimingFunction::EaseIn),
            colors: vec![DEFAULT_COLOR],
            sections_count: DEFAULT_SECTIONS_COUNT,
            separator_length: dp_to_px_size(DEFAULT_SEPARATOR_LENGTH_DP, scale_factor),
            stroke_width: dp_to_px_offset(DEFAULT_STROKE_WIDTH_DP, scale_factor),
            speed: DEFAULT_SPEED,
            reversed: false,
            mirror_mode: false,
        }
    }

    pub fn builder() -> Builder {
        Builder::new()
    }

    pub fn interpolator(&self) -> &dyn Interpolator {
        self.interpolator.as_ref()
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn sections_count(&self) -> u32 {
        self.sections_count
    }

    pub fn separator_length(&self) -> u32 {
        self.separator_length
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn reversed(&self) -> bool {
        self.reversed
    }

    pub fn mirror_mode(&self) -> bool {
        self.mirror_mode
    }
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self::for_scale_factor(1.0)
    }
}

impl fmt::Debug for ProgressConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressConfig")
            .field("colors", &self.colors)
            .field("sections_count", &self.sections_count)
            .field("separator_length", &self.separator_length)
            .field("stroke_width", &self.stroke_width)
            .field("speed", &self.speed)
            .field("reversed", &self.reversed)
            .field("mirror_mode", &self.mirror_mode)
            .finish_non_exhaustive()
    }
}

/// Rounded pixel size for a dp dimension; non-zero sizes stay at least 1px.
pub fn dp_to_px_size(dp: f32, scale_factor: f32) -> u32 {
    let px = dp * scale_factor;
    if px > 0.0 {
        (px.round() as u32).max(1)
    } else {
        0
    }
}

/// Truncated pixel offset for a dp dimension.
pub fn dp_to_px_offset(dp: f32, scale_factor: f32) -> f32 {
    (dp * scale_factor).trunc().max(0.0)
}

pub(crate) fn check_sections_count(value: i32) -> Result<u32> {
    match u32::try_from(value) {
        Ok(count) if count > 0 => Ok(count),
        _ => Err(ConfigError::SectionsCount(value)),
    }
}

pub(crate) fn check_separator_length(value: i32) -> Result<u32> {
    u32::try_from(value).map_err(|_| ConfigError::SeparatorLength(value))
}

pub(crate) fn check_stroke_width(value: f32) -> Result<f32> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::StrokeWidth(value))
    }
}

pub(crate) fn check_speed(value: f32) -> Result<f32> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::Speed(value))
    }
}

pub(crate) fn check_colors(colors: &[Color]) -> Result<()> {
    if colors.is_empty() {
        Err(ConfigError::EmptyColors)
    } else {
        Ok(())
    }
}

/// Fluent builder for [`SmoothProgressDrawable`].
///
/// Each builder carries its own defaults. Fallible setters return the
/// builder back only when the value is accepted:
///
/// ```
/// use smooth_progress::prelude::*;
///
/// # fn main() -> Result<(), ConfigError> {
/// let drawable = SmoothProgressDrawable::builder()
///     .sections_count(5)?
///     .speed(2.0)?
///     .colors([Color::from_hex(0xff0000), Color::from_hex(0x0000ff)])?
///     .interpolator(TimingFunction::Linear)
///     .mirror_mode(true)
///     .build();
/// assert_eq!(drawable.sections_count(), 5);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct Builder {
    config: ProgressConfig,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the defaults scaled for `scale_factor` pixels per dp.
    pub fn with_scale_factor(scale_factor: f32) -> Self {
        Self {
            config: ProgressConfig::for_scale_factor(scale_factor),
        }
    }

    pub fn interpolator(mut self, interpolator: impl Interpolator + 'static) -> Self {
        self.config.interpolator = Rc::new(interpolator);
        self
    }

    pub fn sections_count(mut self, sections_count: i32) -> Result<Self> {
        self.config.sections_count = check_sections_count(sections_count)?;
        Ok(self)
    }

    pub fn separator_length(mut self, separator_length: i32) -> Result<Self> {
        self.config.separator_length = check_separator_length(separator_length)?;
        Ok(self)
    }

    pub fn color(mut self, color: Color) -> Self {
        self.config.colors = vec![color];
        self
    }

    pub fn colors(mut self, colors: impl Into<Vec<Color>>) -> Result<Self> {
        let colors = colors.into();
        check_colors(&colors)?;
        self.config.colors = colors;
        Ok(self)
    }

    pub fn stroke_width(mut self, width: f32) -> Result<Self> {
        self.config.stroke_width = check_stroke_width(width)?;
        Ok(self)
    }

    pub fn speed(mut self, speed: f32) -> Result<Self> {
        self.config.speed = check_speed(speed)?;
        Ok(self)
    }

    pub fn reversed(mut self, reversed: bool) -> Self {
        self.config.reversed = reversed;
        self
    }

    pub fn mirror_mode(mut self, mirror_mode: bool) -> Self {
        self.config.mirror_mode = mirror_mode;
        self
    }

    /// Take every field the style sets. Fails without applying anything if
    /// one of them is invalid.
    pub fn style(mut self, style: &ProgressStyle) -> Result<Self> {
        style.validate()?;
        style.apply_to_config(&mut self.config);
        Ok(self)
    }

    /// The validated configuration.
    pub fn build_config(self) -> ProgressConfig {
        self.config
    }

    pub fn build(self) -> SmoothProgressDrawable {
        SmoothProgressDrawable::new(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProgressConfig::default();
        assert_eq!(config.colors(), &[DEFAULT_COLOR]);
        assert_eq!(config.sections_count(), 4);
        assert_eq!(config.separator_length(), 4);
        assert_eq!(config.stroke_width(), 4.0);
        assert_eq!(config.speed(), 1.0);
        assert!(!config.reversed());
        assert!(!config.mirror_mode());
        assert_eq!(config.interpolator().interpolate(0.5), 0.25);
    }

    #[test]
    fn test_scale_factor_converts_dp() {
        let config = ProgressConfig::for_scale_factor(1.5);
        assert_eq!(config.separator_length(), 6);
        assert_eq!(config.stroke_width(), 6.0);

        let config = ProgressConfig::for_scale_factor(0.1);
        assert_eq!(config.separator_length(), 1);
        assert_eq!(config.stroke_width(), 0.0);

        let config = Builder::with_scale_factor(2.0).build_config();
        assert_eq!(config.separator_length(), 8);
        assert_eq!(config.stroke_width(), 8.0);
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert_eq!(
            Builder::new().sections_count(0).unwrap_err(),
            ConfigError::SectionsCount(0)
        );
        assert_eq!(
            Builder::new().sections_count(-3).unwrap_err(),
            ConfigError::SectionsCount(-3)
        );
        assert_eq!(
            Builder::new().separator_length(-1).unwrap_err(),
            ConfigError::SeparatorLength(-1)
        );
        assert_eq!(Builder::new().speed(-1.0).unwrap_err(), ConfigError::Speed(-1.0));
        assert_eq!(
            Builder::new().stroke_width(-0.5).unwrap_err(),
            ConfigError::StrokeWidth(-0.5)
        );
        assert_eq!(
            Builder::new().colors(Vec::<Color>::new()).unwrap_err(),
            ConfigError::EmptyColors
        );
        assert!(Builder::new().speed(f32::NAN).is_err());
    }

    #[test]
    fn test_rejects_infinite_values() {
        assert_eq!(
            Builder::new().speed(f32::INFINITY).unwrap_err(),
            ConfigError::Speed(f32::INFINITY)
        );
        assert_eq!(
            Builder::new().stroke_width(f32::INFINITY).unwrap_err(),
            ConfigError::StrokeWidth(f32::INFINITY)
        );
        assert!(Builder::new().stroke_width(f32::NAN).is_err());
    }

    #[test]
    fn test_accepts_boundary_values() {
        let config = Builder::new()
            .separator_length(0)
            .and_then(|b| b.speed(0.0))
            .and_then(|b| b.stroke_width(0.0))
            .and_then(|b| b.sections_count(1))
            .map(Builder::build_config);
        let config = config.unwrap();
        assert_eq!(config.separator_length(), 0);
        assert_eq!(config.speed(), 0.0);
        assert_eq!(config.sections_count(), 1);
    }

    #[test]
    fn test_builders_do_not_share_defaults() {
        let a = Builder::new().sections_count(9).unwrap();
        let b = Builder::new();
        assert_eq!(a.build_config().sections_count(), 9);
        assert_eq!(b.build_config().sections_count(), DEFAULT_SECTIONS_COUNT);
    }

    #[test]
    fn test_color_replaces_palette() {
        let red = Color::rgb(1.0, 0.0, 0.0);
        let config = Builder::new()
            .colors([Color::WHITE, Color::BLACK])
            .unwrap()
            .color(red)
            .build_config();
        assert_eq!(config.colors(), &[red]);
    }
}

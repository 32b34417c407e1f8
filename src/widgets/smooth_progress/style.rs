use std::rc::Rc;

use super::config::{
    check_colors, check_sections_count, check_separator_length, check_speed, check_stroke_width,
    ProgressConfig,
};
use super::drawable::SmoothProgressDrawable;
use crate::animation::TimingFunction;
use crate::error::Result;
use crate::widgets::Color;

/// A partial set of overrides, typically resolved from a host theme.
///
/// Unset fields leave the target untouched. When both `color` and `colors`
/// are set, `colors` wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressStyle {
    pub color: Option<Color>,
    pub colors: Option<Vec<Color>>,
    pub sections_count: Option<i32>,
    pub separator_length: Option<i32>,
    pub stroke_width: Option<f32>,
    pub speed: Option<f32>,
    pub reversed: Option<bool>,
    pub mirror_mode: Option<bool>,
    pub interpolator: Option<TimingFunction>,
}

impl ProgressStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn colors(mut self, colors: impl Into<Vec<Color>>) -> Self {
        self.colors = Some(colors.into());
        self
    }

    pub fn sections_count(mut self, sections_count: i32) -> Self {
        self.sections_count = Some(sections_count);
        self
    }

    pub fn separator_length(mut self, separator_length: i32) -> Self {
        self.separator_length = Some(separator_length);
        self
    }

    pub fn stroke_width(mut self, stroke_width: f32) -> Self {
        self.stroke_width = Some(stroke_width);
        self
    }

    pub fn speed(mut self, speed: f32) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn reversed(mut self, reversed: bool) -> Self {
        self.reversed = Some(reversed);
        self
    }

    pub fn mirror_mode(mut self, mirror_mode: bool) -> Self {
        self.mirror_mode = Some(mirror_mode);
        self
    }

    pub fn interpolator(mut self, interpolator: TimingFunction) -> Self {
        self.interpolator = Some(interpolator);
        self
    }

    /// Check every set field without applying anything.
    pub fn validate(&self) -> Result<()> {
        if let Some(colors) = &self.colors {
            check_colors(colors)?;
        }
        if let Some(count) = self.sections_count {
            check_sections_count(count)?;
        }
        if let Some(length) = self.separator_length {
            check_separator_length(length)?;
        }
        if let Some(width) = self.stroke_width {
            check_stroke_width(width)?;
        }
        if let Some(speed) = self.speed {
            check_speed(speed)?;
        }
        Ok(())
    }

    /// Apply to a live drawable, all or nothing.
    pub fn apply(&self, drawable: &mut SmoothProgressDrawable) -> Result<()> {
        self.validate()?;
        if let Some(color) = self.color {
            drawable.set_color(color);
        }
        if let Some(colors) = &self.colors {
            drawable.set_colors(colors.clone())?;
        }
        if let Some(count) = self.sections_count {
            drawable.set_sections_count(count)?;
        }
        if let Some(length) = self.separator_length {
            drawable.set_separator_length(length)?;
        }
        if let Some(width) = self.stroke_width {
            drawable.set_stroke_width(width)?;
        }
        if let Some(speed) = self.speed {
            drawable.set_speed(speed)?;
        }
        if let Some(reversed) = self.reversed {
            drawable.set_reversed(reversed);
        }
        if let Some(mirror_mode) = self.mirror_mode {
            drawable.set_mirror_mode(mirror_mode);
        }
        if let Some(interpolator) = self.interpolator {
            drawable.set_interpolator(interpolator);
        }
        Ok(())
    }

    /// Copy set fields into a config. Callers validate first.
    pub(crate) fn apply_to_config(&self, config: &mut ProgressConfig) {
        if let Some(color) = self.color {
            config.colors = vec![color];
        }
        if let Some(colors) = &self.colors {
            config.colors = colors.clone();
        }
        if let Some(count) = self.sections_count {
            config.sections_count = count as u32;
        }
        if let Some(length) = self.separator_length {
            config.separator_length = length as u32;
        }
        if let Some(width) = self.stroke_width {
            config.stroke_width = width;
        }
        if let Some(speed) = self.speed {
            config.speed = speed;
        }
        if let Some(reversed) = self.reversed {
            config.reversed = reversed;
        }
        if let Some(mirror_mode) = self.mirror_mode {
            config.mirror_mode = mirror_mode;
        }
        if let Some(interpolator) = self.interpolator {
            config.interpolator = Rc::new(interpolator);
        }
    }
}

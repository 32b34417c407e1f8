use std::rc::Rc;

use super::config::{
    check_colors, check_sections_count, check_separator_length, check_speed, check_stroke_width,
    Builder, ProgressConfig,
};
use super::geometry::{compute_segments_into, Segment, SegmentLayout};
use crate::animation::driver::{AnimationDriver, Tick};
use crate::animation::Interpolator;
use crate::error::Result;
use crate::invalidation::ChangeFlags;
use crate::renderer::{Canvas, Stroke};
use crate::widgets::{Color, Rect};

/// The progress strip: configuration, animation state and drawing.
///
/// This type has no timer of its own. Drive it with
/// [`SmoothProgressBar`](super::SmoothProgressBar), or call
/// [`advance_frame`](Self::advance_frame) from an existing frame loop and
/// [`draw`](Self::draw) whenever the host repaints.
pub struct SmoothProgressDrawable {
    config: ProgressConfig,
    driver: AnimationDriver,
    alpha: u8,
    dirty: ChangeFlags,
    generation: u64,
    scratch: Vec<Segment>,
}

impl SmoothProgressDrawable {
    pub fn new(config: ProgressConfig) -> Self {
        let driver = AnimationDriver::new(config.sections_count);
        let scratch = Vec::with_capacity(config.sections_count as usize + 1);
        Self {
            config,
            driver,
            alpha: u8::MAX,
            dirty: ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT,
            generation: 0,
            scratch,
        }
    }

    pub fn builder() -> Builder {
        Builder::new()
    }

    pub fn config(&self) -> &ProgressConfig {
        &self.config
    }

    pub fn driver(&self) -> &AnimationDriver {
        &self.driver
    }

    pub(crate) fn driver_mut(&mut self) -> &mut AnimationDriver {
        &mut self.driver
    }

    pub fn is_running(&self) -> bool {
        self.driver.is_running()
    }

    // Configuration surface

    pub fn interpolator(&self) -> &dyn Interpolator {
        self.config.interpolator.as_ref()
    }

    pub fn set_interpolator(&mut self, interpolator: impl Interpolator + 'static) {
        self.config.interpolator = Rc::new(interpolator);
        self.invalidate(ChangeFlags::NEEDS_PAINT);
    }

    pub fn colors(&self) -> &[Color] {
        &self.config.colors
    }

    /// Replace the palette. The color sequence restarts from the first color.
    pub fn set_colors(&mut self, colors: impl Into<Vec<Color>>) -> Result<()> {
        let colors = colors.into();
        check_colors(&colors)?;
        self.config.colors = colors;
        self.driver.reset_color_index();
        self.invalidate(ChangeFlags::NEEDS_PAINT);
        Ok(())
    }

    /// First color of the palette.
    pub fn color(&self) -> Color {
        self.config
            .colors
            .first()
            .copied()
            .unwrap_or(Color::TRANSPARENT)
    }

    pub fn set_color(&mut self, color: Color) {
        self.config.colors = vec![color];
        self.driver.reset_color_index();
        self.invalidate(ChangeFlags::NEEDS_PAINT);
    }

    pub fn speed(&self) -> f32 {
        self.config.speed
    }

    pub fn set_speed(&mut self, speed: f32) -> Result<()> {
        self.config.speed = check_speed(speed)?;
        self.invalidate(ChangeFlags::NEEDS_PAINT);
        Ok(())
    }

    pub fn sections_count(&self) -> u32 {
        self.config.sections_count
    }

    /// Change the section count; the animation offset is rescaled with it.
    pub fn set_sections_count(&mut self, sections_count: i32) -> Result<()> {
        let sections_count = check_sections_count(sections_count)?;
        self.config.sections_count = sections_count;
        self.driver.set_sections_count(sections_count);
        self.invalidate(ChangeFlags::NEEDS_PAINT);
        Ok(())
    }

    pub fn separator_length(&self) -> u32 {
        self.config.separator_length
    }

    pub fn set_separator_length(&mut self, separator_length: i32) -> Result<()> {
        self.config.separator_length = check_separator_length(separator_length)?;
        self.invalidate(ChangeFlags::NEEDS_PAINT);
        Ok(())
    }

    pub fn stroke_width(&self) -> f32 {
        self.config.stroke_width
    }

    pub fn set_stroke_width(&mut self, stroke_width: f32) -> Result<()> {
        self.config.stroke_width = check_stroke_width(stroke_width)?;
        self.invalidate(ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT);
        Ok(())
    }

    pub fn reversed(&self) -> bool {
        self.config.reversed
    }

    pub fn set_reversed(&mut self, reversed: bool) {
        if self.config.reversed == reversed {
            return;
        }
        self.config.reversed = reversed;
        self.invalidate(ChangeFlags::NEEDS_PAINT);
    }

    pub fn mirror_mode(&self) -> bool {
        self.config.mirror_mode
    }

    pub fn set_mirror_mode(&mut self, mirror_mode: bool) {
        if self.config.mirror_mode == mirror_mode {
            return;
        }
        self.config.mirror_mode = mirror_mode;
        self.invalidate(ChangeFlags::NEEDS_PAINT);
    }

    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    /// Opacity applied on top of every palette color.
    pub fn set_alpha(&mut self, alpha: u8) {
        if self.alpha == alpha {
            return;
        }
        self.alpha = alpha;
        self.invalidate(ChangeFlags::NEEDS_PAINT);
    }

    /// Height the strip needs to show a full stroke.
    pub fn intrinsic_height(&self) -> f32 {
        self.config.stroke_width.ceil()
    }

    // Animation

    /// Current animation phase.
    pub fn offset(&self) -> f32 {
        self.driver.offset()
    }

    /// Jump to a phase, wrapped into one section.
    pub fn set_offset(&mut self, offset: f32) {
        self.driver.set_offset(offset);
        self.invalidate(ChangeFlags::NEEDS_PAINT);
    }

    /// Advance one frame at the configured speed.
    pub fn advance_frame(&mut self) -> Tick {
        let tick = self.driver.advance(self.config.speed);
        self.invalidate(ChangeFlags::NEEDS_PAINT);
        tick
    }

    // Invalidation

    pub(crate) fn invalidate(&mut self, flags: ChangeFlags) {
        self.dirty |= flags;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Bumped on every invalidation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn needs_paint(&self) -> bool {
        self.dirty.contains(ChangeFlags::NEEDS_PAINT)
    }

    pub fn needs_layout(&self) -> bool {
        self.dirty.contains(ChangeFlags::NEEDS_LAYOUT)
    }

    /// Return and clear the pending change flags.
    pub fn take_change_flags(&mut self) -> ChangeFlags {
        std::mem::take(&mut self.dirty)
    }

    // Drawing

    /// Layout inputs for a frame drawn into `bounds`. Consumes a pending
    /// turn, so call it once per frame.
    fn frame_layout(&mut self, bounds: Rect) -> SegmentLayout {
        let color_count = self.config.colors.len();
        SegmentLayout {
            bounds_width: bounds.width.max(0.0) as u32,
            sections_count: self.config.sections_count,
            separator_length: self.config.separator_length,
            offset: self.driver.offset(),
            mirror_mode: self.config.mirror_mode,
            y: bounds.center_y(),
            start_color: self.driver.frame_start_color(color_count),
            color_count,
        }
    }

    /// Segments for the next frame, before mirroring and reversal.
    ///
    /// This consumes a pending turn just like [`draw`](Self::draw); use one
    /// or the other per frame.
    pub fn segments(&mut self, bounds: Rect) -> &[Segment] {
        let layout = self.frame_layout(bounds);
        compute_segments_into(&layout, self.config.interpolator.as_ref(), &mut self.scratch);
        &self.scratch
    }

    /// Paint one frame into `bounds`.
    ///
    /// The canvas state is saved and restored around the call.
    pub fn draw(&mut self, canvas: &mut dyn Canvas, bounds: Rect) {
        let layout = self.frame_layout(bounds);
        compute_segments_into(&layout, self.config.interpolator.as_ref(), &mut self.scratch);

        canvas.save();
        canvas.clip_rect(bounds);
        canvas.translate(bounds.x, 0.0);
        if self.config.reversed {
            canvas.translate(layout.bounds_width as f32, 0.0);
            canvas.scale(-1.0, 1.0);
        }

        let width = layout.effective_width() as f32;
        let alpha = self.alpha as f32 / 255.0;
        for segment in &self.scratch {
            debug_assert!(segment.color_index < self.config.colors.len());
            let color = self.config.colors[segment.color_index].with_alpha_factor(alpha);
            let stroke = Stroke::new(color, self.config.stroke_width);
            let (start, end, y) = (segment.start_x, segment.end_x, segment.y);

            if !self.config.mirror_mode {
                canvas.draw_line(start, y, end, y, &stroke);
            } else if self.config.reversed {
                canvas.draw_line(width + start, y, width + end, y, &stroke);
                canvas.draw_line(width - start, y, width - end, y, &stroke);
            } else {
                canvas.draw_line(start, y, end, y, &stroke);
                canvas.draw_line(width * 2.0 - start, y, width * 2.0 - end, y, &stroke);
            }
        }

        canvas.restore();
        self.dirty.remove(ChangeFlags::NEEDS_PAINT);
    }
}

impl Default for SmoothProgressDrawable {
    fn default() -> Self {
        Self::new(ProgressConfig::default())
    }
}

impl std::fmt::Debug for SmoothProgressDrawable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmoothProgressDrawable")
            .field("config", &self.config)
            .field("driver", &self.driver)
            .field("alpha", &self.alpha)
            .field("dirty", &self.dirty)
            .finish()
    }
}

//! Per-frame section layout.
//!
//! The strip is treated as one easing curve sampled `sections_count + 1`
//! times: sample `i` covers `[i/n + offset - 1/n, i/n + offset]` in curve
//! input space, and its share of the curve output becomes a section plus the
//! separator that follows it. Shifting `offset` slides every sample along the
//! curve, which makes sections grow and shrink as they scroll.

use crate::animation::driver::increment_color;
use crate::animation::Interpolator;

/// One colored section to draw, in pixels from the strip's leading edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start_x: f32,
    pub end_x: f32,
    pub y: f32,
    pub color_index: usize,
}

/// Inputs for one frame of layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentLayout {
    /// Full strip width in whole pixels
    pub bounds_width: u32,
    pub sections_count: u32,
    pub separator_length: u32,
    /// Animation phase in `[0, 1 / sections_count)`
    pub offset: f32,
    /// Lay out half the strip; the drawable mirrors it onto the other half
    pub mirror_mode: bool,
    /// Vertical center line of the strip
    pub y: f32,
    /// Color index of the first sample
    pub start_color: usize,
    pub color_count: usize,
}

impl SegmentLayout {
    /// Width the sections are spread over.
    pub fn effective_width(&self) -> u32 {
        if self.mirror_mode {
            self.bounds_width / 2
        } else {
            self.bounds_width
        }
    }

    /// Width the easing output is mapped onto. The extra `sections_count`
    /// pixels make up for truncating each section to whole pixels.
    ///
    /// Summed in `f32`: every operand may be close to `u32::MAX`.
    pub fn padded_width(&self) -> f32 {
        self.effective_width() as f32 + self.separator_length as f32 + self.sections_count as f32
    }
}

/// Lay out one frame. Only non-empty segments are returned.
pub fn compute_segments(layout: &SegmentLayout, easing: &dyn Interpolator) -> Vec<Segment> {
    let mut segments = Vec::with_capacity(layout.sections_count as usize + 1);
    compute_segments_into(layout, easing, &mut segments);
    segments
}

/// Same as [`compute_segments`], reusing `out`'s allocation.
pub fn compute_segments_into(
    layout: &SegmentLayout,
    easing: &dyn Interpolator,
    out: &mut Vec<Segment>,
) {
    out.clear();
    debug_assert!(layout.sections_count > 0);
    debug_assert!(layout.color_count > 0);
    debug_assert!(layout.start_color < layout.color_count);

    let effective_width = layout.effective_width() as f32;
    let width = layout.padded_width();
    let separator = layout.separator_length as f32;
    let section_ratio = 1.0 / layout.sections_count as f32;

    let mut prev_end = 0.0f32;
    let mut color_index = layout.start_color;

    for i in 0..=layout.sections_count {
        let x_offset = section_ratio * i as f32 + layout.offset;
        let prev = (x_offset - section_ratio).max(0.0);
        let ratio = (easing.interpolate(prev) - easing.interpolate(x_offset.min(1.0))).abs();
        // whole pixels only; truncation is part of the look
        let section_width = (width * ratio).trunc();

        let space = if section_width + prev < width {
            section_width.min(separator)
        } else {
            0.0
        };
        let draw_length = (section_width - space).max(0.0);
        let end = prev_end + draw_length;

        if end > prev_end {
            out.push(Segment {
                start_x: prev_end.min(effective_width),
                end_x: end.min(effective_width),
                y: layout.y,
                color_index,
            });
        }

        prev_end = end + space;
        color_index = increment_color(color_index, layout.color_count);
    }
}

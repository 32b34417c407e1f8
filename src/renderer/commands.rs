//! Draw command definitions recorded by [`PaintContext`](super::PaintContext).

use crate::widgets::{Color, Rect};

/// Paint used for a line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    /// Line color
    pub color: Color,
    /// Line thickness in device pixels
    pub width: f32,
}

impl Stroke {
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

/// A single draw operation in screen coordinates.
///
/// Endpoints already have the canvas transform applied, so a reversed bar
/// records lines that run right to left.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Straight line with butt caps.
    Line {
        from: (f32, f32),
        to: (f32, f32),
        stroke: Stroke,
        /// Active clip rectangle when the line was drawn
        clip: Option<Rect>,
    },
}

impl DrawCommand {
    pub fn line(from: (f32, f32), to: (f32, f32), stroke: Stroke, clip: Option<Rect>) -> Self {
        Self::Line {
            from,
            to,
            stroke,
            clip,
        }
    }

    /// Horizontal extent `(min_x, max_x)` of the command.
    pub fn x_span(&self) -> (f32, f32) {
        match self {
            DrawCommand::Line { from, to, .. } => (from.0.min(to.0), from.0.max(to.0)),
        }
    }

    pub fn color(&self) -> Color {
        match self {
            DrawCommand::Line { stroke, .. } => stroke.color,
        }
    }
}

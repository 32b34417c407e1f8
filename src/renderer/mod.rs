//! Canvas capability and the canvases shipped with the crate.
//!
//! [`Canvas`] is the drawing surface the progress bar paints onto. Hosts with
//! their own toolkit implement it over their native canvas; the crate ships a
//! recording [`PaintContext`] and an image-backed [`RasterCanvas`].

pub mod commands;
pub mod raster;

pub use commands::{DrawCommand, Stroke};
pub use raster::RasterCanvas;

use crate::transform::Transform;
use crate::widgets::Rect;

/// Drawing surface with a transform and clip that follow save/restore.
pub trait Canvas {
    /// Push the current transform and clip.
    fn save(&mut self);

    /// Pop back to the last saved transform and clip.
    fn restore(&mut self);

    /// Intersect the clip with `rect`, given in current coordinates.
    fn clip_rect(&mut self, rect: Rect);

    fn translate(&mut self, dx: f32, dy: f32);

    fn scale(&mut self, sx: f32, sy: f32);

    fn draw_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, stroke: &Stroke);
}

/// Transform and clip shared by the bundled canvases.
#[derive(Debug, Clone, Default)]
pub(crate) struct CanvasState {
    pub transform: Transform,
    pub clip: Option<Rect>,
    stack: Vec<(Transform, Option<Rect>)>,
}

impl CanvasState {
    pub fn save(&mut self) {
        self.stack.push((self.transform, self.clip));
    }

    pub fn restore(&mut self) {
        if let Some((transform, clip)) = self.stack.pop() {
            self.transform = transform;
            self.clip = clip;
        } else {
            log::warn!("canvas restore without matching save");
        }
    }

    pub fn clip_rect(&mut self, rect: Rect) {
        // Only translate/scale reach the canvas, so the mapped rect stays
        // axis aligned.
        let (x0, y0) = self.transform.transform_point(rect.x, rect.y);
        let (x1, y1) = self.transform.transform_point(rect.right(), rect.bottom());
        let screen = Rect::from_corners(x0, y0, x1, y1);
        self.clip = Some(match self.clip {
            Some(current) => current.intersect(&screen),
            None => screen,
        });
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.transform = self.transform.then(&Transform::translate(dx, dy));
    }

    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.transform = self.transform.then(&Transform::scale_xy(sx, sy));
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

/// Canvas that records what was drawn, in screen coordinates.
#[derive(Debug, Default)]
pub struct PaintContext {
    state: CanvasState,
    commands: Vec<DrawCommand>,
}

impl PaintContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn current_transform(&self) -> Transform {
        self.state.transform
    }

    pub fn current_clip(&self) -> Option<Rect> {
        self.state.clip
    }

    /// Number of unmatched `save` calls.
    pub fn save_depth(&self) -> usize {
        self.state.depth()
    }
}

impl Canvas for PaintContext {
    fn save(&mut self) {
        self.state.save();
    }

    fn restore(&mut self) {
        self.state.restore();
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.state.clip_rect(rect);
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.state.translate(dx, dy);
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.state.scale(sx, sy);
    }

    fn draw_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, stroke: &Stroke) {
        let from = self.state.transform.transform_point(x0, y0);
        let to = self.state.transform.transform_point(x1, y1);
        self.commands
            .push(DrawCommand::line(from, to, *stroke, self.state.clip));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::Color;

    #[test]
    fn test_records_transformed_lines() {
        let mut ctx = PaintContext::new();
        ctx.translate(100.0, 0.0);
        ctx.scale(-1.0, 1.0);
        ctx.draw_line(10.0, 5.0, 30.0, 5.0, &Stroke::new(Color::WHITE, 2.0));

        match &ctx.commands()[0] {
            DrawCommand::Line { from, to, .. } => {
                assert_eq!(*from, (90.0, 5.0));
                assert_eq!(*to, (70.0, 5.0));
            }
        }
    }

    #[test]
    fn test_save_restore_clip_and_transform() {
        let mut ctx = PaintContext::new();
        ctx.save();
        ctx.clip_rect(Rect::new(0.0, 0.0, 50.0, 10.0));
        ctx.translate(5.0, 0.0);
        ctx.clip_rect(Rect::new(0.0, 0.0, 100.0, 4.0));
        assert_eq!(ctx.current_clip(), Some(Rect::new(5.0, 0.0, 45.0, 4.0)));
        ctx.restore();

        assert_eq!(ctx.current_clip(), None);
        assert!(ctx.current_transform().is_identity());
        assert_eq!(ctx.save_depth(), 0);
    }

    #[test]
    fn test_clip_under_flip_stays_normalized() {
        let mut ctx = PaintContext::new();
        ctx.translate(100.0, 0.0);
        ctx.scale(-1.0, 1.0);
        ctx.clip_rect(Rect::new(0.0, 0.0, 40.0, 8.0));
        assert_eq!(ctx.current_clip(), Some(Rect::new(60.0, 0.0, 40.0, 8.0)));
    }
}

//! Software canvas rasterizing strokes into an RGBA image.

use image::{Rgba, RgbaImage};

use super::{Canvas, CanvasState, Stroke};
use crate::widgets::{Color, Rect};

/// Canvas backed by an [`RgbaImage`].
///
/// Strokes have butt caps. Axis-aligned lines are filled as rectangles, other
/// lines are stamped along their length; no anti-aliasing.
pub struct RasterCanvas {
    image: RgbaImage,
    state: CanvasState,
}

impl RasterCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
            state: CanvasState::default(),
        }
    }

    /// Fill every pixel with `color`, ignoring clip and transform.
    pub fn clear(&mut self, color: Color) {
        let pixel = Rgba(color.to_rgba8());
        for p in self.image.pixels_mut() {
            *p = pixel;
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.image.get_pixel_checked(x, y).map(|p| p.0)
    }

    fn visible_area(&self) -> Rect {
        let full = Rect::new(0.0, 0.0, self.image.width() as f32, self.image.height() as f32);
        match self.state.clip {
            Some(clip) => full.intersect(&clip),
            None => full,
        }
    }

    /// Fill the pixels whose centers fall inside `rect`.
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let area = rect.intersect(&self.visible_area());
        if area.is_empty() {
            return;
        }
        let x_start = (area.x - 0.5).ceil().max(0.0) as u32;
        let y_start = (area.y - 0.5).ceil().max(0.0) as u32;
        let x_end = (area.right() - 0.5).ceil().max(0.0) as u32;
        let y_end = (area.bottom() - 0.5).ceil().max(0.0) as u32;
        for y in y_start..y_end.min(self.image.height()) {
            for x in x_start..x_end.min(self.image.width()) {
                blend(self.image.get_pixel_mut(x, y), color);
            }
        }
    }
}

impl Canvas for RasterCanvas {
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
        if stroke.width <= 0.0 || stroke.color.a <= 0.0 {
            return;
        }
        let (x0, y0) = self.state.transform.transform_point(x0, y0);
        let (x1, y1) = self.state.transform.transform_point(x1, y1);
        let half = stroke.width / 2.0;

        if y0 == y1 {
            self.fill_rect(Rect::from_corners(x0, y0 - half, x1, y1 + half), stroke.color);
            return;
        }
        if x0 == x1 {
            self.fill_rect(Rect::from_corners(x0 - half, y0, x1 + half, y1), stroke.color);
            return;
        }

        // Stamp squares along the line. Overlapping stamps would blend twice,
        // so draw into a coverage mask first.
        let (dx, dy) = (x1 - x0, y1 - y0);
        let steps = (dx.abs().max(dy.abs()) * 2.0).ceil() as u32;
        let area = self.visible_area();
        let mut covered = std::collections::HashSet::new();
        for step in 0..=steps {
            let t = step as f32 / steps as f32;
            let (cx, cy) = (x0 + dx * t, y0 + dy * t);
            let stamp = Rect::new(cx - half, cy - half, stroke.width, stroke.width).intersect(&area);
            if stamp.is_empty() {
                continue;
            }
            let xs = (stamp.x - 0.5).ceil().max(0.0) as u32;
            let ys = (stamp.y - 0.5).ceil().max(0.0) as u32;
            let xe = (stamp.right() - 0.5).ceil().max(0.0) as u32;
            let ye = (stamp.bottom() - 0.5).ceil().max(0.0) as u32;
            for y in ys..ye.min(self.image.height()) {
                for x in xs..xe.min(self.image.width()) {
                    covered.insert((x, y));
                }
            }
        }
        for (x, y) in covered {
            blend(self.image.get_pixel_mut(x, y), stroke.color);
        }
    }
}

/// Source-over blend of `color` onto `dst`.
fn blend(dst: &mut Rgba<u8>, color: Color) {
    let src = color.to_rgba8();
    let alpha = src[3] as u32;
    if alpha == 255 {
        *dst = Rgba(src);
        return;
    }
    let inv = 255 - alpha;
    for i in 0..3 {
        dst.0[i] = ((src[i] as u32 * alpha + dst.0[i] as u32 * inv) / 255) as u8;
    }
    dst.0[3] = (alpha + dst.0[3] as u32 * inv / 255).min(255) as u8;
}

//! Raster surface rendered with `vello_cpu`.

use std::fmt;
use std::sync::Arc;

use starfield_core::{Circle, Line, Point, Size};
use vello_cpu::kurbo::{self, Affine, Rect, Shape, Stroke};
use vello_cpu::peniko::{Gradient, ImageSampler, color::PremulRgba8};
use vello_cpu::{Image, ImageSource, RenderContext};

use crate::surface::{CompositeMode, Surface};

/// Flattening tolerance for circles and lines, in pixels.
const TOLERANCE: f64 = 0.1;

/// Premultiplied RGBA8 pixels plus the render context that draws into them.
///
/// Draw calls are recorded on the context and land in the pixels on
/// [`Surface::flush`].
pub struct Pixmap {
    size: Size,
    pixels: Arc<vello_cpu::Pixmap>,
    ctx: RenderContext,
    composite: CompositeMode,
    global_alpha: f32,
}

/// `vello_cpu` dimensions for `size`, at least one pixel and at most `u16::MAX`.
fn dims(size: Size) -> (u16, u16) {
    let clamp = |v: u32| u16::try_from(v.max(1)).unwrap_or(u16::MAX);
    (clamp(size.width), clamp(size.height))
}

fn point_to_cpu(p: Point) -> kurbo::Point {
    kurbo::Point::new(p.x, p.y)
}

impl Pixmap {
    /// Create a fully transparent pixmap.
    pub fn new(size: Size) -> Self {
        let (w, h) = dims(size);
        Self {
            size: Size::new(u32::from(w), u32::from(h)),
            pixels: Arc::new(vello_cpu::Pixmap::new(w, h)),
            ctx: RenderContext::new(w, h),
            composite: CompositeMode::SourceOver,
            global_alpha: 1.0,
        }
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    /// Premultiplied color at `(x, y)` as of the last flush, or `None`
    /// outside the pixmap.
    pub fn pixel(&self, x: u32, y: u32) -> Option<PremulRgba8> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let i = (y as usize * self.size.width as usize + x as usize) * 4;
        match *self.pixels.data_as_u8_slice().get(i..i + 4)? {
            [r, g, b, a] => Some(PremulRgba8 { r, g, b, a }),
            _ => None,
        }
    }

    /// Image paint sharing this pixmap's pixels.
    fn as_image(&self) -> Image {
        Image {
            image: ImageSource::Pixmap(Arc::clone(&self.pixels)),
            sampler: ImageSampler::default(),
        }
    }

    /// Record `draw` wrapped in the layers for the current composite mode
    /// and global alpha.
    fn layered(&mut self, draw: impl FnOnce(&mut RenderContext)) {
        if self.global_alpha <= 0.0 {
            return;
        }
        let blend = self.composite.blend_layer();
        let faded = self.global_alpha < 1.0;

        if let Some(mode) = blend {
            self.ctx.push_blend_layer(mode);
        }
        if faded {
            self.ctx.push_opacity_layer(self.global_alpha);
        }
        draw(&mut self.ctx);
        if faded {
            self.ctx.pop_layer();
        }
        if blend.is_some() {
            self.ctx.pop_layer();
        }
    }

    #[cfg(test)]
    pub(crate) fn set_pixel(&mut self, x: u32, y: u32, pixel: PremulRgba8) {
        let i = (y as usize * self.size.width as usize + x as usize) * 4;
        Arc::make_mut(&mut self.pixels).data_as_u8_slice_mut()[i..i + 4]
            .copy_from_slice(&[pixel.r, pixel.g, pixel.b, pixel.a]);
    }
}

impl fmt::Debug for Pixmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pixmap")
            .field("size", &self.size)
            .field("composite", &self.composite)
            .field("global_alpha", &self.global_alpha)
            .finish_non_exhaustive()
    }
}

impl Surface for Pixmap {
    fn size(&self) -> Size {
        self.size
    }

    fn resize(&mut self, size: Size) {
        let (w, h) = dims(size);
        self.size = Size::new(u32::from(w), u32::from(h));
        self.pixels = Arc::new(vello_cpu::Pixmap::new(w, h));
        self.ctx = RenderContext::new(w, h);
    }

    fn set_composite(&mut self, mode: CompositeMode) {
        self.composite = mode;
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.global_alpha = alpha.clamp(0.0, 1.0);
    }

    fn clear(&mut self) {
        self.ctx.reset();
        Arc::make_mut(&mut self.pixels).data_as_u8_slice_mut().fill(0);
    }

    fn fill(&mut self, paint: &Gradient) {
        let rect = Rect::new(0.0, 0.0, f64::from(self.size.width), f64::from(self.size.height));
        let paint = paint.clone();
        self.layered(|ctx| {
            ctx.set_transform(Affine::IDENTITY);
            ctx.set_paint(paint);
            ctx.fill_rect(&rect);
        });
    }

    fn fill_circle(&mut self, circle: Circle, paint: &Gradient) {
        if circle.radius <= 0.0 {
            return;
        }
        let path = kurbo::Circle::new(point_to_cpu(circle.center), circle.radius).to_path(TOLERANCE);
        let paint = paint.clone();
        self.layered(|ctx| {
            ctx.set_transform(Affine::IDENTITY);
            ctx.set_paint(paint);
            ctx.fill_path(&path);
        });
    }

    fn draw_image(&mut self, image: &Pixmap, origin: Point, side: f64) {
        if side <= 0.0 {
            return;
        }
        let w = f64::from(image.size.width);
        let h = f64::from(image.size.height);
        let transform =
            Affine::translate((origin.x, origin.y)) * Affine::scale_non_uniform(side / w, side / h);
        let paint = image.as_image();
        self.layered(|ctx| {
            ctx.set_transform(transform);
            ctx.set_paint(paint);
            ctx.fill_rect(&Rect::new(0.0, 0.0, w, h));
            ctx.set_transform(Affine::IDENTITY);
        });
    }

    fn stroke_line(&mut self, line: Line, width: f64, paint: &Gradient) {
        let path = kurbo::Line::new(point_to_cpu(line.p0), point_to_cpu(line.p1)).to_path(TOLERANCE);
        let paint = paint.clone();
        self.layered(|ctx| {
            ctx.set_transform(Affine::IDENTITY);
            ctx.set_stroke(Stroke::new(width));
            ctx.set_paint(paint);
            ctx.stroke_path(&path);
        });
    }

    fn flush(&mut self) {
        self.ctx.flush();
        self.ctx.render_to_pixmap(Arc::make_mut(&mut self.pixels));
        self.ctx.reset();
    }
}

#[cfg(test)]
mod tests {
    use vello_cpu::peniko::Color;

    use super::*;

    fn solid(color: Color) -> Gradient {
        Gradient::new_linear((0.0, 0.0), (1.0, 0.0)).with_stops([(0.0, color), (1.0, color)])
    }

    fn assert_near(pixel: Option<PremulRgba8>, expected: [u8; 4]) {
        let pixel = pixel.expect("pixel inside the pixmap");
        let actual = [pixel.r, pixel.g, pixel.b, pixel.a];
        for (a, e) in actual.iter().zip(expected) {
            assert!(a.abs_diff(e) <= 2, "{actual:?} vs {expected:?}");
        }
    }

    #[test]
    fn test_new_is_transparent() {
        let pm = Pixmap::new(Size::new(4, 3));
        assert_eq!(pm.width(), 4);
        assert_eq!(pm.height(), 3);
        assert_near(pm.pixel(3, 2), [0, 0, 0, 0]);
        assert!(pm.pixel(4, 0).is_none());
        assert!(pm.pixel(0, 3).is_none());
    }

    #[test]
    fn test_draws_land_on_flush() {
        let mut pm = Pixmap::new(Size::new(8, 8));
        pm.fill(&solid(Color::from_rgb8(10, 14, 23)));
        assert_near(pm.pixel(0, 0), [0, 0, 0, 0]);
        pm.flush();
        assert_near(pm.pixel(0, 0), [10, 14, 23, 255]);
        assert_near(pm.pixel(7, 7), [10, 14, 23, 255]);
    }

    #[test]
    fn test_lighter_adds_and_saturates() {
        let mut pm = Pixmap::new(Size::new(2, 2));
        let grey = solid(Color::from_rgb8(153, 153, 153));
        pm.fill(&grey);
        pm.set_composite(CompositeMode::Lighter);
        pm.fill(&grey);
        pm.flush();
        assert_near(pm.pixel(1, 1), [255, 255, 255, 255]);
    }

    #[test]
    fn test_global_alpha_blends_over() {
        let mut pm = Pixmap::new(Size::new(1, 1));
        pm.fill(&solid(Color::BLACK));
        pm.set_global_alpha(0.5);
        pm.fill(&solid(Color::WHITE));
        pm.set_global_alpha(0.0);
        pm.fill(&solid(Color::WHITE));
        pm.flush();
        assert_near(pm.pixel(0, 0), [128, 128, 128, 255]);
    }

    #[test]
    fn test_clear_and_resize() {
        let mut pm = Pixmap::new(Size::new(2, 2));
        pm.fill(&solid(Color::WHITE));
        pm.flush();
        pm.clear();
        assert_near(pm.pixel(1, 1), [0, 0, 0, 0]);

        pm.resize(Size::new(5, 1));
        assert_eq!(pm.size(), Size::new(5, 1));
        assert!(pm.pixel(4, 0).is_some());
        assert!(pm.pixel(0, 1).is_none());

        pm.resize(Size::new(0, 0));
        assert_eq!(pm.size(), Size::new(1, 1));
    }

    #[test]
    fn test_draw_image_scales_into_square() {
        let mut sprite = Pixmap::new(Size::new(4, 4));
        sprite.fill(&solid(Color::WHITE));
        sprite.flush();

        let mut pm = Pixmap::new(Size::new(8, 8));
        pm.draw_image(&sprite, Point::new(-2.0, -2.0), 4.0);
        pm.draw_image(&sprite, Point::new(20.0, 20.0), 4.0);
        pm.flush();
        assert_near(pm.pixel(0, 0), [255, 255, 255, 255]);
        assert_near(pm.pixel(1, 1), [255, 255, 255, 255]);
        assert_near(pm.pixel(3, 3), [0, 0, 0, 0]);
        assert_near(pm.pixel(7, 7), [0, 0, 0, 0]);
    }

    #[test]
    fn test_stroke_line_covers_segment_only() {
        let mut pm = Pixmap::new(Size::new(10, 10));
        let line = Line::new((1.0, 5.0), (9.0, 5.0));
        pm.stroke_line(line, 2.0, &solid(Color::WHITE));
        pm.flush();
        assert_near(pm.pixel(5, 4), [255, 255, 255, 255]);
        assert_near(pm.pixel(5, 5), [255, 255, 255, 255]);
        assert_near(pm.pixel(5, 0), [0, 0, 0, 0]);
        assert_near(pm.pixel(5, 8), [0, 0, 0, 0]);
    }

    #[test]
    fn test_fill_circle_stays_inside_disc() {
        let mut pm = Pixmap::new(Size::new(20, 20));
        pm.fill_circle(Circle::new((10.0, 10.0), 5.0), &solid(Color::WHITE));
        pm.fill_circle(Circle::new((10.0, 10.0), 0.0), &solid(Color::BLACK));
        pm.flush();
        assert_near(pm.pixel(10, 10), [255, 255, 255, 255]);
        assert_near(pm.pixel(0, 0), [0, 0, 0, 0]);
        assert_near(pm.pixel(19, 10), [0, 0, 0, 0]);
    }
}

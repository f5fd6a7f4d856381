//! The 2D drawing surface the animator paints on.

use starfield_core::{Circle, Line, Point, Size};
use vello_cpu::peniko::{BlendMode, Compose, Gradient, Mix};

use crate::pixmap::Pixmap;

/// How new pixels combine with what is already on the surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompositeMode {
    /// Standard alpha blending.
    #[default]
    SourceOver,
    /// Additive blending, channels saturate at full intensity.
    Lighter,
}

impl CompositeMode {
    /// Blend layer needed for this mode, `None` for plain source-over.
    pub fn blend_layer(self) -> Option<BlendMode> {
        match self {
            CompositeMode::SourceOver => None,
            CompositeMode::Lighter => Some(BlendMode::new(Mix::Normal, Compose::Plus)),
        }
    }
}

/// Raster canvas with the handful of primitives the starfield needs.
///
/// Drawing calls honour the current composite mode and global alpha. What
/// is drawn becomes visible once [`Surface::flush`] is called.
pub trait Surface {
    /// Current pixel dimensions.
    fn size(&self) -> Size;

    /// Change the pixel dimensions. Contents are discarded.
    fn resize(&mut self, size: Size);

    fn set_composite(&mut self, mode: CompositeMode);

    /// Opacity multiplier applied to every following draw, clamped to `0.0..=1.0`.
    fn set_global_alpha(&mut self, alpha: f32);

    /// Reset every pixel to transparent and drop pending draws.
    fn clear(&mut self);

    /// Paint the whole surface.
    fn fill(&mut self, paint: &Gradient);

    fn fill_circle(&mut self, circle: Circle, paint: &Gradient);

    /// Draw `image` scaled into the square at `origin` with side `side`.
    fn draw_image(&mut self, image: &Pixmap, origin: Point, side: f64);

    fn stroke_line(&mut self, line: Line, width: f64, paint: &Gradient);

    /// Rasterize everything drawn since the last flush.
    fn flush(&mut self);
}

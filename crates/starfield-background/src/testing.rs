//! Test doubles for the drawing surface and the host.

use starfield_core::{Circle, Line, Point, Size};
use vello_cpu::peniko::Gradient;

use crate::host::Host;
use crate::pixmap::Pixmap;
use crate::surface::{CompositeMode, Surface};

/// Surface that counts draw calls instead of rasterizing.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub size: Size,
    pub composite: CompositeMode,
    pub global_alpha: f32,
    pub resizes: usize,
    pub clears: usize,
    pub fills: usize,
    pub circle_fills: usize,
    pub images: usize,
    pub lines: usize,
    pub flushes: usize,
}

impl RecordingSurface {
    /// Forget the draw counts, keeping size and state.
    pub fn reset_counts(&mut self) {
        self.clears = 0;
        self.fills = 0;
        self.circle_fills = 0;
        self.images = 0;
        self.lines = 0;
        self.flushes = 0;
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn resize(&mut self, size: Size) {
        self.size = size;
        self.resizes += 1;
    }

    fn set_composite(&mut self, mode: CompositeMode) {
        self.composite = mode;
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        assert!((0.0..=1.0).contains(&alpha), "global alpha {alpha} out of range");
        self.global_alpha = alpha;
    }

    fn clear(&mut self) {
        self.clears += 1;
    }

    fn fill(&mut self, _paint: &Gradient) {
        self.fills += 1;
    }

    fn fill_circle(&mut self, _circle: Circle, _paint: &Gradient) {
        self.circle_fills += 1;
    }

    fn draw_image(&mut self, _image: &Pixmap, _origin: Point, _side: f64) {
        self.images += 1;
    }

    fn stroke_line(&mut self, _line: Line, _width: f64, _paint: &Gradient) {
        self.lines += 1;
    }

    fn flush(&mut self) {
        self.flushes += 1;
    }
}

/// Host with fixed answers.
#[derive(Debug, Clone)]
pub struct FakeHost {
    pub window: Size,
    pub container: Option<Size>,
    pub reduced_motion: bool,
    pub hidden: bool,
}

impl Default for FakeHost {
    fn default() -> Self {
        Self {
            window: Size::new(160, 96),
            container: Some(Size::new(80, 40)),
            reduced_motion: false,
            hidden: false,
        }
    }
}

impl Host for FakeHost {
    fn window_size(&self) -> Size {
        self.window
    }

    fn container_bounds(&self) -> Option<Size> {
        self.container
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn page_hidden(&self) -> bool {
        self.hidden
    }
}

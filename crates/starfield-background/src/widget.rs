//! Paint a pixmap into a ratatui buffer using half-block cells.

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};
use starfield_core::Size;

use crate::color::to_terminal_color;
use crate::pixmap::Pixmap;

/// Upper half block: foreground is the top pixel, background the bottom one.
const HALF_BLOCK: &str = "▀";

/// Pixel size of a surface covering `area`, two pixel rows per cell.
pub fn surface_size(area: Rect) -> Size {
    Size::new(u32::from(area.width), u32::from(area.height) * 2)
}

/// Widget that shows a [`Pixmap`] at two pixel rows per terminal cell.
#[derive(Debug)]
pub struct StarfieldWidget<'a> {
    pixmap: &'a Pixmap,
    transparent: bool,
}

impl<'a> StarfieldWidget<'a> {
    pub fn new(pixmap: &'a Pixmap) -> Self {
        Self {
            pixmap,
            transparent: false,
        }
    }

    /// Leave cells untouched where both pixels are fully transparent.
    pub fn transparent(mut self, transparent: bool) -> Self {
        self.transparent = transparent;
        self
    }
}

impl Widget for StarfieldWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(buf.area);
        for row in 0..area.height {
            let top_y = u32::from(row) * 2;
            for col in 0..area.width {
                let x = u32::from(col);
                let (Some(top), Some(bottom)) =
                    (self.pixmap.pixel(x, top_y), self.pixmap.pixel(x, top_y + 1))
                else {
                    continue;
                };
                if self.transparent && top.a == 0 && bottom.a == 0 {
                    continue;
                }
                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_symbol(HALF_BLOCK)
                        .set_fg(to_terminal_color(top))
                        .set_bg(to_terminal_color(bottom));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use ratatui::style::Color;
    use vello_cpu::peniko::color::PremulRgba8;

    use super::*;

    const NAVY: PremulRgba8 = PremulRgba8 { r: 10, g: 14, b: 23, a: 255 };

    #[test]
    fn test_surface_size_doubles_rows() {
        assert_eq!(surface_size(Rect::new(3, 4, 80, 24)), Size::new(80, 48));
    }

    #[test]
    fn test_renders_half_blocks() {
        let mut pixmap = Pixmap::new(Size::new(2, 2));
        pixmap.set_pixel(1, 0, NAVY);
        pixmap.set_pixel(1, 1, PremulRgba8 { r: 128, g: 128, b: 128, a: 128 });
        let area = Rect::new(0, 0, 2, 1);
        let mut buf = Buffer::empty(area);
        StarfieldWidget::new(&pixmap).render(area, &mut buf);

        let cell = &buf[(1, 0)];
        assert_eq!(cell.symbol(), HALF_BLOCK);
        assert_eq!(cell.fg, Color::Rgb(10, 14, 23));
        assert_eq!(cell.bg, Color::Rgb(128, 128, 128));
        assert_eq!(buf[(0, 0)].fg, Color::Rgb(0, 0, 0));
    }

    #[test]
    fn test_transparent_keeps_existing_cells() {
        let mut pixmap = Pixmap::new(Size::new(2, 2));
        pixmap.set_pixel(1, 1, NAVY);
        let area = Rect::new(0, 0, 2, 1);
        let mut buf = Buffer::empty(area);
        buf[(0, 0)].set_symbol("x");
        buf[(1, 0)].set_symbol("x");
        StarfieldWidget::new(&pixmap).transparent(true).render(area, &mut buf);
        assert_eq!(buf[(0, 0)].symbol(), "x");
        assert_eq!(buf[(1, 0)].symbol(), HALF_BLOCK);

        StarfieldWidget::new(&pixmap).render(area, &mut buf);
        assert_eq!(buf[(0, 0)].symbol(), HALF_BLOCK);
    }

    #[test]
    fn test_area_larger_than_pixmap() {
        let pixmap = Pixmap::new(Size::new(1, 2));
        let area = Rect::new(0, 0, 3, 2);
        let mut buf = Buffer::empty(area);
        StarfieldWidget::new(&pixmap).render(area, &mut buf);
        assert_eq!(buf[(0, 0)].symbol(), HALF_BLOCK);
        assert_eq!(buf[(2, 1)].symbol(), " ");
    }
}

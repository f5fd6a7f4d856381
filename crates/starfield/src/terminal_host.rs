//! The terminal as the environment an animator is mounted in.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    widgets::Block,
};
use starfield_background::{Host, surface_size};
use starfield_core::Size;

/// Screen areas the app lays out each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Regions {
    /// Whole terminal.
    pub window: Rect,
    /// Framed panel, border included.
    pub panel: Rect,
    /// Inside of the panel border; the container surface in container mode.
    pub container: Rect,
}

impl Regions {
    /// Center a panel at 70% × 60% of `area`.
    pub fn new(area: Rect) -> Self {
        let [_, middle, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Percentage(60),
            Constraint::Fill(1),
        ])
        .areas(area);
        let [_, panel, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Percentage(70),
            Constraint::Fill(1),
        ])
        .areas(middle);

        Self {
            window: area,
            panel,
            container: Block::bordered().inner(panel),
        }
    }
}

/// Window and container sizes in surface pixels plus focus and motion state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalHost {
    window: Size,
    container: Option<Size>,
    reduced_motion: bool,
    focused: bool,
}

impl TerminalHost {
    pub fn new(reduced_motion: bool) -> Self {
        Self {
            window: Size::default(),
            container: None,
            reduced_motion,
            focused: true,
        }
    }

    /// Record the sizes of a fresh layout.
    pub fn lay_out(&mut self, regions: &Regions) {
        self.window = surface_size(regions.window);
        self.container = Some(surface_size(regions.container));
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

impl Host for TerminalHost {
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
        !self.focused
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_sits_inside_window() {
        let regions = Regions::new(Rect::new(0, 0, 100, 50));
        assert_eq!(regions.panel, Rect::new(15, 10, 70, 30));
        assert_eq!(regions.container, Rect::new(16, 11, 68, 28));
    }

    #[test]
    fn test_host_reports_pixel_sizes() {
        let mut host = TerminalHost::new(false);
        assert_eq!(host.container_bounds(), None);

        host.lay_out(&Regions::new(Rect::new(0, 0, 100, 50)));
        assert_eq!(host.window_size(), Size::new(100, 100));
        assert_eq!(host.container_bounds(), Some(Size::new(68, 56)));
        assert!(!host.page_hidden());

        host.set_focused(false);
        assert!(host.page_hidden());
    }
}

//! What the animator needs from the environment it is mounted in.

use starfield_core::Size;

/// Environment queried when the animator starts.
pub trait Host {
    /// Size of the whole window in surface pixels.
    fn window_size(&self) -> Size;

    /// Bounds of the parent container, `None` when there is none.
    fn container_bounds(&self) -> Option<Size>;

    /// Accessibility preference to minimise animation.
    fn prefers_reduced_motion(&self) -> bool;

    /// Whether the page is currently hidden.
    fn page_hidden(&self) -> bool;
}

/// Change notifications delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// Page became hidden or visible.
    PageVisibility { hidden: bool },
    /// Visible fraction of the surface changed.
    Intersection { ratio: f32 },
    /// Window resized, new size in surface pixels.
    WindowResized(Size),
    /// Container resized, new bounds in surface pixels.
    ContainerResized(Size),
}

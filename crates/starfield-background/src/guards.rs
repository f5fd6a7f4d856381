//! Motion and visibility guards and the listener registry.

use bitflags::bitflags;

/// Fraction of the surface that must be on screen to count as in viewport.
pub const INTERSECTION_THRESHOLD: f32 = 0.05;

bitflags! {
    /// Host notifications the animator is currently subscribed to.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct Listeners: u8 {
        /// Page hidden / shown.
        const VISIBILITY = 1 << 0;
        /// Surface scrolled into or out of view.
        const INTERSECTION = 1 << 1;
        /// Window resized (viewport sizing).
        const WINDOW_RESIZE = 1 << 2;
        /// Container resized (container sizing).
        const CONTAINER_RESIZE = 1 << 3;
    }
}

/// Conditions that suspend the simulation regardless of the pause flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Guards {
    /// Reduced-motion preference, read once at start.
    pub reduced_motion: bool,
    /// The page (terminal) is hidden or unfocused.
    pub page_hidden: bool,
    /// The surface is on screen.
    pub in_viewport: bool,
}

impl Default for Guards {
    fn default() -> Self {
        Self {
            reduced_motion: false,
            page_hidden: false,
            in_viewport: true,
        }
    }
}

impl Guards {
    /// Whether this frame should skip updating and drawing bodies.
    pub fn should_pause(&self, paused: bool) -> bool {
        paused || self.reduced_motion || self.page_hidden || !self.in_viewport
    }

    /// Whether the delayed first meteor may appear.
    pub fn allows_kickoff(&self) -> bool {
        !self.reduced_motion && self.in_viewport && !self.page_hidden
    }

    /// Update viewport presence from a visible fraction.
    pub fn set_intersection(&mut self, ratio: f32) {
        self.in_viewport = ratio >= INTERSECTION_THRESHOLD;
    }
}

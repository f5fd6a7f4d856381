//! Animator configuration.

use serde::{Deserialize, Serialize};

/// What the drawing surface tracks for its size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeMode {
    /// Full window.
    #[default]
    Viewport,
    /// Bounding box of the parent container.
    Container,
}

impl SizeMode {
    /// Switch between viewport and container sizing.
    pub fn toggle(&self) -> Self {
        match self {
            SizeMode::Viewport => SizeMode::Container,
            SizeMode::Container => SizeMode::Viewport,
        }
    }

    /// Display name for the current mode.
    pub fn name(&self) -> &'static str {
        match self {
            SizeMode::Viewport => "viewport",
            SizeMode::Container => "container",
        }
    }
}

/// Look and motion profile of a starfield.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
    /// Clear each frame instead of painting the navy background.
    pub transparent: bool,
    /// Number of stars created at initialization.
    pub max_stars: u32,
    /// Base hue in degrees. Stars always render white; kept for callers
    /// that tint their own chrome to match.
    pub hue: f32,
    /// Multiplier on each star's initial opacity.
    pub brightness: f32,
    /// Multiplier on each star's angular speed.
    pub speed_multiplier: f32,
    /// Upper bound of the per-frame twinkle roll. Larger values twinkle less.
    pub twinkle_intensity: u32,
    /// Suspend star and meteor motion while still painting the background.
    pub paused: bool,
    /// Whether the surface follows the window or its container.
    pub size_mode: SizeMode,
    /// RNG seed for reproducible runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl StarfieldConfig {
    pub const DEFAULT_MAX_STARS: u32 = 1200;
    pub const DEFAULT_HUE: f32 = 217.0;
    pub const DEFAULT_BRIGHTNESS: f32 = 0.8;
    pub const DEFAULT_SPEED_MULTIPLIER: f32 = 1.0;
    pub const DEFAULT_TWINKLE_INTENSITY: u32 = 20;
    /// Largest star count a config may ask for.
    pub const MAX_STARS: u32 = 2000;

    /// Replace out-of-range values with their defaults, cap the star count
    /// at [`Self::MAX_STARS`] and wrap the hue into `[0, 360)`.
    pub fn validated(mut self) -> Self {
        self.max_stars = self.max_stars.min(Self::MAX_STARS);
        if !self.brightness.is_finite() || self.brightness < 0.0 {
            self.brightness = Self::DEFAULT_BRIGHTNESS;
        }
        if !self.speed_multiplier.is_finite() || self.speed_multiplier < 0.0 {
            self.speed_multiplier = Self::DEFAULT_SPEED_MULTIPLIER;
        }
        self.hue = if self.hue.is_finite() {
            self.hue.rem_euclid(360.0)
        } else {
            Self::DEFAULT_HUE
        };
        self
    }
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            transparent: false,
            max_stars: Self::DEFAULT_MAX_STARS,
            hue: Self::DEFAULT_HUE,
            brightness: Self::DEFAULT_BRIGHTNESS,
            speed_multiplier: Self::DEFAULT_SPEED_MULTIPLIER,
            twinkle_intensity: Self::DEFAULT_TWINKLE_INTENSITY,
            paused: false,
            size_mode: SizeMode::Viewport,
            seed: None,
        }
    }
}

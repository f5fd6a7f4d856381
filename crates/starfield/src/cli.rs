//! Command-line flags layered over the settings file.

use std::path::PathBuf;

use clap::Parser;
use starfield_config::Settings;
use starfield_core::SizeMode;

/// Environment variable that turns on reduced motion when set to anything but `0`.
pub const REDUCE_MOTION_ENV: &str = "REDUCE_MOTION";

#[derive(Debug, Default, Parser)]
#[command(name = "starfield", version, about = "Orbiting starfield background for the terminal")]
pub struct Cli {
    /// Settings file to use instead of the default location.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Number of stars.
    #[arg(long, value_name = "N")]
    pub max_stars: Option<u32>,

    /// Star opacity multiplier.
    #[arg(long, value_name = "F")]
    pub brightness: Option<f32>,

    /// Orbit speed multiplier.
    #[arg(long = "speed", value_name = "F")]
    pub speed_multiplier: Option<f32>,

    /// Twinkle roll range; larger twinkles less often.
    #[arg(long = "twinkle", value_name = "N")]
    pub twinkle_intensity: Option<u32>,

    /// Accent hue in degrees.
    #[arg(long, value_name = "DEG", allow_negative_numbers = true)]
    pub hue: Option<f32>,

    /// Clear instead of painting the navy backdrop.
    #[arg(long)]
    pub transparent: bool,

    /// Start paused.
    #[arg(long)]
    pub paused: bool,

    /// Draw inside a framed panel instead of the whole terminal.
    #[arg(long)]
    pub container: bool,

    /// Hold the animation still.
    #[arg(long)]
    pub reduced_motion: bool,

    /// Seed for reproducible star layouts.
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Target frames per second.
    #[arg(long, value_name = "N")]
    pub fps: Option<u32>,
}

impl Cli {
    /// Read the settings file named on the command line, or the default one.
    pub fn load_settings(&self) -> starfield_config::Result<Settings> {
        match &self.config {
            Some(path) => Settings::load_from(path),
            None => Settings::load(),
        }
    }

    /// Override `settings` with every flag that was given.
    pub fn apply(&self, settings: &mut Settings) {
        let star = &mut settings.starfield;
        if let Some(n) = self.max_stars {
            star.max_stars = n;
        }
        if let Some(b) = self.brightness {
            star.brightness = b;
        }
        if let Some(s) = self.speed_multiplier {
            star.speed_multiplier = s;
        }
        if let Some(t) = self.twinkle_intensity {
            star.twinkle_intensity = t;
        }
        if let Some(h) = self.hue {
            star.hue = h;
        }
        if self.transparent {
            star.transparent = true;
        }
        if self.paused {
            star.paused = true;
        }
        if self.container {
            star.size_mode = SizeMode::Container;
        }
        if self.seed.is_some() {
            star.seed = self.seed;
        }
        if let Some(fps) = self.fps {
            settings.fps = fps.clamp(Settings::MIN_FPS, Settings::MAX_FPS);
        }
        if self.reduced_motion {
            settings.reduced_motion = true;
        }
        settings.starfield = settings.starfield.clone().validated();
    }
}

/// Whether `value` of the reduce-motion variable asks for reduced motion.
pub fn reduce_motion_requested(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty() && v != "0")
}

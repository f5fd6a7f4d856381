//! Core types shared by the starfield crates.
//!
//! Surface geometry (pixel sizes plus the `kurbo` shapes the animator draws)
//! and the animator configuration with its defaults.

mod config;
mod geometry;

pub use config::{SizeMode, StarfieldConfig};
pub use geometry::{Circle, Line, Point, Size};

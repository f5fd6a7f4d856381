//! Starfield background animation.
//!
//! An [`Animator`] owns a field of orbiting, twinkling stars and the
//! occasional meteor. Each frame it paints onto any [`Surface`]; the
//! [`Pixmap`] (rendered by `vello_cpu`) plus [`StarfieldWidget`] put the
//! result in a terminal.
//! Motion stops while the host reports reduced motion, a hidden page, an
//! off-screen surface, or an explicit pause.

mod animations;
mod animator;
mod color;
mod guards;
mod host;
mod pixmap;
mod sprite;
mod surface;
#[cfg(test)]
mod testing;
mod widget;

pub use animations::meteor::Meteor;
pub use animations::star::{Star, max_orbit};
pub use animator::{
    Animator, Backdrop, FrameReport, KICKOFF_DELAY, METEOR_COOLDOWN_FRAMES, METEOR_SPAWN_CHANCE,
};
pub use color::{hsl_to_rgb, to_terminal_color};
pub use guards::{Guards, INTERSECTION_THRESHOLD, Listeners};
pub use host::{Host, HostEvent};
pub use pixmap::Pixmap;
pub use sprite::{SPRITE_SIZE, star_sprite};
pub use surface::{CompositeMode, Surface};
pub use widget::{StarfieldWidget, surface_size};

//! Starfield animator state and per-frame update.

use std::time::Duration;

use rand::{Rng, SeedableRng, rngs::StdRng};
use starfield_core::{Size, SizeMode, StarfieldConfig};
use tracing::{debug, trace};
use vello_cpu::peniko::Gradient;

use crate::animations::meteor::{Meteor, STREAK_WIDTH};
use crate::animations::star::{Star, init_stars, twinkle_roll};
use crate::color::{BACKGROUND_INNER, BACKGROUND_OUTER};
use crate::guards::{Guards, Listeners};
use crate::host::{Host, HostEvent};
use crate::pixmap::Pixmap;
use crate::sprite::star_sprite;
use crate::surface::{CompositeMode, Surface};

/// Delay after start before the first meteor.
pub const KICKOFF_DELAY: Duration = Duration::from_millis(1200);

/// Frames that must pass between random meteor spawns.
pub const METEOR_COOLDOWN_FRAMES: u32 = 200;

/// Per-frame chance of a meteor once the cooldown has passed.
pub const METEOR_SPAWN_CHANCE: f64 = 0.01;

/// How a frame started.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Backdrop {
    /// Nothing drawn, the animator is not running.
    #[default]
    None,
    /// Opaque navy gradient painted.
    Painted,
    /// Surface cleared to transparent.
    Cleared,
}

/// Summary of what a single frame did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub backdrop: Backdrop,
    /// Stars and meteors were left untouched.
    pub paused: bool,
    pub stars_drawn: usize,
    pub meteors_drawn: usize,
    pub meteors_spawned: usize,
}

/// Animated field of orbiting stars and occasional meteors.
///
/// Lifecycle: [`Animator::new`] → [`Animator::start`] → any number of
/// [`Animator::frame`] / [`Animator::handle_event`] calls →
/// [`Animator::teardown`]. Dropping the animator tears it down.
#[derive(Debug)]
pub struct Animator {
    /// Look and motion profile.
    config: StarfieldConfig,
    /// Source of every random draw.
    rng: StdRng,
    /// Soft dot stamped for each star, built on start.
    sprite: Option<Pixmap>,
    /// Star states, fixed in number once started.
    stars: Vec<Star>,
    /// Meteors currently in flight.
    meteors: Vec<Meteor>,
    /// Frames since the last random meteor.
    meteor_timer: u32,
    /// Pause conditions coming from the host.
    guards: Guards,
    /// Host notifications currently subscribed to.
    listeners: Listeners,
    /// Elapsed time at which the first meteor is due.
    kickoff_at: Option<Duration>,
    /// Whether the host should keep calling [`Animator::frame`].
    frame_scheduled: bool,
    /// Surface size the simulation is laid out for.
    size: Size,
}

impl Animator {
    /// Create an idle animator. Nothing is allocated until [`Animator::start`].
    pub fn new(config: StarfieldConfig) -> Self {
        let config = config.validated();
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            config,
            rng,
            sprite: None,
            stars: Vec::new(),
            meteors: Vec::new(),
            meteor_timer: 0,
            guards: Guards::default(),
            listeners: Listeners::empty(),
            kickoff_at: None,
            frame_scheduled: false,
            size: Size::default(),
        }
    }

    /// Size the surface, build the sprite and stars, subscribe to host
    /// notifications and schedule frames.
    ///
    /// Without a surface, or without a size to give it, this does nothing.
    pub fn start<H, S>(&mut self, host: &H, surface: Option<&mut S>)
    where
        H: Host + ?Sized,
        S: Surface + ?Sized,
    {
        if self.frame_scheduled {
            debug!("starfield already running");
            return;
        }
        let Some(surface) = surface else {
            debug!("no drawing surface, starfield stays idle");
            return;
        };
        let size = match self.config.size_mode {
            SizeMode::Viewport => host.window_size(),
            SizeMode::Container => match host.container_bounds() {
                Some(bounds) => bounds.at_least_one(),
                None => {
                    debug!("no container bounds, starfield stays idle");
                    return;
                }
            },
        };
        if size.is_empty() {
            debug!(?size, "empty surface, starfield stays idle");
            return;
        }

        surface.resize(size);
        self.size = size;
        self.sprite = Some(star_sprite());
        self.stars = init_stars(&mut self.rng, size, &self.config);
        self.meteors.clear();
        self.meteor_timer = 0;

        self.guards = Guards {
            reduced_motion: host.prefers_reduced_motion(),
            page_hidden: host.page_hidden(),
            in_viewport: true,
        };
        let resize_listener = match self.config.size_mode {
            SizeMode::Viewport => Listeners::WINDOW_RESIZE,
            SizeMode::Container => Listeners::CONTAINER_RESIZE,
        };
        self.listeners = Listeners::VISIBILITY | Listeners::INTERSECTION | resize_listener;
        self.kickoff_at = (!self.guards.reduced_motion).then_some(KICKOFF_DELAY);
        self.frame_scheduled = true;

        debug!(
            width = size.width,
            height = size.height,
            stars = self.stars.len(),
            mode = self.config.size_mode.name(),
            reduced_motion = self.guards.reduced_motion,
            "starfield started"
        );
    }

    /// Render one frame. `elapsed` is the time since [`Animator::start`].
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S, elapsed: Duration) -> FrameReport {
        let mut report = FrameReport::default();
        if !self.frame_scheduled {
            return report;
        }

        let paused = self.guards.should_pause(self.config.paused);
        report.paused = paused;

        surface.set_composite(CompositeMode::SourceOver);
        surface.set_global_alpha(1.0);
        if self.config.transparent {
            surface.clear();
            report.backdrop = Backdrop::Cleared;
        } else {
            surface.fill(&self.backdrop());
            report.backdrop = Backdrop::Painted;
        }

        if let Some(due) = self.kickoff_at
            && elapsed >= due
        {
            self.kickoff_at = None;
            if self.guards.allows_kickoff() {
                self.spawn_meteor();
                report.meteors_spawned += 1;
            }
        }

        if !paused {
            surface.set_composite(CompositeMode::Lighter);
            report.stars_drawn = self.draw_stars(surface);

            self.meteor_timer += 1;
            if self.meteor_timer > METEOR_COOLDOWN_FRAMES
                && !self.guards.reduced_motion
                && self.rng.r#gen::<f64>() < METEOR_SPAWN_CHANCE
            {
                self.spawn_meteor();
                self.meteor_timer = 0;
                report.meteors_spawned += 1;
            }

            report.meteors_drawn = self.draw_meteors(surface);
        }

        surface.flush();
        report
    }

    /// React to a host notification. Notifications without a registered
    /// listener are ignored.
    pub fn handle_event<S: Surface + ?Sized>(&mut self, event: HostEvent, surface: &mut S) {
        match event {
            HostEvent::PageVisibility { hidden } if self.listeners.contains(Listeners::VISIBILITY) => {
                self.guards.page_hidden = hidden;
            }
            HostEvent::Intersection { ratio } if self.listeners.contains(Listeners::INTERSECTION) => {
                self.guards.set_intersection(ratio);
            }
            HostEvent::WindowResized(size) if self.listeners.contains(Listeners::WINDOW_RESIZE) => {
                self.resize(size, surface);
            }
            HostEvent::ContainerResized(size)
                if self.listeners.contains(Listeners::CONTAINER_RESIZE) =>
            {
                self.resize(size.at_least_one(), surface);
            }
            _ => trace!(?event, "no listener for host event"),
        }
    }

    /// Cancel the scheduled frame, disarm the first-meteor timer and drop
    /// every listener. Safe to call repeatedly or before [`Animator::start`].
    pub fn teardown(&mut self) {
        if self.frame_scheduled || self.kickoff_at.is_some() || !self.listeners.is_empty() {
            debug!(stars = self.stars.len(), "starfield torn down");
        }
        self.frame_scheduled = false;
        self.kickoff_at = None;
        self.listeners = Listeners::empty();
        self.stars.clear();
        self.meteors.clear();
        self.sprite = None;
    }

    /// Toggle the external pause flag without rebuilding the scene.
    pub fn set_paused(&mut self, paused: bool) {
        self.config.paused = paused;
    }

    pub fn config(&self) -> &StarfieldConfig {
        &self.config
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn meteors(&self) -> &[Meteor] {
        &self.meteors
    }

    pub fn guards(&self) -> Guards {
        self.guards
    }

    pub fn listeners(&self) -> Listeners {
        self.listeners
    }

    /// Surface size the simulation is laid out for.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Whether frames are scheduled.
    pub fn is_running(&self) -> bool {
        self.frame_scheduled
    }

    /// Whether the delayed first meteor is still armed.
    pub fn kickoff_pending(&self) -> bool {
        self.kickoff_at.is_some()
    }

    /// Navy glow, brightest above and left of center.
    fn backdrop(&self) -> Gradient {
        let w = f64::from(self.size.width);
        let h = f64::from(self.size.height);
        Gradient::new_two_point_radial((w * 0.4, h * 0.35), 0.0, (w * 0.5, h * 0.6), w.max(h) as f32)
            .with_stops([(0.0, BACKGROUND_INNER), (1.0, BACKGROUND_OUTER)])
    }

    fn draw_stars<S: Surface + ?Sized>(&mut self, surface: &mut S) -> usize {
        let Some(sprite) = self.sprite.as_ref() else {
            return 0;
        };
        let intensity = self.config.twinkle_intensity;
        for star in &mut self.stars {
            star.twinkle(twinkle_roll(&mut self.rng, intensity));
            surface.set_global_alpha(star.alpha as f32);
            surface.draw_image(sprite, star.sprite_origin(), star.radius);
            star.advance();
        }
        self.stars.len()
    }

    fn draw_meteors<S: Surface + ?Sized>(&mut self, surface: &mut S) -> usize {
        let height = self.size.height;
        let mut drawn = 0;
        surface.set_global_alpha(1.0);
        self.meteors.retain_mut(|meteor| {
            meteor.update(height);
            if meteor.active {
                surface.stroke_line(meteor.line(), STREAK_WIDTH, &meteor.streak());
                drawn += 1;
            } else {
                trace!(x = meteor.x, y = meteor.y, "meteor evicted");
            }
            meteor.active
        });
        drawn
    }

    fn spawn_meteor(&mut self) {
        let meteor = Meteor::spawn(&mut self.rng, self.size.width);
        trace!(x = meteor.x, angle = meteor.angle, "meteor spawned");
        self.meteors.push(meteor);
    }

    fn resize<S: Surface + ?Sized>(&mut self, size: Size, surface: &mut S) {
        if size.is_empty() || size == self.size {
            return;
        }
        surface.resize(size);
        for star in &mut self.stars {
            star.refit(self.size, size);
        }
        debug!(
            from_width = self.size.width,
            from_height = self.size.height,
            width = size.width,
            height = size.height,
            "starfield resized"
        );
        self.size = size;
    }
}

impl Drop for Animator {
    fn drop(&mut self) {
        self.teardown();
    }
}

mod cli;
mod logging;
mod terminal_host;

use std::io::stdout;
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    event::{
        self, DisableFocusChange, EnableFocusChange, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Block,
};
use starfield_background::{
    Animator, FrameReport, Host, HostEvent, Pixmap, StarfieldWidget, hsl_to_rgb,
};
use starfield_config::Settings;
use starfield_core::{SizeMode, StarfieldConfig};
use tracing::{debug, info, warn};

use crate::cli::{Cli, REDUCE_MOTION_ENV, reduce_motion_requested};
use crate::terminal_host::{Regions, TerminalHost};

/// Star count change per key press and the allowed range.
const STAR_STEP: u32 = 100;
const STAR_RANGE: RangeInclusive<u32> = 100..=StarfieldConfig::MAX_STARS;

const SPEED_STEP: f32 = 0.1;
const SPEED_RANGE: RangeInclusive<f32> = 0.0..=3.0;

const BRIGHTNESS_STEP: f32 = 0.1;
const BRIGHTNESS_RANGE: RangeInclusive<f32> = 0.1..=2.0;

const TWINKLE_STEP: u32 = 5;
const TWINKLE_RANGE: RangeInclusive<u32> = 5..=100;

const HELP: [(&str, &str); 11] = [
    ("q", "quit"),
    ("p", "pause"),
    ("t", "transparent"),
    ("c", "container"),
    ("h", "panel"),
    ("+/-", "stars"),
    ("[/]", "speed"),
    ("b/B", "brightness"),
    ("w/W", "twinkle"),
    ("r", "reset"),
    ("s", "save"),
];

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let (mut settings, load_error) = match cli.load_settings() {
        Ok(settings) => (settings, None),
        Err(err) => (Settings::default(), Some(err)),
    };
    cli.apply(&mut settings);
    if reduce_motion_requested(std::env::var(REDUCE_MOTION_ENV).ok().as_deref()) {
        settings.reduced_motion = true;
    }

    let mut notice = None;
    match logging::init(&settings.log_level) {
        Ok(path) => info!(log = %path.display(), fps = settings.fps, "starfield starting"),
        Err(err) => notice = Some(format!("logging disabled: {err}")),
    }
    if let Some(err) = load_error {
        warn!(%err, "settings file ignored, using defaults");
        notice = Some(format!("{err}; using defaults"));
    }

    let terminal = ratatui::init();
    if let Err(err) = execute!(stdout(), EnableFocusChange) {
        warn!(%err, "focus reporting unavailable");
    }
    let result = App::new(settings, cli.config)
        .with_status(notice)
        .run(terminal);
    if let Err(err) = execute!(stdout(), DisableFocusChange) {
        warn!(%err, "disabling focus reporting failed");
    }
    ratatui::restore();
    result
}

/// Step `value` by `delta` on a tenths grid, kept inside `range`.
fn step_tenths(value: f32, delta: f32, range: RangeInclusive<f32>) -> f32 {
    (((value + delta) * 10.0).round() / 10.0).clamp(*range.start(), *range.end())
}

/// Step `value` up or down by `step`, kept inside `range`.
fn step_count(value: u32, step: u32, up: bool, range: RangeInclusive<u32>) -> u32 {
    let value = if up {
        value.saturating_add(step)
    } else {
        value.saturating_sub(step)
    };
    value.clamp(*range.start(), *range.end())
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Current settings, saved with `s`.
    settings: Settings,
    /// Settings file given on the command line.
    save_path: Option<PathBuf>,
    host: TerminalHost,
    regions: Regions,
    animator: Animator,
    /// Raster the animator paints; `None` until the terminal has a size.
    surface: Option<Pixmap>,
    /// When the current animator was started.
    mounted_at: Instant,
    /// Whether the framed panel is shown.
    panel_visible: bool,
    last_frame: FrameReport,
    /// One-line message after the settings summary.
    status: Option<String>,
}

impl App {
    /// Construct a new instance of [`App`]. The animator mounts on the first resize.
    pub fn new(settings: Settings, save_path: Option<PathBuf>) -> Self {
        Self {
            running: false,
            host: TerminalHost::new(settings.reduced_motion),
            regions: Regions::new(Rect::default()),
            animator: Animator::new(settings.starfield.clone()),
            settings,
            save_path,
            surface: None,
            mounted_at: Instant::now(),
            panel_visible: true,
            last_frame: FrameReport::default(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: Option<String>) -> Self {
        self.status = status;
        self
    }

    /// Run the application's main loop, one frame every `1 / fps` seconds.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        let size = terminal.size()?;
        self.resize(Rect::new(0, 0, size.width, size.height));

        let frame_interval = Duration::from_secs(1) / self.settings.fps.max(1);
        let mut next_frame = Instant::now();
        while self.running {
            let now = Instant::now();
            if now >= next_frame {
                self.tick();
                terminal.draw(|frame| self.render(frame))?;
                next_frame = (next_frame + frame_interval).max(now);
            }
            self.handle_crossterm_events(next_frame.saturating_duration_since(Instant::now()))?;
        }
        self.animator.teardown();
        Ok(())
    }

    /// Advance the animation by one frame.
    fn tick(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            self.last_frame = self.animator.frame(surface, self.mounted_at.elapsed());
        }
    }

    /// Renders the user interface.
    fn render(&self, frame: &mut Frame) {
        let config = &self.settings.starfield;
        let accent = hsl_to_rgb(config.hue, 0.9, 0.75);
        let regions = Regions::new(frame.area());

        if let Some(pixmap) = &self.surface {
            let target = match config.size_mode {
                SizeMode::Viewport => Some(regions.window),
                SizeMode::Container => self.panel_visible.then_some(regions.container),
            };
            if let Some(target) = target {
                frame.render_widget(
                    StarfieldWidget::new(pixmap).transparent(config.transparent),
                    target,
                );
            }
        }

        if self.panel_visible {
            let panel = Block::bordered()
                .border_style(Style::new().fg(accent))
                .title(Line::from(" DevCatalyst ").centered());
            frame.render_widget(panel, regions.panel);

            let [_, title, tagline, _] = Layout::vertical([
                Constraint::Fill(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Fill(1),
            ])
            .areas(regions.container);
            frame.render_widget(Line::from("Build among the stars").bold().fg(accent).centered(), title);
            frame.render_widget(
                Line::from("orbiting stars · twinkles · the odd meteor").fg(Color::Gray).centered(),
                tagline,
            );
        }

        let [_, status, help] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(regions.window);
        frame.render_widget(Line::from(self.status_text()).fg(Color::Gray).centered(), status);

        let keys: Vec<Span> = HELP
            .iter()
            .flat_map(|&(key, label)| [key.bold().fg(accent), format!(" {label}  ").dark_gray()])
            .collect();
        frame.render_widget(Line::from(keys).centered(), help);
    }

    /// Settings summary plus why the scene is still, if it is.
    fn status_text(&self) -> String {
        let config = &self.settings.starfield;
        let guards = self.animator.guards();
        let state = if !self.animator.is_running() {
            "idle"
        } else if config.paused {
            "paused"
        } else if guards.reduced_motion {
            "reduced motion"
        } else if guards.page_hidden {
            "unfocused"
        } else if !guards.in_viewport {
            "hidden"
        } else {
            "running"
        };

        let mut text = format!(
            "{state} · {} stars · speed {:.1} · brightness {:.1} · twinkle {} · {}",
            config.max_stars,
            config.speed_multiplier,
            config.brightness,
            config.twinkle_intensity,
            config.size_mode.name(),
        );
        if config.transparent {
            text.push_str(" · transparent");
        }
        if let Some(status) = &self.status {
            text.push_str(" | ");
            text.push_str(status);
        }
        text
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits at most `timeout` so frames stay on schedule.
    fn handle_crossterm_events(&mut self, timeout: Duration) -> color_eyre::Result<()> {
        if event::poll(timeout)? {
            self.on_event(event::read()?);
        }
        Ok(())
    }

    fn on_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
            Event::Resize(width, height) => self.resize(Rect::new(0, 0, width, height)),
            Event::FocusGained => self.set_focus(true),
            Event::FocusLost => self.set_focus(false),
            _ => {}
        }
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('p')) => self.toggle_pause(),
            (_, KeyCode::Char('t')) => self.reconfigure(|c| c.transparent = !c.transparent),
            (_, KeyCode::Char('c')) => self.reconfigure(|c| c.size_mode = c.size_mode.toggle()),
            (_, KeyCode::Char('h')) => self.toggle_panel(),
            (_, KeyCode::Char('+') | KeyCode::Char('=')) => self.reconfigure(|c| {
                c.max_stars = step_count(c.max_stars, STAR_STEP, true, STAR_RANGE);
            }),
            (_, KeyCode::Char('-')) => self.reconfigure(|c| {
                c.max_stars = step_count(c.max_stars, STAR_STEP, false, STAR_RANGE);
            }),
            (_, KeyCode::Char(']')) => self.reconfigure(|c| {
                c.speed_multiplier = step_tenths(c.speed_multiplier, SPEED_STEP, SPEED_RANGE);
            }),
            (_, KeyCode::Char('[')) => self.reconfigure(|c| {
                c.speed_multiplier = step_tenths(c.speed_multiplier, -SPEED_STEP, SPEED_RANGE);
            }),
            (_, KeyCode::Char('B')) => self.reconfigure(|c| {
                c.brightness = step_tenths(c.brightness, BRIGHTNESS_STEP, BRIGHTNESS_RANGE);
            }),
            (_, KeyCode::Char('b')) => self.reconfigure(|c| {
                c.brightness = step_tenths(c.brightness, -BRIGHTNESS_STEP, BRIGHTNESS_RANGE);
            }),
            (_, KeyCode::Char('W')) => self.reconfigure(|c| {
                c.twinkle_intensity =
                    step_count(c.twinkle_intensity, TWINKLE_STEP, true, TWINKLE_RANGE);
            }),
            (_, KeyCode::Char('w')) => self.reconfigure(|c| {
                c.twinkle_intensity =
                    step_count(c.twinkle_intensity, TWINKLE_STEP, false, TWINKLE_RANGE);
            }),
            (_, KeyCode::Char('r')) => self.reconfigure(|c| {
                *c = StarfieldConfig {
                    seed: c.seed,
                    ..Default::default()
                };
            }),
            (_, KeyCode::Char('s')) => self.save(),
            _ => {}
        }
    }

    /// Lay out `area` and pass the new sizes to the animator, mounting it
    /// if there was no surface yet.
    fn resize(&mut self, area: Rect) {
        self.regions = Regions::new(area);
        self.host.lay_out(&self.regions);

        let Some(surface) = self.surface.as_mut() else {
            self.mount();
            return;
        };
        self.animator
            .handle_event(HostEvent::WindowResized(self.host.window_size()), surface);
        if let Some(bounds) = self.host.container_bounds() {
            self.animator
                .handle_event(HostEvent::ContainerResized(bounds), surface);
        }
    }

    /// Tear down the current animator and start a fresh one from the settings.
    fn mount(&mut self) {
        self.animator.teardown();
        self.animator = Animator::new(self.settings.starfield.clone());

        let size = match self.settings.starfield.size_mode {
            SizeMode::Viewport => self.host.window_size(),
            SizeMode::Container => self
                .host
                .container_bounds()
                .unwrap_or_default()
                .at_least_one(),
        };
        self.surface = (!size.is_empty()).then(|| Pixmap::new(size));
        self.animator.start(&self.host, self.surface.as_mut());
        self.mounted_at = Instant::now();
        self.last_frame = FrameReport::default();
        self.sync_intersection();

        debug!(
            running = self.animator.is_running(),
            mode = self.settings.starfield.size_mode.name(),
            "starfield mounted"
        );
    }

    /// Apply a settings change that needs a fresh animator.
    fn reconfigure(&mut self, change: impl FnOnce(&mut StarfieldConfig)) {
        change(&mut self.settings.starfield);
        self.settings.starfield = self.settings.starfield.clone().validated();
        self.status = None;
        self.mount();
    }

    /// Pause or resume in place; the scene is kept.
    fn toggle_pause(&mut self) {
        self.settings.starfield.paused = !self.settings.starfield.paused;
        self.animator.set_paused(self.settings.starfield.paused);
    }

    fn toggle_panel(&mut self) {
        self.panel_visible = !self.panel_visible;
        self.sync_intersection();
    }

    fn set_focus(&mut self, focused: bool) {
        self.host.set_focused(focused);
        if let Some(surface) = self.surface.as_mut() {
            self.animator
                .handle_event(HostEvent::PageVisibility { hidden: !focused }, surface);
        }
    }

    /// Report how much of the surface is on screen. Only a hidden panel in
    /// container mode takes the surface off screen.
    fn sync_intersection(&mut self) {
        let ratio = match self.settings.starfield.size_mode {
            SizeMode::Container if !self.panel_visible => 0.0,
            _ => 1.0,
        };
        if let Some(surface) = self.surface.as_mut() {
            self.animator
                .handle_event(HostEvent::Intersection { ratio }, surface);
        }
    }

    fn save(&mut self) {
        let result = match &self.save_path {
            Some(path) => self.settings.save_to(path).map(|()| path.clone()),
            None => self.settings.save(),
        };
        self.status = Some(match result {
            Ok(path) => {
                info!(path = %path.display(), "settings saved");
                format!("saved {}", path.display())
            }
            Err(err) => {
                warn!(%err, "saving settings failed");
                format!("save failed: {err}")
            }
        });
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use starfield_background::max_orbit;
    use starfield_core::Size;

    use super::*;

    fn app() -> App {
        let mut settings = Settings::default();
        settings.starfield.seed = Some(11);
        settings.starfield.max_stars = 300;
        let mut app = App::new(settings, None);
        app.resize(Rect::new(0, 0, 80, 24));
        app
    }

    fn press(app: &mut App, c: char) {
        app.on_event(Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)));
    }

    #[test]
    fn test_first_resize_mounts() {
        let app = app();
        assert!(app.animator.is_running());
        assert_eq!(app.animator.stars().len(), 300);
        assert_eq!(app.animator.size(), Size::new(80, 48));
        assert_eq!(app.surface.as_ref().map(Pixmap::width), Some(80));
    }

    #[test]
    fn test_star_keys_remount_within_range() {
        let mut app = app();
        press(&mut app, '+');
        assert_eq!(app.animator.stars().len(), 400);
        for _ in 0..30 {
            press(&mut app, '+');
        }
        assert_eq!(app.settings.starfield.max_stars, 2000);
        for _ in 0..30 {
            press(&mut app, '-');
        }
        assert_eq!(app.settings.starfield.max_stars, 100);
        assert_eq!(app.animator.stars().len(), 100);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut app = app();
        press(&mut app, '+');
        press(&mut app, 'W');
        press(&mut app, 't');
        press(&mut app, 'c');
        assert!(app.settings.starfield.transparent);

        press(&mut app, 'r');
        let defaults = StarfieldConfig::default();
        let config = &app.settings.starfield;
        assert_eq!(config.seed, Some(11));
        assert_eq!(config.max_stars, defaults.max_stars);
        assert_eq!(config.twinkle_intensity, defaults.twinkle_intensity);
        assert_eq!(config.size_mode, SizeMode::Viewport);
        assert!(!config.transparent);
        assert!(app.animator.is_running());
        assert_eq!(app.animator.stars().len(), defaults.max_stars as usize);
    }

    #[test]
    fn test_pause_keeps_scene() {
        let mut app = app();
        let phases: Vec<f64> = app.animator.stars().iter().map(|s| s.phase).collect();
        press(&mut app, 'p');
        assert!(app.animator.config().paused);

        app.tick();
        app.tick();
        assert!(app.last_frame.paused);
        let after: Vec<f64> = app.animator.stars().iter().map(|s| s.phase).collect();
        assert_eq!(phases, after);

        press(&mut app, 'p');
        app.tick();
        assert!(!app.last_frame.paused);
    }

    #[test]
    fn test_hidden_panel_takes_container_off_screen() {
        let mut app = app();
        press(&mut app, 'h');
        assert!(app.animator.guards().in_viewport);

        press(&mut app, 'h');
        press(&mut app, 'c');
        assert_eq!(app.settings.starfield.size_mode, SizeMode::Container);
        assert_eq!(Some(app.animator.size()), app.host.container_bounds());

        press(&mut app, 'h');
        assert!(!app.animator.guards().in_viewport);
        app.tick();
        assert!(app.last_frame.paused);

        press(&mut app, 'h');
        assert!(app.animator.guards().in_viewport);
    }

    #[test]
    fn test_focus_changes_visibility() {
        let mut app = app();
        app.on_event(Event::FocusLost);
        assert!(app.animator.guards().page_hidden);
        app.on_event(Event::FocusGained);
        assert!(!app.animator.guards().page_hidden);
    }

    #[test]
    fn test_resize_refits_stars() {
        let mut app = app();
        app.on_event(Event::Resize(120, 40));
        let size = Size::new(120, 80);
        assert_eq!(app.animator.size(), size);
        assert_eq!(app.surface.as_ref().map(Pixmap::height), Some(80));
        let bound = max_orbit(size);
        assert!(app.animator.stars().iter().all(|s| s.orbit_radius <= bound));
        assert!(
            app.animator
                .stars()
                .iter()
                .all(|s| s.center_x == 60.0 && s.center_y == 40.0)
        );
    }

    #[test]
    fn test_ctrl_c_quits_but_c_toggles_mode() {
        let mut app = app();
        app.running = true;
        press(&mut app, 'c');
        assert!(app.running);

        app.on_event(Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!app.running);
    }

    #[test]
    fn test_reduced_motion_from_settings() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        let mut app = App::new(settings, None);
        app.resize(Rect::new(0, 0, 40, 12));
        assert!(app.animator.guards().reduced_motion);
        assert!(!app.animator.kickoff_pending());
        assert!(app.status_text().starts_with("reduced motion"));
    }

    #[test]
    fn test_save_writes_settings_file() {
        let dir = std::env::temp_dir().join(format!("starfield-app-{}", std::process::id()));
        let path = dir.join("config.toml");
        let mut app = app();
        app.save_path = Some(path.clone());
        press(&mut app, 'W');
        press(&mut app, 's');

        assert!(app.status.as_deref().is_some_and(|s| s.starts_with("saved")));
        let saved = Settings::load_from(&path).unwrap();
        assert_eq!(saved.starfield.twinkle_intensity, 25);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_step_helpers() {
        assert_eq!(step_tenths(0.1, -0.1, SPEED_RANGE), 0.0);
        assert_eq!(step_tenths(1.0, 0.1, SPEED_RANGE), 1.1);
        assert_eq!(step_tenths(2.0, 0.1, BRIGHTNESS_RANGE), 2.0);
        assert_eq!(step_count(5, TWINKLE_STEP, false, TWINKLE_RANGE), 5);
        assert_eq!(step_count(20, TWINKLE_STEP, true, TWINKLE_RANGE), 25);
    }
}

use std::io;
use std::time::{Duration, Instant};

use backdrop_config::Config;
use backdrop_core::Countdown;
use backdrop_effects::{Scene, SceneOptions};
use chrono::Local;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
};
use ratatui::{DefaultTerminal, Frame};

mod logging;
mod overlay;

use overlay::Banner;

/// Target frame interval.
const FRAME: Duration = Duration::from_millis(16);

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let log_path = logging::init()?;
    tracing::info!("backdrop v{} starting", env!("CARGO_PKG_VERSION"));
    if let Some(path) = &log_path {
        tracing::debug!("logging to {}", path.display());
    }

    let config = backdrop_config::load().unwrap_or_else(|e| {
        tracing::warn!("config load failed, using defaults: {e}");
        Config::default()
    });

    let mut terminal = ratatui::init();
    let config = session(
        || execute!(io::stdout(), EnableMouseCapture),
        || App::new(config).run(&mut terminal),
        || execute!(io::stdout(), DisableMouseCapture),
        ratatui::restore,
    )?;
    if let Err(e) = backdrop_config::save(&config) {
        tracing::warn!("failed to save config: {e}");
    }
    Ok(())
}

/// Run `body` between `enter` and `leave`.
///
/// `restore` always runs last, whatever failed, so the terminal never stays
/// in raw mode. The first error is reported.
fn session<T>(
    enter: impl FnOnce() -> io::Result<()>,
    body: impl FnOnce() -> color_eyre::Result<T>,
    leave: impl FnOnce() -> io::Result<()>,
    restore: impl FnOnce(),
) -> color_eyre::Result<T> {
    let result = enter().map_err(color_eyre::Report::from).and_then(|()| body());
    let left = leave();
    restore();
    let value = result?;
    left?;
    Ok(value)
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    config: Config,
    /// Settings changed since start.
    dirty: bool,
    scene: Scene,
    /// `None` when the configured target does not parse.
    countdown: Option<Countdown>,
    started: Instant,
}

impl App {
    /// Construct a new instance of [`App`] and mount the configured effect.
    pub fn new(config: Config) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        tracing::info!(seed, effect = config.effect.name(), "building scene");
        let mut scene = Scene::new(SceneOptions {
            seed,
            throttle: config.pointer.throttle(),
            narrow_breakpoint_cols: config.pointer.narrow_breakpoint_cols,
            force_touch: config.pointer.force_touch,
        });
        scene.set_speed(config.speed);
        scene.set_style(config.effect);

        let countdown = match config.countdown.countdown() {
            Ok(countdown) => Some(countdown),
            Err(e) => {
                tracing::warn!("countdown disabled: {e}");
                None
            }
        };

        Self {
            running: false,
            config,
            dirty: false,
            scene,
            countdown,
            started: Instant::now(),
        }
    }

    /// Run the main loop; returns the config as changed by key presses.
    pub fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<Config> {
        self.running = true;
        while self.running {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        if self.dirty {
            tracing::info!("settings changed");
        }
        Ok(self.config)
    }

    fn now(&self) -> Duration {
        self.started.elapsed()
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let now = self.now();
        self.scene.render(frame, area, now);

        let color = self.config.color_theme.color();
        if self.config.countdown.enabled
            && let Some(countdown) = self.countdown
        {
            let banner = Banner {
                countdown,
                label: &self.config.countdown.label,
                now: Local::now().naive_local(),
            };
            overlay::render_banner(frame, area, &banner, color);
        }
        overlay::render_help(frame, area, self.scene.style(), color);
    }

    /// Waits up to one frame for input, then drains whatever else is queued.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        let mut timeout = FRAME;
        while self.running && event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                Event::Resize(cols, rows) => self.scene.resize(cols, rows),
                _ => {}
            }
            timeout = Duration::ZERO;
        }
        Ok(())
    }

    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        let now = self.now();
        match mouse.kind {
            MouseEventKind::Moved => {
                self.scene.pointer_moved(mouse.column, mouse.row, now);
            }
            MouseEventKind::Drag(_) => {
                self.scene.pointer_dragged(mouse.column, mouse.row, now);
            }
            MouseEventKind::Down(_) => self.scene.clicked(mouse.column, mouse.row),
            _ => {}
        }
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('e')) => self.switch_effect(self.config.effect.next()),
            (_, KeyCode::Char('E')) => self.switch_effect(self.config.effect.prev()),
            (_, KeyCode::Char('s')) => self.cycle_speed(),
            (_, KeyCode::Char('c')) => self.cycle_color_theme(),
            (_, KeyCode::Char('t')) => self.toggle_countdown(),
            _ => {}
        }
    }

    fn switch_effect(&mut self, effect: backdrop_core::EffectStyle) {
        self.config.effect = effect;
        self.scene.set_style(effect);
        self.dirty = true;
    }

    fn cycle_speed(&mut self) {
        self.config.speed = self.config.speed.next();
        self.scene.set_speed(self.config.speed);
        self.dirty = true;
    }

    /// Cycle through available color themes.
    fn cycle_color_theme(&mut self) {
        self.config.color_theme = self.config.color_theme.next();
        self.dirty = true;
    }

    fn toggle_countdown(&mut self) {
        self.config.countdown.enabled = !self.config.countdown.enabled;
        self.dirty = true;
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
        self.scene.unmount_all();
    }
}

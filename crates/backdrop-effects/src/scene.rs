//! Scene: mounts the effects for a style and drives them every frame.

use std::time::Duration;

use backdrop_core::{AnimationSpeed, DEFAULT_NARROW_BREAKPOINT_COLS, EffectStyle, Viewport};
use ratatui::{Frame, layout::Rect, widgets::Paragraph};

use crate::animations::{
    Effect, blob::BlobMorpher, card::HeroCard, hero3d::Hero3D, parallax::ParallaxLayerStack,
    particles::ParticleField, ripple::Ripple, trail::ParticleTrail, wave::WaveGrid,
};
use crate::clock::FrameClock;
use crate::grid::CellGrid;
use crate::pointer::{DEFAULT_THROTTLE, PointerTracker};
use crate::registry::Subscription;

/// Construction options for a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneOptions {
    /// Seed for every random draw the effects make.
    pub seed: u64,
    /// Minimum spacing between accepted pointer samples.
    pub throttle: Duration,
    /// Viewports narrower than this many columns use the touch fallback.
    pub narrow_breakpoint_cols: u16,
    /// Treat every viewport as a touch device.
    pub force_touch: bool,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            seed: 0,
            throttle: DEFAULT_THROTTLE,
            narrow_breakpoint_cols: DEFAULT_NARROW_BREAKPOINT_COLS,
            force_touch: false,
        }
    }
}

/// An effect together with its registrations. Dropping it unmounts it.
struct Mounted {
    effect: Box<dyn Effect>,
    _frame: Subscription,
    _input: Subscription,
}

/// Owns the frame clock, the pointer tracker and the mounted effects.
pub struct Scene {
    options: SceneOptions,
    clock: FrameClock,
    tracker: PointerTracker,
    style: EffectStyle,
    mounted: Vec<Mounted>,
    viewport: Viewport,
    grid: CellGrid,
    generation: u64,
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("style", &self.style)
            .field("viewport", &self.viewport)
            .field("mounted", &self.mounted_effects())
            .finish()
    }
}

/// Effects making up a style, in paint order.
fn build_effects(style: EffectStyle, seed: u64) -> Vec<Box<dyn Effect>> {
    match style {
        EffectStyle::None => Vec::new(),
        EffectStyle::Starfield => vec![Box::new(ParticleField::new(seed))],
        EffectStyle::LiquidBlob => vec![Box::new(BlobMorpher::default())],
        EffectStyle::Parallax => vec![
            Box::new(ParallaxLayerStack::default()),
            Box::new(ParticleTrail::new(seed)),
            Box::new(Ripple::new(seed.rotate_left(17))),
            Box::new(HeroCard::default()),
        ],
        EffectStyle::WaveGrid => vec![Box::new(WaveGrid::new(seed))],
        EffectStyle::Hero3D => vec![Box::new(Hero3D::new(seed))],
    }
}

impl Scene {
    /// Create an empty scene; call [`Scene::set_style`] to mount effects.
    pub fn new(options: SceneOptions) -> Self {
        Self {
            tracker: PointerTracker::new(options.throttle),
            options,
            clock: FrameClock::new(),
            style: EffectStyle::None,
            mounted: Vec::new(),
            viewport: Viewport::default(),
            grid: CellGrid::default(),
            generation: 0,
        }
    }

    pub fn style(&self) -> EffectStyle {
        self.style
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Names of the mounted effects, in paint order.
    pub fn mounted_effects(&self) -> Vec<&'static str> {
        self.mounted.iter().map(|m| m.effect.name()).collect()
    }

    /// Live frame subscriptions; zero when nothing is mounted.
    pub fn frame_subscriber_count(&self) -> usize {
        self.clock.subscriber_count()
    }

    /// Live input listeners; zero when nothing is mounted.
    pub fn input_listener_count(&self) -> usize {
        self.tracker.listener_count()
    }

    /// Unmount the current effects and mount the ones for `style`.
    pub fn set_style(&mut self, style: EffectStyle) {
        if style == self.style && !self.mounted.is_empty() {
            return;
        }
        self.unmount_all();
        self.style = style;
        self.generation += 1;
        let seed = self
            .options
            .seed
            .wrapping_add(self.generation.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        for effect in build_effects(style, seed) {
            self.mount(effect);
        }
        tracing::debug!(style = style.name(), effects = ?self.mounted_effects(), "mounted");
    }

    fn mount(&mut self, mut effect: Box<dyn Effect>) {
        effect.resize(self.viewport);
        let frame = self.clock.subscribe();
        let input = self.tracker.listen();
        self.mounted.push(Mounted {
            effect,
            _frame: frame,
            _input: input,
        });
    }

    /// Drop every mounted effect, releasing its subscriptions.
    pub fn unmount_all(&mut self) {
        if !self.mounted.is_empty() {
            tracing::debug!(style = self.style.name(), "unmounting");
        }
        self.mounted.clear();
    }

    pub fn set_speed(&mut self, speed: AnimationSpeed) {
        self.clock.set_time_scale(speed.time_scale());
    }

    /// Viewport changed to `cols` x `rows` cells.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        let viewport = Viewport::classify(
            cols,
            rows,
            self.options.narrow_breakpoint_cols,
            self.options.force_touch,
        );
        if viewport == self.viewport {
            return;
        }
        tracing::debug!(cols, rows, device = ?viewport.device, "viewport resized");
        self.viewport = viewport;
        self.tracker.resize(viewport);
        self.grid.resize(viewport);
        for m in &mut self.mounted {
            m.effect.resize(viewport);
        }
    }

    /// Hover sample at `now` (monotonic). Returns whether it was accepted.
    pub fn pointer_moved(&mut self, col: u16, row: u16, now: Duration) -> bool {
        self.tracker.on_move(col, row, now)
    }

    /// Drag sample: a touch on narrow devices, a hover otherwise.
    pub fn pointer_dragged(&mut self, col: u16, row: u16, now: Duration) -> bool {
        if self.tracker.device().is_narrow() {
            self.tracker.on_touch(col, row)
        } else {
            self.tracker.on_move(col, row, now)
        }
    }

    pub fn clicked(&mut self, col: u16, row: u16) {
        self.tracker.on_click(col, row);
    }

    /// Run one frame at monotonic time `now` and return the painted grid.
    pub fn advance(&mut self, now: Duration) -> &CellGrid {
        let frame = self.clock.tick(now);
        let input = self.tracker.begin_frame();
        self.grid.clear();
        for m in &mut self.mounted {
            m.effect.update(frame, &input);
            m.effect.paint(&mut self.grid);
        }
        &self.grid
    }

    /// Advance one frame and draw it into `area`.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, now: Duration) {
        self.resize(area.width, area.height);
        if self.mounted.is_empty() {
            return;
        }
        let lines = self.advance(now).to_lines();
        frame.render_widget(Paragraph::new(lines), area);
    }
}

//! Expanding ring spawned by a click.

use std::time::Duration;

use backdrop_core::Viewport;
use glam::Vec2;
use rand::{Rng, SeedableRng, rngs::StdRng};
use ratatui::style::Color;

use super::Effect;
use crate::chars::{SHADE_CHARS, ramp};
use crate::clock::FrameTime;
use crate::color::hex;
use crate::grid::CellGrid;
use crate::pointer::FrameInput;

pub const RIPPLE_DURATION: Duration = Duration::from_millis(600);
/// Smallest ripple diameter in pixels.
pub const RIPPLE_BASE_SIZE: f32 = 180.0;
/// Random extra diameter in pixels.
pub const RIPPLE_SIZE_JITTER: f32 = 60.0;
pub const RIPPLE_MAX_SCALE: f32 = 1.5;
pub const RIPPLE_START_OPACITY: f32 = 0.7;

const GOLD: Color = hex(0xFFD700);
/// The gradient is transparent from this fraction of the radius outward.
const GRADIENT_STOP: f32 = 0.8;

/// One in-flight ripple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveRipple {
    pub center: Vec2,
    pub size: f32,
    pub born: Duration,
}

impl ActiveRipple {
    /// Animation progress in `[0, 1]`.
    pub fn progress(&self, now: Duration) -> f32 {
        (now.saturating_sub(self.born).as_secs_f32() / RIPPLE_DURATION.as_secs_f32()).min(1.0)
    }

    pub fn scale(&self, now: Duration) -> f32 {
        let p = self.progress(now);
        // ease-out
        (1.0 - (1.0 - p) * (1.0 - p)) * RIPPLE_MAX_SCALE
    }

    pub fn opacity(&self, now: Duration) -> f32 {
        RIPPLE_START_OPACITY * (1.0 - self.progress(now))
    }

    /// Current outer radius in pixels.
    pub fn radius(&self, now: Duration) -> f32 {
        self.size * 0.5 * self.scale(now)
    }
}

#[derive(Debug)]
pub struct Ripple {
    current: Option<ActiveRipple>,
    now: Duration,
    rng: StdRng,
}

impl Ripple {
    pub fn new(seed: u64) -> Self {
        Self {
            current: None,
            now: Duration::ZERO,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn current(&self) -> Option<&ActiveRipple> {
        self.current.as_ref()
    }
}

impl Effect for Ripple {
    fn name(&self) -> &'static str {
        "ripple"
    }

    fn resize(&mut self, _viewport: Viewport) {}

    fn update(&mut self, frame: FrameTime, input: &FrameInput) {
        self.now = frame.elapsed;
        // a newer click replaces the running ripple
        if let Some(click) = input.clicks.last() {
            let size = RIPPLE_BASE_SIZE + self.rng.random_range(0.0..RIPPLE_SIZE_JITTER);
            self.current = Some(ActiveRipple {
                center: Vec2::new(click.x, click.y),
                size,
                born: self.now,
            });
        }
        if self
            .current
            .is_some_and(|r| self.now.saturating_sub(r.born) >= RIPPLE_DURATION)
        {
            self.current = None;
        }
    }

    fn paint(&self, grid: &mut CellGrid) {
        let Some(ripple) = self.current else {
            return;
        };
        let radius = ripple.radius(self.now);
        let opacity = ripple.opacity(self.now);
        if radius <= 0.0 || opacity <= 0.0 {
            return;
        }
        let vp = grid.viewport();
        let reach = radius * GRADIENT_STOP;
        for row in 0..vp.rows {
            for col in 0..vp.cols {
                let (x, y) = vp.cell_center_px(col, row);
                let d = Vec2::new(x, y).distance(ripple.center);
                if d >= reach {
                    continue;
                }
                // radial gradient: half-transparent gold at the centre, clear at the stop
                let alpha = opacity * 0.5 * (1.0 - d / reach);
                grid.blend(col, row, ramp(SHADE_CHARS, alpha / 0.35), GOLD, alpha);
            }
        }
    }
}

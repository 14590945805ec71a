//! Glowing dots left behind by the pointer.

use std::collections::VecDeque;
use std::time::Duration;

use backdrop_core::Viewport;
use rand::{Rng, SeedableRng, rngs::StdRng};
use ratatui::style::Color;

use super::Effect;
use crate::chars::{TRAIL_CHARS, ramp};
use crate::clock::FrameTime;
use crate::color::{hex, mix};
use crate::grid::CellGrid;
use crate::pointer::FrameInput;

/// How long a trail particle lives.
pub const TRAIL_LIFETIME: Duration = Duration::from_millis(400);
/// Upper bound on live particles.
pub const TRAIL_CAPACITY: usize = 64;
/// Scale at which a dot spills into the neighbouring cells.
pub const SPILL_SCALE: f32 = 1.5;
const SPILL_CHAR: char = '·';

const GOLD: Color = hex(0xFFD700);
const ORANGE: Color = hex(0xFFA500);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailParticle {
    pub x: i32,
    pub y: i32,
    pub born: Duration,
    pub color: Color,
}

impl TrailParticle {
    /// Fraction of the lifetime used up at `now`, in `[0, 1]`.
    pub fn age(&self, now: Duration) -> f32 {
        (now.saturating_sub(self.born).as_secs_f32() / TRAIL_LIFETIME.as_secs_f32()).min(1.0)
    }

    /// Size relative to a fresh dot: 1 at birth, 2 at expiry.
    pub fn scale(&self, now: Duration) -> f32 {
        1.0 + self.age(now)
    }
}

#[derive(Debug)]
pub struct ParticleTrail {
    particles: VecDeque<TrailParticle>,
    last_sample: Option<(i32, i32)>,
    now: Duration,
    rng: StdRng,
}

impl ParticleTrail {
    pub fn new(seed: u64) -> Self {
        Self {
            particles: VecDeque::with_capacity(TRAIL_CAPACITY),
            last_sample: None,
            now: Duration::ZERO,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn particles(&self) -> impl Iterator<Item = &TrailParticle> {
        self.particles.iter()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    fn expire(&mut self) {
        while let Some(front) = self.particles.front() {
            if self.now.saturating_sub(front.born) >= TRAIL_LIFETIME {
                self.particles.pop_front();
            } else {
                break;
            }
        }
    }

    fn spawn(&mut self, x: i32, y: i32) {
        if self.particles.len() == TRAIL_CAPACITY {
            self.particles.pop_front();
        }
        let color = if self.rng.random_bool(0.5) { GOLD } else { ORANGE };
        self.particles.push_back(TrailParticle {
            x,
            y,
            born: self.now,
            color,
        });
    }
}

impl Effect for ParticleTrail {
    fn name(&self) -> &'static str {
        "trail"
    }

    fn resize(&mut self, _viewport: Viewport) {}

    fn update(&mut self, frame: FrameTime, input: &FrameInput) {
        self.now = frame.elapsed;
        self.expire();
        let p = input.pointer;
        let sample = (p.client_x, p.client_y);
        if p.active && self.last_sample != Some(sample) {
            self.last_sample = Some(sample);
            self.spawn(sample.0, sample.1);
        }
    }

    fn paint(&self, grid: &mut CellGrid) {
        for particle in &self.particles {
            let age = particle.age(self.now);
            // opacity fades 1 -> 0 while the dot grows 1x -> 2x
            let opacity = 1.0 - age;
            let ch = ramp(TRAIL_CHARS, age);
            let Some((col, row)) = grid
                .viewport()
                .cell_at_px(particle.x as f32, particle.y as f32)
            else {
                continue;
            };
            grid.blend(col, row, ch, particle.color, opacity);
            if particle.scale(self.now) >= SPILL_SCALE {
                let halo = opacity * 0.5;
                let neighbours = [
                    col.checked_sub(1).map(|c| (c, row)),
                    col.checked_add(1).map(|c| (c, row)),
                    row.checked_sub(1).map(|r| (col, r)),
                    row.checked_add(1).map(|r| (col, r)),
                ];
                for (c, r) in neighbours.into_iter().flatten() {
                    grid.blend(c, r, SPILL_CHAR, particle.color, halo);
                }
            }
        }
    }
}

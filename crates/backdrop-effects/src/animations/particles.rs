//! Drifting starfield with depth parallax.

use backdrop_core::{DeviceClass, PointerState, Viewport};
use glam::Vec2;
use rand::{Rng, SeedableRng, rngs::StdRng};
use ratatui::style::Color;

use super::Effect;
use crate::chars::{STAR_CHARS, ramp};
use crate::clock::FrameTime;
use crate::color::{hex, mix};
use crate::grid::CellGrid;
use crate::pointer::FrameInput;

/// Stars on a desktop viewport.
pub const DESKTOP_STAR_COUNT: usize = 120;
/// Stars on a narrow viewport.
pub const NARROW_STAR_COUNT: usize = 60;
/// Off-screen band above and below the viewport stars travel through.
pub const RESPAWN_MARGIN: f32 = 10.0;
/// Parallax amplitude in pixels at depth 1.
pub const PARALLAX_AMPLITUDE: Vec2 = Vec2::new(60.0, 40.0);
/// Amplitude factor on narrow viewports.
pub const NARROW_AMPLITUDE_SCALE: f32 = 0.5;

const STAR_ALPHA: f32 = 0.7;
const NIGHT: Color = hex(0x0A0F2C);

/// Palette entry of a star.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleColor {
    White,
    Cyan,
    Magenta,
}

impl ParticleColor {
    /// Half white, a quarter each cyan and magenta.
    pub fn random(rng: &mut impl Rng) -> Self {
        let r: f32 = rng.random();
        if r < 0.5 {
            ParticleColor::White
        } else if r < 0.75 {
            ParticleColor::Cyan
        } else {
            ParticleColor::Magenta
        }
    }

    pub fn color(self) -> Color {
        match self {
            ParticleColor::White => hex(0xFFFFFF),
            ParticleColor::Cyan => hex(0x00FFFF),
            ParticleColor::Magenta => hex(0xFF00FF),
        }
    }
}

/// One star.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    /// Simulated depth in `[1, 3)`; scales speed, size and parallax.
    pub depth: f32,
    pub size: f32,
    pub speed: f32,
    pub color: ParticleColor,
}

impl Star {
    fn random(rng: &mut StdRng, width: f32, y_range: (f32, f32)) -> Self {
        let (y0, y1) = y_range;
        Self {
            x: rng.random_range(0.0..width.max(f32::EPSILON)),
            y: if y1 > y0 { rng.random_range(y0..y1) } else { y0 },
            depth: rng.random_range(1.0..3.0),
            size: rng.random_range(0.6..1.8),
            speed: rng.random_range(0.05..0.2),
            color: ParticleColor::random(rng),
        }
    }

    /// Drawn radius in pixels.
    pub fn radius(&self) -> f32 {
        self.size * self.depth
    }
}

/// Area stars live in: the viewport plus the respawn band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.min.x && x <= self.max.x && y >= self.min.y && y <= self.max.y
    }
}

/// Fixed-size field of stars falling through the viewport.
#[derive(Debug)]
pub struct ParticleField {
    stars: Vec<Star>,
    viewport: Viewport,
    offset: Vec2,
    rng: StdRng,
}

impl ParticleField {
    pub fn new(seed: u64) -> Self {
        Self {
            stars: Vec::new(),
            viewport: Viewport::default(),
            offset: Vec2::ZERO,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn star_count_for(device: DeviceClass) -> usize {
        match device {
            DeviceClass::Desktop => DESKTOP_STAR_COUNT,
            DeviceClass::Narrow => NARROW_STAR_COUNT,
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds {
            min: Vec2::new(0.0, -RESPAWN_MARGIN),
            max: Vec2::new(
                self.viewport.width_px(),
                self.viewport.height_px() + RESPAWN_MARGIN,
            ),
        }
    }

    /// Parallax offset at depth 1 for a pointer on a device.
    pub fn parallax_offset(pointer: PointerState, device: DeviceClass) -> Vec2 {
        let (dx, dy) = match device {
            DeviceClass::Desktop => pointer.offset_from_center(),
            DeviceClass::Narrow => pointer.pinned().offset_from_center(),
        };
        let amplitude = match device {
            DeviceClass::Desktop => PARALLAX_AMPLITUDE,
            DeviceClass::Narrow => PARALLAX_AMPLITUDE * NARROW_AMPLITUDE_SCALE,
        };
        Vec2::new(dx, dy) * amplitude
    }

    /// Move every star down by `speed * depth` per reference frame,
    /// respawning those that left the bottom of the field. A respawned star
    /// keeps its speed; position, depth, size and colour are redrawn.
    pub fn step(&mut self, frame_scale: f32) {
        let width = self.viewport.width_px();
        let floor = self.viewport.height_px() + RESPAWN_MARGIN;
        for star in &mut self.stars {
            star.y += star.speed * star.depth * frame_scale;
            if star.y > floor {
                let speed = star.speed;
                *star = Star {
                    speed,
                    ..Star::random(&mut self.rng, width, (-RESPAWN_MARGIN, -RESPAWN_MARGIN))
                };
            }
        }
    }

    /// Screen position of a star including parallax.
    pub fn draw_position(&self, star: &Star) -> Vec2 {
        Vec2::new(star.x, star.y) + self.offset * star.depth
    }
}

impl Effect for ParticleField {
    fn name(&self) -> &'static str {
        "starfield"
    }

    fn resize(&mut self, viewport: Viewport) {
        if viewport == self.viewport && !self.stars.is_empty() {
            return;
        }
        self.viewport = viewport;
        let count = Self::star_count_for(viewport.device);
        let (width, height) = (viewport.width_px(), viewport.height_px());
        self.stars = (0..count)
            .map(|_| Star::random(&mut self.rng, width, (0.0, height)))
            .collect();
        tracing::debug!(count, width, height, "starfield reseeded");
    }

    fn update(&mut self, frame: FrameTime, input: &FrameInput) {
        self.step(frame.frame_scale());
        self.offset = Self::parallax_offset(input.pointer, input.device);
    }

    fn paint(&self, grid: &mut CellGrid) {
        for star in &self.stars {
            let pos = self.draw_position(star);
            // radius spans 0.6..5.4 px
            let ch = ramp(STAR_CHARS, (star.radius() - 0.6) / 4.8);
            let fg = mix(NIGHT, star.color.color(), STAR_ALPHA);
            grid.plot_px(pos.x, pos.y, ch, fg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn field(viewport: Viewport) -> ParticleField {
        let mut field = ParticleField::new(7);
        field.resize(viewport);
        field
    }

    #[test]
    fn test_count_follows_device_class() {
        assert_eq!(field(Viewport::new(160, 45)).stars().len(), DESKTOP_STAR_COUNT);
        assert_eq!(field(Viewport::new(56, 20)).stars().len(), NARROW_STAR_COUNT);
    }

    #[test]
    fn test_initial_stars_inside_viewport() {
        let f = field(Viewport::new(160, 45));
        for s in f.stars() {
            assert!(s.x >= 0.0 && s.x < 1280.0);
            assert!(s.y >= 0.0 && s.y < 720.0);
            assert!((1.0..3.0).contains(&s.depth));
            assert!(s.size > 0.0 && s.radius() > 0.0);
        }
    }

    #[test]
    fn test_respawned_stars_stay_in_bounds() {
        let mut f = field(Viewport::new(120, 30));
        let bounds = f.bounds();
        // ~2000 frames is enough for every star to wrap at least once
        for _ in 0..2_000 {
            f.step(1.0);
            for s in f.stars() {
                assert!(bounds.contains(s.x, s.y), "star escaped: {s:?}");
            }
        }
    }

    #[test]
    fn test_respawn_enters_from_top_edge() {
        let mut f = field(Viewport::new(120, 30));
        let floor = f.viewport.height_px() + RESPAWN_MARGIN;
        f.stars[0].y = floor - 0.001;
        f.stars[0].speed = 0.1;
        f.step(1.0);
        let s = &f.stars()[0];
        assert_eq!(s.y, -RESPAWN_MARGIN);
        assert!(s.x >= 0.0 && s.x <= f.viewport.width_px());
    }

    #[test]
    fn test_respawn_keeps_speed() {
        let mut f = field(Viewport::new(120, 30));
        let floor = f.viewport.height_px() + RESPAWN_MARGIN;
        for (i, star) in f.stars.iter_mut().enumerate() {
            star.y = floor - 0.001;
            star.speed = 0.05 + i as f32 * 0.001;
        }
        let speeds: Vec<f32> = f.stars().iter().map(|s| s.speed).collect();
        f.step(1.0);
        assert!(f.stars().iter().all(|s| s.y == -RESPAWN_MARGIN));
        let after: Vec<f32> = f.stars().iter().map(|s| s.speed).collect();
        assert_eq!(after, speeds);
    }

    #[test]
    fn test_resize_with_same_dimensions_is_idempotent() {
        let vp = Viewport::new(150, 40);
        let mut f = field(vp);
        let before = f.stars().to_vec();
        let bounds = f.bounds();
        f.resize(vp);
        f.resize(vp);
        assert_eq!(f.stars(), &before[..]);
        assert_eq!(f.bounds(), bounds);

        f.resize(Viewport::new(56, 30));
        assert_eq!(f.stars().len(), NARROW_STAR_COUNT);
        f.resize(vp);
        assert_eq!(f.stars().len(), DESKTOP_STAR_COUNT);
        assert_eq!(f.bounds(), bounds);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let vp = Viewport::new(150, 40);
        assert_eq!(field(vp).stars(), field(vp).stars());
    }

    #[test]
    fn test_parallax_scales_with_depth() {
        let mut f = field(Viewport::new(150, 40));
        let input = FrameInput {
            pointer: PointerState::from_fractions(1.0, 0.0),
            ..Default::default()
        };
        f.update(FrameTime::default(), &input);
        assert_eq!(f.offset, Vec2::new(30.0, -20.0));
        let star = f.stars()[0].clone();
        let pos = f.draw_position(&star);
        assert!((pos.x - star.x - 30.0 * star.depth).abs() < 1e-3);
        assert!((pos.y - star.y + 20.0 * star.depth).abs() < 1e-3);
    }

    #[test]
    fn test_narrow_offset_equals_centered_pointer() {
        let centered = ParticleField::parallax_offset(PointerState::centered(), DeviceClass::Narrow);
        for (x, y) in [(0.0, 0.0), (1.0, 1.0), (0.2, 0.9)] {
            let p = PointerState::from_fractions(x, y);
            assert_eq!(ParticleField::parallax_offset(p, DeviceClass::Narrow), centered);
        }
        assert_eq!(centered, Vec2::ZERO);
    }

    #[test]
    fn test_update_is_frame_rate_independent() {
        let vp = Viewport::new(150, 40);
        let mut a = field(vp);
        let mut b = field(vp);
        let input = FrameInput::default();
        let y0 = a.stars()[3].y;
        a.update(
            FrameTime {
                elapsed: Duration::ZERO,
                delta: Duration::from_micros(33_334),
            },
            &input,
        );
        for _ in 0..2 {
            b.update(
                FrameTime {
                    elapsed: Duration::ZERO,
                    delta: Duration::from_micros(16_667),
                },
                &input,
            );
        }
        let moved_a = a.stars()[3].y - y0;
        let moved_b = b.stars()[3].y - y0;
        assert!((moved_a - moved_b).abs() < 1e-3);
    }

    #[test]
    fn test_paint_draws_visible_stars() {
        let f = field(Viewport::new(150, 40));
        let mut grid = CellGrid::new(Viewport::new(150, 40));
        f.paint(&mut grid);
        assert!(grid.painted() > 0);
        assert!(grid.painted() <= DESKTOP_STAR_COUNT);
    }
}

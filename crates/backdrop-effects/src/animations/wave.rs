//! Lattice of dots riding a travelling wave, tilted by the pointer and
//! seen through a perspective camera.

use backdrop_core::{DeviceClass, PointerState, Viewport};
use glam::{Mat3, Vec2, Vec3};
use rand::{Rng, SeedableRng, rngs::StdRng};

use super::Effect;
use super::particles::ParticleColor;
use crate::camera::PerspectiveCamera;
use crate::chars::{DOT_CHARS, ramp};
use crate::clock::FrameTime;
use crate::grid::CellGrid;
use crate::pointer::FrameInput;

pub const ROWS: usize = 18;
pub const COLS: usize = 32;
/// Distance between neighbouring dots in world units.
pub const SPACING: f32 = 0.35;
/// Peak height of each of the two wave terms.
pub const WAVE_AMPLITUDE: f32 = 0.18;
/// Maximum tilt in radians at full pointer deflection.
pub const TILT: f32 = 0.6;
const CAMERA_DISTANCE: f32 = 8.0;
const FOV_Y: f32 = std::f32::consts::FRAC_PI_3;

/// One lattice dot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridDot {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub color: ParticleColor,
}

/// Height of the wave at lattice position `(x, y)` and time `t`.
pub fn wave_height(x: f32, y: f32, t: f32) -> f32 {
    (x * 1.2 + t * 1.2).sin() * WAVE_AMPLITUDE + (y * 1.2 + t * 1.1).cos() * WAVE_AMPLITUDE
}

/// Group rotation `(around x, around y)` for a pointer.
///
/// Narrow devices read the pointer as centred, so the lattice stays flat.
pub fn tilt_for(pointer: PointerState, device: DeviceClass) -> Vec2 {
    let pointer = match device {
        DeviceClass::Desktop => pointer,
        DeviceClass::Narrow => pointer.pinned(),
    };
    let (dx, dy) = pointer.offset_from_center();
    Vec2::new(dy * TILT, dx * TILT)
}

#[derive(Debug)]
pub struct WaveGrid {
    dots: Vec<GridDot>,
    tilt: Vec2,
    camera: PerspectiveCamera,
}

impl WaveGrid {
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut dots = Vec::with_capacity(ROWS * COLS);
        for i in 0..ROWS {
            for j in 0..COLS {
                // one third cyan, the rest split between magenta and white
                let color = if rng.random::<f32>() > 0.66 {
                    ParticleColor::Cyan
                } else if rng.random::<f32>() > 0.5 {
                    ParticleColor::Magenta
                } else {
                    ParticleColor::White
                };
                dots.push(GridDot {
                    x: (j as f32 - COLS as f32 / 2.0) * SPACING,
                    y: (i as f32 - ROWS as f32 / 2.0) * SPACING,
                    z: 0.0,
                    color,
                });
            }
        }
        Self {
            dots,
            tilt: Vec2::ZERO,
            camera: PerspectiveCamera::new(CAMERA_DISTANCE, FOV_Y),
        }
    }

    pub fn dots(&self) -> &[GridDot] {
        &self.dots
    }

    pub fn tilt(&self) -> Vec2 {
        self.tilt
    }

    /// Set every dot's height for time `t` (seconds).
    pub fn advance(&mut self, t: f32) {
        for dot in &mut self.dots {
            dot.z = wave_height(dot.x, dot.y, t);
        }
    }

    fn rotation(&self) -> Mat3 {
        Mat3::from_rotation_x(self.tilt.x) * Mat3::from_rotation_y(self.tilt.y)
    }

    /// Project a world point to viewport pixels, with its camera-space depth.
    pub fn project(&self, p: Vec3, viewport: Viewport) -> Option<(Vec2, f32)> {
        self.camera.project(self.rotation() * p, viewport)
    }
}

impl Effect for WaveGrid {
    fn name(&self) -> &'static str {
        "wave grid"
    }

    fn resize(&mut self, _viewport: Viewport) {}

    fn update(&mut self, frame: FrameTime, input: &FrameInput) {
        self.tilt = tilt_for(input.pointer, input.device);
        self.advance(frame.elapsed_secs());
    }

    fn paint(&self, grid: &mut CellGrid) {
        let vp = grid.viewport();
        if vp.is_empty() {
            return;
        }
        let near = CAMERA_DISTANCE - 2.0 * WAVE_AMPLITUDE - 2.0;
        let far = CAMERA_DISTANCE + 2.0 * WAVE_AMPLITUDE + 2.0;
        // far dots first so nearer ones win shared cells
        let mut projected: Vec<(Vec2, f32, ParticleColor)> = self
            .dots
            .iter()
            .filter_map(|d| {
                self.project(Vec3::new(d.x, d.y, d.z), vp)
                    .map(|(pos, depth)| (pos, depth, d.color))
            })
            .collect();
        projected.sort_by(|a, b| b.1.total_cmp(&a.1));
        for (pos, depth, color) in projected {
            let closeness = (far - depth) / (far - near);
            grid.plot_px(pos.x, pos.y, ramp(DOT_CHARS, closeness), color.color());
        }
    }
}

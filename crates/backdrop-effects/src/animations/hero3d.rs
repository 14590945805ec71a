//! Spinning sphere inside a cloud of orbiting particles, seen through a
//! slowly orbiting camera.

use std::f32::consts::{PI, TAU};

use backdrop_core::Viewport;
use glam::{Mat3, Vec2, Vec3};
use rand::{Rng, SeedableRng, rngs::StdRng};
use ratatui::style::Color;

use super::Effect;
use crate::camera::PerspectiveCamera;
use crate::chars::{DOT_CHARS, SHADE_CHARS, ramp};
use crate::clock::FrameTime;
use crate::color::{hex, mix};
use crate::grid::CellGrid;
use crate::pointer::FrameInput;

pub const SPHERE_RADIUS: f32 = 1.0;
/// Sphere spin in radians per second around x and y.
pub const SPIN_RATE: Vec2 = Vec2::new(0.2, 0.1);
pub const CLOUD_SIZE: usize = 50;
/// Edge of the cube the cloud particles are scattered in.
pub const CLOUD_EXTENT: f32 = 10.0;
/// Cloud rotation around y in radians per second.
pub const CLOUD_ORBIT_RATE: f32 = 0.1;
/// Camera orbit in radians per second (one turn per two minutes).
pub const CAMERA_ORBIT_RATE: f32 = TAU / 120.0;
pub const CAMERA_DISTANCE: f32 = 4.0;
pub const FOV_Y_DEG: f32 = 75.0;

/// Spacing of the latitude/longitude lines that make the spin visible.
const GRID_STEP: f32 = PI / 6.0;
const GRID_WIDTH: f32 = 0.05;
const AMBIENT: f32 = 0.35;

const INDIGO: Color = hex(0x4B0082);
const CLOUD_CYAN: Color = hex(0x00CED1);
const GOLD: Color = hex(0xFFD700);

/// First point where a ray from `origin` along unit `dir` meets the sphere.
pub fn hit_sphere(origin: Vec3, dir: Vec3) -> Option<Vec3> {
    let b = origin.dot(dir);
    let c = origin.length_squared() - SPHERE_RADIUS * SPHERE_RADIUS;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t > 0.0).then(|| origin + dir * t)
}

fn on_grid_line(angle: f32, scale: f32) -> bool {
    let off = (angle / GRID_STEP).fract().abs();
    off.min(1.0 - off) * GRID_STEP * scale < GRID_WIDTH
}

#[derive(Debug)]
pub struct Hero3D {
    spin: Vec2,
    orbit: f32,
    cloud: Vec<Vec3>,
    camera: PerspectiveCamera,
    light: Vec3,
}

impl Hero3D {
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut coord = || (rng.random::<f32>() - 0.5) * CLOUD_EXTENT;
        let cloud = (0..CLOUD_SIZE)
            .map(|_| {
                let (x, y, z) = (coord(), coord(), coord());
                Vec3::new(x, y, z)
            })
            .collect();
        Self {
            spin: Vec2::ZERO,
            orbit: 0.0,
            cloud,
            camera: PerspectiveCamera::new(CAMERA_DISTANCE, FOV_Y_DEG.to_radians()),
            light: Vec3::new(10.0, 10.0, 5.0).normalize(),
        }
    }

    /// Accumulated sphere rotation around x and y.
    pub fn spin(&self) -> Vec2 {
        self.spin
    }

    /// Current cloud rotation around y.
    pub fn orbit(&self) -> f32 {
        self.orbit
    }

    /// Cloud particles in their unrotated positions.
    pub fn cloud(&self) -> &[Vec3] {
        &self.cloud
    }

    pub fn camera(&self) -> PerspectiveCamera {
        self.camera
    }

    fn spin_matrix(&self) -> Mat3 {
        Mat3::from_rotation_x(self.spin.x) * Mat3::from_rotation_y(self.spin.y)
    }

    /// Shade of the sphere surface at world point `p`.
    fn shade(&self, p: Vec3) -> (char, Color) {
        let normal = p.normalize();
        let lambert = normal.dot(self.light).max(0.0);
        let intensity = AMBIENT + (1.0 - AMBIENT) * lambert;

        let local = self.spin_matrix().transpose() * normal;
        let lat = local.y.clamp(-1.0, 1.0).asin();
        let lon = local.z.atan2(local.x);
        let line = on_grid_line(lat, 1.0) || on_grid_line(lon, lat.cos());

        let body = mix(INDIGO, Color::White, 0.3 * lambert);
        let color = if line { mix(body, GOLD, 0.5) } else { body };
        (ramp(SHADE_CHARS, intensity), mix(Color::Black, color, intensity))
    }
}

impl Effect for Hero3D {
    fn name(&self) -> &'static str {
        "hero 3d"
    }

    fn resize(&mut self, _viewport: Viewport) {}

    fn update(&mut self, frame: FrameTime, _input: &FrameInput) {
        self.spin += SPIN_RATE * frame.delta.as_secs_f32();
        self.orbit = frame.elapsed_secs() * CLOUD_ORBIT_RATE;
        self.camera.yaw = frame.elapsed_secs() * CAMERA_ORBIT_RATE;
    }

    fn paint(&self, grid: &mut CellGrid) {
        let vp = grid.viewport();
        if vp.is_empty() {
            return;
        }
        let eye = self.camera.position();

        for row in 0..vp.rows {
            for col in 0..vp.cols {
                let (x, y) = vp.cell_center_px(col, row);
                if let Some(p) = hit_sphere(eye, self.camera.ray(x, y, vp)) {
                    let (ch, color) = self.shade(p);
                    grid.set(col, row, ch, color);
                }
            }
        }

        let orbit = Mat3::from_rotation_y(self.orbit);
        for p in &self.cloud {
            let p = orbit * *p;
            let Some((pos, depth)) = self.camera.project(p, vp) else {
                continue;
            };
            let to_p = p - eye;
            // hidden behind the sphere
            if let Some(hit) = hit_sphere(eye, to_p.normalize())
                && (hit - eye).length() < to_p.length()
            {
                continue;
            }
            let closeness = 1.0 - ((depth - 1.0) / 8.0).clamp(0.0, 1.0);
            grid.plot_px(pos.x, pos.y, ramp(DOT_CHARS, closeness), CLOUD_CYAN);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn frame(elapsed_ms: u64, delta_ms: u64) -> FrameTime {
        FrameTime {
            elapsed: Duration::from_millis(elapsed_ms),
            delta: Duration::from_millis(delta_ms),
        }
    }

    #[test]
    fn test_cloud_fills_cube() {
        let hero = Hero3D::new(3);
        assert_eq!(hero.cloud().len(), CLOUD_SIZE);
        let half = CLOUD_EXTENT / 2.0;
        for p in hero.cloud() {
            assert!(p.abs().max_element() <= half);
        }
        assert_eq!(hero.cloud(), Hero3D::new(3).cloud());
    }

    #[test]
    fn test_spin_accumulates_delta() {
        let mut hero = Hero3D::new(1);
        let input = FrameInput::default();
        for i in 1..=4 {
            hero.update(frame(i * 250, 250), &input);
        }
        assert!((hero.spin() - SPIN_RATE).length() < 1e-5);
        assert!((hero.orbit() - 0.1).abs() < 1e-6);
        assert!((hero.camera().yaw - CAMERA_ORBIT_RATE).abs() < 1e-6);
    }

    #[test]
    fn test_hit_sphere() {
        let eye = Vec3::new(0.0, 0.0, CAMERA_DISTANCE);
        let hit = hit_sphere(eye, Vec3::NEG_Z).expect("hits");
        assert!((hit - Vec3::Z).length() < 1e-5);
        assert!(hit_sphere(eye, Vec3::new(0.0, 1.0, -1.0).normalize()).is_none());
        // looking away
        assert!(hit_sphere(eye, Vec3::Z).is_none());
    }

    #[test]
    fn test_paint_draws_sphere_in_center() {
        let vp = Viewport::new(120, 40);
        let hero = Hero3D::new(1);
        let mut grid = CellGrid::new(vp);
        hero.paint(&mut grid);
        let center = grid.get(60, 20).expect("sphere covers centre");
        assert!(SHADE_CHARS.contains(&center.ch));
        assert!(grid.get(0, 0).is_none_or(|c| c.fg == CLOUD_CYAN));
        assert!(grid.painted() > 100);
    }

    #[test]
    fn test_grid_lines_follow_spin() {
        let vp = Viewport::new(120, 40);
        let mut hero = Hero3D::new(1);
        let mut before = CellGrid::new(vp);
        hero.paint(&mut before);
        hero.update(frame(2_000, 2_000), &FrameInput::default());
        let mut after = CellGrid::new(vp);
        hero.paint(&mut after);
        assert_ne!(before.to_lines(), after.to_lines());
    }
}

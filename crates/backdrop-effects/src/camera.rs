//! Perspective camera shared by the 3D effects.

use backdrop_core::Viewport;
use glam::{Mat3, Vec2, Vec3};

/// Camera on the positive z axis looking at the origin.
///
/// `yaw` orbits the camera around the y axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    pub distance: f32,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub yaw: f32,
}

impl PerspectiveCamera {
    pub fn new(distance: f32, fov_y: f32) -> Self {
        Self {
            distance,
            fov_y,
            yaw: 0.0,
        }
    }

    pub fn position(&self) -> Vec3 {
        Mat3::from_rotation_y(self.yaw) * Vec3::new(0.0, 0.0, self.distance)
    }

    fn focal(&self) -> f32 {
        1.0 / (self.fov_y / 2.0).tan()
    }

    fn screen(viewport: Viewport) -> (Vec2, f32) {
        let size = Vec2::new(viewport.width_px(), viewport.height_px());
        (size, size.x / size.y.max(1.0))
    }

    /// Project a world point to viewport pixels, with its camera-space depth.
    /// Points at or behind the camera give `None`.
    pub fn project(&self, p: Vec3, viewport: Viewport) -> Option<(Vec2, f32)> {
        let cam = Mat3::from_rotation_y(-self.yaw) * p - Vec3::new(0.0, 0.0, self.distance);
        let depth = -cam.z;
        if depth <= f32::EPSILON {
            return None;
        }
        let (size, aspect) = Self::screen(viewport);
        let focal = self.focal();
        let ndc = Vec2::new(cam.x * focal / (depth * aspect), cam.y * focal / depth);
        Some((
            Vec2::new((ndc.x + 1.0) * 0.5 * size.x, (1.0 - ndc.y) * 0.5 * size.y),
            depth,
        ))
    }

    /// World-space unit direction of the ray through pixel `(x, y)`.
    pub fn ray(&self, x: f32, y: f32, viewport: Viewport) -> Vec3 {
        let (size, aspect) = Self::screen(viewport);
        let focal = self.focal();
        let ndc = Vec2::new(2.0 * x / size.x.max(1.0) - 1.0, 1.0 - 2.0 * y / size.y.max(1.0));
        let dir = Vec3::new(ndc.x * aspect / focal, ndc.y / focal, -1.0).normalize();
        Mat3::from_rotation_y(self.yaw) * dir
    }
}

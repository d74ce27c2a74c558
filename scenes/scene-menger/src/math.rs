//! Scene-local 3D math: just enough to orbit a camera and project points
//! onto the canvas.

use core::ops::{Add, Mul, Sub};

use reel_scene::{Vec2, CANVAS_SIZE};

/// Points closer than this to the camera plane are culled.
const NEAR: f32 = 0.1;

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn dot(self, rhs: Vec3) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    #[inline]
    pub fn cross(self, rhs: Vec3) -> Vec3 {
        Vec3::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Unit vector, or zero for a zero-length input.
    #[inline]
    pub fn normalized(self) -> Vec3 {
        let len = self.length();
        if len > 0.0 {
            Vec3::new(self.x / len, self.y / len, self.z / len)
        } else {
            Vec3::ZERO
        }
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Perspective camera with a precomputed look-at basis.
pub struct Camera {
    position: Vec3,
    right: Vec3,
    up: Vec3,
    forward: Vec3,
    /// Focal length in canvas pixels, derived from the vertical FOV.
    focal: f32,
}

impl Camera {
    pub fn look_at(position: Vec3, target: Vec3, fov_y: f32) -> Self {
        let forward = (target - position).normalized();
        let right = forward.cross(Vec3::new(0.0, 1.0, 0.0)).normalized();
        let up = right.cross(forward);
        let focal = (CANVAS_SIZE.y / 2.0) / (fov_y / 2.0).tan();
        Self { position, right, up, forward, focal }
    }

    /// Projects a world point onto the canvas.
    ///
    /// Returns the canvas position and the view-space depth, or `None` when
    /// the point is at/behind the camera plane.
    pub fn project(&self, point: Vec3) -> Option<(Vec2, f32)> {
        let d = point - self.position;
        let depth = d.dot(self.forward);
        if depth <= NEAR {
            return None;
        }

        let x = d.dot(self.right) * self.focal / depth;
        let y = d.dot(self.up) * self.focal / depth;

        // View-space +Y is up; canvas +Y is down.
        Some((
            Vec2::new(CANVAS_SIZE.x / 2.0 + x, CANVAS_SIZE.y / 2.0 - y),
            depth,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_products_form_a_right_handed_basis() {
        let x = Vec3::new(1.0, 0.0, 0.0);
        let y = Vec3::new(0.0, 1.0, 0.0);
        assert_eq!(x.cross(y), Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn target_projects_to_the_canvas_center() {
        let camera = Camera::look_at(
            Vec3::new(0.0, 0.0, -10.0),
            Vec3::ZERO,
            45.0_f32.to_radians(),
        );
        let (p, depth) = camera.project(Vec3::ZERO).unwrap();
        assert!((p.x - CANVAS_SIZE.x / 2.0).abs() < 1e-3);
        assert!((p.y - CANVAS_SIZE.y / 2.0).abs() < 1e-3);
        assert!((depth - 10.0).abs() < 1e-3);
    }

    #[test]
    fn points_behind_the_camera_are_culled() {
        let camera = Camera::look_at(
            Vec3::new(0.0, 0.0, -10.0),
            Vec3::ZERO,
            45.0_f32.to_radians(),
        );
        assert!(camera.project(Vec3::new(0.0, 0.0, -20.0)).is_none());
    }

    #[test]
    fn nearer_points_report_smaller_depth() {
        let camera = Camera::look_at(
            Vec3::new(0.0, 0.0, -10.0),
            Vec3::ZERO,
            45.0_f32.to_radians(),
        );
        let (_, near) = camera.project(Vec3::new(0.0, 0.0, -5.0)).unwrap();
        let (_, far) = camera.project(Vec3::new(0.0, 0.0, 5.0)).unwrap();
        assert!(near < far);
    }
}

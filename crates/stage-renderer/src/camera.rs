//! Perspective orbit camera

use glam::{Mat4, Vec2, Vec3, Vec4};
use stage_core::BoundingBox;

use crate::picking::Ray;

/// Perspective camera orbiting a target point.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub aspect: f32,
    /// Orbit/pan/zoom input is ignored while false (e.g. during a gizmo drag)
    pub controls_enabled: bool,
}

const MIN_DISTANCE: f32 = 0.1;
const MAX_DISTANCE: f32 = 500.0;
const ORBIT_SPEED: f32 = 0.005;

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl OrbitCamera {
    pub fn new(aspect: f32) -> Self {
        Self {
            position: Vec3::new(5.0, 5.0, 5.0),
            target: Vec3::ZERO,
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            aspect,
            controls_enabled: true,
        }
    }

    pub fn fov_radians(&self) -> f32 {
        self.fov_degrees.to_radians()
    }

    pub fn update_aspect(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Unit vector the camera looks along.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or(Vec3::NEG_Z)
    }

    pub fn distance(&self) -> f32 {
        self.position.distance(self.target)
    }

    /// Ray through a screen point (pixels, origin top-left).
    pub fn screen_to_ray(&self, x: f32, y: f32, width: f32, height: f32) -> Ray {
        let ndc_x = (2.0 * x / width.max(1.0)) - 1.0;
        let ndc_y = 1.0 - (2.0 * y / height.max(1.0));

        let inv = self.view_projection().inverse();
        let near = inv.project_point3(Vec3::new(ndc_x, ndc_y, 0.0));
        let far = inv.project_point3(Vec3::new(ndc_x, ndc_y, 1.0));

        Ray::new(near, far - near)
    }

    /// Projects a world point to screen pixels. `None` when behind the camera.
    pub fn world_to_screen(&self, point: Vec3, width: f32, height: f32) -> Option<Vec2> {
        let clip = self.view_projection() * Vec4::new(point.x, point.y, point.z, 1.0);
        if clip.w <= self.near * 0.5 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * width,
            (1.0 - ndc.y) * 0.5 * height,
        ))
    }

    /// Rotates the camera around the target by a pointer delta in pixels.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        if !self.controls_enabled {
            return;
        }
        let offset = self.position - self.target;
        let radius = offset.length().max(MIN_DISTANCE);
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        theta -= dx * ORBIT_SPEED;
        phi = (phi - dy * ORBIT_SPEED).clamp(1e-3, std::f32::consts::PI - 1e-3);

        let sin_phi = phi.sin();
        self.position = self.target
            + Vec3::new(
                radius * sin_phi * theta.sin(),
                radius * phi.cos(),
                radius * sin_phi * theta.cos(),
            );
    }

    /// Moves camera and target in the view plane by a pointer delta in pixels.
    pub fn pan(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        if !self.controls_enabled {
            return;
        }
        let forward = self.forward();
        let right = forward.cross(Vec3::Y).normalize_or(Vec3::X);
        let up = right.cross(forward);
        let world_per_pixel =
            2.0 * self.distance() * (self.fov_radians() * 0.5).tan() / viewport_height.max(1.0);
        let offset = (-right * dx + up * dy) * world_per_pixel;
        self.position += offset;
        self.target += offset;
    }

    /// Scales the distance to the target; `factor < 1` moves closer.
    pub fn zoom(&mut self, factor: f32) {
        if !self.controls_enabled || factor <= 0.0 {
            return;
        }
        let offset = self.position - self.target;
        let distance = (offset.length() * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
        self.position = self.target + offset.normalize_or(Vec3::Z) * distance;
    }

    /// Distance at which `bounds` fills the view comfortably.
    pub fn framing_distance(&self, bounds: &BoundingBox) -> f32 {
        (bounds.max_dimension() / (self.fov_radians() * 0.5).sin()).abs() * 1.5
    }

    /// Points the camera at `bounds`. Keeps the current viewing direction
    /// unless `direction` is given.
    pub fn frame(&mut self, bounds: &BoundingBox, direction: Option<Vec3>) {
        if bounds.is_empty() {
            return;
        }
        let center = bounds.center();
        let direction = direction
            .unwrap_or(self.position - self.target)
            .normalize_or(Vec3::ONE.normalize());
        let distance = self.framing_distance(bounds).max(MIN_DISTANCE);
        self.position = center + direction * distance;
        self.target = center;
    }
}

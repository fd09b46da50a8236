//! Custom multi-object transform gizmos.
//!
//! Each variant is a self-contained set of handles tagged with the axis they
//! manipulate (`x`, `y`, `z`, `xyz`). Handles carry both their wireframe
//! geometry and an analytic pick shape.

mod geometry;
mod rotate;
mod scale;
mod translate;

pub use geometry::*;
pub use rotate::RotateGizmo;
pub use scale::ScaleGizmo;
pub use translate::TranslateGizmo;

use glam::Vec3;
use stage_core::{GizmoAxis, GizmoMode};

use crate::picking::{
    Ray, ray_aabb_intersection, ray_capsule_intersection, ray_ring_intersection,
    ray_sphere_intersection,
};

pub const AXIS_X_COLOR: Rgba = Rgba::hex(0xff0000);
pub const AXIS_Y_COLOR: Rgba = Rgba::hex(0x00ff00);
pub const AXIS_Z_COLOR: Rgba = Rgba::hex(0x0000ff);
pub const NORMAL_OPACITY: f32 = 0.8;
pub const HOVER_OPACITY: f32 = 1.0;

/// Camera distance at which handles have their nominal size (the default
/// orbit distance)
pub const REFERENCE_DISTANCE: f32 = 8.660_254;
const MIN_HANDLE_SCALE: f32 = 0.01;
const MAX_HANDLE_SCALE: f32 = 100.0;

/// Size factor that keeps handles at a constant on-screen size for a camera
/// `camera_distance` away from its target.
pub fn handle_scale(camera_distance: f32) -> f32 {
    if !camera_distance.is_finite() {
        return 1.0;
    }
    (camera_distance / REFERENCE_DISTANCE).clamp(MIN_HANDLE_SCALE, MAX_HANDLE_SCALE)
}

/// Analytic shape used for ray picking, in gizmo-local space
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HandleShape {
    Capsule { start: Vec3, end: Vec3, radius: f32 },
    Sphere { center: Vec3, radius: f32 },
    Cube { center: Vec3, half: f32 },
    Ring { normal: Vec3, radius: f32, tube: f32 },
}

impl HandleShape {
    pub fn hit(&self, ray: &Ray) -> Option<f32> {
        match *self {
            HandleShape::Capsule { start, end, radius } => {
                ray_capsule_intersection(ray, start, end, radius)
            }
            HandleShape::Sphere { center, radius } => ray_sphere_intersection(ray, center, radius),
            HandleShape::Cube { center, half } => {
                ray_aabb_intersection(ray, center - Vec3::splat(half), center + Vec3::splat(half))
            }
            HandleShape::Ring {
                normal,
                radius,
                tube,
            } => ray_ring_intersection(ray, Vec3::ZERO, normal, radius, tube),
        }
    }
}

/// One pickable part of a gizmo.
#[derive(Debug, Clone, PartialEq)]
pub struct GizmoHandle {
    pub axis: GizmoAxis,
    pub shapes: Vec<HandleShape>,
    pub lines: LineGeometry,
    pub color: Rgba,
    pub hover_color: Rgba,
    pub hovered: bool,
}

impl GizmoHandle {
    pub fn new(axis: GizmoAxis, color: Rgba, hover_color: Rgba) -> Self {
        Self {
            axis,
            shapes: Vec::new(),
            lines: LineGeometry::new(),
            color,
            hover_color,
            hovered: false,
        }
    }

    pub fn with_shape(mut self, shape: HandleShape) -> Self {
        self.shapes.push(shape);
        self
    }

    pub fn with_lines(mut self, lines: LineGeometry) -> Self {
        self.lines = lines;
        self
    }

    /// Color to draw with, including hover state.
    pub fn current_color(&self) -> Rgba {
        if self.hovered {
            self.hover_color.with_opacity(HOVER_OPACITY)
        } else {
            self.color.with_opacity(NORMAL_OPACITY)
        }
    }

    /// Nearest hit distance over all shapes of this handle.
    pub fn hit(&self, ray: &Ray) -> Option<f32> {
        self.shapes
            .iter()
            .filter_map(|s| s.hit(ray))
            .min_by(|a, b| a.total_cmp(b))
    }
}

/// Color for a single-axis handle.
pub fn axis_color(axis: GizmoAxis) -> Rgba {
    match axis {
        GizmoAxis::X => AXIS_X_COLOR,
        GizmoAxis::Y => AXIS_Y_COLOR,
        GizmoAxis::Z => AXIS_Z_COLOR,
        GizmoAxis::Xyz => Rgba::WHITE,
    }
}

/// Handle set for one transform mode, positioned at its pivot.
#[derive(Debug, Clone, PartialEq)]
pub enum Gizmo {
    Translate(TranslateGizmo),
    Rotate(RotateGizmo),
    Scale(ScaleGizmo),
}

impl Gizmo {
    pub fn new(mode: GizmoMode, position: Vec3) -> Self {
        let mut gizmo = match mode {
            GizmoMode::Translate => Gizmo::Translate(TranslateGizmo::new()),
            GizmoMode::Rotate => Gizmo::Rotate(RotateGizmo::new()),
            GizmoMode::Scale => Gizmo::Scale(ScaleGizmo::new()),
        };
        gizmo.set_position(position);
        gizmo
    }

    pub fn mode(&self) -> GizmoMode {
        match self {
            Gizmo::Translate(_) => GizmoMode::Translate,
            Gizmo::Rotate(_) => GizmoMode::Rotate,
            Gizmo::Scale(_) => GizmoMode::Scale,
        }
    }

    pub fn handles(&self) -> &[GizmoHandle] {
        match self {
            Gizmo::Translate(g) => &g.handles,
            Gizmo::Rotate(g) => &g.handles,
            Gizmo::Scale(g) => &g.handles,
        }
    }

    fn handles_mut(&mut self) -> &mut Vec<GizmoHandle> {
        match self {
            Gizmo::Translate(g) => &mut g.handles,
            Gizmo::Rotate(g) => &mut g.handles,
            Gizmo::Scale(g) => &mut g.handles,
        }
    }

    pub fn position(&self) -> Vec3 {
        match self {
            Gizmo::Translate(g) => g.position,
            Gizmo::Rotate(g) => g.position,
            Gizmo::Scale(g) => g.position,
        }
    }

    pub fn set_position(&mut self, position: Vec3) {
        match self {
            Gizmo::Translate(g) => g.position = position,
            Gizmo::Rotate(g) => g.position = position,
            Gizmo::Scale(g) => g.position = position,
        }
    }

    pub fn scale(&self) -> f32 {
        match self {
            Gizmo::Translate(g) => g.scale,
            Gizmo::Rotate(g) => g.scale,
            Gizmo::Scale(g) => g.scale,
        }
    }

    pub fn set_scale(&mut self, scale: f32) {
        let scale = scale.max(MIN_HANDLE_SCALE);
        match self {
            Gizmo::Translate(g) => g.scale = scale,
            Gizmo::Rotate(g) => g.scale = scale,
            Gizmo::Scale(g) => g.scale = scale,
        }
    }

    /// Highlights the handles of `axis`, resetting every other handle.
    pub fn set_hover(&mut self, axis: GizmoAxis) {
        match self {
            // Rotate has no center handle to highlight
            Gizmo::Rotate(_) if axis == GizmoAxis::Xyz => self.clear_hover(),
            _ => {
                for handle in self.handles_mut() {
                    handle.hovered = handle.axis == axis;
                }
            }
        }
    }

    pub fn clear_hover(&mut self) {
        for handle in self.handles_mut() {
            handle.hovered = false;
        }
    }

    pub fn hovered(&self) -> Option<GizmoAxis> {
        self.handles().iter().find(|h| h.hovered).map(|h| h.axis)
    }

    /// Releases the handle geometry. A disposed gizmo draws and picks nothing.
    pub fn dispose(&mut self) {
        let released = self.handles().len();
        self.handles_mut().clear();
        tracing::trace!(mode = ?self.mode(), released, "gizmo disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.handles().is_empty()
    }

    /// Axis of the nearest handle hit by `ray`.
    pub fn pick(&self, ray: &Ray) -> Option<GizmoAxis> {
        // Hit distances stay in handle units; only their order matters
        let local = Ray::new((ray.origin - self.position()) / self.scale(), ray.direction);
        self.handles()
            .iter()
            .filter_map(|h| h.hit(&local).map(|t| (h.axis, t)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(axis, _)| axis)
    }

    /// World-space line segments with the color of their handle.
    pub fn world_lines(&self) -> impl Iterator<Item = ([glam::Vec3; 2], Rgba)> + '_ {
        let offset = self.position();
        let scale = self.scale();
        self.handles().iter().flat_map(move |h| {
            let color = h.current_color();
            h.lines.placed(offset, scale).map(move |seg| (seg, color))
        })
    }
}

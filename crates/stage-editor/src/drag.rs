//! Hover and drag state machine for gizmo handles

use glam::{Vec2, Vec3};
use stage_core::{AxisLocks, GizmoAxis, GizmoMode, NodeId, Transform, TransformSpace};
use stage_renderer::{Gizmo, OrbitCamera, Plane, Ray};
use tracing::{debug, trace};

use crate::ops::{self, DragStart};
use crate::settings::EditorSettings;

/// State captured when a drag begins.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub axis: GizmoAxis,
    pub mode: GizmoMode,
    /// Pointer position at drag start, in viewport pixels
    pub pointer_start: Vec2,
    pub starts: Vec<DragStart>,
    /// Selection pivot at drag start
    pub centroid: Vec3,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Hover(GizmoAxis),
    Dragging(DragSession),
}

/// Per-frame inputs of a drag update.
#[derive(Debug, Clone, Copy)]
pub struct DragContext<'a> {
    pub pointer: Vec2,
    pub ray: Ray,
    /// Current gizmo position; translate planes pass through it
    pub gizmo_position: Vec3,
    pub camera_forward: Vec3,
    pub space: TransformSpace,
    pub locks: &'a AxisLocks,
    pub settings: &'a EditorSettings,
}

/// idle -> hover -> dragging -> idle
#[derive(Debug, Default)]
pub struct DragInteractionController {
    state: DragState,
}

impl DragInteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Dragging(session) => Some(session),
            _ => None,
        }
    }

    pub fn hovered(&self) -> Option<GizmoAxis> {
        match &self.state {
            DragState::Hover(axis) => Some(*axis),
            DragState::Dragging(session) => Some(session.axis),
            DragState::Idle => None,
        }
    }

    /// Pointer moved without a button held: highlight the handle under it.
    pub fn hover(&mut self, gizmo: Option<&mut Gizmo>, ray: &Ray) -> Option<GizmoAxis> {
        if self.is_dragging() {
            return self.hovered();
        }
        let Some(gizmo) = gizmo else {
            self.state = DragState::Idle;
            return None;
        };
        match gizmo.pick(ray) {
            Some(axis) => {
                gizmo.set_hover(axis);
                if self.hovered() != Some(axis) {
                    trace!(axis = axis.name(), "gizmo hover");
                }
                self.state = DragState::Hover(axis);
                Some(axis)
            }
            None => {
                gizmo.clear_hover();
                self.state = DragState::Idle;
                None
            }
        }
    }

    /// Pointer pressed. Starts a drag if a handle is under the pointer and
    /// disables camera input for its duration.
    pub fn begin(
        &mut self,
        gizmo: &mut Gizmo,
        ray: &Ray,
        pointer: Vec2,
        starts: Vec<DragStart>,
        centroid: Vec3,
        camera: &mut OrbitCamera,
    ) -> bool {
        if starts.is_empty() {
            return false;
        }
        let Some(axis) = gizmo.pick(ray) else {
            return false;
        };
        gizmo.set_hover(axis);
        camera.controls_enabled = false;
        debug!(
            axis = axis.name(),
            mode = gizmo.mode().name(),
            count = starts.len(),
            "drag start"
        );
        self.state = DragState::Dragging(DragSession {
            axis,
            mode: gizmo.mode(),
            pointer_start: pointer,
            starts,
            centroid,
        });
        true
    }

    /// New transforms for the dragged objects, computed from their pre-drag
    /// state. `None` if no drag is active or the pointer ray misses the
    /// drag plane; the session stays active either way.
    pub fn update(&self, ctx: &DragContext<'_>) -> Option<Vec<(NodeId, Transform)>> {
        let session = self.session()?;
        let screen_delta = ctx.pointer - session.pointer_start;

        let transforms = match session.mode {
            GizmoMode::Translate => {
                let plane =
                    translate_plane(session.axis, ctx.gizmo_position, ctx.camera_forward);
                let Some(point) = plane.intersect(&ctx.ray) else {
                    trace!("drag ray missed the translate plane");
                    return None;
                };
                ops::translate(
                    &session.starts,
                    point - session.centroid,
                    session.axis,
                    ctx.locks,
                )
            }
            GizmoMode::Rotate => {
                // Rings only; there is no free-rotate handle
                let axis = session.axis.axis()?;
                let angle =
                    ops::rotation_angle(axis, screen_delta, ctx.settings.rotate_sensitivity);
                ops::rotate(
                    &session.starts,
                    session.centroid,
                    axis,
                    angle,
                    ctx.space,
                    ctx.locks,
                )
            }
            GizmoMode::Scale => {
                let factor = ops::scale_factor(
                    screen_delta,
                    ctx.settings.scale_sensitivity,
                    ctx.settings.min_scale,
                );
                ops::scale(
                    &session.starts,
                    session.centroid,
                    factor,
                    session.axis,
                    ctx.space,
                    ctx.locks,
                    ctx.settings.min_scale,
                )
            }
        };

        Some(
            session
                .starts
                .iter()
                .map(|s| s.id.clone())
                .zip(transforms)
                .collect(),
        )
    }

    /// Pointer released. Clears the session and hover, restores camera input.
    pub fn end(&mut self, gizmo: Option<&mut Gizmo>, camera: &mut OrbitCamera) -> Option<DragSession> {
        camera.controls_enabled = true;
        if let Some(gizmo) = gizmo {
            gizmo.clear_hover();
        }
        match std::mem::take(&mut self.state) {
            DragState::Dragging(session) => {
                debug!(axis = session.axis.name(), "drag end");
                Some(session)
            }
            _ => None,
        }
    }

    /// Drops any session without touching transforms, e.g. on unmount.
    pub fn abandon(&mut self) {
        if self.is_dragging() {
            debug!("drag abandoned");
        }
        self.state = DragState::Idle;
    }
}

/// Plane a translate drag slides along. Single-axis handles use a fixed
/// world plane containing the axis; the center handle faces the camera.
pub fn translate_plane(axis: GizmoAxis, through: Vec3, camera_forward: Vec3) -> Plane {
    let normal = match axis {
        GizmoAxis::X => Vec3::Z,
        GizmoAxis::Y => Vec3::X,
        GizmoAxis::Z => Vec3::Y,
        GizmoAxis::Xyz => -camera_forward,
    };
    Plane::new(through, normal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use stage_core::Axis;

    fn starts() -> Vec<DragStart> {
        [0.0, 2.0, 4.0]
            .iter()
            .enumerate()
            .map(|(i, x)| DragStart {
                id: NodeId::new(format!("n{i}")),
                transform: Transform::from_position(Vec3::new(*x, 0.0, 0.0)),
            })
            .collect()
    }

    fn ctx<'a>(
        pointer: Vec2,
        ray: Ray,
        locks: &'a AxisLocks,
        settings: &'a EditorSettings,
    ) -> DragContext<'a> {
        DragContext {
            pointer,
            ray,
            gizmo_position: Vec3::new(2.0, 0.0, 0.0),
            camera_forward: Vec3::NEG_Z,
            space: TransformSpace::Global,
            locks,
            settings,
        }
    }

    fn begin_on_x_arrow(mode: GizmoMode) -> (DragInteractionController, Gizmo, OrbitCamera) {
        let mut gizmo = Gizmo::new(mode, Vec3::new(2.0, 0.0, 0.0));
        let mut camera = OrbitCamera::default();
        let mut drag = DragInteractionController::new();
        // Down the Z axis onto the X arrow shaft, one unit from the pivot
        let ray = Ray::new(Vec3::new(3.0, 0.0, 10.0), Vec3::NEG_Z);
        assert!(drag.begin(
            &mut gizmo,
            &ray,
            Vec2::new(100.0, 100.0),
            starts(),
            Vec3::new(2.0, 0.0, 0.0),
            &mut camera,
        ));
        (drag, gizmo, camera)
    }

    #[test]
    fn test_translate_drag_moves_row() {
        let (drag, _gizmo, camera) = begin_on_x_arrow(GizmoMode::Translate);
        assert!(!camera.controls_enabled);
        assert_eq!(drag.session().unwrap().axis, GizmoAxis::X);

        let locks = AxisLocks::default();
        let settings = EditorSettings::default();
        let ray = Ray::new(Vec3::new(3.0, 0.5, 10.0), Vec3::NEG_Z);
        let out = drag
            .update(&ctx(Vec2::new(120.0, 100.0), ray, &locks, &settings))
            .unwrap();
        let xs: Vec<f32> = out.iter().map(|(_, t)| t.position.x).collect();
        assert_eq!(xs, vec![1.0, 3.0, 5.0]);
        // Y component of the hit is ignored by the X handle
        assert!(out.iter().all(|(_, t)| t.position.y == 0.0));
    }

    #[test]
    fn test_parallel_ray_skips_frame() {
        let (drag, _gizmo, _camera) = begin_on_x_arrow(GizmoMode::Translate);
        let locks = AxisLocks::default();
        let settings = EditorSettings::default();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::X);
        assert!(drag.update(&ctx(Vec2::ZERO, ray, &locks, &settings)).is_none());
        assert!(drag.is_dragging());
    }

    #[test]
    fn test_rotate_drag_with_locked_axis() {
        let mut gizmo = Gizmo::new(GizmoMode::Rotate, Vec3::ZERO);
        let mut camera = OrbitCamera::default();
        let mut drag = DragInteractionController::new();
        // Straight down onto the Y ring, away from the other two rings
        let ray = Ray::new(Vec3::new(0.8485, 10.0, 0.8485), Vec3::NEG_Y);
        assert!(drag.begin(&mut gizmo, &ray, Vec2::ZERO, starts(), Vec3::ZERO, &mut camera));
        assert_eq!(drag.session().unwrap().axis, GizmoAxis::Y);

        let settings = EditorSettings::default();
        let mut locks = AxisLocks::default();
        locks.set(stage_core::TransformKind::Rotation, Axis::Y, true);
        let out = drag
            .update(&ctx(Vec2::new(50.0, 0.0), ray, &locks, &settings))
            .unwrap();
        for ((_, after), before) in out.iter().zip(starts()) {
            assert_eq!(*after, before.transform);
        }

        let unlocked = AxisLocks::default();
        let out = drag
            .update(&ctx(Vec2::new(50.0, 0.0), ray, &unlocked, &settings))
            .unwrap();
        assert_relative_eq!(out[0].1.rotation.y, 0.5);
    }

    #[test]
    fn test_end_restores_camera_and_clears_hover() {
        let (mut drag, mut gizmo, mut camera) = begin_on_x_arrow(GizmoMode::Scale);
        assert_eq!(gizmo.hovered(), Some(GizmoAxis::X));
        let session = drag.end(Some(&mut gizmo), &mut camera).unwrap();
        assert_eq!(session.mode, GizmoMode::Scale);
        assert!(camera.controls_enabled);
        assert_eq!(gizmo.hovered(), None);
        assert_eq!(drag.state(), &DragState::Idle);
    }

    #[test]
    fn test_hover_transitions() {
        let mut gizmo = Gizmo::new(GizmoMode::Translate, Vec3::ZERO);
        let mut drag = DragInteractionController::new();
        let on_y = Ray::new(Vec3::new(0.0, 1.0, 10.0), Vec3::NEG_Z);
        assert_eq!(drag.hover(Some(&mut gizmo), &on_y), Some(GizmoAxis::Y));
        assert_eq!(gizmo.hovered(), Some(GizmoAxis::Y));

        let miss = Ray::new(Vec3::new(5.0, 5.0, 10.0), Vec3::NEG_Z);
        assert_eq!(drag.hover(Some(&mut gizmo), &miss), None);
        assert_eq!(gizmo.hovered(), None);
        assert_eq!(drag.state(), &DragState::Idle);
    }
}

//! Translate gizmo: three arrows and a free-move center sphere

use glam::Vec3;
use stage_core::{Axis, GizmoAxis};

use super::{GizmoHandle, HandleShape, LineGeometry, Rgba, axis_color};

const ARROW_LENGTH: f32 = 1.5;
const ARROW_THICKNESS: f32 = 0.02;
const CONE_HEIGHT: f32 = 0.3;
const CONE_RADIUS: f32 = 0.08;
const CENTER_RADIUS: f32 = 0.08;

#[derive(Debug, Clone, PartialEq)]
pub struct TranslateGizmo {
    pub position: Vec3,
    /// Uniform size factor applied to handle geometry and pick shapes
    pub scale: f32,
    pub handles: Vec<GizmoHandle>,
}

impl TranslateGizmo {
    pub fn new() -> Self {
        let mut handles: Vec<GizmoHandle> = Axis::ALL.into_iter().map(arrow).collect();
        handles.push(
            GizmoHandle::new(GizmoAxis::Xyz, Rgba::WHITE, Rgba::WHITE)
                .with_shape(HandleShape::Sphere {
                    center: Vec3::ZERO,
                    radius: CENTER_RADIUS,
                })
                .with_lines(
                    LineGeometry::new()
                        .circle(Vec3::ZERO, Vec3::X, CENTER_RADIUS, 12)
                        .circle(Vec3::ZERO, Vec3::Y, CENTER_RADIUS, 12)
                        .circle(Vec3::ZERO, Vec3::Z, CENTER_RADIUS, 12),
                ),
        );
        Self {
            position: Vec3::ZERO,
            scale: 1.0,
            handles,
        }
    }
}

impl Default for TranslateGizmo {
    fn default() -> Self {
        Self::new()
    }
}

fn hover_color(axis: Axis) -> Rgba {
    match axis {
        Axis::X => Rgba::hex(0xff5555),
        Axis::Y => Rgba::hex(0x55ff55),
        Axis::Z => Rgba::hex(0x5555ff),
    }
}

fn arrow(axis: Axis) -> GizmoHandle {
    let dir = axis.unit();
    let tip_base = dir * ARROW_LENGTH;
    let gizmo_axis = GizmoAxis::from(axis);

    GizmoHandle::new(gizmo_axis, axis_color(gizmo_axis), hover_color(axis))
        .with_shape(HandleShape::Capsule {
            start: Vec3::ZERO,
            end: tip_base,
            radius: ARROW_THICKNESS,
        })
        .with_shape(HandleShape::Capsule {
            start: tip_base - dir * (CONE_HEIGHT * 0.5),
            end: tip_base + dir * (CONE_HEIGHT * 0.5),
            radius: CONE_RADIUS,
        })
        .with_lines(
            LineGeometry::new()
                .line(Vec3::ZERO, tip_base)
                .cone(tip_base - dir * (CONE_HEIGHT * 0.5), dir, CONE_RADIUS, CONE_HEIGHT),
        )
}

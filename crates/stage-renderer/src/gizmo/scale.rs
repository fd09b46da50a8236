//! Scale gizmo: three shaft+box handles and a uniform-scale center box

use glam::Vec3;
use stage_core::{Axis, GizmoAxis};

use super::{GizmoHandle, HandleShape, LineGeometry, Rgba, axis_color};

const LINE_LENGTH: f32 = 1.2;
const LINE_THICKNESS: f32 = 0.02;
const BOX_SIZE: f32 = 0.12;
const CENTER_BOX_SIZE: f32 = BOX_SIZE * 1.2;

#[derive(Debug, Clone, PartialEq)]
pub struct ScaleGizmo {
    pub position: Vec3,
    /// Uniform size factor applied to handle geometry and pick shapes
    pub scale: f32,
    pub handles: Vec<GizmoHandle>,
}

impl ScaleGizmo {
    pub fn new() -> Self {
        let mut handles: Vec<GizmoHandle> = Axis::ALL.into_iter().map(shaft).collect();
        let half = CENTER_BOX_SIZE * 0.5;
        handles.push(
            GizmoHandle::new(GizmoAxis::Xyz, Rgba::WHITE, Rgba::WHITE)
                .with_shape(HandleShape::Cube {
                    center: Vec3::ZERO,
                    half,
                })
                .with_lines(LineGeometry::new().cuboid(Vec3::splat(-half), Vec3::splat(half))),
        );
        Self {
            position: Vec3::ZERO,
            scale: 1.0,
            handles,
        }
    }
}

impl Default for ScaleGizmo {
    fn default() -> Self {
        Self::new()
    }
}

fn shaft(axis: Axis) -> GizmoHandle {
    let gizmo_axis = GizmoAxis::from(axis);
    let end = axis.unit() * LINE_LENGTH;
    let half = BOX_SIZE * 0.5;
    let color = axis_color(gizmo_axis);

    GizmoHandle::new(gizmo_axis, color, color)
        .with_shape(HandleShape::Capsule {
            start: Vec3::ZERO,
            end,
            radius: LINE_THICKNESS,
        })
        .with_shape(HandleShape::Cube { center: end, half })
        .with_lines(
            LineGeometry::new()
                .line(Vec3::ZERO, end)
                .cuboid(end - Vec3::splat(half), end + Vec3::splat(half)),
        )
}

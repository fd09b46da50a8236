//! Rotate gizmo: one torus ring per axis plane

use glam::Vec3;
use stage_core::{Axis, GizmoAxis};

use super::{GizmoHandle, HandleShape, LineGeometry, axis_color};

const RING_RADIUS: f32 = 1.2;
const TUBE_RADIUS: f32 = 0.02;
const SEGMENTS: usize = 64;
/// Rings are thin; picking uses a wider tube
const PICK_TUBE: f32 = 0.08;

#[derive(Debug, Clone, PartialEq)]
pub struct RotateGizmo {
    pub position: Vec3,
    /// Uniform size factor applied to handle geometry and pick shapes
    pub scale: f32,
    pub handles: Vec<GizmoHandle>,
}

impl RotateGizmo {
    pub fn new() -> Self {
        let handles = Axis::ALL
            .into_iter()
            .map(|axis| {
                let gizmo_axis = GizmoAxis::from(axis);
                // The x ring lies in the YZ plane, so its normal is the x axis
                let normal = axis.unit();
                let color = axis_color(gizmo_axis);
                GizmoHandle::new(gizmo_axis, color, color)
                    .with_shape(HandleShape::Ring {
                        normal,
                        radius: RING_RADIUS,
                        tube: PICK_TUBE.max(TUBE_RADIUS),
                    })
                    .with_lines(LineGeometry::new().circle(Vec3::ZERO, normal, RING_RADIUS, SEGMENTS))
            })
            .collect();
        Self {
            position: Vec3::ZERO,
            scale: 1.0,
            handles,
        }
    }
}

impl Default for RotateGizmo {
    fn default() -> Self {
        Self::new()
    }
}

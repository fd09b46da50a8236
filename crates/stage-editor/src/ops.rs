//! Lock-aware transform math shared by drags and panel edits
//!
//! Every function takes the pre-drag transforms and returns new ones, so a
//! drag update is always computed from the state at drag start and never
//! accumulates error across frames.

use glam::{Quat, Vec2, Vec3};
use stage_core::{Axis, AxisLocks, GizmoAxis, NodeId, Transform, TransformKind, TransformSpace};

/// Transform of one selected object captured at drag start.
#[derive(Debug, Clone, PartialEq)]
pub struct DragStart {
    pub id: NodeId,
    pub transform: Transform,
}

/// Rotation angle for a pointer moved by `screen_delta` pixels since drag start.
///
/// Horizontal motion drives Y; vertical motion drives X and Z.
pub fn rotation_angle(axis: Axis, screen_delta: Vec2, sensitivity: f32) -> f32 {
    match axis {
        Axis::Y => screen_delta.x * sensitivity,
        Axis::X | Axis::Z => -screen_delta.y * sensitivity,
    }
}

/// Uniform scale factor for a pointer moved by `screen_delta` pixels.
pub fn scale_factor(screen_delta: Vec2, sensitivity: f32, min_scale: f32) -> f32 {
    (1.0 + (screen_delta.x + screen_delta.y) * sensitivity).max(min_scale)
}

/// Adds `delta` to every start position, limited to the handle's axes and
/// the unlocked position components.
pub fn translate(
    starts: &[DragStart],
    delta: Vec3,
    handle: GizmoAxis,
    locks: &AxisLocks,
) -> Vec<Transform> {
    starts
        .iter()
        .map(|start| {
            let mut next = start.transform;
            locks.apply(
                TransformKind::Position,
                handle,
                &mut next.position,
                start.transform.position + delta,
            );
            next
        })
        .collect()
}

/// Rotates the selection by `angle` about `axis`.
///
/// A single object only gets the angle added to its rotation. Several
/// objects in global space additionally orbit `centroid` rigidly; in local
/// space each object turns in place. Nothing changes while the axis is
/// locked.
pub fn rotate(
    starts: &[DragStart],
    centroid: Vec3,
    axis: Axis,
    angle: f32,
    space: TransformSpace,
    locks: &AxisLocks,
) -> Vec<Transform> {
    if locks.is_locked(TransformKind::Rotation, axis) {
        return starts.iter().map(|s| s.transform).collect();
    }
    let orbit = starts.len() > 1 && space == TransformSpace::Global;
    let rotation = Quat::from_axis_angle(axis.unit(), angle);

    starts
        .iter()
        .map(|start| {
            let mut next = start.transform;
            axis.set(
                &mut next.rotation,
                axis.get(start.transform.rotation) + angle,
            );
            if orbit {
                next.position = centroid + rotation * (start.transform.position - centroid);
            }
            next
        })
        .collect()
}

/// Scales the selection by `factor` on the handle's axes.
///
/// Scale components never drop below `min_scale`. Several objects in global
/// space also spread away from (or toward) `centroid` by the same factor.
pub fn scale(
    starts: &[DragStart],
    centroid: Vec3,
    factor: f32,
    handle: GizmoAxis,
    space: TransformSpace,
    locks: &AxisLocks,
    min_scale: f32,
) -> Vec<Transform> {
    if !locks.allows(TransformKind::Scale, handle) {
        return starts.iter().map(|s| s.transform).collect();
    }
    let spread = starts.len() > 1 && space == TransformSpace::Global;

    starts
        .iter()
        .map(|start| {
            let mut next = start.transform;
            let scaled = (start.transform.scale * factor).max(Vec3::splat(min_scale));
            locks.apply(TransformKind::Scale, handle, &mut next.scale, scaled);
            if spread {
                next.position = centroid + (start.transform.position - centroid) * factor;
            }
            next
        })
        .collect()
}

/// Numeric edit of one component on a single object.
///
/// Rotation values are degrees. Returns `None` when the axis is locked.
pub fn set_component(
    transform: &Transform,
    kind: TransformKind,
    axis: Axis,
    value: f32,
    locks: &AxisLocks,
    min_scale: f32,
) -> Option<Transform> {
    if locks.is_locked(kind, axis) {
        return None;
    }
    let mut next = *transform;
    match kind {
        TransformKind::Position => axis.set(&mut next.position, value),
        TransformKind::Rotation => axis.set(&mut next.rotation, value.to_radians()),
        TransformKind::Scale => axis.set(&mut next.scale, value.max(min_scale)),
    }
    Some(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn starts(positions: &[Vec3]) -> Vec<DragStart> {
        positions
            .iter()
            .enumerate()
            .map(|(i, p)| DragStart {
                id: NodeId::new(format!("n{i}")),
                transform: Transform::from_position(*p),
            })
            .collect()
    }

    fn row() -> Vec<DragStart> {
        starts(&[Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0), Vec3::new(4.0, 0.0, 0.0)])
    }

    #[test]
    fn test_translate_row_rigidly() {
        let out = translate(&row(), Vec3::X, GizmoAxis::X, &AxisLocks::default());
        let xs: Vec<f32> = out.iter().map(|t| t.position.x).collect();
        assert_eq!(xs, vec![1.0, 3.0, 5.0]);
    }

    #[test]
    fn test_translate_respects_handle_and_locks() {
        let mut locks = AxisLocks::default();
        locks.set(TransformKind::Position, Axis::Z, true);
        let out = translate(&row(), Vec3::new(1.0, 2.0, 3.0), GizmoAxis::Xyz, &locks);
        assert_eq!(out[0].position, Vec3::new(1.0, 2.0, 0.0));

        let out = translate(&row(), Vec3::new(1.0, 2.0, 3.0), GizmoAxis::Y, &AxisLocks::default());
        assert_eq!(out[1].position, Vec3::new(2.0, 2.0, 0.0));
    }

    #[test]
    fn test_rotation_angle_directions() {
        let delta = Vec2::new(10.0, 20.0);
        assert_relative_eq!(rotation_angle(Axis::Y, delta, 0.01), 0.1);
        assert_relative_eq!(rotation_angle(Axis::X, delta, 0.01), -0.2);
        assert_relative_eq!(rotation_angle(Axis::Z, delta, 0.01), -0.2);
    }

    #[test]
    fn test_global_rotate_preserves_distance_from_centroid() {
        let input = starts(&[
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(-2.0, 1.0, 3.0),
            Vec3::new(0.5, -1.0, 2.0),
        ]);
        let centroid = Vec3::new(0.0, 0.0, 1.0);
        let out = rotate(
            &input,
            centroid,
            Axis::Y,
            0.7,
            TransformSpace::Global,
            &AxisLocks::default(),
        );
        for (before, after) in input.iter().zip(&out) {
            assert_relative_eq!(
                before.transform.position.distance(centroid),
                after.position.distance(centroid),
                epsilon = 1e-5
            );
            assert_relative_eq!(after.rotation.y, 0.7);
        }
    }

    #[test]
    fn test_global_rotate_quarter_turn() {
        let out = rotate(
            &starts(&[Vec3::new(1.0, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0)]),
            Vec3::ZERO,
            Axis::Y,
            std::f32::consts::FRAC_PI_2,
            TransformSpace::Global,
            &AxisLocks::default(),
        );
        assert_relative_eq!(out[0].position.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(out[0].position.z, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_local_rotate_keeps_positions() {
        let input = row();
        let out = rotate(
            &input,
            Vec3::new(2.0, 0.0, 0.0),
            Axis::Z,
            1.0,
            TransformSpace::Local,
            &AxisLocks::default(),
        );
        for (before, after) in input.iter().zip(&out) {
            assert_eq!(before.transform.position, after.position);
            assert_relative_eq!(after.rotation.z, 1.0);
        }
    }

    #[test]
    fn test_locked_rotation_axis_is_noop() {
        let mut locks = AxisLocks::default();
        locks.set(TransformKind::Rotation, Axis::X, true);
        let input = row();
        let out = rotate(&input, Vec3::ONE, Axis::X, 1.0, TransformSpace::Global, &locks);
        for (before, after) in input.iter().zip(&out) {
            assert_eq!(before.transform, *after);
        }
    }

    #[test]
    fn test_global_scale_spreads_from_centroid() {
        let input = starts(&[Vec3::new(1.0, 1.0, 0.0), Vec3::new(-1.0, 3.0, 2.0)]);
        let centroid = Vec3::new(0.0, 2.0, 1.0);
        let out = scale(
            &input,
            centroid,
            1.5,
            GizmoAxis::Xyz,
            TransformSpace::Global,
            &AxisLocks::default(),
            0.01,
        );
        for (before, after) in input.iter().zip(&out) {
            let offset_before = before.transform.position - centroid;
            let offset_after = after.position - centroid;
            assert_relative_eq!(offset_after.length(), offset_before.length() * 1.5, epsilon = 1e-5);
            assert_relative_eq!(
                offset_after.normalize().dot(offset_before.normalize()),
                1.0,
                epsilon = 1e-5
            );
            assert_eq!(after.scale, Vec3::splat(1.5));
        }
    }

    #[test]
    fn test_local_scale_keeps_positions() {
        let input = row();
        let out = scale(
            &input,
            Vec3::new(2.0, 0.0, 0.0),
            2.0,
            GizmoAxis::Xyz,
            TransformSpace::Local,
            &AxisLocks::default(),
            0.01,
        );
        for (before, after) in input.iter().zip(&out) {
            assert_eq!(before.transform.position, after.position);
        }
    }

    #[test]
    fn test_single_scale_with_x_locked() {
        let mut locks = AxisLocks::default();
        locks.set(TransformKind::Scale, Axis::X, true);
        let out = scale(
            &starts(&[Vec3::ZERO]),
            Vec3::ZERO,
            2.0,
            GizmoAxis::Xyz,
            TransformSpace::Global,
            &locks,
            0.01,
        );
        assert_eq!(out[0].scale, Vec3::new(1.0, 2.0, 2.0));
    }

    #[test]
    fn test_scale_floor() {
        assert_relative_eq!(scale_factor(Vec2::new(-500.0, -500.0), 0.01, 0.01), 0.01);
        let mut input = starts(&[Vec3::ZERO]);
        input[0].transform.scale = Vec3::splat(0.5);
        let out = scale(
            &input,
            Vec3::ZERO,
            0.01,
            GizmoAxis::Y,
            TransformSpace::Global,
            &AxisLocks::default(),
            0.01,
        );
        assert_eq!(out[0].scale, Vec3::new(0.5, 0.01, 0.5));
    }

    #[test]
    fn test_set_component() {
        let locks = AxisLocks::default();
        let t = set_component(&Transform::IDENTITY, TransformKind::Rotation, Axis::Y, 90.0, &locks, 0.01)
            .unwrap();
        assert_relative_eq!(t.rotation.y, std::f32::consts::FRAC_PI_2);

        let t = set_component(&Transform::IDENTITY, TransformKind::Scale, Axis::X, -3.0, &locks, 0.01)
            .unwrap();
        assert_relative_eq!(t.scale.x, 0.01);

        let mut locks = AxisLocks::default();
        locks.set(TransformKind::Position, Axis::X, true);
        assert!(
            set_component(&Transform::IDENTITY, TransformKind::Position, Axis::X, 5.0, &locks, 0.01)
                .is_none()
        );
    }
}

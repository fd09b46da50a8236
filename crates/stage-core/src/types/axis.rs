//! Axes, gizmo handle identifiers and axis locks

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A single world axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Unit vector along this axis.
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }

    /// Reads this axis' component of `v`.
    pub fn get(self, v: Vec3) -> f32 {
        v[self.index()]
    }

    /// Writes this axis' component of `v`.
    pub fn set(self, v: &mut Vec3, value: f32) {
        v[self.index()] = value;
    }
}

/// Identifier carried by every gizmo handle mesh (`x`, `y`, `z`, `xyz`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GizmoAxis {
    X,
    Y,
    Z,
    /// Free-move / uniform-scale center handle
    Xyz,
}

impl GizmoAxis {
    /// The single axis of this handle, `None` for the center handle.
    pub fn axis(self) -> Option<Axis> {
        match self {
            GizmoAxis::X => Some(Axis::X),
            GizmoAxis::Y => Some(Axis::Y),
            GizmoAxis::Z => Some(Axis::Z),
            GizmoAxis::Xyz => None,
        }
    }

    /// True if dragging this handle may write `axis`.
    pub fn affects(self, axis: Axis) -> bool {
        match self.axis() {
            Some(own) => own == axis,
            None => true,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GizmoAxis::X => "x",
            GizmoAxis::Y => "y",
            GizmoAxis::Z => "z",
            GizmoAxis::Xyz => "xyz",
        }
    }
}

impl From<Axis> for GizmoAxis {
    fn from(axis: Axis) -> Self {
        match axis {
            Axis::X => GizmoAxis::X,
            Axis::Y => GizmoAxis::Y,
            Axis::Z => GizmoAxis::Z,
        }
    }
}

/// Transform channel that a lock applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransformKind {
    Position,
    Rotation,
    Scale,
}

impl TransformKind {
    pub const ALL: [TransformKind; 3] = [
        TransformKind::Position,
        TransformKind::Rotation,
        TransformKind::Scale,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TransformKind::Position => "Position",
            TransformKind::Rotation => "Rotation",
            TransformKind::Scale => "Scale",
        }
    }
}

/// Lock flags for the three axes of one transform channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AxisFlags {
    pub x: bool,
    pub y: bool,
    pub z: bool,
}

impl AxisFlags {
    pub fn get(&self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    pub fn set(&mut self, axis: Axis, value: bool) {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
            Axis::Z => self.z = value,
        }
    }

    pub fn all(&self) -> bool {
        self.x && self.y && self.z
    }
}

/// Application-wide axis locks (position/rotation/scale × x/y/z).
///
/// A locked axis is never written by a drag or a panel edit in that channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AxisLocks {
    pub position: AxisFlags,
    pub rotation: AxisFlags,
    pub scale: AxisFlags,
}

impl AxisLocks {
    pub fn flags(&self, kind: TransformKind) -> &AxisFlags {
        match kind {
            TransformKind::Position => &self.position,
            TransformKind::Rotation => &self.rotation,
            TransformKind::Scale => &self.scale,
        }
    }

    fn flags_mut(&mut self, kind: TransformKind) -> &mut AxisFlags {
        match kind {
            TransformKind::Position => &mut self.position,
            TransformKind::Rotation => &mut self.rotation,
            TransformKind::Scale => &mut self.scale,
        }
    }

    pub fn is_locked(&self, kind: TransformKind, axis: Axis) -> bool {
        self.flags(kind).get(axis)
    }

    pub fn set(&mut self, kind: TransformKind, axis: Axis, locked: bool) {
        self.flags_mut(kind).set(axis, locked);
    }

    pub fn toggle(&mut self, kind: TransformKind, axis: Axis) {
        let locked = self.is_locked(kind, axis);
        self.set(kind, axis, !locked);
    }

    /// True if a drag on `handle` in channel `kind` can change anything.
    pub fn allows(&self, kind: TransformKind, handle: GizmoAxis) -> bool {
        match handle.axis() {
            Some(axis) => !self.is_locked(kind, axis),
            None => !self.flags(kind).all(),
        }
    }

    /// Copies every unlocked component of `next` into `current`.
    pub fn apply(&self, kind: TransformKind, handle: GizmoAxis, current: &mut Vec3, next: Vec3) {
        for axis in Axis::ALL {
            if handle.affects(axis) && !self.is_locked(kind, axis) {
                axis.set(current, axis.get(next));
            }
        }
    }
}

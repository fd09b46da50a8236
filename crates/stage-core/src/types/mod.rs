//! Shared value types

mod axis;
mod transform;

pub use axis::*;
pub use transform::*;

use serde::{Deserialize, Serialize};

/// Handle to a GPU/decoder resource owned by the renderer's resource pool.
///
/// Handles are lightweight and can be copied freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceId(u64);

impl ResourceId {
    /// Creates a handle from a raw value.
    pub fn from_raw(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw handle value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "res#{}", self.0)
    }
}

/// Active manipulation mode of the gizmo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GizmoMode {
    #[default]
    Translate,
    Rotate,
    Scale,
}

impl GizmoMode {
    pub const ALL: [GizmoMode; 3] = [GizmoMode::Translate, GizmoMode::Rotate, GizmoMode::Scale];

    /// The lock category consulted while dragging in this mode.
    pub fn lock_kind(self) -> TransformKind {
        match self {
            GizmoMode::Translate => TransformKind::Position,
            GizmoMode::Rotate => TransformKind::Rotation,
            GizmoMode::Scale => TransformKind::Scale,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GizmoMode::Translate => "Translate",
            GizmoMode::Rotate => "Rotate",
            GizmoMode::Scale => "Scale",
        }
    }
}

/// Whether multi-object rotate/scale acts on the group or on each object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TransformSpace {
    /// The selection behaves as one rigid body around the shared centroid.
    #[default]
    Global,
    /// Every object is transformed about its own origin.
    Local,
}

impl TransformSpace {
    pub fn toggled(self) -> Self {
        match self {
            TransformSpace::Global => TransformSpace::Local,
            TransformSpace::Local => TransformSpace::Global,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TransformSpace::Global => "Global",
            TransformSpace::Local => "Local",
        }
    }
}

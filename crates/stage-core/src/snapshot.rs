//! Values exposed to panels: transform snapshots and object summaries

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::scene::{NodeKind, SceneNode};
use crate::types::{Axis, Transform, TransformKind};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisValues {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl AxisValues {
    pub fn get(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    fn rounded(v: Vec3) -> Self {
        Self {
            x: round2(v.x),
            y: round2(v.y),
            z: round2(v.z),
        }
    }
}

fn round2(v: f32) -> f32 {
    (v * 100.0).round() / 100.0
}

/// Transform shown in the numeric panel.
///
/// Values are rounded to two decimals and rotation is in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformSnapshot {
    pub position: AxisValues,
    pub rotation: AxisValues,
    pub scale: AxisValues,
}

impl Default for TransformSnapshot {
    fn default() -> Self {
        Self::centered(Vec3::ZERO)
    }
}

impl TransformSnapshot {
    pub fn from_transform(transform: &Transform) -> Self {
        Self {
            position: AxisValues::rounded(transform.position),
            rotation: AxisValues::rounded(Vec3::new(
                transform.rotation.x.to_degrees(),
                transform.rotation.y.to_degrees(),
                transform.rotation.z.to_degrees(),
            )),
            scale: AxisValues::rounded(transform.scale),
        }
    }

    /// Snapshot of a multi-selection: the centroid with neutral rotation and scale.
    pub fn centered(center: Vec3) -> Self {
        Self {
            position: AxisValues::rounded(center),
            rotation: AxisValues::default(),
            scale: AxisValues {
                x: 1.0,
                y: 1.0,
                z: 1.0,
            },
        }
    }

    pub fn values(&self, kind: TransformKind) -> &AxisValues {
        match kind {
            TransformKind::Position => &self.position,
            TransformKind::Rotation => &self.rotation,
            TransformKind::Scale => &self.scale,
        }
    }
}

/// Entry of the object and selection lists: `{id, name, type, thumbnail}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectSummary {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub media_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl ObjectSummary {
    pub fn from_node(node: &SceneNode) -> Self {
        let (media_type, thumbnail) = match &node.kind {
            NodeKind::Media(m) => (m.media.media_type.clone(), m.media.thumbnail.clone()),
            other => (other.tag().name().to_string(), None),
        };
        Self {
            id: node.id.to_string(),
            name: node.name.clone(),
            media_type,
            thumbnail,
        }
    }
}

//! Scene nodes stored in the arena

use glam::Vec3;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::bounds::BoundingBox;
use crate::media::{MediaDescriptor, MediaKind};
use crate::types::{ResourceId, Transform};

/// Stable node identifier.
///
/// Media objects reuse the caller-supplied media id; groups and lights get
/// generated ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a unique id such as `group-6f1c...`.
    pub fn generate(prefix: &str) -> Self {
        Self(format!("{}-{}", prefix, Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// GPU resources owned by a media node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Renderable {
    pub geometry: ResourceId,
    pub material: ResourceId,
    pub texture: Option<ResourceId>,
}

impl Renderable {
    /// All owned resource handles, texture last.
    pub fn resources(&self) -> impl Iterator<Item = ResourceId> {
        [Some(self.geometry), Some(self.material), self.texture]
            .into_iter()
            .flatten()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaNode {
    /// Source descriptor this node was placed from
    pub media: MediaDescriptor,
    pub kind: MediaKind,
    pub renderable: Renderable,
    /// True when loading failed and a generated placeholder is shown
    pub placeholder: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightKind {
    Ambient,
    Directional,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightNode {
    pub kind: LightKind,
    pub color: [f32; 3],
    pub intensity: f32,
}

/// Tag of a scene node (`media`, `group`, `light`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeTag {
    Media,
    Group,
    Light,
}

impl NodeTag {
    pub fn name(self) -> &'static str {
        match self {
            NodeTag::Media => "media",
            NodeTag::Group => "group",
            NodeTag::Light => "light",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    Media(MediaNode),
    Group,
    Light(LightNode),
}

impl NodeKind {
    pub fn tag(&self) -> NodeTag {
        match self {
            NodeKind::Media(_) => NodeTag::Media,
            NodeKind::Group => NodeTag::Group,
            NodeKind::Light(_) => NodeTag::Light,
        }
    }
}

/// A node of the scene arena.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub id: NodeId,
    pub name: String,
    pub kind: NodeKind,
    /// Transform relative to the parent (world transform for top-level nodes)
    pub transform: Transform,
    /// Bounds of the renderable geometry in local space
    pub local_bounds: BoundingBox,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl SceneNode {
    pub fn media(
        id: impl Into<NodeId>,
        media: MediaDescriptor,
        kind: MediaKind,
        renderable: Renderable,
        local_bounds: BoundingBox,
    ) -> Self {
        Self {
            id: id.into(),
            name: media.name.clone(),
            kind: NodeKind::Media(MediaNode {
                media,
                kind,
                renderable,
                placeholder: false,
            }),
            transform: Transform::IDENTITY,
            local_bounds,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn group(id: NodeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            kind: NodeKind::Group,
            transform: Transform::IDENTITY,
            local_bounds: BoundingBox::empty(),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn light(name: impl Into<String>, light: LightNode, position: Vec3) -> Self {
        Self {
            id: NodeId::generate("light"),
            name: name.into(),
            kind: NodeKind::Light(light),
            transform: Transform::from_position(position),
            local_bounds: BoundingBox::centered(Vec3::splat(0.1)),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn tag(&self) -> NodeTag {
        self.kind.tag()
    }

    pub fn is_media(&self) -> bool {
        matches!(self.kind, NodeKind::Media(_))
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, NodeKind::Group)
    }

    pub fn as_media(&self) -> Option<&MediaNode> {
        match &self.kind {
            NodeKind::Media(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_media_mut(&mut self) -> Option<&mut MediaNode> {
        match &mut self.kind {
            NodeKind::Media(m) => Some(m),
            _ => None,
        }
    }

    pub fn renderable(&self) -> Option<&Renderable> {
        self.as_media().map(|m| &m.renderable)
    }
}

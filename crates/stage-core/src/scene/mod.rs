//! Scene arena.
//!
//! The store is the single owner of every placed object, group and light.
//! It outlives the render surface: mounting a viewport only attaches ids to a
//! fresh [`SceneRoot`], unmounting detaches them again.

mod node;
mod root;

pub use node::*;
pub use root::*;

use std::collections::HashMap;

use glam::{Mat4, Vec3};
use tracing::debug;

use crate::bounds::BoundingBox;
use crate::error::SceneError;
use crate::snapshot::ObjectSummary;
use crate::types::Transform;

/// Arena of scene nodes keyed by stable id.
///
/// Parent/child edges are id lists on the nodes themselves. Insertion order
/// is kept so object lists are stable across frames.
#[derive(Debug, Default)]
pub struct SceneStore {
    nodes: HashMap<NodeId, SceneNode>,
    order: Vec<NodeId>,
    revision: u64,
    group_counter: usize,
}

impl SceneStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the default ambient and directional lights.
    pub fn with_default_lights() -> Self {
        let mut store = Self::new();
        let ambient = SceneNode::light(
            "Ambient Light",
            LightNode {
                kind: LightKind::Ambient,
                color: [1.0, 1.0, 1.0],
                intensity: 0.6,
            },
            Vec3::ZERO,
        );
        let directional = SceneNode::light(
            "Directional Light",
            LightNode {
                kind: LightKind::Directional,
                color: [1.0, 1.0, 1.0],
                intensity: 0.8,
            },
            Vec3::new(10.0, 10.0, 5.0),
        );
        // Generated ids cannot collide
        let _ = store.insert(ambient);
        let _ = store.insert(directional);
        store
    }

    /// Monotonic counter bumped by every mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Inserts a top-level node.
    pub fn insert(&mut self, mut node: SceneNode) -> Result<NodeId, SceneError> {
        if self.nodes.contains_key(&node.id) {
            return Err(SceneError::DuplicateId(node.id));
        }
        node.parent = None;
        node.children.clear();
        let id = node.id.clone();
        debug!(id = %id, tag = node.tag().name(), "insert node");
        self.order.push(id.clone());
        self.nodes.insert(id.clone(), node);
        self.touch();
        Ok(id)
    }

    pub fn get(&self, id: &NodeId) -> Option<&SceneNode> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: &NodeId) -> Option<&mut SceneNode> {
        self.touch();
        self.nodes.get_mut(id)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &SceneNode> {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Ids of nodes without a parent, in insertion order.
    pub fn top_level(&self) -> impl Iterator<Item = &NodeId> {
        self.order
            .iter()
            .filter(|id| self.nodes.get(*id).is_some_and(|n| n.parent.is_none()))
    }

    pub fn media_count(&self) -> usize {
        self.nodes.values().filter(|n| n.is_media()).count()
    }

    /// Removes a node.
    ///
    /// Removing a group removes its members too. A group left without
    /// members is removed as well. Returns every removed node so the caller
    /// can release their resources.
    pub fn remove(&mut self, id: &NodeId) -> Vec<SceneNode> {
        let mut removed = Vec::new();
        self.remove_recursive(id, &mut removed);

        if let Some(first) = removed.first()
            && let Some(parent_id) = first.parent.clone()
        {
            let emptied = match self.nodes.get_mut(&parent_id) {
                Some(parent) => {
                    parent.children.retain(|c| c != id);
                    parent.is_group() && parent.children.is_empty()
                }
                None => false,
            };
            if emptied {
                debug!(group = %parent_id, "removing emptied group");
                self.remove_recursive(&parent_id, &mut removed);
            }
        }

        if !removed.is_empty() {
            self.order.retain(|o| self.nodes.contains_key(o));
            self.touch();
        }
        removed
    }

    fn remove_recursive(&mut self, id: &NodeId, removed: &mut Vec<SceneNode>) {
        let Some(node) = self.nodes.remove(id) else {
            return;
        };
        let children = node.children.clone();
        removed.push(node);
        for child in &children {
            self.remove_recursive(child, removed);
        }
    }

    /// Removes every node.
    pub fn clear(&mut self) -> Vec<SceneNode> {
        let removed = self
            .order
            .drain(..)
            .filter_map(|id| self.nodes.remove(&id))
            .collect();
        self.touch();
        removed
    }

    pub fn set_transform(&mut self, id: &NodeId, transform: Transform) -> Result<(), SceneError> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| SceneError::NotFound(id.clone()))?;
        node.transform = transform;
        self.touch();
        Ok(())
    }

    pub fn transform(&self, id: &NodeId) -> Option<Transform> {
        self.nodes.get(id).map(|n| n.transform)
    }

    pub fn world_matrix(&self, id: &NodeId) -> Mat4 {
        let mut matrix = Mat4::IDENTITY;
        let mut current = self.nodes.get(id);
        while let Some(node) = current {
            matrix = node.transform.matrix() * matrix;
            current = node.parent.as_ref().and_then(|p| self.nodes.get(p));
        }
        matrix
    }

    pub fn world_position(&self, id: &NodeId) -> Option<Vec3> {
        self.nodes
            .contains_key(id)
            .then(|| self.world_matrix(id).transform_point3(Vec3::ZERO))
    }

    /// World-space AABB of a node. Groups enclose all their members.
    pub fn world_bounds(&self, id: &NodeId) -> Option<BoundingBox> {
        let node = self.nodes.get(id)?;
        if node.is_group() {
            let bounds = node
                .children
                .iter()
                .filter_map(|c| self.world_bounds(c))
                .fold(BoundingBox::empty(), |acc, b| acc.union(&b));
            if bounds.is_empty() {
                return self.world_position(id).map(|p| BoundingBox::new(p, p));
            }
            return Some(bounds);
        }
        Some(node.local_bounds.transform(&self.world_matrix(id)))
    }

    /// World bounds of every top-level node.
    pub fn scene_bounds(&self) -> Option<BoundingBox> {
        let bounds = self
            .top_level()
            .filter(|id| self.nodes.get(*id).is_some_and(|n| n.tag() != NodeTag::Light))
            .filter_map(|id| self.world_bounds(id))
            .fold(BoundingBox::empty(), |acc, b| acc.union(&b));
        (!bounds.is_empty()).then_some(bounds)
    }

    /// The group a node belongs to, if any.
    pub fn group_of(&self, id: &NodeId) -> Option<&NodeId> {
        let parent = self.nodes.get(id)?.parent.as_ref()?;
        self.nodes.get(parent).filter(|p| p.is_group()).map(|p| &p.id)
    }

    /// Groups at least two media objects under a new group node.
    ///
    /// Members that already belong to another group leave it first.
    pub fn create_group(&mut self, members: &[NodeId]) -> Result<NodeId, SceneError> {
        let mut unique: Vec<NodeId> = Vec::with_capacity(members.len());
        for id in members {
            let node = self
                .nodes
                .get(id)
                .ok_or_else(|| SceneError::NotFound(id.clone()))?;
            if !node.is_media() {
                return Err(SceneError::NotGroupable(id.clone()));
            }
            if !unique.contains(id) {
                unique.push(id.clone());
            }
        }
        if unique.len() < 2 {
            return Err(SceneError::GroupTooSmall(unique.len()));
        }

        for id in &unique {
            if self.group_of(id).is_some() {
                self.detach_from_group(id)?;
            }
        }

        self.group_counter += 1;
        let group_id = NodeId::generate("group");
        let mut group = SceneNode::group(group_id.clone(), format!("Group {}", self.group_counter));
        group.children = unique.clone();
        for id in &unique {
            if let Some(node) = self.nodes.get_mut(id) {
                node.parent = Some(group_id.clone());
            }
        }
        debug!(group = %group_id, members = unique.len(), "create group");
        self.order.push(group_id.clone());
        self.nodes.insert(group_id.clone(), group);
        self.touch();
        Ok(group_id)
    }

    /// Moves a grouped node back to the top level, keeping its world transform.
    ///
    /// The group is removed once its last member leaves.
    pub fn detach_from_group(&mut self, id: &NodeId) -> Result<(), SceneError> {
        let group_id = self
            .group_of(id)
            .cloned()
            .ok_or_else(|| SceneError::NotAGroup(id.clone()))?;

        let group_is_identity = self
            .nodes
            .get(&group_id)
            .is_some_and(|g| g.parent.is_none() && g.transform == Transform::IDENTITY);
        let world = if group_is_identity {
            None
        } else {
            Some(Transform::from_matrix(self.world_matrix(id)))
        };

        if let Some(node) = self.nodes.get_mut(id) {
            node.parent = None;
            if let Some(world) = world {
                node.transform = world;
            }
        }

        let emptied = match self.nodes.get_mut(&group_id) {
            Some(group) => {
                group.children.retain(|c| c != id);
                group.children.is_empty()
            }
            None => false,
        };
        if emptied {
            debug!(group = %group_id, "group emptied");
            self.nodes.remove(&group_id);
            self.order.retain(|o| o != &group_id);
        }
        self.touch();
        Ok(())
    }

    /// Dissolves a group, returning its former members.
    pub fn ungroup(&mut self, group_id: &NodeId) -> Result<Vec<NodeId>, SceneError> {
        let group = self
            .nodes
            .get(group_id)
            .ok_or_else(|| SceneError::NotFound(group_id.clone()))?;
        if !group.is_group() {
            return Err(SceneError::NotAGroup(group_id.clone()));
        }
        let members = group.children.clone();
        for member in &members {
            self.detach_from_group(member)?;
        }
        // An empty group never had members to detach
        if self.nodes.remove(group_id).is_some() {
            self.order.retain(|o| o != group_id);
            self.touch();
        }
        Ok(members)
    }

    /// Object list exposed to the UI: every media node in insertion order.
    pub fn object_summaries(&self) -> Vec<ObjectSummary> {
        self.iter()
            .filter(|n| n.is_media())
            .map(ObjectSummary::from_node)
            .collect()
    }

    /// Groups with their member ids, in creation order.
    pub fn groups(&self) -> impl Iterator<Item = &SceneNode> {
        self.iter().filter(|n| n.is_group())
    }

    pub fn lights(&self) -> impl Iterator<Item = &SceneNode> {
        self.iter().filter(|n| n.tag() == NodeTag::Light)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{MediaDescriptor, MediaKind};
    use crate::types::ResourceId;
    use approx::assert_relative_eq;

    fn media(id: &str, x: f32) -> SceneNode {
        let raw = x.to_bits() as u64;
        SceneNode::media(
            id,
            MediaDescriptor::new(id, format!("{id}.png"), format!("/{id}.png")).with_type("image/png"),
            MediaKind::Image,
            Renderable {
                geometry: ResourceId::from_raw(raw * 3),
                material: ResourceId::from_raw(raw * 3 + 1),
                texture: Some(ResourceId::from_raw(raw * 3 + 2)),
            },
            BoundingBox::centered(Vec3::new(1.0, 1.0, 0.0)),
        )
        .with_transform(Transform::from_position(Vec3::new(x, 0.0, 0.0)))
    }

    #[test]
    fn test_insert_rejects_duplicates() {
        let mut store = SceneStore::new();
        store.insert(media("a", 0.0)).unwrap();
        assert_eq!(
            store.insert(media("a", 1.0)),
            Err(SceneError::DuplicateId(NodeId::from("a")))
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_default_lights() {
        let store = SceneStore::with_default_lights();
        assert_eq!(store.lights().count(), 2);
        assert_eq!(store.media_count(), 0);
        assert!(store.scene_bounds().is_none());
    }

    #[test]
    fn test_world_bounds_of_group_is_union() {
        let mut store = SceneStore::new();
        store.insert(media("a", 0.0)).unwrap();
        store.insert(media("b", 4.0)).unwrap();
        let group = store.create_group(&["a".into(), "b".into()]).unwrap();

        let bounds = store.world_bounds(&group).unwrap();
        assert_relative_eq!(bounds.min.x, -1.0);
        assert_relative_eq!(bounds.max.x, 5.0);
        assert_eq!(store.group_of(&"a".into()), Some(&group));
        assert_eq!(store.top_level().count(), 1);
    }

    #[test]
    fn test_group_requires_two_media() {
        let mut store = SceneStore::with_default_lights();
        store.insert(media("a", 0.0)).unwrap();
        assert_eq!(
            store.create_group(&["a".into(), "a".into()]),
            Err(SceneError::GroupTooSmall(1))
        );
        let light = store.lights().next().unwrap().id.clone();
        assert_eq!(
            store.create_group(&["a".into(), light.clone()]),
            Err(SceneError::NotGroupable(light))
        );
    }

    #[test]
    fn test_removing_group_removes_members() {
        let mut store = SceneStore::new();
        store.insert(media("a", 0.0)).unwrap();
        store.insert(media("b", 2.0)).unwrap();
        store.insert(media("c", 4.0)).unwrap();
        let group = store.create_group(&["a".into(), "b".into()]).unwrap();

        let removed = store.remove(&group);
        assert_eq!(removed.len(), 3);
        assert_eq!(store.len(), 1);
        assert!(store.contains(&"c".into()));
    }

    #[test]
    fn test_group_removed_when_emptied() {
        let mut store = SceneStore::new();
        store.insert(media("a", 0.0)).unwrap();
        store.insert(media("b", 2.0)).unwrap();
        let group = store.create_group(&["a".into(), "b".into()]).unwrap();

        store.remove(&"a".into());
        assert!(store.contains(&group));
        let removed = store.remove(&"b".into());
        assert_eq!(removed.len(), 2);
        assert!(store.is_empty());
    }

    #[test]
    fn test_ungroup_preserves_world_transform() {
        let mut store = SceneStore::new();
        store.insert(media("a", 1.0)).unwrap();
        store.insert(media("b", 3.0)).unwrap();
        let group = store.create_group(&["a".into(), "b".into()]).unwrap();

        let mut moved = store.transform(&group).unwrap();
        moved.position = Vec3::new(0.0, 2.0, 0.0);
        store.set_transform(&group, moved).unwrap();
        let before = store.world_position(&"b".into()).unwrap();

        let members = store.ungroup(&group).unwrap();
        assert_eq!(members.len(), 2);
        assert!(!store.contains(&group));
        let after = store.world_position(&"b".into()).unwrap();
        assert!(after.abs_diff_eq(before, 1e-5));
        assert!(store.get(&"b".into()).unwrap().parent.is_none());
    }

    #[test]
    fn test_revision_advances_on_mutation() {
        let mut store = SceneStore::new();
        let start = store.revision();
        store.insert(media("a", 0.0)).unwrap();
        store
            .set_transform(&"a".into(), Transform::from_position(Vec3::ONE))
            .unwrap();
        assert!(store.revision() > start + 1);
        assert!(store.set_transform(&"zz".into(), Transform::IDENTITY).is_err());
    }
}

//! Per-mount scene root

use super::{NodeId, SceneStore};

/// The set of nodes attached to one mounted render surface.
///
/// A new root is created on every mount. Dropping or clearing it never
/// touches the nodes themselves; they stay in the [`SceneStore`].
#[derive(Debug, Default)]
pub struct SceneRoot {
    generation: u64,
    attached: Vec<NodeId>,
}

impl SceneRoot {
    /// Creates a root and attaches every top-level node of `store`.
    pub fn mount(store: &SceneStore, generation: u64) -> Self {
        let attached: Vec<NodeId> = store.top_level().cloned().collect();
        tracing::debug!(generation, count = attached.len(), "scene root mounted");
        Self {
            generation,
            attached,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn attach(&mut self, id: NodeId) {
        if !self.attached.contains(&id) {
            self.attached.push(id);
        }
    }

    pub fn detach(&mut self, id: &NodeId) -> bool {
        let before = self.attached.len();
        self.attached.retain(|a| a != id);
        before != self.attached.len()
    }

    /// Detaches everything, returning how many nodes were attached.
    pub fn detach_all(&mut self) -> usize {
        let count = self.attached.len();
        self.attached.clear();
        count
    }

    /// Re-reads the top-level node list after grouping changes.
    pub fn sync(&mut self, store: &SceneStore) {
        self.attached = store.top_level().cloned().collect();
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.attached.contains(id)
    }

    pub fn ids(&self) -> &[NodeId] {
        &self.attached
    }

    pub fn len(&self) -> usize {
        self.attached.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attached.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{LightKind, LightNode, SceneNode};
    use glam::Vec3;

    #[test]
    fn test_remount_preserves_ids() {
        let mut store = SceneStore::new();
        for i in 0..3 {
            let light = LightNode {
                kind: LightKind::Directional,
                color: [1.0; 3],
                intensity: 0.5,
            };
            store
                .insert(SceneNode::light(format!("l{i}"), light, Vec3::ZERO))
                .unwrap();
        }

        let mut first = SceneRoot::mount(&store, 1);
        let ids: Vec<NodeId> = first.ids().to_vec();
        assert_eq!(first.detach_all(), 3);
        assert!(first.is_empty());
        assert_eq!(store.len(), 3);

        let second = SceneRoot::mount(&store, 2);
        assert_eq!(second.ids(), ids.as_slice());
        assert_eq!(second.generation(), 2);
    }
}

//! Cached draw list built from the mounted scene root

use glam::Mat4;
use stage_core::{BoundingBox, NodeId, NodeKind, ResourceId, SceneRoot, SceneStore};

/// Everything needed to draw one media node.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub node: NodeId,
    pub world: Mat4,
    pub geometry: ResourceId,
    pub material: ResourceId,
    pub texture: Option<ResourceId>,
    pub bounds: BoundingBox,
}

/// Draw items for the current store revision.
///
/// The list is rebuilt lazily when the store revision or the root changes
/// and can be released under memory pressure.
#[derive(Debug, Default)]
pub struct RenderList {
    items: Vec<DrawItem>,
    built_for: Option<(u64, u64, usize)>,
}

impl RenderList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the draw items, rebuilding them if stale.
    pub fn items(&mut self, store: &SceneStore, root: &SceneRoot) -> &[DrawItem] {
        let key = (store.revision(), root.generation(), root.len());
        if self.built_for != Some(key) {
            self.rebuild(store, root);
            self.built_for = Some(key);
        }
        &self.items
    }

    fn rebuild(&mut self, store: &SceneStore, root: &SceneRoot) {
        self.items.clear();
        let mut stack: Vec<&NodeId> = root.ids().iter().rev().collect();
        while let Some(id) = stack.pop() {
            let Some(node) = store.get(id) else {
                continue;
            };
            match &node.kind {
                NodeKind::Media(media) => self.items.push(DrawItem {
                    node: id.clone(),
                    world: store.world_matrix(id),
                    geometry: media.renderable.geometry,
                    material: media.renderable.material,
                    texture: media.renderable.texture,
                    bounds: node.local_bounds,
                }),
                NodeKind::Group => stack.extend(node.children.iter().rev()),
                NodeKind::Light(_) => {}
            }
        }
    }

    /// Drops cached draw state.
    pub fn release(&mut self) {
        self.items = Vec::new();
        self.built_for = None;
    }

    pub fn is_cached(&self) -> bool {
        self.built_for.is_some()
    }
}

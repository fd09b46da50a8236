//! Selection set and its bounding-box outlines

use std::collections::HashMap;

use glam::Vec3;
use stage_core::{BoundingBox, NodeId, SceneStore};
use stage_renderer::SelectionOutline;
use tracing::debug;

/// Ordered set of selected node ids.
///
/// Every selected id owns one outline; mutations create, update and
/// dispose outlines so the two never drift apart.
#[derive(Debug, Default)]
pub struct SelectionManager {
    ids: Vec<NodeId>,
    outlines: HashMap<NodeId, SelectionOutline>,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> &[NodeId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.ids.contains(id)
    }

    /// The selected id when exactly one object is selected.
    pub fn single(&self) -> Option<&NodeId> {
        match self.ids.as_slice() {
            [id] => Some(id),
            _ => None,
        }
    }

    /// Selects `id`. Without `additive` the previous selection is dropped
    /// first. Returns false if nothing changed.
    pub fn select(&mut self, store: &SceneStore, id: &NodeId, additive: bool) -> bool {
        if !store.contains(id) {
            return false;
        }
        if !additive {
            if self.single() == Some(id) {
                return false;
            }
            self.clear();
        }
        if self.contains(id) {
            return false;
        }
        self.add(store, id);
        true
    }

    /// Removes `id` if selected, adds it otherwise.
    pub fn toggle(&mut self, store: &SceneStore, id: &NodeId) {
        if let Some(pos) = self.ids.iter().position(|s| s == id) {
            self.ids.remove(pos);
            if let Some(mut outline) = self.outlines.remove(id) {
                outline.dispose();
            }
        } else if store.contains(id) {
            self.add(store, id);
        }
    }

    /// Replaces the selection with `ids`, skipping unknown ones.
    pub fn set(&mut self, store: &SceneStore, ids: impl IntoIterator<Item = NodeId>) {
        self.clear();
        for id in ids {
            if store.contains(&id) && !self.contains(&id) {
                self.add(store, &id);
            }
        }
    }

    fn add(&mut self, store: &SceneStore, id: &NodeId) {
        let bounds = store.world_bounds(id).unwrap_or_else(BoundingBox::empty);
        self.ids.push(id.clone());
        self.outlines
            .insert(id.clone(), SelectionOutline::new(id.clone(), bounds));
    }

    pub fn clear(&mut self) {
        for outline in self.outlines.values_mut() {
            outline.dispose();
        }
        self.outlines.clear();
        self.ids.clear();
    }

    /// Drops ids whose nodes no longer exist. Returns how many were dropped.
    pub fn remove_stale(&mut self, store: &SceneStore) -> usize {
        let before = self.ids.len();
        let outlines = &mut self.outlines;
        self.ids.retain(|id| {
            let alive = store.contains(id);
            if !alive && let Some(mut outline) = outlines.remove(id) {
                outline.dispose();
            }
            alive
        });
        let dropped = before - self.ids.len();
        if dropped > 0 {
            debug!(dropped, "removed stale selection entries");
        }
        dropped
    }

    /// World AABB enclosing every selected object.
    pub fn bounds(&self, store: &SceneStore) -> Option<BoundingBox> {
        let bounds = self
            .ids
            .iter()
            .filter_map(|id| store.world_bounds(id))
            .fold(BoundingBox::empty(), |acc, b| acc.union(&b));
        (!bounds.is_empty()).then_some(bounds)
    }

    /// Pivot of the selection: the object's own position for a single
    /// object, the center of the enclosing AABB otherwise.
    pub fn center(&self, store: &SceneStore) -> Option<Vec3> {
        match self.ids.as_slice() {
            [] => None,
            [id] => store.world_position(id),
            _ => self.bounds(store).map(|b| b.center()),
        }
    }

    /// Re-fits every outline to its object's current world bounds.
    pub fn refresh_outlines(&mut self, store: &SceneStore) -> usize {
        let mut rebuilt = 0;
        for (id, outline) in &mut self.outlines {
            if let Some(bounds) = store.world_bounds(id)
                && outline.update(bounds)
            {
                rebuilt += 1;
            }
        }
        rebuilt
    }

    pub fn outline(&self, id: &NodeId) -> Option<&SelectionOutline> {
        self.outlines.get(id)
    }

    pub fn outlines(&self) -> impl Iterator<Item = &SelectionOutline> {
        self.ids.iter().filter_map(|id| self.outlines.get(id))
    }
}

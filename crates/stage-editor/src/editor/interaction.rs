//! Pointer input, selection commands and grouping

use glam::Vec2;
use stage_core::{NodeId, NodeTag};
use tracing::{debug, info, warn};

use super::StageEditor;
use crate::backend::MediaBackend;
use crate::drag::DragContext;
use crate::ops::DragStart;

impl<B: MediaBackend> StageEditor<B> {
    /// Pointer moved over the viewport. Updates an active drag or the
    /// hovered gizmo handle.
    pub fn pointer_moved(&mut self, pointer: Vec2) {
        let Some(viewport) = &mut self.viewport else {
            return;
        };
        let ray = viewport.ray(pointer);

        if !viewport.drag.is_dragging() {
            viewport.drag.hover(viewport.gizmos.active_mut(), &ray);
            return;
        }

        let Some(gizmo_position) = viewport.gizmos.active().map(|g| g.position()) else {
            return;
        };
        let ctx = DragContext {
            pointer,
            ray,
            gizmo_position,
            camera_forward: viewport.camera.forward(),
            space: self.space,
            locks: &self.locks,
            settings: &self.settings,
        };
        let Some(updates) = viewport.drag.update(&ctx) else {
            return;
        };
        for (id, transform) in updates {
            if let Err(e) = self.store.set_transform(&id, transform) {
                warn!(node = %id, error = %e, "drag target vanished");
            }
        }
        self.after_transform_change();
    }

    /// Pointer pressed. Starts a gizmo drag if a handle is hit, otherwise
    /// picks an object. With `additive` the picked object is toggled and a
    /// miss keeps the selection.
    ///
    /// Returns true if a drag started, so the caller keeps the camera still.
    pub fn pointer_pressed(&mut self, pointer: Vec2, additive: bool) -> bool {
        let Some(viewport) = &mut self.viewport else {
            return false;
        };
        let ray = viewport.ray(pointer);

        if let Some(gizmo) = viewport.gizmos.active_mut() {
            let starts: Vec<DragStart> = self
                .selection
                .ids()
                .iter()
                .filter_map(|id| {
                    self.store.transform(id).map(|transform| DragStart {
                        id: id.clone(),
                        transform,
                    })
                })
                .collect();
            let centroid = self.selection.center(&self.store).unwrap_or(gizmo.position());
            if viewport
                .drag
                .begin(gizmo, &ray, pointer, starts, centroid, &mut viewport.camera)
            {
                return true;
            }
        }

        match viewport.pick_object(&self.store, &ray) {
            Some(id) if additive => self.toggle_selection(&id),
            Some(id) => self.select(&id, false),
            None if !additive => self.clear_selection(),
            None => {}
        }
        false
    }

    /// Double click frames the object under the pointer without changing
    /// the selection. Returns the framed object.
    pub fn pointer_double_clicked(&mut self, pointer: Vec2) -> Option<NodeId> {
        let viewport = self.viewport.as_ref()?;
        let ray = viewport.ray(pointer);
        let id = viewport.pick_object(&self.store, &ray)?;
        debug!(node = %id, "frame on double click");
        self.frame_object(&id);
        Some(id)
    }

    /// Pointer released. Ends any drag and restores camera input.
    pub fn pointer_released(&mut self) {
        let Some(viewport) = &mut self.viewport else {
            return;
        };
        if viewport
            .drag
            .end(viewport.gizmos.active_mut(), &mut viewport.camera)
            .is_some()
        {
            self.after_transform_change();
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.viewport.as_ref().is_some_and(|v| v.drag.is_dragging())
    }

    // ---- camera ----

    pub fn orbit_camera(&mut self, delta: Vec2) {
        if let Some(viewport) = &mut self.viewport {
            viewport.camera.orbit(delta.x, delta.y);
        }
    }

    pub fn pan_camera(&mut self, delta: Vec2) {
        if let Some(viewport) = &mut self.viewport {
            let height = viewport.size().y;
            viewport.camera.pan(delta.x, delta.y, height);
        }
    }

    pub fn zoom_camera(&mut self, factor: f32) {
        if let Some(viewport) = &mut self.viewport {
            viewport.camera.zoom(factor);
            viewport.update_gizmo_scale();
        }
    }

    // ---- selection ----

    pub fn select(&mut self, id: &NodeId, additive: bool) {
        if self.selection.select(&self.store, id, additive) {
            debug!(node = %id, additive, count = self.selection.len(), "select");
            self.after_selection_change();
        }
    }

    pub fn toggle_selection(&mut self, id: &NodeId) {
        self.selection.toggle(&self.store, id);
        self.after_selection_change();
    }

    pub fn clear_selection(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        self.selection.clear();
        self.after_selection_change();
    }

    /// Selects every top-level media object and light.
    pub fn select_all(&mut self) {
        let ids: Vec<NodeId> = self
            .store
            .top_level()
            .filter(|id| {
                self.store
                    .get(id)
                    .is_some_and(|n| matches!(n.tag(), NodeTag::Media | NodeTag::Light))
            })
            .cloned()
            .collect();
        self.selection.set(&self.store, ids);
        debug!(count = self.selection.len(), "select all");
        self.after_selection_change();
    }

    // ---- grouping ----

    /// Groups the selected media objects. Needs at least two.
    pub fn group_selected(&mut self) -> Option<NodeId> {
        let members: Vec<NodeId> = self
            .selection
            .ids()
            .iter()
            .filter(|id| self.store.get(id).is_some_and(|n| n.is_media()))
            .cloned()
            .collect();
        match self.store.create_group(&members) {
            Ok(group) => {
                info!(group = %group, members = members.len(), "grouped");
                self.after_structure_change();
                Some(group)
            }
            Err(e) => {
                debug!(error = %e, "group not created");
                None
            }
        }
    }

    /// Moves selected objects out of their groups, keeping their world
    /// placement. Selected groups are dissolved entirely.
    pub fn ungroup_selected(&mut self) -> usize {
        let mut released = 0;
        for id in self.selection.ids().to_vec() {
            let is_group = self.store.get(&id).is_some_and(|n| n.is_group());
            if is_group {
                match self.store.ungroup(&id) {
                    Ok(members) => released += members.len(),
                    Err(e) => warn!(group = %id, error = %e, "ungroup failed"),
                }
            } else if self.store.group_of(&id).is_some() {
                match self.store.detach_from_group(&id) {
                    Ok(()) => released += 1,
                    Err(e) => warn!(node = %id, error = %e, "ungroup failed"),
                }
            }
        }
        if released > 0 {
            info!(released, "ungrouped");
            self.after_structure_change();
        }
        released
    }
}

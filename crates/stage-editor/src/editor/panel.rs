//! Values and edits exposed to the side panels

use glam::Vec3;
use serde::{Deserialize, Serialize};
use stage_core::{Axis, BoundingBox, NodeId, ObjectSummary, TransformKind, TransformSnapshot};
use tracing::{debug, warn};

use super::StageEditor;
use crate::backend::MediaBackend;
use crate::ops;

/// Alignment and distribution of a multi-selection by world bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlignMode {
    Left,
    CenterX,
    Right,
    Top,
    CenterY,
    Bottom,
    DistributeX,
    DistributeY,
}

impl AlignMode {
    pub const ALL: [AlignMode; 8] = [
        AlignMode::Left,
        AlignMode::CenterX,
        AlignMode::Right,
        AlignMode::Top,
        AlignMode::CenterY,
        AlignMode::Bottom,
        AlignMode::DistributeX,
        AlignMode::DistributeY,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AlignMode::Left => "Left",
            AlignMode::CenterX => "Center X",
            AlignMode::Right => "Right",
            AlignMode::Top => "Top",
            AlignMode::CenterY => "Center Y",
            AlignMode::Bottom => "Bottom",
            AlignMode::DistributeX => "Distribute X",
            AlignMode::DistributeY => "Distribute Y",
        }
    }

    fn axis(self) -> Axis {
        match self {
            AlignMode::Left | AlignMode::CenterX | AlignMode::Right | AlignMode::DistributeX => {
                Axis::X
            }
            _ => Axis::Y,
        }
    }
}

/// World bounds of one selected object while aligning.
struct Extent {
    id: NodeId,
    min: f32,
    center: f32,
    max: f32,
}

impl<B: MediaBackend> StageEditor<B> {
    /// Media objects in scene order.
    pub fn object_list(&self) -> Vec<ObjectSummary> {
        self.store.object_summaries()
    }

    pub fn selection_list(&self) -> Vec<ObjectSummary> {
        self.selection
            .ids()
            .iter()
            .filter_map(|id| self.store.get(id))
            .map(ObjectSummary::from_node)
            .collect()
    }

    /// Values for the numeric transform panel.
    ///
    /// A single object shows its own transform. Several objects show their
    /// center with zero rotation and unit scale. An empty selection shows
    /// the defaults.
    pub fn transform_snapshot(&self) -> TransformSnapshot {
        match self.selection.ids() {
            [] => TransformSnapshot::default(),
            [id] => self
                .store
                .transform(id)
                .map(|t| TransformSnapshot::from_transform(&t))
                .unwrap_or_default(),
            _ => self
                .selection
                .center(&self.store)
                .map(TransformSnapshot::centered)
                .unwrap_or_default(),
        }
    }

    /// Numeric panel edit of one component. Rotation values are degrees.
    ///
    /// Locked axes are left alone. On a multi-selection only position
    /// edits apply; they move every object so the center lands on `value`.
    /// Returns true if anything changed.
    pub fn edit_transform(&mut self, kind: TransformKind, axis: Axis, value: f32) -> bool {
        if !value.is_finite() || self.locks.is_locked(kind, axis) {
            return false;
        }
        let changed = match self.selection.ids() {
            [] => false,
            [id] => {
                let id = id.clone();
                let next = self.store.transform(&id).and_then(|t| {
                    ops::set_component(&t, kind, axis, value, &self.locks, self.settings.min_scale)
                });
                match next {
                    Some(next) => self.store.set_transform(&id, next).is_ok(),
                    None => false,
                }
            }
            _ if kind == TransformKind::Position => {
                let Some(center) = self.selection.center(&self.store) else {
                    return false;
                };
                let delta = value - axis.get(center);
                for id in self.selection.ids().to_vec() {
                    let Some(mut t) = self.store.transform(&id) else {
                        continue;
                    };
                    let current = axis.get(t.position);
                    axis.set(&mut t.position, current + delta);
                    if let Err(e) = self.store.set_transform(&id, t) {
                        warn!(node = %id, error = %e, "panel edit failed");
                    }
                }
                true
            }
            _ => false,
        };
        if changed {
            debug!(kind = kind.name(), axis = axis.name(), value, "panel edit");
            self.after_transform_change();
        }
        changed
    }

    /// Aligns or distributes the selected objects. Needs at least two.
    pub fn align_selected(&mut self, mode: AlignMode) {
        if self.selection.len() < 2 {
            return;
        }
        let axis = mode.axis();
        if self.locks.is_locked(TransformKind::Position, axis) {
            return;
        }
        let mut extents: Vec<Extent> = self
            .selection
            .ids()
            .iter()
            .filter_map(|id| {
                let bounds = self.store.world_bounds(id)?;
                Some(Extent {
                    id: id.clone(),
                    min: axis.get(bounds.min),
                    center: axis.get(bounds.center()),
                    max: axis.get(bounds.max),
                })
            })
            .collect();
        if extents.len() < 2 {
            return;
        }

        // Target value per object and which of its extents should land there
        let targets: Vec<(NodeId, f32)> = match mode {
            AlignMode::Left | AlignMode::Bottom => {
                let min = extents.iter().map(|e| e.min).fold(f32::INFINITY, f32::min);
                extents.iter().map(|e| (e.id.clone(), min - e.min)).collect()
            }
            AlignMode::Right | AlignMode::Top => {
                let max = extents
                    .iter()
                    .map(|e| e.max)
                    .fold(f32::NEG_INFINITY, f32::max);
                extents.iter().map(|e| (e.id.clone(), max - e.max)).collect()
            }
            AlignMode::CenterX | AlignMode::CenterY => {
                let avg = extents.iter().map(|e| e.center).sum::<f32>() / extents.len() as f32;
                extents
                    .iter()
                    .map(|e| (e.id.clone(), avg - e.center))
                    .collect()
            }
            AlignMode::DistributeX | AlignMode::DistributeY => {
                extents.sort_by(|a, b| a.center.total_cmp(&b.center));
                let first = extents[0].center;
                let last = extents[extents.len() - 1].center;
                let spacing = (last - first) / (extents.len() - 1) as f32;
                extents
                    .iter()
                    .enumerate()
                    .map(|(i, e)| (e.id.clone(), first + spacing * i as f32 - e.center))
                    .collect()
            }
        };

        for (id, shift) in targets {
            let Some(mut t) = self.store.transform(&id) else {
                continue;
            };
            let current = axis.get(t.position);
            axis.set(&mut t.position, current + shift);
            if let Err(e) = self.store.set_transform(&id, t) {
                warn!(node = %id, error = %e, "align failed");
            }
        }
        debug!(mode = mode.name(), "aligned selection");
        self.after_transform_change();
    }

    /// Points the camera at the selection, keeping the viewing direction.
    pub fn frame_selection(&mut self) {
        if let Some(bounds) = self.selection.bounds(&self.store) {
            self.frame_bounds(&bounds, None);
        }
    }

    /// Points the camera at one node, keeping the viewing direction.
    pub fn frame_object(&mut self, id: &NodeId) {
        if let Some(bounds) = self.store.world_bounds(id) {
            self.frame_bounds(&bounds, None);
        }
    }

    /// Points the camera at the whole scene from the (1, 1, 1) diagonal.
    pub fn frame_all(&mut self) {
        if let Some(bounds) = self.store.scene_bounds() {
            self.frame_bounds(&bounds, Some(Vec3::ONE));
        }
    }

    fn frame_bounds(&mut self, bounds: &BoundingBox, direction: Option<Vec3>) {
        if let Some(viewport) = &mut self.viewport {
            viewport.camera.frame(bounds, direction);
            viewport.update_gizmo_scale();
        }
    }
}

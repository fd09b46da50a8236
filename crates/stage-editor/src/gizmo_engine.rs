//! Chooses between the single-object control and the multi-selection gizmo

use glam::Vec3;
use stage_core::{GizmoMode, NodeId, SceneStore};
use stage_renderer::Gizmo;
use tracing::debug;

use crate::selection::SelectionManager;

/// What the engine currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GizmoAttachment {
    None,
    /// Built-in control attached to one object
    Single(NodeId),
    /// Custom gizmo at the selection center
    Multi,
}

/// Control attached directly to a single selected object.
#[derive(Debug)]
struct SingleObjectControl {
    attached: Option<NodeId>,
    gizmo: Gizmo,
}

impl SingleObjectControl {
    fn attach(&mut self, id: NodeId, position: Vec3) {
        self.gizmo.set_position(position);
        self.attached = Some(id);
    }

    fn detach(&mut self) {
        if self.attached.take().is_some() {
            self.gizmo.clear_hover();
        }
    }
}

/// Gizmo state machine:
/// - nothing selected: nothing shown
/// - one object: built-in control attached to it, custom gizmo torn down
/// - several objects: built-in control hidden, custom gizmo for the current
///   mode at the selection center
///
/// Only one custom gizmo exists at a time; the old one is disposed before a
/// replacement is built.
#[derive(Debug)]
pub struct TransformGizmoEngine {
    mode: GizmoMode,
    control: SingleObjectControl,
    custom: Option<Gizmo>,
    /// Handle size factor, following the camera distance
    scale: f32,
}

impl TransformGizmoEngine {
    pub fn new(mode: GizmoMode) -> Self {
        Self {
            mode,
            control: SingleObjectControl {
                attached: None,
                gizmo: Gizmo::new(mode, Vec3::ZERO),
            },
            custom: None,
            scale: 1.0,
        }
    }

    pub fn mode(&self) -> GizmoMode {
        self.mode
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Resizes the control and any custom gizmo.
    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
        self.control.gizmo.set_scale(scale);
        if let Some(gizmo) = &mut self.custom {
            gizmo.set_scale(scale);
        }
    }

    fn build(&self, mode: GizmoMode, position: Vec3) -> Gizmo {
        let mut gizmo = Gizmo::new(mode, position);
        gizmo.set_scale(self.scale);
        gizmo
    }

    /// Switches transform mode and rebuilds whatever is shown.
    pub fn set_mode(&mut self, mode: GizmoMode, store: &SceneStore, selection: &SelectionManager) {
        if mode == self.mode {
            return;
        }
        debug!(from = self.mode.name(), to = mode.name(), "gizmo mode change");
        self.mode = mode;
        let position = self.control.gizmo.position();
        self.control.gizmo.dispose();
        self.control.gizmo = self.build(mode, position);
        self.sync(store, selection);
    }

    /// Brings the shown gizmo in line with the selection.
    pub fn sync(&mut self, store: &SceneStore, selection: &SelectionManager) {
        match selection.ids() {
            [] => self.detach(),
            [id] => {
                self.teardown_custom();
                let position = store.world_position(id).unwrap_or(Vec3::ZERO);
                if self.control.attached.as_ref() != Some(id) {
                    debug!(node = %id, "attach single-object control");
                }
                self.control.attach(id.clone(), position);
            }
            _ => {
                self.control.detach();
                let center = selection.center(store).unwrap_or(Vec3::ZERO);
                let mode = self.mode;
                if let Some(gizmo) = self.custom.as_mut().filter(|g| g.mode() == mode) {
                    gizmo.set_position(center);
                } else {
                    self.teardown_custom();
                    debug!(mode = mode.name(), count = selection.len(), "create multi gizmo");
                    self.custom = Some(self.build(mode, center));
                }
            }
        }
    }

    /// Moves the shown gizmo to follow its target after a transform change.
    pub fn reposition(&mut self, store: &SceneStore, selection: &SelectionManager) {
        if let Some(gizmo) = &mut self.custom {
            if let Some(center) = selection.center(store) {
                gizmo.set_position(center);
            }
        } else if let Some(id) = &self.control.attached
            && let Some(position) = store.world_position(id)
        {
            self.control.gizmo.set_position(position);
        }
    }

    /// Hides the control and disposes any custom gizmo.
    pub fn detach(&mut self) {
        self.control.detach();
        self.teardown_custom();
    }

    fn teardown_custom(&mut self) {
        if let Some(mut gizmo) = self.custom.take() {
            gizmo.dispose();
            debug!(mode = gizmo.mode().name(), "multi gizmo removed");
        }
    }

    pub fn attachment(&self) -> GizmoAttachment {
        if self.custom.is_some() {
            GizmoAttachment::Multi
        } else if let Some(id) = &self.control.attached {
            GizmoAttachment::Single(id.clone())
        } else {
            GizmoAttachment::None
        }
    }

    /// The gizmo receiving pointer input, if any is shown.
    pub fn active(&self) -> Option<&Gizmo> {
        self.custom.as_ref().or_else(|| {
            self.control
                .attached
                .is_some()
                .then_some(&self.control.gizmo)
        })
    }

    pub fn active_mut(&mut self) -> Option<&mut Gizmo> {
        if self.custom.is_some() {
            return self.custom.as_mut();
        }
        if self.control.attached.is_some() {
            Some(&mut self.control.gizmo)
        } else {
            None
        }
    }

    pub fn custom(&self) -> Option<&Gizmo> {
        self.custom.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.active().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::image_node;
    use approx::assert_relative_eq;
    use stage_core::Transform;

    fn setup() -> (SceneStore, SelectionManager) {
        let mut store = SceneStore::new();
        for (id, x) in [("a", 0.0), ("b", 2.0), ("c", 4.0)] {
            store.insert(image_node(id, Vec3::new(x, 0.0, 0.0))).unwrap();
        }
        (store, SelectionManager::new())
    }

    #[test]
    fn test_state_machine() {
        let (store, mut sel) = setup();
        let mut engine = TransformGizmoEngine::new(GizmoMode::Translate);
        engine.sync(&store, &sel);
        assert_eq!(engine.attachment(), GizmoAttachment::None);
        assert!(!engine.is_visible());

        sel.select(&store, &"b".into(), false);
        engine.sync(&store, &sel);
        assert_eq!(engine.attachment(), GizmoAttachment::Single("b".into()));
        assert_eq!(engine.active().unwrap().position(), Vec3::new(2.0, 0.0, 0.0));

        sel.select(&store, &"c".into(), true);
        engine.sync(&store, &sel);
        assert_eq!(engine.attachment(), GizmoAttachment::Multi);
        assert_relative_eq!(engine.active().unwrap().position().x, 3.0);

        sel.toggle(&store, &"c".into());
        engine.sync(&store, &sel);
        assert_eq!(engine.attachment(), GizmoAttachment::Single("b".into()));
        assert!(engine.custom().is_none());

        sel.clear();
        engine.sync(&store, &sel);
        assert_eq!(engine.attachment(), GizmoAttachment::None);
    }

    #[test]
    fn test_mode_change_replaces_custom_gizmo() {
        let (store, mut sel) = setup();
        sel.set(&store, ["a".into(), "c".into()]);
        let mut engine = TransformGizmoEngine::new(GizmoMode::Translate);
        engine.sync(&store, &sel);

        engine.set_mode(GizmoMode::Rotate, &store, &sel);
        let gizmo = engine.custom().unwrap();
        assert_eq!(gizmo.mode(), GizmoMode::Rotate);
        assert_eq!(gizmo.handles().len(), 3);
        assert_eq!(engine.active().unwrap().mode(), GizmoMode::Rotate);
    }

    #[test]
    fn test_scale_carries_over_to_new_gizmos() {
        let (store, mut sel) = setup();
        let mut engine = TransformGizmoEngine::new(GizmoMode::Translate);
        engine.set_scale(3.0);

        sel.set(&store, ["a".into(), "b".into()]);
        engine.sync(&store, &sel);
        assert_eq!(engine.active().unwrap().scale(), 3.0);

        engine.set_mode(GizmoMode::Scale, &store, &sel);
        assert_eq!(engine.active().unwrap().scale(), 3.0);

        sel.set(&store, ["a".into()]);
        engine.sync(&store, &sel);
        assert_eq!(engine.active().unwrap().scale(), 3.0);
    }

    #[test]
    fn test_reposition_tracks_center() {
        let (mut store, mut sel) = setup();
        sel.set(&store, ["a".into(), "c".into()]);
        let mut engine = TransformGizmoEngine::new(GizmoMode::Scale);
        engine.sync(&store, &sel);

        store
            .set_transform(&"c".into(), Transform::from_position(Vec3::new(8.0, 0.0, 0.0)))
            .unwrap();
        engine.reposition(&store, &sel);
        assert_relative_eq!(engine.active().unwrap().position().x, 4.0);
    }
}

//! One mount of the render surface

use glam::{Vec2, Vec3};
use stage_core::{GizmoMode, LightKind, NodeId, NodeKind, SceneRoot, SceneStore};
use stage_renderer::picking::{ray_aabb_intersection, ray_sphere_intersection};
use stage_renderer::{OrbitCamera, Ray, RenderList, RenderLoop, handle_scale};
use tracing::{debug, info};

use crate::drag::DragInteractionController;
use crate::gizmo_engine::TransformGizmoEngine;

/// Pick radius around a light's position, matching its helper size
const LIGHT_PICK_RADIUS: f32 = 1.0;

/// Per-mount state: scene root, camera, gizmos, drag session and frame pacing.
///
/// Everything here is rebuilt on remount; the scene itself lives in the
/// [`SceneStore`] and survives.
#[derive(Debug)]
pub struct Viewport {
    pub root: SceneRoot,
    pub camera: OrbitCamera,
    pub gizmos: TransformGizmoEngine,
    pub drag: DragInteractionController,
    pub render_loop: RenderLoop,
    pub render_list: RenderList,
    size: Vec2,
}

impl Viewport {
    /// Attaches every stored object to a fresh root and starts the frame driver.
    pub fn mount(
        store: &SceneStore,
        generation: u64,
        mode: GizmoMode,
        target_fps: u32,
        size: Vec2,
    ) -> Self {
        let mut render_loop = RenderLoop::new(target_fps);
        render_loop.start();

        let mut viewport = Self {
            root: SceneRoot::mount(store, generation),
            // A fresh camera also re-enables controls left off by an abandoned drag
            camera: OrbitCamera::default(),
            gizmos: TransformGizmoEngine::new(mode),
            drag: DragInteractionController::new(),
            render_loop,
            render_list: RenderList::new(),
            size: Vec2::ONE,
        };
        viewport.resize(size.x, size.y);
        viewport.update_gizmo_scale();
        info!(generation, objects = viewport.root.len(), "viewport mounted");
        viewport
    }

    /// Stops the frame driver and detaches all objects without disposing them.
    pub fn unmount(&mut self) -> usize {
        self.render_loop.stop();
        self.drag.abandon();
        self.gizmos.detach();
        self.render_list.release();
        let detached = self.root.detach_all();
        info!(generation = self.root.generation(), detached, "viewport unmounted");
        detached
    }

    /// Applies a new surface size. Zero-sized observations are ignored and
    /// the last known size is kept.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        if width <= 0.0 || height <= 0.0 {
            debug!(width, height, "ignoring zero-size resize");
            return false;
        }
        self.size = Vec2::new(width, height);
        self.camera.update_aspect(width, height);
        true
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// World ray under a pointer position in viewport pixels.
    pub fn ray(&self, pointer: Vec2) -> Ray {
        self.camera
            .screen_to_ray(pointer.x, pointer.y, self.size.x, self.size.y)
    }

    pub fn project(&self, point: Vec3) -> Option<Vec2> {
        self.camera.world_to_screen(point, self.size.x, self.size.y)
    }

    /// Keeps gizmo handles at a constant on-screen size. Call after the
    /// camera distance changed.
    pub fn update_gizmo_scale(&mut self) {
        self.gizmos.set_scale(handle_scale(self.camera.distance()));
    }

    /// Nearest attached media object or positioned light hit by `ray`.
    /// Group members are picked individually. Ambient lights have no
    /// position and are never picked.
    pub fn pick_object(&self, store: &SceneStore, ray: &Ray) -> Option<NodeId> {
        let mut closest: Option<(NodeId, f32)> = None;
        let mut stack: Vec<&NodeId> = self.root.ids().iter().collect();

        while let Some(id) = stack.pop() {
            let Some(node) = store.get(id) else {
                continue;
            };
            let hit = match &node.kind {
                NodeKind::Group => {
                    stack.extend(node.children.iter());
                    None
                }
                NodeKind::Light(light) if light.kind == LightKind::Ambient => None,
                NodeKind::Light(_) => store
                    .world_position(id)
                    .and_then(|center| ray_sphere_intersection(ray, center, LIGHT_PICK_RADIUS)),
                NodeKind::Media(_) => store
                    .world_bounds(id)
                    .and_then(|bounds| ray_aabb_intersection(ray, bounds.min, bounds.max)),
            };
            if let Some(t) = hit
                && closest.as_ref().is_none_or(|(_, best)| t < *best)
            {
                closest = Some((id.clone(), t));
            }
        }
        closest.map(|(id, _)| id)
    }
}

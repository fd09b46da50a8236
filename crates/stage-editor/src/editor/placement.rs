//! Placing, importing and deleting media objects

use glam::Vec3;
use stage_core::{
    BoundingBox, ImportRequest, MediaDescriptor, MediaKind, NodeId, NodeKind, Renderable,
    SceneNode, Transform,
};
use stage_renderer::VideoDecoder;
use tracing::{debug, info, warn};

use super::{MissingMedia, PreviewMode, StageEditor};
use crate::backend::{LoadError, MediaBackend};

/// Side length of the plane media is mapped onto
const PLANE_SIZE: f32 = 2.0;
/// Largest dimension of a placed model
const MODEL_SIZE: f32 = 2.0;

/// Resources and framing of a media object before it enters the store.
struct Built {
    renderable: Renderable,
    bounds: BoundingBox,
    scale: Vec3,
    placeholder: bool,
    video: Option<Box<dyn VideoDecoder>>,
}

fn plane_bounds() -> BoundingBox {
    BoundingBox::centered(Vec3::new(PLANE_SIZE * 0.5, PLANE_SIZE * 0.5, 0.0))
}

impl<B: MediaBackend> StageEditor<B> {
    /// Places one media item in the scene at `position`. Without a position
    /// the object goes to the origin and the camera frames it.
    ///
    /// Load failures produce a placeholder object and a "media missing"
    /// notification. Returns `None` only if the id is already in the scene.
    pub fn place_media(&mut self, media: MediaDescriptor, position: Option<Vec3>) -> Option<NodeId> {
        let id = NodeId::new(media.id.clone());
        if self.store.contains(&id) {
            warn!(media = %id, "media already placed");
            return None;
        }
        let kind = media.kind();
        let built = self.build(&id, &media, kind);

        let texture = built.renderable.texture;
        let mut node = SceneNode::media(id.clone(), media, kind, built.renderable, built.bounds)
            .with_transform(Transform {
                position: position.unwrap_or(Vec3::ZERO),
                rotation: Vec3::ZERO,
                scale: built.scale,
            });
        if let Some(m) = node.as_media_mut() {
            m.placeholder = built.placeholder;
        }

        if let Err(e) = self.store.insert(node) {
            warn!(media = %id, error = %e, "failed to insert media");
            if let Some(mut decoder) = built.video {
                decoder.release();
            }
            for resource in built.renderable.resources() {
                self.resources.enqueue(resource);
            }
            return None;
        }

        if let (Some(decoder), Some(texture)) = (built.video, texture) {
            let autoplay = self.preview == PreviewMode::Live;
            self.resources
                .register_video(id.clone(), decoder, texture, autoplay);
        }
        if let Some(viewport) = &mut self.viewport {
            viewport.root.attach(id.clone());
        }
        if position.is_none() {
            self.frame_object(&id);
        }
        debug!(media = %id, kind = kind.name(), placeholder = built.placeholder, "media placed");
        Some(id)
    }

    fn build(&mut self, id: &NodeId, media: &MediaDescriptor, kind: MediaKind) -> Built {
        let pool = self.resources.pool_mut();
        let result = match kind {
            MediaKind::Image => self.backend.load_image(pool, media).map(|image| {
                let geometry = self.backend.create_plane(pool, PLANE_SIZE, PLANE_SIZE);
                let material = self.backend.create_material(pool, Some(image.texture));
                Built {
                    renderable: Renderable {
                        geometry,
                        material,
                        texture: Some(image.texture),
                    },
                    bounds: plane_bounds(),
                    scale: Vec3::new(image.aspect(), 1.0, 1.0),
                    placeholder: false,
                    video: None,
                }
            }),
            MediaKind::Video => self.backend.open_video(pool, media).map(|video| {
                let geometry = self.backend.create_plane(pool, PLANE_SIZE, PLANE_SIZE);
                let material = self.backend.create_material(pool, Some(video.texture));
                let scale = Vec3::new(video.aspect(), 1.0, 1.0);
                Built {
                    renderable: Renderable {
                        geometry,
                        material,
                        texture: Some(video.texture),
                    },
                    bounds: plane_bounds(),
                    scale,
                    placeholder: false,
                    video: Some(video.decoder),
                }
            }),
            MediaKind::Model => self.backend.load_model(pool, media).map(|model| {
                let max_dim = model.bounds.max_dimension();
                let scale = if max_dim > f32::EPSILON {
                    MODEL_SIZE / max_dim
                } else {
                    1.0
                };
                Built {
                    renderable: Renderable {
                        geometry: model.geometry,
                        material: model.material,
                        texture: None,
                    },
                    bounds: model.bounds,
                    scale: Vec3::splat(scale),
                    placeholder: false,
                    video: None,
                }
            }),
            // Audio and unknown media are represented by a labelled card
            MediaKind::Audio | MediaKind::Other => return self.placeholder(media, kind),
        };

        match result {
            Ok(built) => built,
            Err(e) => {
                self.report_missing(id, media, &e);
                self.placeholder(media, kind)
            }
        }
    }

    fn placeholder(&mut self, media: &MediaDescriptor, kind: MediaKind) -> Built {
        let pool = self.resources.pool_mut();
        let texture = self.backend.placeholder(pool, &media.name, kind);
        let geometry = self.backend.create_plane(pool, PLANE_SIZE, PLANE_SIZE);
        let material = self.backend.create_material(pool, Some(texture));
        Built {
            renderable: Renderable {
                geometry,
                material,
                texture: Some(texture),
            },
            bounds: plane_bounds(),
            scale: Vec3::ONE,
            placeholder: !matches!(kind, MediaKind::Audio | MediaKind::Other),
            video: None,
        }
    }

    fn report_missing(&mut self, id: &NodeId, media: &MediaDescriptor, error: &LoadError) {
        warn!(media = %id, name = %media.name, error = %error, "media missing, using placeholder");
        self.missing.push(MissingMedia {
            id: id.clone(),
            name: media.name.clone(),
            reason: error.to_string(),
        });
    }

    /// Places a batch of media on a grid and frames the whole scene.
    /// Returns the ids that were placed.
    pub fn import_batch(&mut self, request: ImportRequest) -> Vec<NodeId> {
        let placements = request.grid_placements();
        let mut placed = Vec::with_capacity(placements.len());
        for (media, placement) in request.items.into_iter().zip(placements) {
            let Some(id) = self.place_media(media, Some(placement.position)) else {
                continue;
            };
            if let Some(mut transform) = self.store.transform(&id) {
                transform.rotation = placement.rotation;
                if let Err(e) = self.store.set_transform(&id, transform) {
                    warn!(media = %id, error = %e, "failed to orient imported media");
                }
            }
            placed.push(id);
        }
        info!(count = placed.len(), "batch import");
        if !placed.is_empty() {
            self.frame_all();
        }
        placed
    }

    /// Deletes every selected object. Returns how many nodes were removed.
    pub fn delete_selected(&mut self) -> usize {
        let ids = self.selection.ids().to_vec();
        self.selection.clear();
        self.delete(&ids)
    }

    /// Deletes nodes, their group members and any group they empty.
    ///
    /// Nodes leave the scene root before their resources are released.
    /// Video handles go at once; other resources are queued for the next
    /// disposal pass.
    pub fn delete(&mut self, ids: &[NodeId]) -> usize {
        let mut removed = Vec::new();
        for id in ids {
            removed.extend(self.store.remove(id));
        }
        if removed.is_empty() {
            return 0;
        }

        if let Some(viewport) = &mut self.viewport {
            for node in &removed {
                viewport.root.detach(&node.id);
            }
        }
        if self.hovered_media.as_ref().is_some_and(|h| removed.iter().any(|n| &n.id == h)) {
            self.hovered_media = None;
        }

        for node in &removed {
            let NodeKind::Media(media) = &node.kind else {
                continue;
            };
            self.resources.cleanup_video(&node.id);
            for resource in media.renderable.resources() {
                if self.resources.pool().contains(resource) {
                    self.resources.enqueue(resource);
                }
            }
        }

        info!(count = removed.len(), queued = self.resources.queued(), "deleted objects");
        self.after_structure_change();
        removed.len()
    }
}

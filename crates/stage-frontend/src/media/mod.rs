//! egui-backed media loading
//!
//! Textures are egui texture handles; geometry is kept CPU-side and drawn by
//! the viewport painter. Every resource lives in the editor's resource pool,
//! the backend only keeps lookup tables for drawing.

mod decode;
mod gif_player;
mod model;
mod placeholder;
mod source;

pub use decode::{decode_gif, decode_image, fit_within};
pub use gif_player::GifPlayer;
pub use model::{MeshData, load_model};
pub use placeholder::placeholder_frame;
pub use source::{descriptor_from_path, read_source, resolve_path};

use std::collections::HashMap;
use std::sync::Arc;

use egui::{Color32, ColorImage, TextureHandle, TextureId, TextureOptions};
use stage_core::{MediaDescriptor, MediaKind, ResourceId};
use stage_editor::{LoadError, LoadedImage, LoadedModel, LoadedVideo, MediaBackend};
use stage_renderer::{
    DisposeError, GpuResource, ResourceKind, ResourcePool, VideoDecoder, VideoFrame,
};

const MODEL_COLOR: Color32 = Color32::from_rgb(0xb0, 0xb4, 0xbc);

fn color_image(frame: &VideoFrame) -> ColorImage {
    ColorImage::from_rgba_unmultiplied([frame.width as usize, frame.height as usize], &frame.rgba)
}

/// A texture owned by the resource pool
struct TextureResource {
    handle: Option<TextureHandle>,
    size: [usize; 2],
}

impl GpuResource for TextureResource {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Texture
    }

    fn byte_size(&self) -> usize {
        self.size[0] * self.size[1] * 4
    }

    fn dispose(&mut self) -> Result<(), DisposeError> {
        // egui frees the texture once the last handle drops
        self.handle = None;
        Ok(())
    }

    fn upload(&mut self, frame: &VideoFrame) -> bool {
        let Some(handle) = &mut self.handle else {
            return false;
        };
        handle.set(color_image(frame), TextureOptions::LINEAR);
        self.size = [frame.width as usize, frame.height as usize];
        true
    }
}

struct MeshResource {
    mesh: Arc<MeshData>,
}

impl GpuResource for MeshResource {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Geometry
    }

    fn byte_size(&self) -> usize {
        self.mesh.byte_size()
    }

    fn dispose(&mut self) -> Result<(), DisposeError> {
        self.mesh = Arc::default();
        Ok(())
    }
}

/// Surface appearance of a mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub texture: Option<ResourceId>,
    pub color: Color32,
}

struct MaterialResource;

impl GpuResource for MaterialResource {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Material
    }

    fn byte_size(&self) -> usize {
        0
    }

    fn dispose(&mut self) -> Result<(), DisposeError> {
        Ok(())
    }
}

/// [`MediaBackend`] creating egui textures and CPU meshes.
pub struct EguiBackend {
    ctx: egui::Context,
    max_texture_size: u32,
    textures: HashMap<ResourceId, TextureId>,
    meshes: HashMap<ResourceId, Arc<MeshData>>,
    materials: HashMap<ResourceId, Material>,
    labels: HashMap<ResourceId, String>,
}

impl EguiBackend {
    pub fn new(ctx: egui::Context, max_texture_size: u32) -> Self {
        Self {
            ctx,
            max_texture_size: max_texture_size.max(1),
            textures: HashMap::new(),
            meshes: HashMap::new(),
            materials: HashMap::new(),
            labels: HashMap::new(),
        }
    }

    pub fn set_max_texture_size(&mut self, max_texture_size: u32) {
        self.max_texture_size = max_texture_size.max(1);
    }

    pub fn texture_id(&self, id: ResourceId) -> Option<TextureId> {
        self.textures.get(&id).copied()
    }

    pub fn mesh(&self, id: ResourceId) -> Option<&Arc<MeshData>> {
        self.meshes.get(&id)
    }

    pub fn material(&self, id: ResourceId) -> Option<&Material> {
        self.materials.get(&id)
    }

    /// Text drawn over a placeholder texture.
    pub fn label(&self, texture: ResourceId) -> Option<&str> {
        self.labels.get(&texture).map(String::as_str)
    }

    /// Forgets lookups for resources the pool has disposed.
    pub fn prune(&mut self, pool: &ResourcePool) -> usize {
        let before = self.textures.len() + self.meshes.len() + self.materials.len();
        self.textures.retain(|id, _| pool.contains(*id));
        self.meshes.retain(|id, _| pool.contains(*id));
        self.materials.retain(|id, _| pool.contains(*id));
        self.labels.retain(|id, _| pool.contains(*id));
        before - (self.textures.len() + self.meshes.len() + self.materials.len())
    }

    fn add_texture(&mut self, pool: &mut ResourcePool, name: &str, frame: &VideoFrame) -> ResourceId {
        let handle = self
            .ctx
            .load_texture(name, color_image(frame), TextureOptions::LINEAR);
        let texture_id = handle.id();
        let id = pool.insert(Box::new(TextureResource {
            handle: Some(handle),
            size: [frame.width as usize, frame.height as usize],
        }));
        self.textures.insert(id, texture_id);
        id
    }

    fn add_mesh(&mut self, pool: &mut ResourcePool, mesh: MeshData) -> ResourceId {
        let mesh = Arc::new(mesh);
        let id = pool.insert(Box::new(MeshResource { mesh: mesh.clone() }));
        self.meshes.insert(id, mesh);
        id
    }

    fn add_material(&mut self, pool: &mut ResourcePool, material: Material) -> ResourceId {
        let id = pool.insert(Box::new(MaterialResource));
        self.materials.insert(id, material);
        id
    }
}

fn is_gif(media: &MediaDescriptor) -> bool {
    media.media_type.eq_ignore_ascii_case("image/gif") || media.extension().as_deref() == Some("gif")
}

impl MediaBackend for EguiBackend {
    fn load_image(
        &mut self,
        pool: &mut ResourcePool,
        media: &MediaDescriptor,
    ) -> Result<LoadedImage, LoadError> {
        let (path, bytes) = read_source(media)?;
        let frame = decode_image(&bytes, &path.display().to_string(), self.max_texture_size)?;
        let texture = self.add_texture(pool, &media.id, &frame);
        tracing::debug!(media = %media.id, width = frame.width, height = frame.height, "image loaded");
        Ok(LoadedImage {
            texture,
            width: frame.width,
            height: frame.height,
        })
    }

    fn open_video(
        &mut self,
        pool: &mut ResourcePool,
        media: &MediaDescriptor,
    ) -> Result<LoadedVideo, LoadError> {
        // Animated GIFs are the only frame source available
        if !is_gif(media) {
            return Err(LoadError::Unsupported(format!(
                "{} ({})",
                media.name, media.media_type
            )));
        }
        let (path, bytes) = read_source(media)?;
        let frames = decode_gif(&bytes, &path.display().to_string(), self.max_texture_size)?;
        let Some((first, _)) = frames.first() else {
            return Err(LoadError::Decode {
                path: path.display().to_string(),
                reason: "no frames".into(),
            });
        };
        let texture = self.add_texture(pool, &media.id, first);
        let player = GifPlayer::new(frames);
        let (width, height) = player.dimensions();
        tracing::debug!(media = %media.id, frames = player.frame_count(), "video opened");
        Ok(LoadedVideo {
            decoder: Box::new(player),
            texture,
            width,
            height,
        })
    }

    fn load_model(
        &mut self,
        pool: &mut ResourcePool,
        media: &MediaDescriptor,
    ) -> Result<LoadedModel, LoadError> {
        let (path, bytes) = read_source(media)?;
        let extension = media.extension().unwrap_or_default();
        let mut mesh = load_model(&path, &bytes, &extension)?;
        let bounds = mesh.center();
        tracing::debug!(media = %media.id, triangles = mesh.triangle_count(), "model loaded");
        let geometry = self.add_mesh(pool, mesh);
        let material = self.add_material(
            pool,
            Material {
                texture: None,
                color: MODEL_COLOR,
            },
        );
        Ok(LoadedModel {
            geometry,
            material,
            bounds,
        })
    }

    fn placeholder(&mut self, pool: &mut ResourcePool, label: &str, kind: MediaKind) -> ResourceId {
        let frame = placeholder_frame(kind);
        let id = self.add_texture(pool, &format!("placeholder:{label}"), &frame);
        self.labels.insert(id, label.to_string());
        id
    }

    fn create_plane(&mut self, pool: &mut ResourcePool, width: f32, height: f32) -> ResourceId {
        self.add_mesh(pool, MeshData::plane(width, height))
    }

    fn create_material(&mut self, pool: &mut ResourcePool, texture: Option<ResourceId>) -> ResourceId {
        self.add_material(
            pool,
            Material {
                texture,
                color: Color32::WHITE,
            },
        )
    }
}

//! Media loading seam between the editor and the graphics backend

use stage_core::{BoundingBox, MediaDescriptor, MediaKind, ResourceId};
use stage_renderer::{ResourcePool, VideoDecoder};
use thiserror::Error;

/// Errors produced while turning a media descriptor into GPU resources
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("media {0} has neither a url nor a thumbnail")]
    MissingSource(String),

    #[error("failed to read {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("failed to decode {path}: {reason}")]
    Decode { path: String, reason: String },

    #[error("no decoder available for {0}")]
    Unsupported(String),
}

/// A decoded still image uploaded as a texture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadedImage {
    pub texture: ResourceId,
    pub width: u32,
    pub height: u32,
}

impl LoadedImage {
    pub fn aspect(&self) -> f32 {
        aspect(self.width, self.height)
    }
}

/// An opened video: its decode handle and the texture it feeds.
pub struct LoadedVideo {
    pub decoder: Box<dyn VideoDecoder>,
    pub texture: ResourceId,
    pub width: u32,
    pub height: u32,
}

impl LoadedVideo {
    pub fn aspect(&self) -> f32 {
        aspect(self.width, self.height)
    }
}

/// Uploaded mesh of a 3D model, in model units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadedModel {
    pub geometry: ResourceId,
    pub material: ResourceId,
    pub bounds: BoundingBox,
}

fn aspect(width: u32, height: u32) -> f32 {
    if width == 0 || height == 0 {
        1.0
    } else {
        width as f32 / height as f32
    }
}

/// Creates GPU resources for media. Every resource goes into `pool` so the
/// lifecycle manager can account for and dispose it.
pub trait MediaBackend {
    fn load_image(
        &mut self,
        pool: &mut ResourcePool,
        media: &MediaDescriptor,
    ) -> Result<LoadedImage, LoadError>;

    fn open_video(
        &mut self,
        pool: &mut ResourcePool,
        media: &MediaDescriptor,
    ) -> Result<LoadedVideo, LoadError>;

    fn load_model(
        &mut self,
        pool: &mut ResourcePool,
        media: &MediaDescriptor,
    ) -> Result<LoadedModel, LoadError>;

    /// Solid-color texture carrying a text label. Must not fail.
    fn placeholder(&mut self, pool: &mut ResourcePool, label: &str, kind: MediaKind)
    -> ResourceId;

    /// Flat quad in the XY plane centered at the origin.
    fn create_plane(&mut self, pool: &mut ResourcePool, width: f32, height: f32) -> ResourceId;

    fn create_material(&mut self, pool: &mut ResourcePool, texture: Option<ResourceId>)
    -> ResourceId;
}

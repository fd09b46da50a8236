//! Headless backend and scene builders for editor tests

use std::collections::HashSet;
use std::time::Duration;

use glam::Vec3;
use stage_core::{
    BoundingBox, MediaDescriptor, MediaKind, Renderable, ResourceId, SceneNode, Transform,
};
use stage_renderer::{
    DisposeError, GpuResource, ResourceKind, ResourcePool, VideoDecoder, VideoFrame,
};

use crate::backend::{LoadError, LoadedImage, LoadedModel, LoadedVideo, MediaBackend};

/// Image media node with a 2x2 plane at `position`.
pub fn image_node(id: &str, position: Vec3) -> SceneNode {
    SceneNode::media(
        id,
        MediaDescriptor::new(id, id, format!("{id}.png")).with_type("image/png"),
        MediaKind::Image,
        Renderable {
            geometry: ResourceId::from_raw(0),
            material: ResourceId::from_raw(0),
            texture: None,
        },
        BoundingBox::centered(Vec3::new(1.0, 1.0, 0.0)),
    )
    .with_transform(Transform::from_position(position))
}

pub fn image(id: &str) -> MediaDescriptor {
    MediaDescriptor::new(id, id, format!("{id}.png")).with_type("image/png")
}

pub fn video(id: &str) -> MediaDescriptor {
    MediaDescriptor::new(id, id, format!("{id}.gif")).with_type("video/mp4")
}

pub fn model(id: &str) -> MediaDescriptor {
    MediaDescriptor::new(id, id, format!("{id}.stl"))
}

pub struct TestResource {
    kind: ResourceKind,
    bytes: usize,
}

impl GpuResource for TestResource {
    fn kind(&self) -> ResourceKind {
        self.kind
    }

    fn byte_size(&self) -> usize {
        self.bytes
    }

    fn dispose(&mut self) -> Result<(), DisposeError> {
        Ok(())
    }

    fn upload(&mut self, _frame: &VideoFrame) -> bool {
        self.kind == ResourceKind::Texture
    }
}

/// Decoder that yields a frame for every 40 ms of playback.
#[derive(Default)]
pub struct TestDecoder {
    playing: bool,
    clock: Duration,
    pending: bool,
}

impl VideoDecoder for TestDecoder {
    fn play(&mut self) {
        self.playing = true;
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn rewind(&mut self) {
        self.clock = Duration::ZERO;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn advance(&mut self, dt: Duration) {
        if self.playing {
            self.clock += dt;
            self.pending = true;
        }
    }

    fn has_new_frame(&self) -> bool {
        self.pending
    }

    fn take_frame(&mut self) -> Option<VideoFrame> {
        std::mem::take(&mut self.pending).then(|| VideoFrame {
            width: 2,
            height: 1,
            rgba: vec![0; 8],
        })
    }

    fn release(&mut self) {
        self.playing = false;
    }

    fn dimensions(&self) -> (u32, u32) {
        (2, 1)
    }
}

/// Backend whose loads succeed unless the media id is listed in `failing`.
pub struct TestBackend {
    pub failing: HashSet<String>,
    pub image_size: (u32, u32),
    pub model_bounds: BoundingBox,
    pub texture_bytes: usize,
}

impl Default for TestBackend {
    fn default() -> Self {
        Self {
            failing: HashSet::new(),
            image_size: (200, 100),
            model_bounds: BoundingBox::centered(Vec3::new(2.0, 1.0, 0.5)),
            texture_bytes: 1024,
        }
    }
}

impl TestBackend {
    pub fn failing(ids: &[&str]) -> Self {
        Self {
            failing: ids.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    fn check(&self, media: &MediaDescriptor) -> Result<(), LoadError> {
        if self.failing.contains(&media.id) {
            return Err(LoadError::Io {
                path: media.url.clone(),
                reason: "not found".into(),
            });
        }
        Ok(())
    }

    fn texture(&self, pool: &mut ResourcePool) -> ResourceId {
        pool.insert(Box::new(TestResource {
            kind: ResourceKind::Texture,
            bytes: self.texture_bytes,
        }))
    }
}

impl MediaBackend for TestBackend {
    fn load_image(
        &mut self,
        pool: &mut ResourcePool,
        media: &MediaDescriptor,
    ) -> Result<LoadedImage, LoadError> {
        self.check(media)?;
        Ok(LoadedImage {
            texture: self.texture(pool),
            width: self.image_size.0,
            height: self.image_size.1,
        })
    }

    fn open_video(
        &mut self,
        pool: &mut ResourcePool,
        media: &MediaDescriptor,
    ) -> Result<LoadedVideo, LoadError> {
        self.check(media)?;
        Ok(LoadedVideo {
            decoder: Box::new(TestDecoder::default()),
            texture: self.texture(pool),
            width: 2,
            height: 1,
        })
    }

    fn load_model(
        &mut self,
        pool: &mut ResourcePool,
        media: &MediaDescriptor,
    ) -> Result<LoadedModel, LoadError> {
        self.check(media)?;
        Ok(LoadedModel {
            geometry: pool.insert(Box::new(TestResource {
                kind: ResourceKind::Geometry,
                bytes: 4096,
            })),
            material: self.create_material(pool, None),
            bounds: self.model_bounds,
        })
    }

    fn placeholder(&mut self, pool: &mut ResourcePool, _label: &str, _kind: MediaKind) -> ResourceId {
        self.texture(pool)
    }

    fn create_plane(&mut self, pool: &mut ResourcePool, _width: f32, _height: f32) -> ResourceId {
        pool.insert(Box::new(TestResource {
            kind: ResourceKind::Geometry,
            bytes: 96,
        }))
    }

    fn create_material(&mut self, pool: &mut ResourcePool, _texture: Option<ResourceId>) -> ResourceId {
        pool.insert(Box::new(TestResource {
            kind: ResourceKind::Material,
            bytes: 0,
        }))
    }
}

//! Handle-based pool of GPU resources.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use stage_core::ResourceId;

use super::{DisposeError, VideoFrame};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Geometry,
    Material,
    Texture,
}

/// A GPU-side object owned by the pool.
///
/// Implementations wrap whatever the rendering backend hands out (texture
/// handles, vertex data). Dropping without `dispose` leaks backend state.
pub trait GpuResource {
    fn kind(&self) -> ResourceKind;

    /// Estimated GPU memory in bytes.
    fn byte_size(&self) -> usize;

    fn dispose(&mut self) -> Result<(), DisposeError>;

    /// Replaces the texel data. Returns false for resources that are not textures.
    fn upload(&mut self, frame: &VideoFrame) -> bool {
        let _ = frame;
        false
    }
}

/// Resource counts and estimated memory use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    pub geometries: usize,
    pub materials: usize,
    pub textures: usize,
    pub bytes: usize,
}

/// Manager for GPU resources.
///
/// Scene nodes only hold [`ResourceId`]s; the pool owns the resources.
pub struct ResourcePool {
    resources: HashMap<ResourceId, Box<dyn GpuResource>>,
    next_handle: AtomicU64,
}

impl ResourcePool {
    pub fn new() -> Self {
        Self {
            resources: HashMap::new(),
            next_handle: AtomicU64::new(1),
        }
    }

    /// Takes ownership of a resource and returns its handle.
    pub fn insert(&mut self, resource: Box<dyn GpuResource>) -> ResourceId {
        let id = ResourceId::from_raw(self.next_handle.fetch_add(1, Ordering::Relaxed));
        self.resources.insert(id, resource);
        id
    }

    pub fn get(&self, id: ResourceId) -> Option<&dyn GpuResource> {
        self.resources.get(&id).map(|r| r.as_ref())
    }

    pub fn get_mut(&mut self, id: ResourceId) -> Option<&mut (dyn GpuResource + 'static)> {
        self.resources.get_mut(&id).map(|r| r.as_mut())
    }

    pub fn contains(&self, id: ResourceId) -> bool {
        self.resources.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Removes a resource from the pool and disposes it.
    pub fn dispose(&mut self, id: ResourceId) -> Result<(), DisposeError> {
        let mut resource = self.resources.remove(&id).ok_or(DisposeError::Missing(id))?;
        resource.dispose()
    }

    pub fn stats(&self) -> PoolStats {
        self.resources
            .values()
            .fold(PoolStats::default(), |mut stats, r| {
                match r.kind() {
                    ResourceKind::Geometry => stats.geometries += 1,
                    ResourceKind::Material => stats.materials += 1,
                    ResourceKind::Texture => stats.textures += 1,
                }
                stats.bytes += r.byte_size();
                stats
            })
    }
}

impl Default for ResourcePool {
    fn default() -> Self {
        Self::new()
    }
}

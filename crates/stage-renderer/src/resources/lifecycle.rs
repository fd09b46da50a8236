//! Video handle tracking and deferred disposal.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use stage_core::{NodeId, ResourceId};
use tracing::{debug, info, warn};

use super::{ResourcePool, VideoDecoder};

/// Limits applied by the lifecycle manager.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LifecycleConfig {
    pub max_concurrent_videos: usize,
    pub cleanup_interval: Duration,
    pub cleanup_batch_size: usize,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            max_concurrent_videos: 5,
            cleanup_interval: Duration::from_secs(60),
            cleanup_batch_size: 10,
        }
    }
}

/// A video decode handle and the texture it feeds.
pub struct VideoHandle {
    pub decoder: Box<dyn VideoDecoder>,
    pub texture: ResourceId,
}

/// Outcome of a cleanup pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanupReport {
    pub videos_released: usize,
    pub disposed: usize,
    pub failed: usize,
    /// Entries still waiting in the disposal queue
    pub remaining: usize,
}

/// Owns the resource pool, the per-media video handles and the disposal queue.
///
/// At most `max_concurrent_videos` handles are active (playing) at once.
/// Activating one more pauses the least recently activated handle; paused
/// handles keep their texture until their object is deleted.
pub struct ResourceLifecycleManager {
    config: LifecycleConfig,
    pool: ResourcePool,
    videos: HashMap<NodeId, VideoHandle>,
    active: VecDeque<NodeId>,
    disposal_queue: VecDeque<ResourceId>,
    last_cleanup: Option<Instant>,
}

impl ResourceLifecycleManager {
    pub fn new(config: LifecycleConfig) -> Self {
        Self {
            config,
            pool: ResourcePool::new(),
            videos: HashMap::new(),
            active: VecDeque::new(),
            disposal_queue: VecDeque::new(),
            last_cleanup: None,
        }
    }

    pub fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: LifecycleConfig) {
        self.config = config;
        while self.active.len() > self.config.max_concurrent_videos.max(1) {
            self.evict_oldest();
        }
    }

    pub fn pool(&self) -> &ResourcePool {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut ResourcePool {
        &mut self.pool
    }

    /// Registers the decode handle of a newly placed video.
    pub fn register_video(
        &mut self,
        media_id: NodeId,
        decoder: Box<dyn VideoDecoder>,
        texture: ResourceId,
        autoplay: bool,
    ) {
        if self.videos.contains_key(&media_id) {
            warn!(media = %media_id, "video already registered, replacing handle");
            self.cleanup_video(&media_id);
        }
        debug!(media = %media_id, texture = %texture, autoplay, "register video");
        self.videos
            .insert(media_id.clone(), VideoHandle { decoder, texture });
        if autoplay {
            self.activate(&media_id);
        } else if let Some(handle) = self.videos.get_mut(&media_id) {
            handle.decoder.pause();
        }
    }

    /// Starts playback, evicting the least recently activated handle at the cap.
    pub fn activate(&mut self, media_id: &NodeId) -> bool {
        if !self.videos.contains_key(media_id) {
            return false;
        }
        if let Some(pos) = self.active.iter().position(|a| a == media_id) {
            // Re-activation refreshes recency
            self.active.remove(pos);
        } else {
            while self.active.len() >= self.config.max_concurrent_videos.max(1) {
                self.evict_oldest();
            }
        }
        self.active.push_back(media_id.clone());
        if let Some(handle) = self.videos.get_mut(media_id) {
            handle.decoder.play();
        }
        true
    }

    fn evict_oldest(&mut self) {
        if let Some(oldest) = self.active.pop_front() {
            if let Some(handle) = self.videos.get_mut(&oldest) {
                handle.decoder.pause();
            }
            info!(media = %oldest, "paused video due to concurrency limit");
        }
    }

    /// Pauses a handle and removes it from the active set.
    pub fn deactivate(&mut self, media_id: &NodeId, rewind: bool) {
        self.active.retain(|a| a != media_id);
        if let Some(handle) = self.videos.get_mut(media_id) {
            handle.decoder.pause();
            if rewind {
                handle.decoder.rewind();
            }
        }
    }

    /// Pauses every handle without releasing anything.
    pub fn pause_all(&mut self) {
        self.active.clear();
        for handle in self.videos.values_mut() {
            handle.decoder.pause();
        }
    }

    /// Pauses and releases the decode handle, disposes its texture and drops
    /// both registrations. Returns false if nothing was tracked.
    pub fn cleanup_video(&mut self, media_id: &NodeId) -> bool {
        self.active.retain(|a| a != media_id);
        let Some(mut handle) = self.videos.remove(media_id) else {
            return false;
        };
        debug!(media = %media_id, "cleaning up video");
        handle.decoder.pause();
        handle.decoder.release();
        if let Err(e) = self.pool.dispose(handle.texture) {
            warn!(media = %media_id, error = %e, "failed to dispose video texture");
        }
        true
    }

    pub fn is_tracked(&self, media_id: &NodeId) -> bool {
        self.videos.contains_key(media_id)
    }

    pub fn is_active(&self, media_id: &NodeId) -> bool {
        self.active.contains(media_id)
    }

    pub fn is_playing(&self, media_id: &NodeId) -> bool {
        self.videos
            .get(media_id)
            .is_some_and(|h| h.decoder.is_playing())
    }

    pub fn tracked_count(&self) -> usize {
        self.videos.len()
    }

    /// Active handles, least recently activated first.
    pub fn active(&self) -> impl Iterator<Item = &NodeId> {
        self.active.iter()
    }

    pub fn video_texture(&self, media_id: &NodeId) -> Option<ResourceId> {
        self.videos.get(media_id).map(|h| h.texture)
    }

    /// Queues a resource for deferred disposal.
    pub fn enqueue(&mut self, resource: ResourceId) {
        if !self.disposal_queue.contains(&resource) {
            self.disposal_queue.push_back(resource);
        }
    }

    pub fn queued(&self) -> usize {
        self.disposal_queue.len()
    }

    fn dispose_batch(&mut self, limit: usize, report: &mut CleanupReport) {
        for _ in 0..limit {
            let Some(id) = self.disposal_queue.pop_front() else {
                break;
            };
            match self.pool.dispose(id) {
                Ok(()) => report.disposed += 1,
                Err(e) => {
                    warn!(resource = %id, error = %e, "disposal failed");
                    report.failed += 1;
                }
            }
        }
        report.remaining = self.disposal_queue.len();
    }

    /// Runs the periodic cleanup once the interval has elapsed.
    ///
    /// The first call only starts the timer.
    pub fn tick(&mut self, now: Instant) -> Option<CleanupReport> {
        let Some(last) = self.last_cleanup else {
            self.last_cleanup = Some(now);
            return None;
        };
        if now.saturating_duration_since(last) < self.config.cleanup_interval {
            return None;
        }
        self.last_cleanup = Some(now);

        let mut report = CleanupReport::default();
        self.dispose_batch(self.config.cleanup_batch_size, &mut report);
        debug!(?report, "periodic cleanup executed");
        Some(report)
    }

    /// Releases every video handle and drains the whole disposal queue.
    pub fn force_cleanup(&mut self) -> CleanupReport {
        info!("executing force cleanup");
        let mut report = CleanupReport::default();
        let ids: Vec<NodeId> = self.videos.keys().cloned().collect();
        for id in ids {
            if self.cleanup_video(&id) {
                report.videos_released += 1;
            }
        }
        let all = self.disposal_queue.len();
        self.dispose_batch(all, &mut report);
        info!(?report, "force cleanup completed");
        report
    }

    /// Advances playing decoders and uploads new frames into their textures.
    ///
    /// Returns how many textures were refreshed.
    pub fn refresh_videos(&mut self, dt: Duration) -> usize {
        let mut refreshed = 0;
        for (id, handle) in self.videos.iter_mut() {
            if !handle.decoder.is_playing() {
                continue;
            }
            handle.decoder.advance(dt);
            if !handle.decoder.has_new_frame() {
                continue;
            }
            let Some(frame) = handle.decoder.take_frame() else {
                continue;
            };
            match self.pool.get_mut(handle.texture).map(|texture| texture.upload(&frame)) {
                Some(true) => refreshed += 1,
                _ => debug!(media = %id, "video frame dropped"),
            }
        }
        refreshed
    }
}

impl Default for ResourceLifecycleManager {
    fn default() -> Self {
        Self::new(LifecycleConfig::default())
    }
}

//! Tunable editor limits and interaction constants

use std::time::Duration;

use serde::{Deserialize, Serialize};
use stage_renderer::{LifecycleConfig, MemoryWatchdog};

/// Editor settings, persisted as part of the application config
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EditorSettings {
    /// Video decode handles allowed to play at once
    pub max_concurrent_videos: usize,
    /// Seconds between deferred disposal passes
    pub cleanup_interval_secs: u64,
    /// Queued resources disposed per pass
    pub cleanup_batch_size: usize,
    pub target_fps: u32,
    pub memory_warning_threshold: f32,
    pub memory_critical_threshold: f32,
    pub fps_warning_threshold: f32,
    /// Radians of rotation per pixel of pointer motion
    pub rotate_sensitivity: f32,
    /// Scale factor change per pixel of pointer motion
    pub scale_sensitivity: f32,
    /// Smallest scale component a drag or panel edit may produce
    pub min_scale: f32,
    pub texture_budget_bytes: usize,
    /// Longest edge of uploaded textures; larger images are downscaled
    pub max_texture_size: u32,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            max_concurrent_videos: 5,
            cleanup_interval_secs: 60,
            cleanup_batch_size: 10,
            target_fps: 60,
            memory_warning_threshold: 0.8,
            memory_critical_threshold: 0.9,
            fps_warning_threshold: 30.0,
            rotate_sensitivity: 0.01,
            scale_sensitivity: 0.01,
            min_scale: 0.01,
            texture_budget_bytes: 512 * 1024 * 1024,
            max_texture_size: 2048,
        }
    }
}

impl EditorSettings {
    pub fn lifecycle(&self) -> LifecycleConfig {
        LifecycleConfig {
            max_concurrent_videos: self.max_concurrent_videos.max(1),
            cleanup_interval: Duration::from_secs(self.cleanup_interval_secs.max(1)),
            cleanup_batch_size: self.cleanup_batch_size.max(1),
        }
    }

    pub fn watchdog(&self) -> MemoryWatchdog {
        MemoryWatchdog {
            budget_bytes: self.texture_budget_bytes,
            warning_threshold: self.memory_warning_threshold,
            critical_threshold: self.memory_critical_threshold,
            fps_warning: self.fps_warning_threshold,
        }
    }
}

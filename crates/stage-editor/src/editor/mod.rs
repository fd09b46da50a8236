//! The editor facade the UI talks to

mod interaction;
mod panel;
mod placement;

#[cfg(test)]
mod tests;

pub use panel::AlignMode;

use std::time::{Duration, Instant};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use stage_core::{
    Axis, AxisLocks, GizmoMode, MediaKind, NodeId, SceneStore, TransformKind, TransformSpace,
};
use stage_renderer::{
    CleanupReport, DrawItem, MemoryStatus, MemoryWatchdog, ResourceLifecycleManager,
    ResourcePool, ResourceReport,
};
use tracing::{debug, info, warn};

use crate::backend::MediaBackend;
use crate::selection::SelectionManager;
use crate::settings::EditorSettings;
use crate::viewport::Viewport;

const RESOURCE_CHECK_INTERVAL: Duration = Duration::from_secs(1);

/// Video playback policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PreviewMode {
    /// Videos paused and rewound
    Off,
    /// Every video plays, subject to the concurrency cap
    #[default]
    Live,
    /// A video plays only while hovered
    Hover,
}

impl PreviewMode {
    pub const ALL: [PreviewMode; 3] = [PreviewMode::Off, PreviewMode::Live, PreviewMode::Hover];

    pub fn name(self) -> &'static str {
        match self {
            PreviewMode::Off => "Off",
            PreviewMode::Live => "Live",
            PreviewMode::Hover => "Hover",
        }
    }
}

/// A media item that could not be loaded and is shown as a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingMedia {
    pub id: NodeId,
    pub name: String,
    pub reason: String,
}

/// Interactive media stage: the persistent scene plus the currently mounted
/// viewport, selection, gizmos and GPU resource bookkeeping.
///
/// No operation here fails towards the caller. Problems are logged and the
/// editor degrades (placeholders, skipped frames, ignored edits).
pub struct StageEditor<B: MediaBackend> {
    settings: EditorSettings,
    store: SceneStore,
    selection: SelectionManager,
    resources: ResourceLifecycleManager,
    watchdog: MemoryWatchdog,
    backend: B,
    viewport: Option<Viewport>,
    generation: u64,
    mode: GizmoMode,
    space: TransformSpace,
    locks: AxisLocks,
    preview: PreviewMode,
    hovered_media: Option<NodeId>,
    missing: Vec<MissingMedia>,
    last_report: Option<ResourceReport>,
    last_check: Option<Instant>,
}

impl<B: MediaBackend> StageEditor<B> {
    pub fn new(backend: B, settings: EditorSettings) -> Self {
        Self {
            resources: ResourceLifecycleManager::new(settings.lifecycle()),
            watchdog: settings.watchdog(),
            settings,
            store: SceneStore::with_default_lights(),
            selection: SelectionManager::new(),
            backend,
            viewport: None,
            generation: 0,
            mode: GizmoMode::default(),
            space: TransformSpace::default(),
            locks: AxisLocks::default(),
            preview: PreviewMode::default(),
            hovered_media: None,
            missing: Vec::new(),
            last_report: None,
            last_check: None,
        }
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: EditorSettings) {
        self.resources.set_config(settings.lifecycle());
        self.watchdog = settings.watchdog();
        if let Some(viewport) = &mut self.viewport {
            viewport.render_loop.set_target_fps(settings.target_fps);
        }
        self.settings = settings;
    }

    pub fn store(&self) -> &SceneStore {
        &self.store
    }

    pub fn selection(&self) -> &SelectionManager {
        &self.selection
    }

    pub fn resources(&self) -> &ResourceLifecycleManager {
        &self.resources
    }

    /// Resource pool access for drawing (texture uploads, lookups).
    pub fn resources_mut(&mut self) -> &mut ResourceLifecycleManager {
        &mut self.resources
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Backend together with the pool its resources live in.
    pub fn backend_with_pool(&mut self) -> (&mut B, &ResourcePool) {
        (&mut self.backend, self.resources.pool())
    }

    pub fn viewport(&self) -> Option<&Viewport> {
        self.viewport.as_ref()
    }

    pub fn viewport_mut(&mut self) -> Option<&mut Viewport> {
        self.viewport.as_mut()
    }

    // ---- mount lifecycle ----

    /// Mounts a render surface, re-attaching every stored object. Mounting
    /// while mounted replaces the previous surface.
    pub fn mount(&mut self, width: f32, height: f32) {
        if self.viewport.is_some() {
            self.unmount();
        }
        self.generation += 1;
        let mut viewport = Viewport::mount(
            &self.store,
            self.generation,
            self.mode,
            self.settings.target_fps,
            Vec2::new(width, height),
        );
        viewport.gizmos.sync(&self.store, &self.selection);
        self.viewport = Some(viewport);
        if self.preview == PreviewMode::Live {
            self.play_all_videos();
        }
    }

    /// Detaches everything from the surface and stops the frame driver.
    /// Objects and their resources stay in the store.
    pub fn unmount(&mut self) {
        let Some(mut viewport) = self.viewport.take() else {
            return;
        };
        viewport.unmount();
        self.selection.clear();
        self.resources.pause_all();
        self.hovered_media = None;
    }

    pub fn is_mounted(&self) -> bool {
        self.viewport.is_some()
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        if let Some(viewport) = &mut self.viewport {
            viewport.resize(width, height);
        }
    }

    // ---- frame driver ----

    /// Advances timers. Returns true when a frame should be drawn.
    ///
    /// Runs the periodic disposal pass and the resource watchdog, and feeds
    /// new video frames to their textures in live preview.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(viewport) = &mut self.viewport else {
            return false;
        };
        let Some(dt) = viewport.render_loop.frame_due(now) else {
            return false;
        };

        if let Some(report) = self.resources.tick(now) {
            // Cached draw state is dropped with every pass and rebuilt on demand
            viewport.render_list.release();
            if report.disposed > 0 || report.failed > 0 {
                debug!(
                    disposed = report.disposed,
                    failed = report.failed,
                    remaining = report.remaining,
                    "periodic cleanup"
                );
            }
        }
        if self.preview != PreviewMode::Off {
            self.resources.refresh_videos(dt);
        }

        let check_due = self
            .last_check
            .is_none_or(|last| now.saturating_duration_since(last) >= RESOURCE_CHECK_INTERVAL);
        if check_due {
            self.last_check = Some(now);
            self.check_resources();
        }
        true
    }

    /// Time until the next frame, for repaint scheduling.
    pub fn until_next_frame(&self, now: Instant) -> Option<Duration> {
        self.viewport
            .as_ref()
            .map(|v| v.render_loop.until_next(now))
    }

    /// Draw items of the mounted root, rebuilt when the scene changed.
    pub fn draw_items(&mut self) -> &[DrawItem] {
        match &mut self.viewport {
            Some(viewport) => viewport.render_list.items(&self.store, &viewport.root),
            None => &[],
        }
    }

    /// Samples memory use and frame rate. Critical memory use triggers a
    /// forced cleanup.
    pub fn check_resources(&mut self) -> ResourceReport {
        let fps = self
            .viewport
            .as_ref()
            .map_or(0.0, |v| v.render_loop.fps());
        let report = self.watchdog.report(self.resources.pool().stats(), fps);
        if report.low_fps {
            debug!(fps, "frame rate below warning threshold");
        }
        if report.memory == MemoryStatus::Critical {
            warn!(
                ratio = report.usage_ratio(),
                "memory above critical threshold, forcing cleanup"
            );
            self.force_cleanup();
        }
        self.last_report = Some(report);
        report
    }

    pub fn last_report(&self) -> Option<&ResourceReport> {
        self.last_report.as_ref()
    }

    /// Releases every video handle, drains the disposal queue and drops
    /// cached draw state.
    pub fn force_cleanup(&mut self) -> CleanupReport {
        let report = self.resources.force_cleanup();
        if let Some(viewport) = &mut self.viewport {
            viewport.render_list.release();
        }
        info!(
            videos = report.videos_released,
            disposed = report.disposed,
            failed = report.failed,
            "forced cleanup"
        );
        report
    }

    // ---- modes, space, locks ----

    pub fn mode(&self) -> GizmoMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: GizmoMode) {
        self.mode = mode;
        if let Some(viewport) = &mut self.viewport {
            viewport.gizmos.set_mode(mode, &self.store, &self.selection);
        }
    }

    pub fn space(&self) -> TransformSpace {
        self.space
    }

    pub fn set_space(&mut self, space: TransformSpace) {
        self.space = space;
    }

    pub fn toggle_space(&mut self) {
        self.space = self.space.toggled();
        debug!(space = self.space.name(), "transform space");
    }

    pub fn locks(&self) -> &AxisLocks {
        &self.locks
    }

    pub fn set_lock(&mut self, kind: TransformKind, axis: Axis, locked: bool) {
        self.locks.set(kind, axis, locked);
    }

    pub fn toggle_lock(&mut self, kind: TransformKind, axis: Axis) {
        self.locks.toggle(kind, axis);
    }

    // ---- video preview ----

    pub fn preview_mode(&self) -> PreviewMode {
        self.preview
    }

    pub fn set_preview_mode(&mut self, mode: PreviewMode) {
        if mode == self.preview {
            return;
        }
        debug!(mode = mode.name(), "preview mode");
        self.preview = mode;
        self.hovered_media = None;
        match mode {
            PreviewMode::Live => self.play_all_videos(),
            PreviewMode::Off | PreviewMode::Hover => {
                for id in self.video_ids() {
                    self.resources.deactivate(&id, true);
                }
            }
        }
    }

    /// Pointer entered or left a media entry. Only acts in hover preview.
    pub fn hover_media(&mut self, id: &NodeId, hovering: bool) {
        if self.preview != PreviewMode::Hover {
            return;
        }
        if hovering {
            if self.hovered_media.as_ref() == Some(id) {
                return;
            }
            if let Some(previous) = self.hovered_media.take() {
                self.resources.deactivate(&previous, true);
            }
            if self.resources.activate(id) {
                self.hovered_media = Some(id.clone());
            }
        } else if self.hovered_media.as_ref() == Some(id) {
            self.resources.deactivate(id, true);
            self.hovered_media = None;
        }
    }

    fn play_all_videos(&mut self) {
        for id in self.video_ids() {
            self.resources.activate(&id);
        }
    }

    fn video_ids(&self) -> Vec<NodeId> {
        self.store
            .iter()
            .filter(|n| n.as_media().is_some_and(|m| m.kind == MediaKind::Video))
            .map(|n| n.id.clone())
            .filter(|id| self.resources.is_tracked(id))
            .collect()
    }

    // ---- notifications ----

    /// Drains "media missing" notifications raised by failed loads.
    pub fn take_missing_media(&mut self) -> Vec<MissingMedia> {
        std::mem::take(&mut self.missing)
    }

    // ---- shared post-mutation steps ----

    /// Outlines and gizmo follow transform changes.
    fn after_transform_change(&mut self) {
        self.selection.refresh_outlines(&self.store);
        if let Some(viewport) = &mut self.viewport {
            viewport.gizmos.reposition(&self.store, &self.selection);
        }
    }

    /// Gizmo follows selection changes.
    fn after_selection_change(&mut self) {
        if let Some(viewport) = &mut self.viewport {
            viewport.gizmos.sync(&self.store, &self.selection);
        }
    }

    /// Root follows structural changes (grouping, removal).
    fn after_structure_change(&mut self) {
        self.selection.remove_stale(&self.store);
        if let Some(viewport) = &mut self.viewport {
            viewport.root.sync(&self.store);
        }
        self.after_selection_change();
        self.after_transform_change();
    }
}

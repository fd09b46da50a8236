//! Application state shared by panels

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use stage_core::{ImportRequest, NodeId};
use stage_editor::{AlignMode, EditorSettings, StageEditor};

use crate::media::{EguiBackend, descriptor_from_path};

/// How long a notification stays on screen
const TOAST_DURATION: Duration = Duration::from_secs(5);

/// Actions queued by panels and shortcuts, applied once per frame
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    /// Import dropped or picked files on a grid
    ImportFiles(Vec<PathBuf>),
    /// Import a batch described by a JSON request
    ImportRequest(ImportRequest),
    DeleteSelected,
    SelectAll,
    GroupSelected,
    UngroupSelected,
    Align(AlignMode),
    FrameSelection,
    FrameAll,
    ForceCleanup,
    ApplySettings(EditorSettings),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub text: String,
    pub until: Instant,
}

pub struct AppState {
    pub editor: StageEditor<EguiBackend>,
    pub toasts: Vec<Toast>,
    /// Object list entry under the pointer, for hover preview
    pub list_hover: Option<NodeId>,
    pending: Vec<AppAction>,
}

pub type SharedAppState = Arc<Mutex<AppState>>;

impl AppState {
    pub fn new(editor: StageEditor<EguiBackend>) -> Self {
        Self {
            editor,
            toasts: Vec::new(),
            list_hover: None,
            pending: Vec::new(),
        }
    }

    pub fn queue_action(&mut self, action: AppAction) {
        self.pending.push(action);
    }

    pub fn take_actions(&mut self) -> Vec<AppAction> {
        std::mem::take(&mut self.pending)
    }

    pub fn notify(&mut self, text: impl Into<String>, now: Instant) {
        self.toasts.push(Toast {
            text: text.into(),
            until: now + TOAST_DURATION,
        });
    }

    /// Drops expired notifications.
    pub fn expire_toasts(&mut self, now: Instant) {
        self.toasts.retain(|t| t.until > now);
    }

    /// Applies queued actions. Returns the settings to persist, if changed.
    pub fn process_actions(&mut self, now: Instant) -> Option<EditorSettings> {
        let mut saved = None;
        for action in self.take_actions() {
            tracing::debug!(?action, "applying action");
            match action {
                AppAction::ImportFiles(paths) => self.import_files(paths, now),
                AppAction::ImportRequest(request) => {
                    let placed = self.editor.import_batch(request);
                    self.notify(format!("Imported {} items", placed.len()), now);
                }
                AppAction::DeleteSelected => {
                    self.editor.delete_selected();
                }
                AppAction::SelectAll => self.editor.select_all(),
                AppAction::GroupSelected => {
                    if self.editor.group_selected().is_none() {
                        self.notify("Select at least two objects to group", now);
                    }
                }
                AppAction::UngroupSelected => {
                    self.editor.ungroup_selected();
                }
                AppAction::Align(mode) => self.editor.align_selected(mode),
                AppAction::FrameSelection => self.editor.frame_selection(),
                AppAction::FrameAll => self.editor.frame_all(),
                AppAction::ForceCleanup => {
                    let report = self.editor.force_cleanup();
                    self.notify(
                        format!(
                            "Released {} videos, disposed {} resources",
                            report.videos_released, report.disposed
                        ),
                        now,
                    );
                }
                AppAction::ApplySettings(settings) => {
                    self.editor
                        .backend_mut()
                        .set_max_texture_size(settings.max_texture_size);
                    self.editor.set_settings(settings.clone());
                    saved = Some(settings);
                }
            }
        }
        let missing = self.editor.take_missing_media();
        for item in missing {
            self.notify(format!("Media missing: {} ({})", item.name, item.reason), now);
        }
        saved
    }

    fn import_files(&mut self, paths: Vec<PathBuf>, now: Instant) {
        let mut items = Vec::new();
        for path in paths {
            let is_request = path
                .extension()
                .is_some_and(|e| e.eq_ignore_ascii_case("json"));
            if !is_request {
                items.push(descriptor_from_path(&path));
                continue;
            }
            match read_import_request(&path) {
                Ok(request) => {
                    self.editor.import_batch(request);
                }
                Err(e) => self.notify(format!("Invalid import file: {e}"), now),
            }
        }
        match items.len() {
            0 => {}
            1 => {
                if let Some(media) = items.pop() {
                    self.editor.place_media(media, None);
                }
            }
            _ => {
                self.editor.import_batch(ImportRequest::new(items));
            }
        }
    }
}

/// Reads a batch import request from a JSON file.
pub fn read_import_request(path: &std::path::Path) -> Result<ImportRequest, String> {
    let content = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    serde_json::from_str(&content).map_err(|e| e.to_string())
}

pub fn create_shared_state(editor: StageEditor<EguiBackend>) -> SharedAppState {
    Arc::new(Mutex::new(AppState::new(editor)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        let backend = EguiBackend::new(egui::Context::default(), 2048);
        let mut editor = StageEditor::new(backend, EditorSettings::default());
        editor.mount(800.0, 600.0);
        AppState::new(editor)
    }

    #[test]
    fn test_missing_files_become_placeholders_and_toasts() {
        let mut state = state();
        let now = Instant::now();
        state.queue_action(AppAction::ImportFiles(vec![
            PathBuf::from("/nonexistent/a.png"),
            PathBuf::from("/nonexistent/b.png"),
        ]));
        state.process_actions(now);
        assert_eq!(state.editor.object_list().len(), 2);
        assert_eq!(state.toasts.len(), 2);

        state.expire_toasts(now + TOAST_DURATION);
        assert!(state.toasts.is_empty());
    }

    #[test]
    fn test_import_request_from_json() {
        let path = std::env::temp_dir().join(format!("media-stage-import-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"{"items":[{"id":"a","name":"a.mp3","url":"a.mp3","type":"audio/mpeg"},
                {"id":"b","name":"b.mp3","url":"b.mp3","type":"audio/mpeg"}],
               "orientation":"vertical","faceDirection":"left","spacing":2.0,"columns":2}"#,
        )
        .unwrap();
        let request = read_import_request(&path).unwrap();
        assert_eq!(request.columns, 2);

        let mut state = state();
        state.queue_action(AppAction::ImportFiles(vec![path.clone()]));
        state.process_actions(Instant::now());
        assert_eq!(state.editor.object_list().len(), 2);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_apply_settings_returns_them_for_saving() {
        let mut state = state();
        let settings = EditorSettings {
            max_concurrent_videos: 2,
            ..EditorSettings::default()
        };
        state.queue_action(AppAction::ApplySettings(settings.clone()));
        assert_eq!(state.process_actions(Instant::now()), Some(settings));
        assert_eq!(state.editor.settings().max_concurrent_videos, 2);
    }

    #[test]
    fn test_group_needs_two_objects() {
        let mut state = state();
        state.queue_action(AppAction::GroupSelected);
        state.process_actions(Instant::now());
        assert_eq!(state.toasts.len(), 1);
    }
}

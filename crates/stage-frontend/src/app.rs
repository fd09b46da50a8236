//! Main application

use std::time::Instant;

use stage_editor::StageEditor;

use crate::config::{SharedConfig, UiConfig, create_shared_config};
use crate::media::EguiBackend;
use crate::panels::{
    SettingsWindow, ToolbarRequest, render_object_list, render_resource_monitor, render_toolbar,
    render_transform_panel, render_viewport,
};
use crate::state::{AppAction, SharedAppState, create_shared_state};

fn apply_ui_config(ctx: &egui::Context, ui: &UiConfig) {
    ctx.set_visuals(ui.theme.visuals());
    ctx.set_zoom_factor(ui.font_size.clamp(0.5, 2.0));
}

/// Media stage application
pub struct StageApp {
    app_state: SharedAppState,
    config: SharedConfig,
    settings_window: SettingsWindow,
    applied_ui: UiConfig,
}

impl StageApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = create_shared_config();
        let (settings, ui_config) = {
            let config = config.read();
            (config.config().editor.clone(), config.config().ui.clone())
        };

        let backend = EguiBackend::new(cc.egui_ctx.clone(), settings.max_texture_size);
        let mut editor = StageEditor::new(backend, settings);
        editor.set_preview_mode(ui_config.preview_mode);
        apply_ui_config(&cc.egui_ctx, &ui_config);

        tracing::info!("media stage ready");
        Self {
            app_state: create_shared_state(editor),
            config,
            settings_window: SettingsWindow::default(),
            applied_ui: ui_config,
        }
    }

    fn handle_dropped_files(&self, ctx: &egui::Context) {
        let paths: Vec<_> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .collect()
        });
        if !paths.is_empty() {
            tracing::info!(count = paths.len(), "files dropped");
            self.app_state
                .lock()
                .queue_action(AppAction::ImportFiles(paths));
        }
    }

    fn handle_shortcuts(&self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        let actions = ctx.input(|i| {
            let mut actions = Vec::new();
            let command = i.modifiers.command;
            if command && i.key_pressed(egui::Key::A) {
                actions.push(AppAction::SelectAll);
            } else if i.key_pressed(egui::Key::A) {
                actions.push(AppAction::FrameAll);
            }
            if command && i.key_pressed(egui::Key::G) {
                actions.push(if i.modifiers.shift {
                    AppAction::UngroupSelected
                } else {
                    AppAction::GroupSelected
                });
            }
            if i.key_pressed(egui::Key::F) {
                actions.push(AppAction::FrameSelection);
            }
            if i.key_pressed(egui::Key::Delete) || i.key_pressed(egui::Key::Backspace) {
                actions.push(AppAction::DeleteSelected);
            }
            actions
        });

        let (mode, toggle_space, escape) = ctx.input(|i| {
            let mode = if i.modifiers.command {
                None
            } else if i.key_pressed(egui::Key::W) {
                Some(stage_core::GizmoMode::Translate)
            } else if i.key_pressed(egui::Key::E) {
                Some(stage_core::GizmoMode::Rotate)
            } else if i.key_pressed(egui::Key::R) {
                Some(stage_core::GizmoMode::Scale)
            } else {
                None
            };
            (mode, i.key_pressed(egui::Key::X), i.key_pressed(egui::Key::Escape))
        });

        let mut state = self.app_state.lock();
        if let Some(mode) = mode {
            state.editor.set_mode(mode);
        }
        if toggle_space {
            state.editor.toggle_space();
        }
        if escape {
            state.editor.clear_selection();
        }
        for action in actions {
            state.queue_action(action);
        }
    }

    fn show_toasts(&self, ctx: &egui::Context, now: Instant) {
        let mut state = self.app_state.lock();
        state.expire_toasts(now);
        if state.toasts.is_empty() {
            return;
        }
        egui::Area::new(egui::Id::new("toasts"))
            .anchor(egui::Align2::RIGHT_BOTTOM, [-12.0, -12.0])
            .show(ctx, |ui| {
                for toast in &state.toasts {
                    egui::Frame::popup(ui.style()).show(ui, |ui| {
                        ui.label(&toast.text);
                    });
                }
            });
        // Keep repainting so toasts expire on time
        ctx.request_repaint_after(std::time::Duration::from_millis(250));
    }
}

impl eframe::App for StageApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        self.handle_dropped_files(ctx);
        self.handle_shortcuts(ctx);

        let ui_config = self.config.read().config().ui.clone();
        if ui_config != self.applied_ui {
            apply_ui_config(ctx, &ui_config);
            self.applied_ui = ui_config.clone();
        }

        if let Some(ToolbarRequest::OpenSettings) = render_toolbar(ctx, &self.app_state) {
            self.settings_window.open(&self.config);
        }

        egui::SidePanel::left("objects")
            .default_width(220.0)
            .show(ctx, |ui| render_object_list(ui, &self.app_state));

        egui::SidePanel::right("inspector")
            .default_width(260.0)
            .show(ctx, |ui| {
                render_transform_panel(ui, &self.app_state);
                if ui_config.show_resource_monitor {
                    ui.add_space(12.0);
                    render_resource_monitor(ui, &self.app_state);
                }
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| render_viewport(ui, &self.app_state, ui_config.show_grid));

        self.settings_window
            .show(ctx, &self.app_state, &self.config);

        {
            let mut state = self.app_state.lock();
            if let Some(settings) = state.process_actions(now) {
                let mut config = self.config.write();
                config.config_mut().editor = settings;
                if let Err(e) = config.save() {
                    tracing::warn!(error = %e, "failed to save config");
                }
            }

            state.editor.tick(now);
            let (backend, pool) = state.editor.backend_with_pool();
            let pruned = backend.prune(pool);
            if pruned > 0 {
                tracing::debug!(pruned, "dropped stale resource lookups");
            }
            if let Some(wait) = state.editor.until_next_frame(now) {
                ctx.request_repaint_after(wait);
            }
        }

        self.show_toasts(ctx, now);
    }
}

//! Settings window editing a draft of the editor settings

use stage_editor::EditorSettings;

use crate::config::{SharedConfig, UiConfig};
use crate::state::{AppAction, SharedAppState};

const MIB: usize = 1024 * 1024;

/// Settings window. Edits a draft that is applied and saved on request.
#[derive(Default)]
pub struct SettingsWindow {
    open: bool,
    draft: Option<(EditorSettings, UiConfig)>,
}

impl SettingsWindow {
    pub fn open(&mut self, config: &SharedConfig) {
        let config = config.read();
        self.draft = Some((config.config().editor.clone(), config.config().ui.clone()));
        self.open = true;
    }

    pub fn show(&mut self, ctx: &egui::Context, app_state: &SharedAppState, config: &SharedConfig) {
        if !self.open {
            return;
        }
        let Some((editor, ui_config)) = &mut self.draft else {
            self.open = false;
            return;
        };

        let mut apply = false;
        let mut reset = false;
        let mut open = self.open;
        egui::Window::new("Settings")
            .open(&mut open)
            .resizable(false)
            .show(ctx, |ui| {
                ui.heading("Playback");
                egui::Grid::new("settings_playback").num_columns(2).show(ui, |ui| {
                    ui.label("Concurrent videos");
                    ui.add(egui::DragValue::new(&mut editor.max_concurrent_videos).range(1..=32));
                    ui.end_row();
                    ui.label("Target FPS");
                    ui.add(egui::DragValue::new(&mut editor.target_fps).range(10..=240));
                    ui.end_row();
                });

                ui.heading("Memory");
                egui::Grid::new("settings_memory").num_columns(2).show(ui, |ui| {
                    ui.label("Texture budget (MiB)");
                    let mut budget = editor.texture_budget_bytes / MIB;
                    if ui
                        .add(egui::DragValue::new(&mut budget).range(16..=8192))
                        .changed()
                    {
                        editor.texture_budget_bytes = budget * MIB;
                    }
                    ui.end_row();
                    ui.label("Max texture size");
                    ui.add(egui::DragValue::new(&mut editor.max_texture_size).range(64..=8192));
                    ui.end_row();
                    ui.label("Cleanup interval (s)");
                    ui.add(egui::DragValue::new(&mut editor.cleanup_interval_secs).range(1..=3600));
                    ui.end_row();
                    ui.label("Cleanup batch size");
                    ui.add(egui::DragValue::new(&mut editor.cleanup_batch_size).range(1..=1000));
                    ui.end_row();
                });

                ui.heading("Interaction");
                egui::Grid::new("settings_interaction").num_columns(2).show(ui, |ui| {
                    ui.label("Rotate sensitivity");
                    ui.add(egui::DragValue::new(&mut editor.rotate_sensitivity).speed(0.001).range(0.001..=0.1));
                    ui.end_row();
                    ui.label("Scale sensitivity");
                    ui.add(egui::DragValue::new(&mut editor.scale_sensitivity).speed(0.001).range(0.001..=0.1));
                    ui.end_row();
                    ui.label("Minimum scale");
                    ui.add(egui::DragValue::new(&mut editor.min_scale).speed(0.001).range(0.001..=1.0));
                    ui.end_row();
                });

                ui.heading("Interface");
                ui.horizontal(|ui| {
                    ui.selectable_value(&mut ui_config.theme, crate::config::UiTheme::Dark, "Dark");
                    ui.selectable_value(&mut ui_config.theme, crate::config::UiTheme::Light, "Light");
                });
                ui.add(egui::Slider::new(&mut ui_config.font_size, 0.75..=1.5).text("Font size"));
                ui.checkbox(&mut ui_config.show_grid, "Show grid");
                ui.checkbox(&mut ui_config.show_resource_monitor, "Show resource monitor");

                ui.separator();
                ui.horizontal(|ui| {
                    apply = ui.button("Apply").clicked();
                    reset = ui.button("Reset to defaults").clicked();
                });
                ui.weak(format!("{}", config.read().config_file_path().display()));
            });

        if reset {
            *editor = EditorSettings::default();
            *ui_config = UiConfig::default();
        }
        if apply {
            app_state
                .lock()
                .queue_action(AppAction::ApplySettings(editor.clone()));
            let mut manager = config.write();
            manager.config_mut().ui = ui_config.clone();
            if let Err(e) = manager.save() {
                tracing::warn!(error = %e, "failed to save config");
            }
        }
        self.open = open;
        if !open {
            self.draft = None;
        }
    }
}

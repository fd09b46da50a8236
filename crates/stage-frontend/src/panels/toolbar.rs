//! Top toolbar: gizmo mode, transform space, preview mode and scene commands

use stage_core::{GizmoMode, TransformSpace};
use stage_editor::{AlignMode, PreviewMode};

use crate::state::{AppAction, SharedAppState};

/// Toolbar buttons that open windows owned by the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarRequest {
    OpenSettings,
}

pub fn render_toolbar(ctx: &egui::Context, app_state: &SharedAppState) -> Option<ToolbarRequest> {
    let mut request = None;

    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let mut state = app_state.lock();

            let mut mode = state.editor.mode();
            for m in GizmoMode::ALL {
                let shortcut = match m {
                    GizmoMode::Translate => "W",
                    GizmoMode::Rotate => "E",
                    GizmoMode::Scale => "R",
                };
                ui.selectable_value(&mut mode, m, m.name())
                    .on_hover_text(shortcut);
            }
            if mode != state.editor.mode() {
                state.editor.set_mode(mode);
            }

            ui.separator();

            let space = state.editor.space();
            let label = match space {
                TransformSpace::Global => "🌐 Global",
                TransformSpace::Local => "📦 Local",
            };
            if ui.button(label).on_hover_text("Toggle transform space (X)").clicked() {
                state.editor.toggle_space();
            }

            ui.separator();

            let mut preview = state.editor.preview_mode();
            egui::ComboBox::from_id_salt("preview_mode")
                .selected_text(format!("Preview: {}", preview.name()))
                .show_ui(ui, |ui| {
                    for p in PreviewMode::ALL {
                        ui.selectable_value(&mut preview, p, p.name());
                    }
                });
            if preview != state.editor.preview_mode() {
                state.editor.set_preview_mode(preview);
            }

            ui.separator();

            let multi = state.editor.selection().len() > 1;
            ui.add_enabled_ui(multi, |ui| {
                ui.menu_button("Align", |ui| {
                    for mode in AlignMode::ALL {
                        if ui.button(mode.name()).clicked() {
                            state.queue_action(AppAction::Align(mode));
                            ui.close_menu();
                        }
                    }
                });
            });
            if ui.button("Group").on_hover_text("Ctrl+G").clicked() {
                state.queue_action(AppAction::GroupSelected);
            }
            if ui.button("Ungroup").clicked() {
                state.queue_action(AppAction::UngroupSelected);
            }
            if ui.button("Frame").on_hover_text("F / A").clicked() {
                let action = if state.editor.selection().is_empty() {
                    AppAction::FrameAll
                } else {
                    AppAction::FrameSelection
                };
                state.queue_action(action);
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("⚙ Settings").clicked() {
                    request = Some(ToolbarRequest::OpenSettings);
                }
                if ui.button("Force cleanup").clicked() {
                    state.queue_action(AppAction::ForceCleanup);
                }
            });
        });
    });

    request
}

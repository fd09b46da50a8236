//! Numeric transform panel with per-axis locks

use stage_core::{Axis, TransformKind};

use crate::state::SharedAppState;

pub fn render_transform_panel(ui: &mut egui::Ui, app_state: &SharedAppState) {
    let mut state = app_state.lock();
    let editor = &mut state.editor;

    ui.heading("Transform");
    ui.separator();

    if editor.selection().is_empty() {
        ui.weak("No object selected");
        return;
    }

    let multi = editor.selection().len() > 1;
    if multi {
        ui.label(format!("{} objects (center)", editor.selection().len()));
    }
    let snapshot = editor.transform_snapshot();

    for kind in TransformKind::ALL {
        let label = match kind {
            TransformKind::Rotation => format!("{} (°)", kind.name()),
            _ => kind.name().to_string(),
        };
        ui.label(label);
        egui::Grid::new(kind.name())
            .num_columns(3)
            .spacing([6.0, 4.0])
            .show(ui, |ui| {
                for axis in Axis::ALL {
                    ui.label(axis.name());
                    let locked = editor.locks().is_locked(kind, axis);
                    let editable = !locked && (!multi || kind == TransformKind::Position);
                    let mut value = snapshot.values(kind).get(axis);
                    let speed = match kind {
                        TransformKind::Rotation => 1.0,
                        _ => 0.01,
                    };
                    let response = ui.add_enabled(
                        editable,
                        egui::DragValue::new(&mut value).speed(speed).max_decimals(2),
                    );
                    if response.changed() {
                        editor.edit_transform(kind, axis, value);
                    }

                    let mut lock = locked;
                    if ui
                        .toggle_value(&mut lock, if locked { "🔒" } else { "🔓" })
                        .on_hover_text(format!("Lock {} {}", kind.name(), axis.name()))
                        .changed()
                    {
                        editor.set_lock(kind, axis, lock);
                    }
                    ui.end_row();
                }
            });
        ui.add_space(4.0);
    }

    ui.separator();
    ui.collapsing("Selection", |ui| {
        for object in editor.selection_list() {
            ui.label(format!("{} ({})", object.name, object.media_type));
        }
    });
}

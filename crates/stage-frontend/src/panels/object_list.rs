//! Object list with hover preview

use stage_core::{MediaKind, NodeId};

use crate::state::SharedAppState;

fn icon(media_type: &str) -> &'static str {
    match MediaKind::classify(media_type, None) {
        MediaKind::Image => "🖼",
        MediaKind::Video => "🎞",
        MediaKind::Audio => "🎵",
        MediaKind::Model => "🧊",
        MediaKind::Other => "📄",
    }
}

pub fn render_object_list(ui: &mut egui::Ui, app_state: &SharedAppState) {
    let mut state = app_state.lock();
    let objects = state.editor.object_list();

    ui.heading("Objects");
    ui.separator();

    if objects.is_empty() {
        ui.weak("Drop images, GIFs or models\nonto the window to add them.");
        return;
    }

    let additive = ui.input(|i| i.modifiers.shift || i.modifiers.command);
    let mut hovered: Option<NodeId> = None;
    let mut clicked: Option<NodeId> = None;

    egui::ScrollArea::vertical().show(ui, |ui| {
        for object in &objects {
            let id = NodeId::new(object.id.clone());
            let selected = state.editor.selection().contains(&id);
            let in_group = state.editor.store().group_of(&id).is_some();
            let text = format!(
                "{}{} {}",
                if in_group { "  " } else { "" },
                icon(&object.media_type),
                object.name
            );
            let response = ui.selectable_label(selected, text);
            if response.hovered() {
                hovered = Some(id.clone());
            }
            if response.clicked() {
                clicked = Some(id);
            }
        }
    });

    if let Some(id) = clicked {
        if additive {
            state.editor.toggle_selection(&id);
        } else {
            state.editor.select(&id, false);
        }
    }

    if hovered != state.list_hover {
        if let Some(previous) = state.list_hover.take() {
            state.editor.hover_media(&previous, false);
        }
        if let Some(id) = &hovered {
            state.editor.hover_media(id, true);
        }
        state.list_hover = hovered;
    }

    ui.separator();
    ui.label(format!(
        "{} objects, {} selected",
        objects.len(),
        state.editor.selection().len()
    ));
}

//! Resource monitor: frame rate and estimated GPU memory

use stage_renderer::MemoryStatus;

use crate::state::SharedAppState;

const MIB: f32 = 1024.0 * 1024.0;

pub fn render_resource_monitor(ui: &mut egui::Ui, app_state: &SharedAppState) {
    let state = app_state.lock();
    ui.heading("Resources");
    ui.separator();

    let Some(report) = state.editor.last_report() else {
        ui.weak("Waiting for first sample");
        return;
    };

    let fps_color = if report.low_fps {
        egui::Color32::from_rgb(230, 160, 40)
    } else {
        ui.visuals().text_color()
    };
    ui.colored_label(fps_color, format!("FPS: {:.0}", report.fps));

    let ratio = report.usage_ratio();
    let (memory_color, status) = match report.memory {
        MemoryStatus::Ok => (egui::Color32::from_rgb(80, 180, 90), "ok"),
        MemoryStatus::Warning => (egui::Color32::from_rgb(230, 160, 40), "high"),
        MemoryStatus::Critical => (egui::Color32::from_rgb(220, 60, 60), "critical"),
    };
    ui.add(
        egui::ProgressBar::new(ratio.clamp(0.0, 1.0))
            .fill(memory_color)
            .text(format!(
                "{:.1} / {:.0} MiB ({status})",
                report.stats.bytes as f32 / MIB,
                report.budget_bytes as f32 / MIB
            )),
    );

    egui::Grid::new("resource_counts").num_columns(2).show(ui, |ui| {
        ui.label("Textures");
        ui.label(report.stats.textures.to_string());
        ui.end_row();
        ui.label("Geometries");
        ui.label(report.stats.geometries.to_string());
        ui.end_row();
        ui.label("Materials");
        ui.label(report.stats.materials.to_string());
        ui.end_row();
        ui.label("Videos playing");
        ui.label(format!(
            "{} / {}",
            state.editor.resources().active().count(),
            state.editor.settings().max_concurrent_videos
        ));
        ui.end_row();
        ui.label("Queued disposals");
        ui.label(state.editor.resources().queued().to_string());
        ui.end_row();
    });
}

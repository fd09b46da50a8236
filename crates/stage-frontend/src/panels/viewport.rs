//! 3D viewport: pointer input and software projection of the scene
//!
//! Meshes are projected with the editor camera and painted back to front
//! as egui meshes. There is no depth buffer; items are sorted by the
//! distance of their bounds center, model triangles by their centroid.

use egui::epaint::Vertex;
use egui::{Color32, Pos2, Rect, Sense, Shape, Stroke};
use glam::{Vec2, Vec3};
use stage_renderer::{DrawItem, OrbitCamera, Rgba};

use crate::media::EguiBackend;
use crate::state::SharedAppState;

const BACKGROUND: Color32 = Color32::from_rgb(0x1a, 0x1a, 0x1a);
const GRID_COLOR: Color32 = Color32::from_gray(0x3a);
const GRID_HALF_EXTENT: i32 = 10;
const ZOOM_PER_SCROLL: f32 = 0.001;
/// Direction towards the key light, matching the default directional light
const LIGHT_DIR: Vec3 = Vec3::new(0.666_667, 0.666_667, 0.333_333);

fn color32(color: Rgba) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), color.a())
}

/// Projects world points into the viewport rect.
struct Projector {
    camera: OrbitCamera,
    rect: Rect,
}

impl Projector {
    fn project(&self, point: Vec3) -> Option<Pos2> {
        let screen = self
            .camera
            .world_to_screen(point, self.rect.width(), self.rect.height())?;
        Some(self.rect.min + egui::vec2(screen.x, screen.y))
    }

    fn segment(&self, [a, b]: [Vec3; 2]) -> Option<[Pos2; 2]> {
        Some([self.project(a)?, self.project(b)?])
    }

    fn depth(&self, point: Vec3) -> f32 {
        self.camera.position.distance_squared(point)
    }
}

pub fn render_viewport(ui: &mut egui::Ui, app_state: &SharedAppState, show_grid: bool) {
    let rect = ui.available_rect_before_wrap();
    let response = ui.allocate_rect(rect, Sense::click_and_drag());
    let mut state = app_state.lock();
    let editor = &mut state.editor;

    if editor.is_mounted() {
        editor.resize(rect.width(), rect.height());
    } else {
        editor.mount(rect.width(), rect.height());
    }

    // ---- input ----
    let to_local = |p: Pos2| Vec2::new(p.x - rect.min.x, p.y - rect.min.y);
    let (pointer, pressed, released, additive, scroll) = ui.input(|i| {
        (
            i.pointer.latest_pos(),
            i.pointer.primary_pressed(),
            i.pointer.primary_released(),
            i.modifiers.shift || i.modifiers.command,
            i.smooth_scroll_delta.y,
        )
    });

    if let Some(pos) = pointer {
        let local = to_local(pos);
        if response.hovered() && pressed {
            editor.pointer_pressed(local, additive);
        } else if response.hovered() || editor.is_dragging() {
            editor.pointer_moved(local);
        }
        if response.double_clicked() {
            editor.pointer_double_clicked(local);
        }
    }
    if released {
        editor.pointer_released();
    }
    if !editor.is_dragging() {
        let delta = response.drag_delta();
        let delta = Vec2::new(delta.x, delta.y);
        if response.dragged_by(egui::PointerButton::Primary) {
            editor.orbit_camera(delta);
        } else if response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            editor.pan_camera(delta);
        }
    }
    if response.hovered() && scroll != 0.0 {
        editor.zoom_camera((1.0 - scroll * ZOOM_PER_SCROLL).clamp(0.5, 2.0));
    }

    // ---- paint ----
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, BACKGROUND);

    let Some(camera) = editor.viewport().map(|v| v.camera.clone()) else {
        return;
    };
    let projector = Projector { camera, rect };

    if show_grid {
        paint_grid(&painter, &projector);
    }

    let mut items = editor.draw_items().to_vec();
    items.sort_by(|a, b| {
        let da = projector.depth(a.world.transform_point3(a.bounds.center()));
        let db = projector.depth(b.world.transform_point3(b.bounds.center()));
        db.total_cmp(&da)
    });
    for item in &items {
        paint_item(&painter, &projector, item, editor.backend());
    }

    for outline in editor.selection().outlines() {
        let stroke = Stroke::new(1.5, color32(outline.color));
        for segment in &outline.lines.segments {
            if let Some(points) = projector.segment(*segment) {
                painter.line_segment(points, stroke);
            }
        }
    }

    if let Some(gizmo) = editor.viewport().and_then(|v| v.gizmos.active()) {
        for (segment, color) in gizmo.world_lines() {
            if let Some(points) = projector.segment(segment) {
                painter.line_segment(points, Stroke::new(2.0, color32(color)));
            }
        }
    }
}

fn paint_grid(painter: &egui::Painter, projector: &Projector) {
    let stroke = Stroke::new(1.0, GRID_COLOR);
    let extent = GRID_HALF_EXTENT as f32;
    for i in -GRID_HALF_EXTENT..=GRID_HALF_EXTENT {
        let offset = i as f32;
        let lines = [
            [Vec3::new(offset, 0.0, -extent), Vec3::new(offset, 0.0, extent)],
            [Vec3::new(-extent, 0.0, offset), Vec3::new(extent, 0.0, offset)],
        ];
        for line in lines {
            if let Some(points) = projector.segment(line) {
                painter.line_segment(points, stroke);
            }
        }
    }
}

fn shade(color: Color32, normal: Vec3) -> Color32 {
    let light = 0.35 + 0.65 * normal.dot(LIGHT_DIR.normalize()).abs();
    Color32::from_rgb(
        (color.r() as f32 * light) as u8,
        (color.g() as f32 * light) as u8,
        (color.b() as f32 * light) as u8,
    )
}

fn paint_item(painter: &egui::Painter, projector: &Projector, item: &DrawItem, backend: &EguiBackend) {
    let (Some(mesh), Some(material)) = (backend.mesh(item.geometry), backend.material(item.material))
    else {
        return;
    };
    let world: Vec<Vec3> = mesh
        .positions
        .iter()
        .map(|p| item.world.transform_point3(*p))
        .collect();
    let texture = material.texture.and_then(|t| backend.texture_id(t));

    match texture {
        Some(texture_id) if mesh.uvs.len() == mesh.positions.len() => {
            let screen: Option<Vec<Pos2>> = world.iter().map(|p| projector.project(*p)).collect();
            // Planes are small; skip them entirely when they cross the camera
            let Some(screen) = screen else {
                return;
            };
            let mut out = egui::Mesh::with_texture(texture_id);
            for (pos, uv) in screen.iter().zip(&mesh.uvs) {
                out.vertices.push(Vertex {
                    pos: *pos,
                    uv: egui::pos2(uv.x, uv.y),
                    color: material.color,
                });
            }
            out.indices.extend(mesh.triangles().flatten());
            painter.add(Shape::mesh(out));
        }
        _ => {
            let mut triangles: Vec<(f32, [u32; 3])> = mesh
                .triangles()
                .map(|t| {
                    let centroid = (world[t[0] as usize] + world[t[1] as usize] + world[t[2] as usize]) / 3.0;
                    (projector.depth(centroid), t)
                })
                .collect();
            triangles.sort_by(|a, b| b.0.total_cmp(&a.0));

            let mut out = egui::Mesh::default();
            for (_, [a, b, c]) in triangles {
                let (wa, wb, wc) = (world[a as usize], world[b as usize], world[c as usize]);
                let (Some(pa), Some(pb), Some(pc)) =
                    (projector.project(wa), projector.project(wb), projector.project(wc))
                else {
                    continue;
                };
                let color = shade(material.color, (wb - wa).cross(wc - wa).normalize_or_zero());
                let base = out.vertices.len() as u32;
                out.colored_vertex(pa, color);
                out.colored_vertex(pb, color);
                out.colored_vertex(pc, color);
                out.add_triangle(base, base + 1, base + 2);
            }
            painter.add(Shape::mesh(out));
        }
    }

    if let Some(label) = material.texture.and_then(|t| backend.label(t))
        && let Some(center) = projector.project(item.world.transform_point3(item.bounds.center()))
    {
        painter.text(
            center,
            egui::Align2::CENTER_CENTER,
            label,
            egui::FontId::proportional(14.0),
            Color32::WHITE,
        );
    }
}

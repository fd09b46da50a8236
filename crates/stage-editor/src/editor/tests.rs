use std::collections::HashSet;
use std::time::{Duration, Instant};

use approx::assert_relative_eq;
use glam::{Vec2, Vec3};
use stage_core::{
    Axis, GizmoAxis, GizmoMode, ImportRequest, LightKind, NodeId, NodeKind, Transform,
    TransformKind, TransformSnapshot, TransformSpace,
};
use stage_renderer::{MemoryStatus, Ray};

use super::*;
use crate::drag::DragContext;
use crate::gizmo_engine::GizmoAttachment;
use crate::ops::DragStart;
use crate::test_support::{TestBackend, image, model, video};

fn editor() -> StageEditor<TestBackend> {
    let mut editor = StageEditor::new(TestBackend::default(), EditorSettings::default());
    editor.mount(800.0, 600.0);
    editor
}

fn place_row(editor: &mut StageEditor<TestBackend>) -> Vec<NodeId> {
    [0.0, 2.0, 4.0]
        .iter()
        .enumerate()
        .map(|(i, x)| {
            editor
                .place_media(image(&format!("m{i}")), Some(Vec3::new(*x, 0.0, 0.0)))
                .unwrap()
        })
        .collect()
}

fn select_ids(editor: &mut StageEditor<TestBackend>, ids: &[NodeId]) {
    editor.selection.set(&editor.store, ids.iter().cloned());
    editor.after_selection_change();
}

/// Pixel position of a world point in the mounted viewport.
fn screen_point(editor: &StageEditor<TestBackend>, point: Vec3) -> Vec2 {
    editor.viewport().unwrap().project(point).unwrap()
}

fn positions(editor: &StageEditor<TestBackend>, ids: &[NodeId]) -> Vec<Vec3> {
    ids.iter()
        .map(|id| editor.store().transform(id).unwrap().position)
        .collect()
}

/// Drives a drag on the active gizmo by feeding the controller directly,
/// bypassing screen-space picking.
fn drag_with(
    editor: &mut StageEditor<TestBackend>,
    axis_ray: Ray,
    pointer_to: Vec2,
    move_ray: Ray,
) -> bool {
    let starts: Vec<DragStart> = editor
        .selection
        .ids()
        .iter()
        .map(|id| DragStart {
            id: id.clone(),
            transform: editor.store.transform(id).unwrap(),
        })
        .collect();
    let centroid = editor.selection.center(&editor.store).unwrap();
    let viewport = editor.viewport.as_mut().unwrap();
    let Some(gizmo) = viewport.gizmos.active_mut() else {
        return false;
    };
    if !viewport
        .drag
        .begin(gizmo, &axis_ray, Vec2::ZERO, starts, centroid, &mut viewport.camera)
    {
        return false;
    }
    let gizmo_position = viewport.gizmos.active().unwrap().position();
    let ctx = DragContext {
        pointer: pointer_to,
        ray: move_ray,
        gizmo_position,
        camera_forward: viewport.camera.forward(),
        space: editor.space,
        locks: &editor.locks,
        settings: &editor.settings,
    };
    let updates = viewport.drag.update(&ctx).unwrap_or_default();
    for (id, t) in updates {
        editor.store.set_transform(&id, t).unwrap();
    }
    editor.after_transform_change();
    editor.pointer_released();
    true
}

#[test]
fn test_translate_three_objects_by_one() {
    let mut editor = editor();
    let ids = place_row(&mut editor);
    select_ids(&mut editor, &ids);
    assert_eq!(editor.viewport().unwrap().gizmos.attachment(), GizmoAttachment::Multi);

    let center = editor.selection.center(&editor.store).unwrap();
    assert_relative_eq!(center.x, 2.0);
    // Down onto the X arrow one unit right of the pivot, then one more unit
    let grab = Ray::new(center + Vec3::new(1.0, 0.0, 10.0), Vec3::NEG_Z);
    let release = Ray::new(center + Vec3::new(1.0, 0.0, 10.0), Vec3::NEG_Z);
    assert!(drag_with(&mut editor, grab, Vec2::new(10.0, 0.0), release));

    assert_eq!(
        positions(&editor, &ids),
        vec![Vec3::X, Vec3::new(3.0, 0.0, 0.0), Vec3::new(5.0, 0.0, 0.0)]
    );
    // Gizmo followed the selection center
    let gizmo = editor.viewport().unwrap().gizmos.active().unwrap().position();
    assert_relative_eq!(gizmo.x, 3.0);
    assert!(editor.viewport().unwrap().camera.controls_enabled);
}

#[test]
fn test_single_scale_with_locked_x() {
    let mut editor = editor();
    let id = editor.place_media(model("m"), None).unwrap();
    editor.select(&id, false);
    editor.set_mode(GizmoMode::Scale);
    editor.set_lock(TransformKind::Scale, Axis::X, true);
    let before = editor.store().transform(&id).unwrap().scale;

    // Diagonally onto the center box; pointer moves (50, 50) for factor 2
    let grab = Ray::new(Vec3::splat(5.0), Vec3::NEG_ONE);
    assert!(drag_with(&mut editor, grab, Vec2::new(50.0, 50.0), grab));

    let after = editor.store().transform(&id).unwrap().scale;
    assert_relative_eq!(after.x, before.x);
    assert_relative_eq!(after.y, before.y * 2.0);
    assert_relative_eq!(after.z, before.z * 2.0);
}

#[test]
fn test_locked_axis_survives_drags_and_panel_edits() {
    let mut editor = editor();
    let ids = place_row(&mut editor);
    select_ids(&mut editor, &ids);
    editor.set_lock(TransformKind::Position, Axis::Y, true);

    assert!(!editor.edit_transform(TransformKind::Position, Axis::Y, 7.0));
    assert!(editor.edit_transform(TransformKind::Position, Axis::X, 10.0));

    let before = positions(&editor, &ids);
    let center = editor.selection.center(&editor.store).unwrap();
    // Free-move center handle; its plane faces the default camera
    let grab = Ray::new(center + Vec3::splat(5.0), Vec3::NEG_ONE);
    let moved = Ray::new(center + Vec3::new(6.0, 8.0, 5.0), Vec3::NEG_ONE);
    assert!(drag_with(&mut editor, grab, Vec2::new(20.0, 20.0), moved));

    for (b, a) in before.iter().zip(positions(&editor, &ids)) {
        assert_eq!(a.y, 0.0);
        assert!(a.x != b.x);
    }
}

#[test]
fn test_global_rotate_keeps_distances_local_keeps_positions() {
    let mut editor = editor();
    let ids = place_row(&mut editor);
    select_ids(&mut editor, &ids);
    editor.set_mode(GizmoMode::Rotate);
    let center = editor.selection.center(&editor.store).unwrap();
    let before = positions(&editor, &ids);

    // Straight down onto the Y ring
    let ring = Ray::new(center + Vec3::new(0.8485, 10.0, 0.8485), Vec3::NEG_Y);
    assert!(drag_with(&mut editor, ring, Vec2::new(60.0, 0.0), ring));
    for (b, a) in before.iter().zip(positions(&editor, &ids)) {
        assert_relative_eq!(b.distance(center), a.distance(center), epsilon = 1e-4);
    }
    assert_relative_eq!(editor.store().transform(&ids[0]).unwrap().rotation.y, 0.6);

    editor.set_space(TransformSpace::Local);
    let before = positions(&editor, &ids);
    let center = editor.selection.center(&editor.store).unwrap();
    let ring = Ray::new(center + Vec3::new(0.8485, 10.0, 0.8485), Vec3::NEG_Y);
    assert!(drag_with(&mut editor, ring, Vec2::new(30.0, 0.0), ring));
    assert_eq!(before, positions(&editor, &ids));
}

#[test]
fn test_multi_gizmo_tracks_union_center_after_mutations() {
    let mut editor = editor();
    let ids = place_row(&mut editor);
    select_ids(&mut editor, &ids[..2]);

    editor.edit_transform(TransformKind::Position, Axis::Z, 5.0);
    editor.align_selected(AlignMode::Top);
    let expected = editor.selection.bounds(&editor.store).unwrap().center();
    let gizmo = editor.viewport().unwrap().gizmos.active().unwrap().position();
    assert!(gizmo.abs_diff_eq(expected, 1e-5));
    assert_relative_eq!(gizmo.z, 5.0);
}

#[test]
fn test_delete_releases_video_handles() {
    let mut editor = editor();
    let a = editor.place_media(video("a"), None).unwrap();
    let b = editor.place_media(video("b"), Some(Vec3::X * 3.0)).unwrap();
    assert_eq!(editor.resources().tracked_count(), 2);

    editor.select(&a, false);
    editor.select(&b, true);
    assert_eq!(editor.delete_selected(), 2);
    assert!(!editor.resources().is_tracked(&a));
    assert!(!editor.resources().is_tracked(&b));
    assert_eq!(editor.resources().tracked_count(), 0);
    // Planes and materials wait for the disposal pass
    assert_eq!(editor.resources().queued(), 4);
    assert!(!editor.viewport().unwrap().root.contains(&a));
    assert_eq!(editor.viewport().unwrap().gizmos.attachment(), GizmoAttachment::None);
}

#[test]
fn test_remount_preserves_objects() {
    let mut editor = editor();
    place_row(&mut editor);
    let ids: HashSet<NodeId> = editor.store().iter().map(|n| n.id.clone()).collect();
    let count = editor.viewport().unwrap().root.len();

    editor.unmount();
    assert!(!editor.is_mounted());
    assert_eq!(editor.store().len(), ids.len());

    editor.mount(800.0, 600.0);
    let remounted: HashSet<NodeId> = editor
        .viewport()
        .unwrap()
        .root
        .ids()
        .iter()
        .cloned()
        .collect();
    assert_eq!(remounted.len(), count);
    assert!(remounted.is_subset(&ids));
    assert!(editor.viewport().unwrap().camera.controls_enabled);
}

#[test]
fn test_remount_abandons_drag_and_restores_camera() {
    let mut editor = editor();
    let id = editor.place_media(image("a"), None).unwrap();
    editor.select(&id, false);
    let viewport = editor.viewport.as_mut().unwrap();
    let gizmo = viewport.gizmos.active_mut().unwrap();
    let grab = Ray::new(Vec3::new(1.0, 0.0, 10.0), Vec3::NEG_Z);
    let starts = vec![DragStart {
        id: id.clone(),
        transform: Transform::IDENTITY,
    }];
    assert!(
        viewport
            .drag
            .begin(gizmo, &grab, Vec2::ZERO, starts, Vec3::ZERO, &mut viewport.camera)
    );
    assert!(editor.is_dragging());

    editor.mount(640.0, 480.0);
    assert!(!editor.is_dragging());
    assert!(editor.viewport().unwrap().camera.controls_enabled);
}

#[test]
fn test_sixth_video_evicts_oldest() {
    let mut editor = editor();
    let ids: Vec<NodeId> = (0..6)
        .map(|i| {
            editor
                .place_media(video(&format!("v{i}")), Some(Vec3::X * i as f32 * 3.0))
                .unwrap()
        })
        .collect();
    let active: Vec<&NodeId> = editor.resources().active().collect();
    assert_eq!(active.len(), 5);
    assert!(!editor.resources().is_active(&ids[0]));
    assert!(!editor.resources().is_playing(&ids[0]));
    assert!(editor.resources().is_tracked(&ids[0]));
    assert!(editor.store().contains(&ids[0]));
}

#[test]
fn test_failed_load_places_selectable_placeholder() {
    let mut editor = StageEditor::new(TestBackend::failing(&["bad"]), EditorSettings::default());
    editor.mount(800.0, 600.0);
    let id = editor.place_media(image("bad"), None).unwrap();

    let node = editor.store().get(&id).unwrap();
    assert!(node.as_media().unwrap().placeholder);
    let missing = editor.take_missing_media();
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].id, id);
    assert!(editor.take_missing_media().is_empty());

    editor.select(&id, false);
    assert!(editor.edit_transform(TransformKind::Position, Axis::X, 2.0));
    assert_eq!(editor.store().transform(&id).unwrap().position.x, 2.0);
}

#[test]
fn test_media_framing() {
    let mut editor = editor();
    let img = editor.place_media(image("img"), None).unwrap();
    // 200x100 image
    assert_eq!(editor.store().transform(&img).unwrap().scale, Vec3::new(2.0, 1.0, 1.0));

    let m = editor.place_media(model("m"), None).unwrap();
    // largest model dimension 4 -> scaled to 2
    assert_relative_eq!(editor.store().transform(&m).unwrap().scale.x, 0.5);
    assert!(editor.place_media(model("m"), None).is_none());
}

#[test]
fn test_panel_snapshot_and_rotation_degrees() {
    let mut editor = editor();
    assert_eq!(editor.transform_snapshot(), TransformSnapshot::default());
    let ids = place_row(&mut editor);

    editor.select(&ids[0], false);
    assert!(editor.edit_transform(TransformKind::Rotation, Axis::Y, 45.0));
    assert_relative_eq!(
        editor.store().transform(&ids[0]).unwrap().rotation.y,
        std::f32::consts::FRAC_PI_4
    );
    assert_eq!(editor.transform_snapshot().rotation.y, 45.0);

    editor.select(&ids[1], false);
    editor.select(&ids[2], true);
    let snapshot = editor.transform_snapshot();
    assert_eq!(snapshot.position.x, 3.0);
    assert_eq!(snapshot.scale.x, 1.0);
    // Rotation edits are ignored for several objects
    assert!(!editor.edit_transform(TransformKind::Rotation, Axis::Y, 10.0));
}

#[test]
fn test_group_and_ungroup() {
    let mut editor = editor();
    let ids = place_row(&mut editor);
    select_ids(&mut editor, &ids[..2]);
    let group = editor.group_selected().unwrap();
    let root = &editor.viewport().unwrap().root;
    assert!(root.contains(&group));
    assert!(!root.contains(&ids[0]));

    select_ids(&mut editor, &ids[..2]);
    assert_eq!(editor.ungroup_selected(), 2);
    assert!(!editor.store().contains(&group));
    assert_eq!(positions(&editor, &ids[..2]), vec![Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0)]);
    assert!(editor.viewport().unwrap().root.contains(&ids[0]));
}

#[test]
fn test_deleting_group_removes_members() {
    let mut editor = editor();
    let ids = place_row(&mut editor);
    select_ids(&mut editor, &ids[..2]);
    let group = editor.group_selected().unwrap();
    select_ids(&mut editor, &[group]);
    assert_eq!(editor.delete_selected(), 3);
    assert!(!editor.store().contains(&ids[0]));
    assert!(editor.store().contains(&ids[2]));
}

#[test]
fn test_align_and_distribute() {
    let mut editor = editor();
    let ids = place_row(&mut editor);
    // Keep the placed aspect scale so every plane has the same extent
    let mut moved = editor.store().transform(&ids[1]).unwrap();
    moved.position = Vec3::new(1.0, 2.0, 0.0);
    editor.store.set_transform(&ids[1], moved).unwrap();
    select_ids(&mut editor, &ids);

    editor.align_selected(AlignMode::Bottom);
    assert!(positions(&editor, &ids).iter().all(|p| p.y == 0.0));

    editor.align_selected(AlignMode::DistributeX);
    let xs: Vec<f32> = positions(&editor, &ids).iter().map(|p| p.x).collect();
    assert_relative_eq!(xs[1], 2.0);

    editor.align_selected(AlignMode::Left);
    let lefts: Vec<f32> = ids
        .iter()
        .map(|id| editor.store().world_bounds(id).unwrap().min.x)
        .collect();
    for left in &lefts {
        assert_relative_eq!(*left, lefts[0]);
    }
    assert!(positions(&editor, &ids).iter().all(|p| p.x == 0.0));
}

#[test]
fn test_align_left_uses_bounds_not_positions() {
    let mut editor = editor();
    let ids = place_row(&mut editor);
    // Half as wide as the others
    let mut narrow = editor.store().transform(&ids[1]).unwrap();
    narrow.scale = Vec3::ONE;
    editor.store.set_transform(&ids[1], narrow).unwrap();
    select_ids(&mut editor, &ids);

    editor.align_selected(AlignMode::Left);
    for id in &ids {
        assert_relative_eq!(editor.store().world_bounds(id).unwrap().min.x, -2.0);
    }
    assert_relative_eq!(editor.store().transform(&ids[1]).unwrap().position.x, -1.0);
}

#[test]
fn test_import_batch_grid() {
    let mut editor = editor();
    let mut request = ImportRequest::new((0..5).map(|i| image(&format!("g{i}"))).collect());
    request.columns = 2;
    let placed = editor.import_batch(request);
    assert_eq!(placed.len(), 5);
    let first = editor.store().transform(&placed[0]).unwrap().position;
    assert_relative_eq!(first.x, -1.5);
    assert_relative_eq!(first.y, 0.1);

    // The whole grid is framed from the (1, 1, 1) diagonal
    let bounds = editor.store().scene_bounds().unwrap();
    let camera = &editor.viewport().unwrap().camera;
    assert!(camera.target.abs_diff_eq(bounds.center(), 1e-5));
    assert_relative_eq!(camera.distance(), camera.framing_distance(&bounds), epsilon = 1e-3);
    let direction = (camera.position - camera.target).normalize();
    assert!(direction.abs_diff_eq(Vec3::ONE.normalize(), 1e-4));
}

#[test]
fn test_placement_without_position_frames_object() {
    let mut editor = editor();
    let default_position = editor.viewport().unwrap().camera.position;
    let far = editor
        .place_media(image("far"), Some(Vec3::new(20.0, 0.0, 0.0)))
        .unwrap();
    assert!(editor.store().contains(&far));
    assert_eq!(editor.viewport().unwrap().camera.position, default_position);

    let framed = editor.place_media(model("m"), None).unwrap();
    let bounds = editor.store().world_bounds(&framed).unwrap();
    let viewport = editor.viewport().unwrap();
    assert!(viewport.camera.target.abs_diff_eq(bounds.center(), 1e-5));
    assert_relative_eq!(
        viewport.camera.distance(),
        viewport.camera.framing_distance(&bounds),
        epsilon = 1e-3
    );
    // Handles keep their on-screen size at the new distance
    assert_relative_eq!(
        viewport.gizmos.scale(),
        stage_renderer::handle_scale(viewport.camera.distance())
    );
}

#[test]
fn test_double_click_frames_without_selecting() {
    let mut editor = editor();
    let p = editor
        .place_media(image("p"), Some(Vec3::new(1.0, 0.0, 0.0)))
        .unwrap();
    let pointer = screen_point(&editor, Vec3::new(1.0, 0.0, 0.0));

    assert_eq!(editor.pointer_double_clicked(pointer), Some(p.clone()));
    let bounds = editor.store().world_bounds(&p).unwrap();
    let camera = &editor.viewport().unwrap().camera;
    assert!(camera.target.abs_diff_eq(bounds.center(), 1e-5));
    assert!(editor.selection().is_empty());

    // Empty space frames nothing
    let target = editor.viewport().unwrap().camera.target;
    assert_eq!(editor.pointer_double_clicked(Vec2::new(2.0, 598.0)), None);
    assert_eq!(editor.viewport().unwrap().camera.target, target);
}

#[test]
fn test_pointer_press_selects_toggles_and_clears() {
    let mut editor = editor();
    let p = editor.place_media(image("p"), None).unwrap();
    let q = editor
        .place_media(image("q"), Some(Vec3::new(6.0, 0.0, 0.0)))
        .unwrap();
    let empty = Vec2::new(2.0, 598.0);

    assert!(!editor.pointer_pressed(screen_point(&editor, Vec3::ZERO), false));
    assert_eq!(editor.selection().ids(), &[p.clone()]);

    assert!(!editor.pointer_pressed(screen_point(&editor, Vec3::new(6.0, 0.0, 0.0)), true));
    assert_eq!(editor.selection().ids(), &[p.clone(), q.clone()]);
    assert_eq!(editor.viewport().unwrap().gizmos.attachment(), GizmoAttachment::Multi);

    // Additive miss keeps the selection, a plain miss clears it
    assert!(!editor.pointer_pressed(empty, true));
    assert_eq!(editor.selection().len(), 2);
    assert!(!editor.pointer_pressed(empty, false));
    assert!(editor.selection().is_empty());
    assert_eq!(editor.viewport().unwrap().gizmos.attachment(), GizmoAttachment::None);
}

#[test]
fn test_pointer_drag_moves_object_along_handle() {
    let mut editor = editor();
    let p = editor.place_media(image("p"), None).unwrap();
    assert!(!editor.pointer_pressed(screen_point(&editor, Vec3::ZERO), false));
    assert_eq!(editor.selection().ids(), &[p.clone()]);

    let scale = editor.viewport().unwrap().gizmos.scale();
    let on_arrow = screen_point(&editor, Vec3::X * scale);
    editor.pointer_moved(on_arrow);
    assert_eq!(editor.viewport().unwrap().drag.hovered(), Some(GizmoAxis::X));

    assert!(editor.pointer_pressed(on_arrow, false));
    assert!(editor.is_dragging());
    assert!(!editor.viewport().unwrap().camera.controls_enabled);

    editor.pointer_moved(screen_point(&editor, Vec3::new(2.5, 0.0, 0.0)));
    let moved = editor.store().transform(&p).unwrap().position;
    assert_relative_eq!(moved.x, 2.5, epsilon = 1e-3);
    assert_eq!(moved.y, 0.0);
    assert_eq!(moved.z, 0.0);
    let gizmo = editor.viewport().unwrap().gizmos.active().unwrap().position();
    assert!(gizmo.abs_diff_eq(moved, 1e-5));

    editor.pointer_released();
    assert!(!editor.is_dragging());
    assert!(editor.viewport().unwrap().camera.controls_enabled);
    assert_eq!(editor.selection().ids(), &[p]);
}

#[test]
fn test_pointer_selects_positioned_light() {
    let mut editor = editor();
    let light = editor
        .store()
        .lights()
        .find(|n| matches!(&n.kind, NodeKind::Light(l) if l.kind == LightKind::Directional))
        .unwrap();
    let (id, position) = (light.id.clone(), light.transform.position);
    {
        let camera = &mut editor.viewport_mut().unwrap().camera;
        camera.target = position;
        camera.position = position + Vec3::new(0.0, 0.0, 10.0);
    }

    assert!(!editor.pointer_pressed(screen_point(&editor, position), false));
    assert_eq!(editor.selection().ids(), &[id.clone()]);
    assert_eq!(editor.viewport().unwrap().gizmos.attachment(), GizmoAttachment::Single(id));
}

#[test]
fn test_preview_modes() {
    let mut editor = editor();
    let v = editor.place_media(video("v"), None).unwrap();
    assert!(editor.resources().is_playing(&v));

    editor.set_preview_mode(PreviewMode::Off);
    assert!(!editor.resources().is_playing(&v));

    editor.set_preview_mode(PreviewMode::Hover);
    editor.hover_media(&v, true);
    assert!(editor.resources().is_playing(&v));
    editor.hover_media(&v, false);
    assert!(!editor.resources().is_playing(&v));
}

#[test]
fn test_critical_memory_forces_cleanup() {
    let settings = EditorSettings {
        texture_budget_bytes: 1000,
        ..EditorSettings::default()
    };
    let mut editor = StageEditor::new(TestBackend::default(), settings);
    editor.mount(800.0, 600.0);
    let v = editor.place_media(video("v"), None).unwrap();

    let report = editor.check_resources();
    assert_eq!(report.memory, MemoryStatus::Critical);
    assert!(!editor.resources().is_tracked(&v));
    assert!(editor.store().contains(&v));
}

#[test]
fn test_tick_paces_frames() {
    let mut editor = editor();
    let t0 = Instant::now();
    assert!(editor.tick(t0));
    assert!(!editor.tick(t0 + Duration::from_millis(2)));
    assert!(editor.tick(t0 + Duration::from_millis(20)));
    editor.unmount();
    assert!(!editor.tick(t0 + Duration::from_secs(1)));
}

#[test]
fn test_periodic_cleanup_releases_draw_cache() {
    let mut editor = editor();
    let ids = place_row(&mut editor);
    editor.delete(&ids[..1]);
    assert_eq!(editor.draw_items().len(), 2);

    let t0 = Instant::now();
    // First tick only starts the cleanup timer
    assert!(editor.tick(t0));
    assert!(editor.viewport().unwrap().render_list.is_cached());

    assert!(editor.tick(t0 + Duration::from_secs(61)));
    assert!(!editor.viewport().unwrap().render_list.is_cached());
    assert_eq!(editor.draw_items().len(), 2);
}

#[test]
fn test_draw_items_follow_deletes() {
    let mut editor = editor();
    let ids = place_row(&mut editor);
    assert_eq!(editor.draw_items().len(), 3);

    editor.delete(&ids[..1]);
    let drawn: Vec<NodeId> = editor.draw_items().iter().map(|i| i.node.clone()).collect();
    assert_eq!(drawn, ids[1..].to_vec());

    editor.unmount();
    assert!(editor.draw_items().is_empty());
}

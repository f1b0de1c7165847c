//! End-to-end gesture tests driving the editor through scripted touches.

use glam::{Vec2, Vec3};
use shared::InstanceId;
use touch_editor::config::EditorConfig;
use touch_editor::fixtures::{began, ended, moved};
use touch_editor::harness::TestHarness;
use touch_editor::input::StateId;
use touch_editor::viewport::picking::ray_plane;

/// Spawn an asset and place it with a drag released at `screen_point`.
fn spawn_and_place(harness: &mut TestHarness, asset_id: usize, screen_point: Vec2) -> InstanceId {
    harness.spawn(asset_id);
    let instance_id = harness.selected().expect("spawn selects the new object");
    harness.drag(screen_point, screen_point, 4);
    instance_id
}

/// Screen position of the given object's center.
fn projected_center(harness: &TestHarness, instance_id: InstanceId) -> Vec2 {
    let center = harness
        .editor
        .scene()
        .objects
        .get(instance_id)
        .expect("object is registered")
        .center();
    let screen = Vec2::from(harness.editor.config().input.screen_size);
    harness
        .editor
        .camera()
        .project(center, screen)
        .expect("object is in front of the camera")
}

#[test]
fn test_tap_selects_and_empty_tap_clears() {
    let mut harness = TestHarness::new();
    let center = harness.screen_center();
    let instance_id = spawn_and_place(&mut harness, 0, center);
    assert_eq!(harness.selected(), Some(instance_id));

    // Tap well away from the object: selection clears, marker hides.
    harness.tap(Vec2::new(1000.0, 1880.0));
    assert_eq!(harness.selected(), None);
    assert!(!harness.ui.borrow().marker_visible);

    // Tap the object again: selected, marker shown.
    let on_object = projected_center(&harness, instance_id);
    harness.tap(on_object);
    assert_eq!(harness.selected(), Some(instance_id));
    assert!(harness.ui.borrow().marker_visible);
}

#[test]
fn test_touch_captured_by_ui_starts_nothing() {
    let mut harness = TestHarness::new();
    let center = harness.screen_center();

    harness.ui.borrow_mut().blocked_touches.push(0);
    harness.frame(&[began(0, center)]);
    assert_eq!(harness.state(), StateId::Idle);
}

#[test]
fn test_sub_threshold_wiggle_stays_a_tap() {
    let mut harness = TestHarness::new();
    let start = harness.screen_center();
    let wiggle = start + Vec2::new(4.0, 0.0);

    harness.frame(&[began(0, start)]);
    harness.frame(&[moved(0, wiggle)]);
    assert_eq!(harness.state(), StateId::SelectObject);
    harness.frame(&[ended(0, wiggle)]);
    harness.frame(&[]);

    assert_eq!(harness.state(), StateId::Idle);
    // The camera never panned.
    assert_eq!(harness.editor.camera().target_position(), Vec3::ZERO);
}

#[test]
fn test_vertical_swipe_pans_straight_over_the_ground() {
    let mut harness = TestHarness::new();
    let start = harness.screen_center();

    harness.drag(start, start - Vec2::new(0.0, 400.0), 8);

    let pivot = harness.editor.camera().target_position();
    // A swipe down the screen's center column moves the pivot along its
    // forward axis only, never off the ground.
    assert!(pivot.x.abs() < 1e-3);
    assert_eq!(pivot.y, 0.0);
    assert!(pivot.z > 0.5);
    assert_eq!(harness.editor.camera().target_yaw(), 0.0);
    assert_eq!(harness.state(), StateId::Idle);
}

#[test]
fn test_pan_is_anchored_at_the_original_contact_point() {
    let mut harness = TestHarness::new();
    let start = harness.screen_center();
    let past_threshold = start - Vec2::new(0.0, 15.0);

    harness.frame(&[began(0, start)]);
    harness.frame(&[moved(0, past_threshold)]);
    assert_eq!(harness.state(), StateId::DragCamera);
    // The transition frame itself has not panned yet.
    assert_eq!(harness.editor.camera().target_position(), Vec3::ZERO);

    // Without further finger movement the pan still covers the distance
    // travelled before the threshold was crossed.
    harness.frame(&[moved(0, past_threshold)]);
    assert!(harness.editor.camera().target_position().z > 0.01);
}

#[test]
fn test_pinch_zooms_and_unpinch_zooms_back() {
    let mut config = EditorConfig::default();
    config.camera.max_zoom = 100.0;
    let mut harness = TestHarness::with_config(config);
    let center = harness.screen_center();
    let initial = harness.editor.camera().target_zoom();

    harness.frame(&[
        began(0, center - Vec2::new(100.0, 0.0)),
        began(1, center + Vec2::new(100.0, 0.0)),
    ]);
    assert_eq!(harness.state(), StateId::RotateAndZoom);

    // Fingers close from 200 px to 100 px: at 100 dpi that is a delta of
    // 1.0, doubling the zoom distance.
    harness.frame(&[
        moved(0, center - Vec2::new(50.0, 0.0)),
        moved(1, center + Vec2::new(50.0, 0.0)),
    ]);
    assert!((harness.editor.camera().target_zoom() - initial * 2.0).abs() < 1e-3);
    assert_eq!(harness.editor.camera().target_yaw(), 0.0);

    // Spreading back to 150 px halves it again.
    harness.frame(&[
        moved(0, center - Vec2::new(75.0, 0.0)),
        moved(1, center + Vec2::new(75.0, 0.0)),
    ]);
    assert!((harness.editor.camera().target_zoom() - initial).abs() < 1e-3);
}

#[test]
fn test_twist_rotates_the_camera() {
    let mut harness = TestHarness::new();
    let center = harness.screen_center();
    let initial_zoom = harness.editor.camera().target_zoom();

    harness.frame(&[
        began(0, center - Vec2::new(100.0, 0.0)),
        began(1, center + Vec2::new(100.0, 0.0)),
    ]);
    // Quarter turn counterclockwise, finger spacing unchanged.
    harness.frame(&[
        moved(0, center - Vec2::new(0.0, 100.0)),
        moved(1, center + Vec2::new(0.0, 100.0)),
    ]);

    let yaw = harness.editor.camera().target_yaw();
    assert!((yaw - std::f32::consts::FRAC_PI_2).abs() < 1e-4);
    assert!((harness.editor.camera().target_zoom() - initial_zoom).abs() < 1e-5);
}

#[test]
fn test_lifting_a_finger_degrades_pinch_into_pan() {
    let mut harness = TestHarness::new();
    let center = harness.screen_center();
    let surviving = center + Vec2::new(100.0, 0.0);

    harness.frame(&[began(0, center - Vec2::new(100.0, 0.0)), began(1, surviving)]);
    harness.frame(&[moved(0, center - Vec2::new(100.0, 0.0)), moved(1, surviving)]);

    // One finger lifts; the pinch becomes a pan anchored where the
    // surviving finger currently is, so the camera does not jump.
    harness.frame(&[moved(1, surviving)]);
    assert_eq!(harness.state(), StateId::DragCamera);
    harness.frame(&[moved(1, surviving)]);
    assert!(harness.editor.camera().target_position().length() < 1e-3);
}

#[test]
fn test_three_touches_are_ignored_in_idle() {
    let mut harness = TestHarness::new();
    let center = harness.screen_center();

    harness.frame(&[
        began(0, center),
        began(1, center + Vec2::new(50.0, 0.0)),
        began(2, center - Vec2::new(50.0, 0.0)),
    ]);
    assert_eq!(harness.state(), StateId::Idle);
}

#[test]
fn test_object_drag_toggles_editing_mode_and_moves_on_ground() {
    let mut harness = TestHarness::new();
    let center = harness.screen_center();
    let instance_id = spawn_and_place(&mut harness, 0, center);

    let from = projected_center(&harness, instance_id);
    let to = Vec2::new(540.0, 1300.0);

    harness.frame(&[began(0, from)]);
    harness.frame(&[moved(0, from.lerp(to, 0.5))]);
    assert_eq!(harness.state(), StateId::DragObject);
    assert!(harness.ui.borrow().editing_mode);

    harness.frame(&[moved(0, to)]);
    harness.frame(&[ended(0, to)]);
    harness.frame(&[]);

    assert_eq!(harness.state(), StateId::Idle);
    assert!(!harness.ui.borrow().editing_mode);

    let position = harness.object_position(instance_id);
    assert!(position.y.abs() < 1e-3);
    assert!(position.z > 0.5);
    // The drag never steals the selection.
    assert_eq!(harness.selected(), Some(instance_id));
}

#[test]
fn test_release_frame_position_still_pans() {
    let mut harness = TestHarness::new();
    let start = harness.screen_center();
    let held = start - Vec2::new(0.0, 100.0);

    harness.frame(&[began(0, start)]);
    harness.frame(&[moved(0, held)]);
    harness.frame(&[moved(0, held)]);
    let mid_pan = harness.editor.camera().target_position();
    assert!(mid_pan.z > 0.0);

    // The finger travels further on the very frame it lifts; that distance
    // still counts.
    harness.frame(&[ended(0, start - Vec2::new(0.0, 300.0))]);
    assert_eq!(harness.state(), StateId::Idle);
    assert!(harness.editor.camera().target_position().z > mid_pan.z + 0.1);
}

#[test]
fn test_object_lands_under_the_release_point() {
    let mut harness = TestHarness::new();
    let center = harness.screen_center();
    let instance_id = spawn_and_place(&mut harness, 0, center);

    let from = projected_center(&harness, instance_id);
    let release = Vec2::new(540.0, 1300.0);
    harness.frame(&[began(0, from)]);
    harness.frame(&[moved(0, from + Vec2::new(0.0, 120.0))]);
    assert_eq!(harness.state(), StateId::DragObject);
    harness.frame(&[ended(0, release)]);
    harness.frame(&[]);

    // The exit snap uses the target set on the release frame.
    let screen = Vec2::from(harness.editor.config().input.screen_size);
    let ray = harness.editor.camera().screen_ray(release, screen);
    let expected = ray.point_at(ray_plane(&ray, Vec3::ZERO, Vec3::Y).unwrap());
    assert!((harness.object_position(instance_id) - expected).length() < 1e-3);
}

#[test]
fn test_second_finger_during_object_drag_ends_the_move() {
    let mut harness = TestHarness::new();
    let center = harness.screen_center();
    let instance_id = spawn_and_place(&mut harness, 0, center);

    let from = projected_center(&harness, instance_id);
    harness.frame(&[began(0, from)]);
    harness.frame(&[moved(0, from + Vec2::new(0.0, 120.0))]);
    assert_eq!(harness.state(), StateId::DragObject);
    let edits_before = harness.editor.scene().undo_count();

    // A second finger lands: the move completes and the pinch takes over.
    harness.frame(&[
        moved(0, from + Vec2::new(0.0, 120.0)),
        began(1, from + Vec2::new(200.0, 0.0)),
    ]);
    assert_eq!(harness.state(), StateId::RotateAndZoom);
    assert!(!harness.ui.borrow().editing_mode);
    assert_eq!(harness.editor.scene().undo_count(), edits_before + 1);
}

#[test]
fn test_marker_tracks_the_selected_object() {
    let mut harness = TestHarness::new();
    let instance_id = spawn_and_place(&mut harness, 2, Vec2::new(700.0, 1100.0));
    harness.idle_frames(1);

    let expected = projected_center(&harness, instance_id);
    let marker = harness.ui.borrow().marker_position;
    assert!((marker - expected).length() < 1.0);
}

//! Undo/redo and persistence flows driven through the full editor.

use std::cell::RefCell;
use std::rc::Rc;

use glam::{Vec2, Vec3};
use shared::InstanceId;
use touch_editor::config::EditorConfig;
use touch_editor::fixtures::{began, ended, moved, test_assets};
use touch_editor::harness::{MemoryPersistence, RecordingUi, SharedUi, TestHarness};
use touch_editor::input::StateId;
use touch_editor::ui::UiEvent;
use touch_editor::Editor;

fn spawn_and_place(harness: &mut TestHarness, asset_id: usize, screen_point: Vec2) -> InstanceId {
    harness.spawn(asset_id);
    let instance_id = harness.selected().expect("spawn selects the new object");
    harness.drag(screen_point, screen_point, 4);
    instance_id
}

/// Drag the currently selected object to `to`, starting on its center.
fn drag_selected(harness: &mut TestHarness, to: Vec2) {
    let instance_id = harness.selected().expect("an object is selected");
    let center = harness
        .editor
        .scene()
        .objects
        .get(instance_id)
        .expect("object is registered")
        .center();
    let screen = Vec2::from(harness.editor.config().input.screen_size);
    let from = harness
        .editor
        .camera()
        .project(center, screen)
        .expect("object is in front of the camera");

    harness.drag(from, to, 6);
}

#[test]
fn test_placing_a_spawn_registers_its_command_and_saves() {
    let mut harness = TestHarness::new();
    let center = harness.screen_center();
    let saves_before = harness.store.borrow().save_count;

    harness.spawn(0);
    assert_eq!(harness.state(), StateId::DragObject);
    // Nothing to undo until the object is actually placed.
    assert!(!harness.editor.scene().can_undo());

    let instance_id = harness.selected().unwrap();
    harness.drag(center, center, 4);

    assert_eq!(harness.state(), StateId::Idle);
    assert!(harness.editor.scene().can_undo());
    assert!(harness.store.borrow().save_count > saves_before);
    // Released over the screen center, the object sits at the pivot.
    assert!(harness.object_position(instance_id).length() < 1e-3);
}

#[test]
fn test_undo_redo_of_a_spawn_keeps_the_instance_id() {
    let mut harness = TestHarness::new();
    let center = harness.screen_center();
    let instance_id = spawn_and_place(&mut harness, 1, center);
    let placed_at = harness.object_position(instance_id);

    harness.editor.handle_event(UiEvent::UndoRequested);
    assert!(!harness.editor.scene().objects.contains(instance_id));
    assert_eq!(harness.selected(), None);

    harness.editor.handle_event(UiEvent::RedoRequested);
    let object = harness
        .editor
        .scene()
        .objects
        .get(instance_id)
        .expect("redo recreates the same instance");
    assert_eq!(object.asset_id, 1);
    assert!((object.position - placed_at).length() < 1e-5);
}

#[test]
fn test_move_undo_and_redo_round_trip() {
    let mut harness = TestHarness::new();
    let center = harness.screen_center();
    let instance_id = spawn_and_place(&mut harness, 0, center);
    let original = harness.object_position(instance_id);

    drag_selected(&mut harness, Vec2::new(540.0, 1300.0));
    let moved_to = harness.object_position(instance_id);
    assert!((moved_to - original).length() > 0.5);

    harness.editor.handle_event(UiEvent::UndoRequested);
    assert!((harness.object_position(instance_id) - original).length() < 1e-4);

    harness.editor.handle_event(UiEvent::RedoRequested);
    assert!((harness.object_position(instance_id) - moved_to).length() < 1e-4);
}

#[test]
fn test_mid_drag_delete_records_the_premove_position() {
    let mut harness = TestHarness::new();
    let center = harness.screen_center();
    let instance_id = spawn_and_place(&mut harness, 0, center);
    let original = harness.object_position(instance_id);

    // Start dragging the object away, then delete it before releasing, the
    // way dropping it onto the delete button works.
    let from = harness
        .editor
        .camera()
        .project(
            harness.editor.scene().objects.get(instance_id).unwrap().center(),
            Vec2::from(harness.editor.config().input.screen_size),
        )
        .unwrap();
    harness.frame(&[began(0, from)]);
    harness.frame(&[moved(0, Vec2::new(540.0, 1300.0))]);
    assert_eq!(harness.state(), StateId::DragObject);

    harness.editor.handle_event(UiEvent::DeleteRequested);
    assert!(!harness.editor.scene().objects.contains(instance_id));
    assert_eq!(harness.selected(), None);

    // Releasing the finger registers nothing extra for the vanished object.
    harness.frame(&[ended(0, Vec2::new(540.0, 1300.0))]);
    harness.frame(&[]);
    assert_eq!(harness.editor.scene().undo_count(), 2);

    // Undoing the delete restores the object where it stood before the
    // drag, not where the finger last held it.
    harness.editor.handle_event(UiEvent::UndoRequested);
    assert!((harness.object_position(instance_id) - original).length() < 1e-4);
}

#[test]
fn test_deleting_an_unplaced_spawn_leaves_no_trace() {
    let mut harness = TestHarness::new();
    harness.spawn(1);
    assert!(harness.selected().is_some());

    harness.editor.handle_event(UiEvent::DeleteRequested);
    assert!(harness.editor.scene().objects.is_empty());
    assert!(!harness.editor.scene().can_undo());
    assert_eq!(harness.selected(), None);

    harness.idle_frames(1);
    assert_eq!(harness.state(), StateId::Idle);
    assert!(!harness.ui.borrow().editing_mode);
}

#[test]
fn test_new_edit_truncates_the_redo_branch() {
    let mut harness = TestHarness::new();
    let center = harness.screen_center();
    let instance_id = spawn_and_place(&mut harness, 0, center);
    drag_selected(&mut harness, Vec2::new(540.0, 1300.0));
    assert_eq!(harness.editor.scene().undo_count(), 2);

    harness.editor.handle_event(UiEvent::UndoRequested);
    assert!(harness.editor.scene().can_redo());

    // Undo cleared the selection; pick the object up again and move it.
    let screen = Vec2::from(harness.editor.config().input.screen_size);
    let on_object = harness
        .editor
        .camera()
        .project(
            harness.editor.scene().objects.get(instance_id).unwrap().center(),
            screen,
        )
        .unwrap();
    harness.tap(on_object);
    assert_eq!(harness.selected(), Some(instance_id));
    drag_selected(&mut harness, Vec2::new(300.0, 1200.0));

    assert_eq!(harness.editor.scene().undo_count(), 2);
    assert!(!harness.editor.scene().can_redo());
}

#[test]
fn test_undo_and_redo_on_empty_history_are_noops() {
    let mut harness = TestHarness::new();
    harness.editor.handle_event(UiEvent::UndoRequested);
    harness.editor.handle_event(UiEvent::RedoRequested);
    assert!(!harness.editor.scene().can_undo());
    assert!(!harness.editor.scene().can_redo());
    assert_eq!(harness.state(), StateId::Idle);
}

#[test]
fn test_undo_buttons_track_the_history() {
    let mut harness = TestHarness::new();
    let center = harness.screen_center();
    spawn_and_place(&mut harness, 0, center);
    assert!(harness.ui.borrow().undo_enabled);
    assert!(!harness.ui.borrow().redo_enabled);

    harness.editor.handle_event(UiEvent::UndoRequested);
    assert!(!harness.ui.borrow().undo_enabled);
    assert!(harness.ui.borrow().redo_enabled);

    harness.editor.handle_event(UiEvent::RedoRequested);
    assert!(harness.ui.borrow().undo_enabled);
    assert!(!harness.ui.borrow().redo_enabled);
}

#[test]
fn test_scene_survives_a_restart() {
    let mut harness = TestHarness::new();
    let center = harness.screen_center();
    spawn_and_place(&mut harness, 0, center);
    spawn_and_place(&mut harness, 2, Vec2::new(800.0, 1200.0));

    let before: Vec<(usize, Vec3)> = harness
        .editor
        .scene()
        .objects
        .iter()
        .map(|object| (object.asset_id, object.position))
        .collect();

    // Boot a second editor over the same store.
    let ui = Rc::new(RefCell::new(RecordingUi::default()));
    let restarted = Editor::new(
        EditorConfig::default(),
        test_assets(),
        Box::new(MemoryPersistence::from_store(harness.store.clone())),
        Box::new(SharedUi(ui)),
    );

    let after: Vec<(usize, Vec3)> = restarted
        .scene()
        .objects
        .iter()
        .map(|object| (object.asset_id, object.position))
        .collect();

    assert_eq!(before.len(), 2);
    for ((asset_before, pos_before), (asset_after, pos_after)) in before.iter().zip(&after) {
        assert_eq!(asset_before, asset_after);
        assert!((*pos_before - *pos_after).length() < 1e-6);
    }
}

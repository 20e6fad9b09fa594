use floorkit_core::{shared_event_bus, EditorEvent, EventBusConfig, EventFilter, HistoryEvent};
use floorkit_designer::model::RectangleParams;
use floorkit_designer::{
    AddShapeCommand, AdditionalData, EditorDocument, MoveShapeCommand, Point, RemoveShapeCommand,
    ShapeKind, StackSizes, UndoRedoManager,
};
use std::sync::{Arc, Mutex};

fn add_rectangle() -> AddShapeCommand {
    AddShapeCommand::new(
        ShapeKind::Rectangle,
        RectangleParams::new(0.0, 0.0, 10.0, 10.0).to_value(),
        AdditionalData::default(),
    )
}

#[tokio::test]
async fn test_push_clears_redo() {
    let mut doc = EditorDocument::new();
    let mut history = UndoRedoManager::new();

    history.execute_command(add_rectangle(), &mut doc).await.unwrap();
    history.execute_command(add_rectangle(), &mut doc).await.unwrap();
    history.undo(&mut doc).await.unwrap();
    assert!(history.can_redo());
    assert_eq!(history.redo_name(), Some("Add Shape"));

    history.push_command(add_rectangle());
    assert!(!history.can_redo());
    assert_eq!(history.stack_sizes(), StackSizes { undo: 2, redo: 0 });
}

#[tokio::test]
async fn test_empty_stacks_report_false() {
    let mut doc = EditorDocument::new();
    let mut history = UndoRedoManager::new();
    assert!(!history.undo(&mut doc).await.unwrap());
    assert!(!history.redo(&mut doc).await.unwrap());
    assert_eq!(history.undo_name(), None);
}

#[tokio::test]
async fn test_oldest_commands_are_dropped() {
    let mut doc = EditorDocument::new();
    let mut history = UndoRedoManager::with_max_stack_size(3);

    let mut ids = Vec::new();
    for _ in 0..5 {
        let output = history.execute_command(add_rectangle(), &mut doc).await.unwrap();
        ids.push(output.shape_id().unwrap());
    }
    assert_eq!(history.stack_sizes().undo, 3);

    while history.undo(&mut doc).await.unwrap() {}
    // The first two creations fell off the stack and stay in the document.
    assert_eq!(doc.shapes.len(), 2);
    assert!(doc.shapes.contains(ids[0]));
    assert!(doc.shapes.contains(ids[1]));
    assert!(!doc.shapes.contains(ids[4]));
}

#[tokio::test]
async fn test_undo_redo_move_sequence() {
    let mut doc = EditorDocument::new();
    let mut history = UndoRedoManager::new();
    let id = history
        .execute_command(add_rectangle(), &mut doc)
        .await
        .unwrap()
        .shape_id()
        .unwrap();

    let steps = [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)];
    for pair in steps.windows(2) {
        history
            .execute_command(MoveShapeCommand::new(id, pair[0], pair[1]), &mut doc)
            .await
            .unwrap();
    }

    history.undo(&mut doc).await.unwrap();
    assert_eq!(doc.shapes.shape(id).unwrap().position(), Point::new(10.0, 0.0));
    history.undo(&mut doc).await.unwrap();
    assert_eq!(doc.shapes.shape(id).unwrap().position(), Point::new(0.0, 0.0));
    history.redo(&mut doc).await.unwrap();
    history.redo(&mut doc).await.unwrap();
    assert_eq!(doc.shapes.shape(id).unwrap().position(), Point::new(10.0, 10.0));
    assert!(!history.can_redo());
}

#[tokio::test]
async fn test_recorded_removal_undoes() {
    let mut doc = EditorDocument::new();
    let mut history = UndoRedoManager::new();
    let id = history
        .execute_command(add_rectangle(), &mut doc)
        .await
        .unwrap()
        .shape_id()
        .unwrap();

    history
        .execute_command(RemoveShapeCommand::new(id), &mut doc)
        .await
        .unwrap();
    assert!(doc.shapes.is_empty());

    history.undo(&mut doc).await.unwrap();
    assert!(doc.shapes.contains(id));
    history.redo(&mut doc).await.unwrap();
    assert!(!doc.shapes.contains(id));
}

#[tokio::test]
async fn test_events_published_per_operation() {
    let bus = shared_event_bus(EventBusConfig::default());
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    bus.subscribe(EventFilter::All, move |event| {
        if let EditorEvent::History(event) = event {
            sink.lock().unwrap().push(event);
        }
    });

    let mut doc = EditorDocument::new();
    let mut history = UndoRedoManager::new().with_event_bus(Arc::clone(&bus));
    history.execute_command(add_rectangle(), &mut doc).await.unwrap();
    history.undo(&mut doc).await.unwrap();
    history.undo(&mut doc).await.unwrap();
    history.redo(&mut doc).await.unwrap();
    history.clear();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            HistoryEvent::CommandPushed,
            HistoryEvent::UndoPerformed,
            HistoryEvent::RedoPerformed,
        ]
    );
    assert!(!history.can_undo());
}

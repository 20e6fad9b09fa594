use async_trait::async_trait;
use floorkit_designer::model::{EllipseParams, RectangleParams};
use floorkit_core::{CommandError, Error, ShapeId};
use floorkit_designer::{
    AddShapeCommand, AdditionalData, Command, CommandOutput, CompositeCommand, Dimensions,
    EditorCommand, EditorDocument, EditorState, MoveShapeCommand, PlanDocument, Point,
    RemoveShapeCommand, ResizeShapeCommand, RotateShapeCommand, ShapeKind, UndoRedoManager,
};

async fn rectangle(doc: &mut EditorDocument, x: f64, y: f64, w: f64, h: f64) -> ShapeId {
    AddShapeCommand::new(
        ShapeKind::Rectangle,
        RectangleParams::new(x, y, w, h).to_value(),
        AdditionalData::default(),
    )
    .execute(doc)
    .await
    .unwrap()
    .shape_id()
    .unwrap()
}

#[tokio::test]
async fn test_move_rectangle_through_history() {
    let mut state = EditorState::default();
    let id = rectangle(&mut state.document, 0.0, 0.0, 100.0, 100.0).await;

    state
        .execute(MoveShapeCommand::new(
            id,
            Point::new(0.0, 0.0),
            Point::new(50.0, 50.0),
        ))
        .await
        .unwrap();
    assert_eq!(state.document.shapes.shape(id).unwrap().position(), Point::new(50.0, 50.0));

    assert!(state.undo().await.unwrap());
    assert_eq!(state.document.shapes.shape(id).unwrap().position(), Point::new(0.0, 0.0));

    assert!(state.redo().await.unwrap());
    assert_eq!(state.document.shapes.shape(id).unwrap().position(), Point::new(50.0, 50.0));
}

#[tokio::test]
async fn test_undo_restores_initial_state() {
    let mut doc = EditorDocument::new();
    let id = rectangle(&mut doc, 10.0, 20.0, 30.0, 40.0).await;
    let before = PlanDocument::from_document(&doc);

    let mut commands: Vec<EditorCommand> = vec![
        MoveShapeCommand::new(id, Point::new(10.0, 20.0), Point::new(-5.0, 7.5)).into(),
        ResizeShapeCommand::new(
            id,
            Dimensions { x: 10.0, y: 20.0, width: 30.0, height: 40.0 },
            Dimensions { x: 0.0, y: 0.0, width: 60.0, height: 15.0 },
        )
        .into(),
        RotateShapeCommand::new(id, 0.0, std::f64::consts::FRAC_PI_2).into(),
        RemoveShapeCommand::new(id).into(),
    ];

    for command in &mut commands {
        command.execute(&mut doc).await.unwrap();
        command.undo(&mut doc).await.unwrap();
        assert_eq!(PlanDocument::from_document(&doc), before, "{}", command.name());
    }
}

#[tokio::test]
async fn test_removal_undo_keeps_drawing_order() {
    let mut state = EditorState::default();
    let room = rectangle(&mut state.document, 0.0, 0.0, 100.0, 100.0).await;
    state
        .execute(AddShapeCommand::new(
            ShapeKind::Ellipse,
            serde_json::to_value(EllipseParams::default()).unwrap(),
            AdditionalData::default(),
        ))
        .await
        .unwrap();
    let before = state.export_plan();

    state.execute(RemoveShapeCommand::new(room)).await.unwrap();
    state.undo().await.unwrap();
    assert_eq!(state.export_plan(), before);

    state.redo().await.unwrap();
    state.undo().await.unwrap();
    assert_eq!(state.export_plan(), before);
}

#[tokio::test]
async fn test_reexecute_matches_single_execute() {
    let mut once = EditorDocument::new();
    let mut twice = EditorDocument::new();
    let additional = AdditionalData::default().with_id(ShapeId::new());

    let params = EllipseParams::default();
    let params = serde_json::to_value(&params).unwrap();
    let mut a = AddShapeCommand::new(ShapeKind::Ellipse, params.clone(), additional.clone());
    let mut b = AddShapeCommand::new(ShapeKind::Ellipse, params, additional);

    a.execute(&mut once).await.unwrap();
    b.execute(&mut twice).await.unwrap();
    b.undo(&mut twice).await.unwrap();
    assert!(twice.shapes.is_empty());
    b.execute(&mut twice).await.unwrap();

    assert_eq!(PlanDocument::from_document(&once), PlanDocument::from_document(&twice));
}

#[tokio::test]
async fn test_composite_reverses_order_sensitive_steps() {
    let mut doc = EditorDocument::new();
    let id = rectangle(&mut doc, 0.0, 0.0, 100.0, 100.0).await;
    let before = PlanDocument::from_document(&doc);

    let mut composite = CompositeCommand::named("Transform")
        .with_command(MoveShapeCommand::new(id, Point::new(0.0, 0.0), Point::new(50.0, 50.0)))
        .with_command(ResizeShapeCommand::new(
            id,
            Dimensions { x: 50.0, y: 50.0, width: 100.0, height: 100.0 },
            Dimensions { x: 50.0, y: 50.0, width: 20.0, height: 10.0 },
        ))
        .with_command(RotateShapeCommand::new(id, 0.0, 1.0));

    composite.execute(&mut doc).await.unwrap();
    let transform = doc.shapes.shape(id).unwrap().transform;
    assert_eq!((transform.x, transform.y), (50.0, 50.0));
    assert_eq!((transform.width, transform.height), (20.0, 10.0));
    assert_eq!(transform.rotation, 1.0);

    composite.undo(&mut doc).await.unwrap();
    assert_eq!(PlanDocument::from_document(&doc), before);
}

#[tokio::test]
async fn test_remove_twice_is_guarded() {
    let mut doc = EditorDocument::new();
    let id = rectangle(&mut doc, 0.0, 0.0, 10.0, 10.0).await;
    let mut remove = RemoveShapeCommand::new(id);

    assert_eq!(remove.execute(&mut doc).await.unwrap(), CommandOutput::Removed(true));
    assert_eq!(remove.execute(&mut doc).await.unwrap(), CommandOutput::Removed(false));
    remove.undo(&mut doc).await.unwrap();
    assert!(doc.shapes.contains(id));
}

#[tokio::test]
async fn test_history_holds_custom_commands() {
    struct Counter;

    #[async_trait]
    impl Command for Counter {
        fn name(&self) -> &str {
            "Counter"
        }

        async fn execute(&mut self, _doc: &mut EditorDocument) -> floorkit_core::Result<CommandOutput> {
            Ok(CommandOutput::None)
        }
    }

    let mut doc = EditorDocument::new();
    let mut history = UndoRedoManager::new();
    history
        .execute_command(EditorCommand::custom(Counter), &mut doc)
        .await
        .unwrap();
    assert_eq!(history.undo_name(), Some("Counter"));

    let err = history.undo(&mut doc).await.unwrap_err();
    assert!(err.is_programmer_error());
    assert!(matches!(
        err,
        Error::Command(CommandError::Unimplemented { method: "undo", .. })
    ));
    assert!(history.can_undo());
    assert!(!history.can_redo());
}

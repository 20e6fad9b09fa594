use floorkit_core::ShapeId;
use floorkit_designer::{
    builders, Command, CornerCreateCommand, CornerRemoveCommand, EditorCommand, EditorDocument,
    EditorState, PlanDocument, Point, ShapeKind, WallCreateCommand, WallRemoveCommand,
};
use floorkit_settings::FloorSettings;

async fn corner(doc: &mut EditorDocument, x: f64, y: f64) -> ShapeId {
    CornerCreateCommand::at(Point::new(x, y), &FloorSettings::default())
        .execute(doc)
        .await
        .unwrap()
        .shape_id()
        .unwrap()
}

#[tokio::test]
async fn test_corner_create_is_atomic() {
    let mut doc = EditorDocument::new();
    let mut create = CornerCreateCommand::at(Point::new(5.0, 5.0), &FloorSettings::default());

    let id = create.execute(&mut doc).await.unwrap().shape_id().unwrap();
    assert_eq!(create.corner_id(), Some(id));
    assert!(doc.shapes.contains(id));
    assert!(doc.corners.contains(id));
    assert_eq!(doc.shapes.shape(id).unwrap().kind(), ShapeKind::Arc);

    create.undo(&mut doc).await.unwrap();
    assert!(!doc.shapes.contains(id));
    assert!(!doc.corners.contains(id));

    // Redo brings back the same corner.
    assert_eq!(create.execute(&mut doc).await.unwrap().shape_id(), Some(id));
    assert!(doc.shapes.contains(id) && doc.corners.contains(id));
}

#[tokio::test]
async fn test_corner_remove_round_trip() {
    let mut doc = EditorDocument::new();
    let id = corner(&mut doc, 0.0, 0.0).await;
    let mut remove = CornerRemoveCommand::new(id);

    remove.execute(&mut doc).await.unwrap();
    assert!(!doc.shapes.contains(id));
    assert!(!doc.corners.contains(id));

    remove.undo(&mut doc).await.unwrap();
    assert!(doc.shapes.contains(id));
    assert!(doc.corners.contains(id));
    assert_eq!(doc.shapes.shape(id).unwrap().position(), Point::new(0.0, 0.0));
}

#[tokio::test]
async fn test_wall_create_and_remove() {
    let settings = FloorSettings::default();
    let mut doc = EditorDocument::new();
    let a = corner(&mut doc, 0.0, 0.0).await;
    let b = corner(&mut doc, 200.0, 0.0).await;

    let mut create =
        WallCreateCommand::between(a, b, Point::new(0.0, 0.0), Point::new(200.0, 0.0), &settings);
    let wall = create.execute(&mut doc).await.unwrap().shape_id().unwrap();
    assert_eq!(create.wall_id(), Some(wall));
    assert_eq!(create.corners(), (a, b));
    assert_eq!(doc.corners.wall_between(a, b), Some(wall));
    assert_eq!(doc.corners.wall_between(b, a), Some(wall));
    assert_eq!(doc.shapes.shape(wall).unwrap().kind(), ShapeKind::Line);

    let mut remove = WallRemoveCommand::new(wall, a, b);
    remove.execute(&mut doc).await.unwrap();
    assert!(!doc.shapes.contains(wall));
    assert_eq!(doc.corners.wall_between(a, b), None);
    assert_eq!(doc.corners.degree(a), 0);

    remove.undo(&mut doc).await.unwrap();
    assert_eq!(doc.corners.wall_between(b, a), Some(wall));

    create.undo(&mut doc).await.unwrap();
    assert!(!doc.shapes.contains(wall));
    assert_eq!(doc.corners.wall_between(a, b), None);
}

#[tokio::test]
async fn test_room_built_and_undone_through_state() {
    let mut state = EditorState::default();
    let settings = state.config.floor.clone();
    let points = [(0.0, 0.0), (300.0, 0.0), (300.0, 200.0), (0.0, 200.0)];

    let mut corners = Vec::new();
    for (x, y) in points {
        let output = state
            .execute(builders::create_corner(Some(Point::new(x, y)), &settings))
            .await
            .unwrap();
        corners.push(output.shape_id().unwrap());
    }
    for i in 0..corners.len() {
        let (a, b) = (corners[i], corners[(i + 1) % corners.len()]);
        let command = builders::create_wall(&state.document, a, b, &settings).unwrap();
        state.execute(command).await.unwrap();
    }
    assert_eq!(state.document.corners.len(), 4);
    assert_eq!(state.document.shapes.len(), 8);
    assert!(corners.iter().all(|c| state.document.corners.degree(*c) == 2));

    let wall_segments = |state: &EditorState| -> Vec<_> {
        state
            .document
            .corners
            .edges()
            .map(|(_, _, wall)| (wall, state.document.shapes.shape(wall).unwrap().segment()))
            .collect()
    };
    let before = wall_segments(&state);

    // Dragging a corner drags both of its walls.
    let command = builders::move_shape(
        &state.document,
        corners[0],
        Point::new(0.0, 0.0),
        Point::new(-20.0, -20.0),
    )
    .unwrap();
    assert!(matches!(command, EditorCommand::Composite(_)));
    state.execute(command).await.unwrap();
    for (_, wall) in state.document.corners.neighbours(corners[0]) {
        let segment = state.document.shapes.shape(wall).unwrap().segment().unwrap();
        assert!(segment.from == Point::new(-20.0, -20.0) || segment.to == Point::new(-20.0, -20.0));
    }

    state.undo().await.unwrap();
    assert_eq!(wall_segments(&state), before);

    while state.undo().await.unwrap() {}
    assert!(state.document.shapes.is_empty());
    assert!(state.document.corners.is_empty());
    assert_eq!(state.history.stack_sizes().redo, 9);
}

#[tokio::test]
async fn test_remove_corner_restores_walls() {
    let mut state = EditorState::default();
    let settings = state.config.floor.clone();
    let a = state
        .execute(builders::create_corner(Some(Point::new(0.0, 0.0)), &settings))
        .await
        .unwrap()
        .shape_id()
        .unwrap();
    let b = state
        .execute(builders::create_corner(None, &settings))
        .await
        .unwrap()
        .shape_id()
        .unwrap();
    assert_eq!(state.document.shapes.shape(b).unwrap().position(), Point::new(100.0, 100.0));

    let wall = builders::create_wall(&state.document, a, b, &settings).unwrap();
    state.execute(wall).await.unwrap();
    let before = PlanDocument::from_document(&state.document);

    let remove = builders::remove_shape(&state.document, a).unwrap();
    state.execute(remove).await.unwrap();
    assert!(!state.document.corners.contains(a));
    assert_eq!(state.document.corners.degree(b), 0);
    assert_eq!(state.document.shapes.len(), 1);

    state.undo().await.unwrap();
    assert!(state.document.corners.wall_between(a, b).is_some());
    let mut restored = PlanDocument::from_document(&state.document).shapes;
    let mut expected = before.shapes;
    restored.sort_by_key(|entry| entry.shape.id());
    expected.sort_by_key(|entry| entry.shape.id());
    assert_eq!(restored, expected);
}

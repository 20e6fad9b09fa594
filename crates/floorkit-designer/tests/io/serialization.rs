use floorkit_designer::model::{PolygonParams, RectangleParams};
use floorkit_designer::{
    builders, AddLabelCommand, AddShapeCommand, AdditionalData, EditorState, FloorDocument,
    PlanDocument, Point, RotateShapeCommand, ShapeKind, ShapeSnapshot,
};
use serde_json::json;
use tempfile::TempDir;

async fn furnished_state() -> EditorState {
    let mut state = EditorState::default();
    let room = state
        .execute(AddShapeCommand::new(
            ShapeKind::Rectangle,
            RectangleParams::new(10.0, 10.0, 200.0, 100.0).to_value(),
            AdditionalData::default().with_metadata("zone", json!("living")),
        ))
        .await
        .unwrap()
        .shape_id()
        .unwrap();
    state
        .execute(RotateShapeCommand::new(room, 0.0, 0.25))
        .await
        .unwrap();
    state.execute(AddLabelCommand::new(room, "Living")).await.unwrap();

    let polygon = PolygonParams {
        points: vec![0.0, 0.0, 40.0, 0.0, 20.0, 30.0],
        ..PolygonParams::default()
    };
    state
        .execute(AddShapeCommand::new(
            ShapeKind::Polygon,
            serde_json::to_value(&polygon).unwrap(),
            AdditionalData::default(),
        ))
        .await
        .unwrap();
    state
}

#[tokio::test]
async fn test_plan_round_trip_through_file() {
    let mut state = furnished_state().await;
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plan.json");

    state.save_plan(&path).unwrap();
    assert!(!state.is_modified);
    let saved = state.export_plan();

    let mut restored = EditorState::default();
    restored.load_plan(&path).unwrap();
    assert_eq!(restored.export_plan(), saved);
    assert!(!restored.can_undo());

    let room = saved.shapes[0].shape.id();
    let shape = restored.document.shapes.shape(room).unwrap();
    assert_eq!(shape.transform.rotation, 0.25);
    assert_eq!(shape.metadata_str("zone"), Some("living"));
    assert_eq!(restored.document.labels.label(room).unwrap().text, "Living");
}

#[tokio::test]
async fn test_snapshot_json_layout() {
    let state = furnished_state().await;
    let plan = state.export_plan();
    let value = serde_json::to_value(&plan.shapes[1].shape).unwrap();

    assert_eq!(value["metadata"]["type"], "polygon");
    assert_eq!(value["specific"]["points"], json!([0.0, 0.0, 40.0, 0.0, 20.0, 30.0]));
    assert!(value["additionalData"]["id"].is_string());

    let parsed = ShapeSnapshot::from_json(&value.to_string()).unwrap();
    assert_eq!(parsed, plan.shapes[1].shape);
}

#[test]
fn test_malformed_plan_is_rejected() {
    assert!(PlanDocument::from_json("{ \"shapes\": 3 }").is_err());

    let dir = TempDir::new().unwrap();
    assert!(PlanDocument::load_from_file(dir.path().join("missing.json")).is_err());
}

#[tokio::test]
async fn test_floor_export_and_import() {
    let mut state = EditorState::default();
    let settings = state.config.floor.clone();
    let mut corners = Vec::new();
    for (x, y) in [(0.0, 0.0), (400.0, 0.0), (400.0, 300.0)] {
        let id = state
            .execute(builders::create_corner(Some(Point::new(x, y)), &settings))
            .await
            .unwrap()
            .shape_id()
            .unwrap();
        corners.push(id);
    }
    for (a, b) in [(0, 1), (1, 2)] {
        let wall = builders::create_wall(&state.document, corners[a], corners[b], &settings).unwrap();
        state.execute(wall).await.unwrap();
    }

    let floor = state.export_floor("First floor").unwrap();
    assert_eq!(floor.corners.len(), 3);
    assert_eq!(floor.walls.len(), 4);
    assert!(state.export_floor("").is_err());

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("floor.json");
    floor.save_to_file(&path).unwrap();
    let loaded = FloorDocument::load_from_file(&path).unwrap();
    assert_eq!(loaded, floor);

    let mut imported = EditorState::default();
    let import = imported.import_floor(&loaded).await.unwrap();
    assert_eq!(import.corners.len(), 3);
    assert_eq!(import.walls.len(), 2);
    assert_eq!(imported.document.shapes.len(), 5);
    assert!(!imported.can_undo());

    let middle = import.corners[&2];
    assert_eq!(imported.document.corners.degree(middle), 2);
    assert_eq!(
        imported.document.shapes.shape(middle).unwrap().position(),
        Point::new(400.0, 0.0)
    );
}

#[tokio::test]
async fn test_floor_import_skips_unknown_corners() {
    let floor = FloorDocument::from_json(
        &json!({
            "name": "Annex",
            "corners": [
                { "id": 1, "positionX": 0.0, "positionY": 0.0 },
                { "id": 2, "positionX": 50.0, "positionY": 0.0 }
            ],
            "walls": [
                { "startCornerId": 1, "endCornerId": 2 },
                { "startCornerId": 2, "endCornerId": 7 }
            ]
        })
        .to_string(),
    )
    .unwrap();
    assert!(floor.validate().is_err());

    let mut state = EditorState::default();
    let import = state.import_floor(&floor).await.unwrap();
    assert_eq!(import.walls.len(), 1);
    assert_eq!(state.document.corners.len(), 2);
}

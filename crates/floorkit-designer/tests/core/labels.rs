use floorkit_core::{text_callback, ShapeId};
use floorkit_designer::model::RectangleParams;
use floorkit_designer::{
    builders, AddLabelCommand, AdditionalData, Command, CommandOutput, EditLabelCommand,
    EditorState, MoveLabelCommand, Point, RemoveLabelCommand, ShapeKind,
};
use serde_json::json;
use std::sync::{Arc, Mutex};

async fn state_with_rectangle() -> (EditorState, ShapeId) {
    let mut state = EditorState::default();
    let id = state
        .execute_named(
            "addShape",
            &json!({ "type": "rectangle", "params": { "x": 40.0, "y": 60.0 } }),
        )
        .await
        .unwrap()
        .shape_id()
        .unwrap();
    (state, id)
}

fn label_text(state: &EditorState, id: ShapeId) -> Option<String> {
    state.document.labels.label(id).map(|label| label.text.clone())
}

#[tokio::test]
async fn test_add_then_edit_label_undoes_in_order() {
    let (mut state, id) = state_with_rectangle().await;

    state.execute(AddLabelCommand::new(id, "zoneA")).await.unwrap();
    state
        .execute(EditLabelCommand::new(id, "zoneA", "zoneB"))
        .await
        .unwrap();
    assert_eq!(label_text(&state, id).as_deref(), Some("zoneB"));

    state.undo().await.unwrap();
    assert_eq!(label_text(&state, id).as_deref(), Some("zoneA"));

    state.undo().await.unwrap();
    assert_eq!(label_text(&state, id), None);
    assert!(state.document.shapes.contains(id));
}

#[tokio::test]
async fn test_label_starts_at_shape_position() {
    let (mut state, id) = state_with_rectangle().await;
    state
        .execute(AddLabelCommand::new(id, "Kitchen").with_color("#ff0000"))
        .await
        .unwrap();

    let label = state.document.labels.label(id).unwrap();
    assert_eq!(label.position, Point::new(40.0, 60.0));
    assert_eq!(label.style.color, "#ff0000");
    assert_eq!(label.style.font_size, state.config.labels.font_size);
}

#[tokio::test]
async fn test_remove_missing_label_is_a_no_op() {
    let (mut state, id) = state_with_rectangle().await;
    let before = state.export_plan();

    let mut remove = RemoveLabelCommand::new(id);
    let output = remove.execute(&mut state.document).await.unwrap();
    assert_eq!(output, CommandOutput::Removed(false));

    remove.undo(&mut state.document).await.unwrap();
    assert!(state.document.labels.is_empty());
    assert_eq!(state.export_plan(), before);
}

#[tokio::test]
async fn test_remove_label_restores_snapshot() {
    let (mut state, id) = state_with_rectangle().await;
    state.execute(AddLabelCommand::new(id, "Hall")).await.unwrap();
    state
        .execute(MoveLabelCommand::new(id, Point::new(40.0, 60.0), Point::new(0.0, 0.0)))
        .await
        .unwrap();

    state.execute(RemoveLabelCommand::new(id)).await.unwrap();
    assert!(state.document.labels.label(id).is_none());

    state.undo().await.unwrap();
    let label = state.document.labels.label(id).unwrap();
    assert_eq!(label.text, "Hall");
    assert_eq!(label.position, Point::new(0.0, 0.0));
}

#[tokio::test]
async fn test_edit_callback_sees_every_change() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let on_update = text_callback(move |owner, text| {
        sink.lock().unwrap().push((owner, text.to_string()));
    });

    let mut state = EditorState::default();
    let command = builders::add_labeled_shape(
        ShapeKind::Rectangle,
        RectangleParams::default().to_value(),
        AdditionalData::default(),
        "Bedroom",
        None,
        Some(on_update),
    );
    let id = state.execute(command).await.unwrap().shape_id().unwrap();

    let edit = builders::edit_label(&state.document, id, "Office", None).unwrap();
    state.execute(edit).await.unwrap();
    state.undo().await.unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![(id, "Office".to_string()), (id, "Bedroom".to_string())]
    );
}

#[tokio::test]
async fn test_moving_labelled_shape_moves_label() {
    let (mut state, id) = state_with_rectangle().await;
    state.execute(AddLabelCommand::new(id, "Hall")).await.unwrap();

    let command =
        builders::move_shape(&state.document, id, Point::new(40.0, 60.0), Point::new(10.0, 10.0))
            .unwrap();
    state.execute(command).await.unwrap();
    assert_eq!(state.document.labels.label(id).unwrap().position, Point::new(10.0, 10.0));

    state.undo().await.unwrap();
    assert_eq!(state.document.labels.label(id).unwrap().position, Point::new(40.0, 60.0));
    assert_eq!(state.document.shapes.shape(id).unwrap().position(), Point::new(40.0, 60.0));
}

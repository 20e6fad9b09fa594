use floorkit_designer::model::RectangleParams;
use floorkit_designer::{
    AddShapeCommand, AdditionalData, Command, CompositeCommand, Dimensions, EditorDocument,
    MoveShapeCommand, PlanDocument, Point, ResizeShapeCommand, RotateShapeCommand, ShapeKind,
    UndoRedoManager,
};
use proptest::prelude::*;

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(future)
}

fn coordinate() -> impl Strategy<Value = f64> {
    -1000.0..1000.0f64
}

fn point() -> impl Strategy<Value = Point> {
    (coordinate(), coordinate()).prop_map(|(x, y)| Point::new(x, y))
}

async fn doc_with_rectangle(origin: Point) -> (EditorDocument, floorkit_core::ShapeId) {
    let mut doc = EditorDocument::new();
    let id = AddShapeCommand::new(
        ShapeKind::Rectangle,
        RectangleParams::new(origin.x, origin.y, 100.0, 50.0).to_value(),
        AdditionalData::default(),
    )
    .execute(&mut doc)
    .await
    .unwrap()
    .shape_id()
    .unwrap();
    (doc, id)
}

proptest! {
    #[test]
    fn prop_move_undo_restores(origin in point(), target in point()) {
        block_on(async {
            let (mut doc, id) = doc_with_rectangle(origin).await;
            let before = PlanDocument::from_document(&doc);

            let mut command = MoveShapeCommand::new(id, origin, target);
            command.execute(&mut doc).await.unwrap();
            prop_assert_eq!(doc.shapes.shape(id).unwrap().position(), target);
            command.undo(&mut doc).await.unwrap();
            prop_assert_eq!(PlanDocument::from_document(&doc), before);
            Ok(())
        })?;
    }

    #[test]
    fn prop_transform_composite_round_trip(
        origin in point(),
        target in point(),
        width in 1.0..500.0f64,
        height in 1.0..500.0f64,
        rotation in -6.3..6.3f64,
    ) {
        block_on(async {
            let (mut doc, id) = doc_with_rectangle(origin).await;
            let before = PlanDocument::from_document(&doc);

            let mut composite = CompositeCommand::new()
                .with_command(MoveShapeCommand::new(id, origin, target))
                .with_command(ResizeShapeCommand::new(
                    id,
                    Dimensions { x: target.x, y: target.y, width: 100.0, height: 50.0 },
                    Dimensions { x: target.x, y: target.y, width, height },
                ))
                .with_command(RotateShapeCommand::new(id, 0.0, rotation));

            composite.execute(&mut doc).await.unwrap();
            let after = PlanDocument::from_document(&doc);
            composite.undo(&mut doc).await.unwrap();
            prop_assert_eq!(PlanDocument::from_document(&doc), before);

            // Re-executing lands where the first execution did.
            composite.execute(&mut doc).await.unwrap();
            prop_assert_eq!(PlanDocument::from_document(&doc), after);
            Ok(())
        })?;
    }

    #[test]
    fn prop_history_depth_is_bounded(max in 1usize..8, pushes in 0usize..20) {
        block_on(async {
            let (mut doc, id) = doc_with_rectangle(Point::new(0.0, 0.0)).await;
            let mut history = UndoRedoManager::with_max_stack_size(max);
            for step in 0..pushes {
                let from = Point::new(step as f64, 0.0);
                let to = Point::new(step as f64 + 1.0, 0.0);
                history
                    .execute_command(MoveShapeCommand::new(id, from, to), &mut doc)
                    .await
                    .unwrap();
            }
            prop_assert_eq!(history.stack_sizes().undo, pushes.min(max));
            prop_assert!(!history.can_redo());
            Ok(())
        })?;
    }
}

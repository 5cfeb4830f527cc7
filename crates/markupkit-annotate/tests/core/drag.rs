use markupkit_annotate::{
    AnnotationKind, AnnotationStore, Category, CoordinateMapper, DragController, DragHandle,
    Priority,
};
use markupkit_core::{ContainerRect, PercentPoint, PixelPoint};

#[test]
fn test_anchor_drag_out_of_bounds_stores_clamped() {
    let mapper = CoordinateMapper::new(ContainerRect::with_size(1000.0, 1000.0));
    let mut store = AnnotationStore::new();
    let id = store
        .create(AnnotationKind::postit_at(PercentPoint::new(50.0, 50.0)))
        .unwrap();
    store
        .commit_edit(id, "anchor", Priority::Medium, Category::Change)
        .unwrap();

    let mut drag = DragController::new();
    drag.begin(
        store.get(id).unwrap(),
        DragHandle::Target,
        PixelPoint::new(500.0, 500.0),
        &mapper,
    )
    .unwrap();
    // (-10%, 150%) of a 1000px square.
    drag.pointer_move(PixelPoint::new(-100.0, 1500.0), &mapper);
    let update = drag.release().unwrap();
    assert!(store
        .get_mut(update.annotation_id)
        .unwrap()
        .set_handle_position(update.handle, update.position));

    assert_eq!(
        store.get(id).unwrap().handle_position(DragHandle::Target),
        Some(PercentPoint::new(0.0, 100.0))
    );
}

#[test]
fn test_arrow_end_drag_follows_pointer() {
    let mapper = CoordinateMapper::new(ContainerRect::new(100.0, 100.0, 400.0, 200.0));
    let mut store = AnnotationStore::new();
    let id = store
        .create(AnnotationKind::arrow(
            PercentPoint::new(0.0, 0.0),
            PercentPoint::new(10.0, 10.0),
        ))
        .unwrap();

    let mut drag = DragController::new();
    drag.begin(
        store.get(id).unwrap(),
        DragHandle::ArrowEnd,
        PixelPoint::new(140.0, 120.0),
        &mapper,
    )
    .unwrap();
    let update = drag.pointer_move(PixelPoint::new(300.0, 200.0), &mapper).unwrap();
    assert_eq!(update.position, PercentPoint::new(50.0, 50.0));
}

use markupkit_annotate::{
    Annotation, AnnotationKind, AnnotationStore, Category, CoordinateMapper, EditOutcome,
    FreehandCapture, Priority,
};
use markupkit_core::{AnnotationError, ContainerRect, PercentPoint, PixelPoint};
use proptest::prelude::*;

fn commit(store: &mut AnnotationStore, kind: AnnotationKind, text: &str) -> u64 {
    let id = store.create(kind).unwrap();
    store
        .commit_edit(id, text, Priority::Medium, Category::Change)
        .unwrap();
    id
}

#[test]
fn test_ids_unique_and_increasing_across_deletes() {
    let mut store = AnnotationStore::new();
    let mut seen = Vec::new();
    for i in 0..10 {
        let id = commit(
            &mut store,
            AnnotationKind::postit_at(PercentPoint::new(i as f64, i as f64)),
            "note",
        );
        if i % 3 == 0 {
            store.delete(id).unwrap();
        }
        seen.push(id);
    }
    assert!(seen.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_postit_session_without_text_leaves_count_unchanged() {
    let mut store = AnnotationStore::new();
    commit(
        &mut store,
        AnnotationKind::postit_at(PercentPoint::new(10.0, 10.0)),
        "existing",
    );
    let before = store.len();

    let id = store
        .create(AnnotationKind::postit_at(PercentPoint::new(50.0, 50.0)))
        .unwrap();
    assert_eq!(store.len(), before + 1);
    assert_eq!(store.close_edit(), Some(EditOutcome::RolledBack));
    assert_eq!(store.len(), before);
    assert!(store.get(id).is_none());
}

fn cloud_from_gesture(mapper: &CoordinateMapper, gesture: &[(f64, f64)]) -> AnnotationKind {
    let mut capture = FreehandCapture::new();
    let mut points = gesture.iter().map(|&(x, y)| PixelPoint::new(x, y));
    if let Some(first) = points.next() {
        capture.begin(first);
    }
    for p in points {
        capture.extend(p);
    }
    capture.finish(mapper).unwrap().into_kind()
}

proptest! {
    #[test]
    fn prop_json_roundtrip_is_identity(
        width in 200.0f64..3000.0,
        height in 200.0f64..3000.0,
        gestures in proptest::collection::vec(
            proptest::collection::vec((-50.0f64..3100.0, -50.0f64..3100.0), 5..12),
            1..4,
        ),
        target in (0.0f64..100.0, 0.0f64..100.0),
        text in "[a-zA-Z ]{1,20}",
    ) {
        let mapper = CoordinateMapper::new(ContainerRect::new(12.0, 34.0, width, height));
        let mut store = AnnotationStore::new();
        for gesture in &gestures {
            commit(&mut store, cloud_from_gesture(&mapper, gesture), &text);
        }
        let anchor = mapper.to_percent(PixelPoint::new(
            12.0 + target.0 * width / 100.0,
            34.0 + target.1 * height / 100.0,
        ));
        commit(&mut store, AnnotationKind::postit_at(anchor), &text);
        commit(
            &mut store,
            AnnotationKind::arrow(PercentPoint::new(target.0, target.1), anchor),
            &text,
        );

        let json = serde_json::to_string(store.list()).unwrap();
        let back: Vec<Annotation> = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back.as_slice(), store.list());
    }
}

#[test]
fn test_deserialize_fills_defaults() {
    let json = r#"[{"id":7,"type":"postit","target":{"x":1.0,"y":2.0},"note":{"x":6.0,"y":2.0},"timestamp":"2024-01-01T00:00:00Z"}]"#;
    let list: Vec<Annotation> = serde_json::from_str(json).unwrap();
    assert_eq!(list[0].priority, Priority::Medium);
    assert_eq!(list[0].category, Category::Change);
    assert!(list[0].has_empty_text());
}

#[test]
fn test_reopened_annotation_removed_when_text_cleared() {
    let mut store = AnnotationStore::new();
    let id = commit(
        &mut store,
        AnnotationKind::postit_at(PercentPoint::new(5.0, 5.0)),
        "temp",
    );
    store.open_edit(id).unwrap();
    let outcome = store
        .commit_edit(id, "", Priority::Low, Category::Remove)
        .unwrap();
    assert_eq!(outcome, EditOutcome::Removed);
    assert!(outcome.is_mutation());
    assert!(store.is_empty());
}

#[test]
fn test_unknown_ids_are_not_found() {
    let mut store = AnnotationStore::new();
    assert_eq!(store.delete(42), Err(AnnotationError::NotFound { id: 42 }));
    assert_eq!(store.open_edit(42), Err(AnnotationError::NotFound { id: 42 }));
}

#[test]
fn test_clear_removes_everything() {
    let mut store = AnnotationStore::new();
    for _ in 0..3 {
        commit(
            &mut store,
            AnnotationKind::postit_at(PercentPoint::new(1.0, 1.0)),
            "x",
        );
    }
    assert_eq!(store.clear(), 3);
    assert!(store.is_empty());
    assert_eq!(store.next_id(), 4);
}

use markupkit_annotate::{Category, Priority};
use markupkit_core::{ContainerRect, PixelPoint};
use markupkit_session::{MemoryStore, Session, SessionConfig};

fn session() -> Session<MemoryStore> {
    let config = SessionConfig {
        container: ContainerRect::with_size(1000.0, 800.0),
        ..SessionConfig::default()
    };
    Session::open(config, MemoryStore::new()).unwrap()
}

fn add(session: &mut Session<MemoryStore>, x: f64, text: &str) {
    let id = session.click(PixelPoint::new(x, 200.0)).unwrap();
    session
        .commit_edit(id, text, Priority::Medium, Category::Change)
        .unwrap();
}

fn texts(session: &Session<MemoryStore>) -> Vec<String> {
    session.annotations().iter().map(|a| a.text.clone()).collect()
}

#[test]
fn test_undo_redo_then_new_commit_drops_redo() {
    let mut s = session();
    add(&mut s, 100.0, "A");
    add(&mut s, 300.0, "B");
    assert_eq!(texts(&s), ["A", "B"]);

    assert!(s.undo().unwrap());
    assert_eq!(texts(&s), ["A"]);

    assert!(s.redo().unwrap());
    assert_eq!(texts(&s), ["A", "B"]);

    assert!(s.undo().unwrap());
    add(&mut s, 500.0, "C");
    assert_eq!(texts(&s), ["A", "C"]);

    assert!(!s.redo().unwrap());
    assert_eq!(texts(&s), ["A", "C"]);
}

#[test]
fn test_ids_stay_unique_across_undo() {
    let mut s = session();
    add(&mut s, 100.0, "A");
    add(&mut s, 300.0, "B");
    s.undo().unwrap();
    add(&mut s, 500.0, "C");
    let ids: Vec<u64> = s.annotations().iter().map(|a| a.id).collect();
    assert_eq!(ids, [1, 3]);
}

#[test]
fn test_abandoned_postit_commits_nothing() {
    let mut s = session();
    add(&mut s, 100.0, "A");
    let entries = s.history().len();

    s.click(PixelPoint::new(600.0, 600.0)).unwrap();
    assert_eq!(s.annotations().len(), 2);
    s.close_edit();
    assert_eq!(s.annotations().len(), 1);
    assert_eq!(s.history().len(), entries);
}

#[test]
fn test_undo_restores_styles_and_annotations_together() {
    let mut s = session();
    add(&mut s, 100.0, "A");
    s.set_property("body", "color", "red").unwrap();
    add(&mut s, 300.0, "B");

    s.undo().unwrap();
    assert_eq!(texts(&s), ["A"]);
    assert_eq!(s.design().get("body", "color"), Some("red"));

    s.undo().unwrap();
    assert!(s.design().is_empty());
    assert_eq!(texts(&s), ["A"]);
}

#[test]
fn test_undo_closes_open_editor_first() {
    let mut s = session();
    add(&mut s, 100.0, "A");
    s.click(PixelPoint::new(300.0, 300.0)).unwrap();
    assert!(s.editing().is_some());

    s.undo().unwrap();
    assert!(s.editing().is_none());
    assert!(s.annotations().is_empty());
}

use markupkit_annotate::{Category, DragHandle, EditOutcome, Priority};
use markupkit_core::constants::{ANNOTATIONS_KEY, DESIGN_CONFIG_KEY};
use markupkit_core::{ContainerRect, PixelPoint};
use markupkit_session::{FileStore, KeyValueStore, MemoryStore, Session, SessionConfig};
use tempfile::TempDir;

fn config() -> SessionConfig {
    SessionConfig {
        container: ContainerRect::with_size(1000.0, 1000.0),
        ..SessionConfig::default()
    }
}

#[test]
fn test_every_commit_writes_both_blobs() {
    let mut s = Session::open(config(), MemoryStore::new()).unwrap();
    let id = s.click(PixelPoint::new(100.0, 100.0)).unwrap();
    assert!(s.storage().get(ANNOTATIONS_KEY).unwrap().is_none());

    s.commit_edit(id, "saved", Priority::High, Category::Add)
        .unwrap();
    let annotations = s.storage().get(ANNOTATIONS_KEY).unwrap().unwrap();
    assert!(annotations.contains("saved"));
    assert!(s.storage().get(DESIGN_CONFIG_KEY).unwrap().is_some());
}

#[test]
fn test_file_store_reopen_restores_state() {
    let dir = TempDir::new().unwrap();

    {
        let mut s = Session::open(config(), FileStore::new(dir.path())).unwrap();
        let id = s.click(PixelPoint::new(300.0, 400.0)).unwrap();
        s.commit_edit(id, "persisted", Priority::Low, Category::Bug)
            .unwrap();
        s.set_property("body", "background-color", "#fff").unwrap();
    }

    assert!(dir.path().join("ds-annotations.json").exists());
    assert!(dir.path().join("ds-design-config.json").exists());

    let mut s = Session::open(config(), FileStore::new(dir.path())).unwrap();
    assert_eq!(s.annotations().len(), 1);
    assert_eq!(s.annotations()[0].text, "persisted");
    assert_eq!(s.design().get("body", "background-color"), Some("#fff"));
    assert!(!s.history().can_undo());

    let id = s.click(PixelPoint::new(500.0, 500.0)).unwrap();
    assert_eq!(id, 2);
}

#[test]
fn test_corrupt_blobs_load_as_empty() {
    let mut storage = MemoryStore::new();
    storage.set(ANNOTATIONS_KEY, "[{\"broken\":").unwrap();
    storage.set(DESIGN_CONFIG_KEY, "42").unwrap();

    let s = Session::open(config(), storage).unwrap();
    assert!(s.annotations().is_empty());
    assert!(s.design().is_empty());
}

#[test]
fn test_discarded_annotation_stays_gone_after_style_change() {
    let mut s = Session::open(config(), MemoryStore::new()).unwrap();
    let id = s.click(PixelPoint::new(200.0, 200.0)).unwrap();
    assert!(s.set_property("body", "color", "red").unwrap());
    assert_eq!(s.discard_edit(id).unwrap(), EditOutcome::RolledBack);
    assert!(s.annotations().is_empty());

    assert!(s.undo().unwrap());
    assert!(s.redo().unwrap());
    assert!(s.annotations().is_empty());
    assert_eq!(s.editing(), None);
    assert_eq!(s.design().get("body", "color"), Some("red"));

    let s = Session::open(config(), s.into_storage()).unwrap();
    assert!(s.annotations().is_empty());
    assert_eq!(s.design().get("body", "color"), Some("red"));
}

#[test]
fn test_discarded_annotation_stays_gone_after_drag() {
    let mut s = Session::open(config(), MemoryStore::new()).unwrap();
    let id = s.click(PixelPoint::new(500.0, 500.0)).unwrap();
    s.begin_drag(id, DragHandle::Note, PixelPoint::new(550.0, 400.0))
        .unwrap();
    s.drag_move(PixelPoint::new(700.0, 300.0));
    assert!(s.drag_release().is_some());
    assert_eq!(s.discard_edit(id).unwrap(), EditOutcome::RolledBack);

    let stored = s.storage().get(ANNOTATIONS_KEY).unwrap().unwrap();
    assert_eq!(stored.trim(), "[]");
    let s = Session::open(config(), s.into_storage()).unwrap();
    assert!(s.annotations().is_empty());
}

#[test]
fn test_last_id_in_blob_is_ignored() {
    let mut storage = MemoryStore::new();
    storage
        .set(
            ANNOTATIONS_KEY,
            r#"[{"id":18446744073709551615,"type":"postit","target":{"x":1.0,"y":2.0},"note":{"x":6.0,"y":2.0},"timestamp":"2024-01-01T00:00:00Z"}]"#,
        )
        .unwrap();

    let mut s = Session::open(config(), storage).unwrap();
    assert!(s.annotations().is_empty());
    assert_eq!(s.click(PixelPoint::new(100.0, 100.0)), Some(1));
}

#[test]
fn test_click_refused_once_ids_run_out() {
    let mut storage = MemoryStore::new();
    storage
        .set(
            ANNOTATIONS_KEY,
            r#"[{"id":18446744073709551614,"type":"postit","text":"last","target":{"x":1.0,"y":2.0},"note":{"x":6.0,"y":2.0},"timestamp":"2024-01-01T00:00:00Z"}]"#,
        )
        .unwrap();

    let mut s = Session::open(config(), storage).unwrap();
    assert_eq!(s.annotations().len(), 1);
    assert_eq!(s.click(PixelPoint::new(100.0, 100.0)), None);
    assert_eq!(s.annotations().len(), 1);
    assert_eq!(s.editing(), None);
}

#[test]
fn test_config_file_roundtrip() {
    let dir = TempDir::new().unwrap();
    let mut config = config();
    config.history_capacity = 12;
    config.capabilities.browse_mode = false;

    for name in ["session.toml", "session.json"] {
        let path = dir.path().join(name);
        config.save_to_file(&path).unwrap();
        let loaded = SessionConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    assert!(config.save_to_file(&dir.path().join("session.yaml")).is_err());
}

use std::cell::RefCell;
use std::rc::Rc;

use markupkit_annotate::{Annotation, Category, DragHandle, DragUpdate, Priority};
use markupkit_core::{ContainerRect, PercentPoint, PixelPoint};
use markupkit_session::{MemoryStore, Session, SessionConfig, SessionListener};

#[derive(Default)]
struct Counts {
    redraws: usize,
    moves: usize,
}

struct Recorder(Rc<RefCell<Counts>>);

impl SessionListener for Recorder {
    fn annotations_changed(&mut self, _annotations: &[Annotation]) {
        self.0.borrow_mut().redraws += 1;
    }

    fn drag_moved(&mut self, _update: &DragUpdate) {
        self.0.borrow_mut().moves += 1;
    }
}

fn session() -> Session<MemoryStore> {
    let config = SessionConfig {
        container: ContainerRect::with_size(1000.0, 1000.0),
        ..SessionConfig::default()
    };
    Session::open(config, MemoryStore::new()).unwrap()
}

#[test]
fn test_drag_commits_once_on_release() {
    let mut s = session();
    let counts = Rc::new(RefCell::new(Counts::default()));
    s.add_listener(Box::new(Recorder(counts.clone())));

    let id = s.click(PixelPoint::new(500.0, 500.0)).unwrap();
    s.commit_edit(id, "move me", Priority::Low, Category::Style)
        .unwrap();
    let entries = s.history().len();

    s.begin_drag(id, DragHandle::Target, PixelPoint::new(500.0, 500.0))
        .unwrap();
    for step in 1..=5 {
        s.drag_move(PixelPoint::new(500.0 - step as f64 * 20.0, 500.0));
    }
    assert_eq!(s.history().len(), entries);
    assert_eq!(counts.borrow().moves, 5);

    s.drag_move(PixelPoint::new(-100.0, 1500.0));
    let update = s.drag_release().unwrap();
    assert_eq!(update.position, PercentPoint::new(0.0, 100.0));
    assert_eq!(s.history().len(), entries + 1);
    assert!(!s.is_dragging());
    assert_eq!(
        s.annotation(id).unwrap().handle_position(DragHandle::Target),
        Some(PercentPoint::new(0.0, 100.0))
    );
}

#[test]
fn test_move_without_drag_is_noop() {
    let mut s = session();
    assert!(s.drag_move(PixelPoint::new(1.0, 1.0)).is_none());
    assert!(s.drag_release().is_none());
    assert_eq!(s.history().len(), 1);
}

#[test]
fn test_resize_keeps_percentages() {
    let mut s = session();
    let id = s.click(PixelPoint::new(250.0, 500.0)).unwrap();
    s.commit_edit(id, "x", Priority::Medium, Category::Change)
        .unwrap();
    s.resize(ContainerRect::with_size(400.0, 200.0));

    let target = s
        .annotation(id)
        .unwrap()
        .handle_position(DragHandle::Target)
        .unwrap();
    assert_eq!(target, PercentPoint::new(25.0, 50.0));
    assert_eq!(
        s.mapper().to_local_pixels(target),
        PixelPoint::new(100.0, 100.0)
    );
}

#[test]
fn test_freehand_gesture_thresholds() {
    let mut s = session();
    s.set_tool(markupkit_session::Tool::Cloud);

    s.freehand_begin(PixelPoint::new(100.0, 100.0));
    for i in 1..4 {
        s.freehand_extend(PixelPoint::new(100.0 + i as f64 * 10.0, 120.0));
    }
    assert!(s.freehand_end().is_none());
    assert!(s.annotations().is_empty());

    s.freehand_begin(PixelPoint::new(100.0, 100.0));
    for i in 1..5 {
        s.freehand_extend(PixelPoint::new(100.0 + i as f64 * 10.0, 120.0));
    }
    let id = s.freehand_end().unwrap();
    assert_eq!(s.annotations().len(), 1);
    assert_eq!(s.editing(), Some(id));
}

#[test]
fn test_delete_cancels_drag_on_removed_annotation() {
    let mut s = session();
    let id = s.click(PixelPoint::new(500.0, 500.0)).unwrap();
    s.commit_edit(id, "doomed", Priority::Medium, Category::Remove)
        .unwrap();
    s.begin_drag(id, DragHandle::Target, PixelPoint::new(500.0, 500.0))
        .unwrap();
    s.drag_move(PixelPoint::new(400.0, 400.0));
    let entries = s.history().len();

    s.delete(id).unwrap();
    assert_eq!(s.history().len(), entries + 1);
    assert!(!s.is_dragging());
    assert!(s.drag_release().is_none());
    assert_eq!(s.history().len(), entries + 1);
}

#[test]
fn test_clear_cancels_drag() {
    let mut s = session();
    let id = s.click(PixelPoint::new(300.0, 300.0)).unwrap();
    s.commit_edit(id, "gone", Priority::Low, Category::Change)
        .unwrap();
    s.begin_drag(id, DragHandle::Note, PixelPoint::new(350.0, 200.0))
        .unwrap();
    let entries = s.history().len();

    assert_eq!(s.clear_annotations(), 1);
    assert!(!s.is_dragging());
    assert!(s.drag_release().is_none());
    assert_eq!(s.history().len(), entries + 1);
}

use std::cell::RefCell;
use std::rc::Rc;

use markupkit_session::{MemoryStore, Session, SessionListener, StatusLevel};
use markupkit_style::{DesignConfig, InjectionOutcome, MemoryPreview, StyleControl};

#[derive(Default)]
struct Seen {
    stylesheets: Vec<String>,
    warnings: Vec<String>,
}

struct Recorder(Rc<RefCell<Seen>>);

impl SessionListener for Recorder {
    fn styles_changed(&mut self, _design: &DesignConfig, stylesheet: &str) {
        self.0.borrow_mut().stylesheets.push(stylesheet.to_string());
    }

    fn status(&mut self, level: StatusLevel, message: &str) {
        if level == StatusLevel::Warning {
            self.0.borrow_mut().warnings.push(message.to_string());
        }
    }
}

#[test]
fn test_each_style_change_recompiles_and_commits() {
    let mut s = Session::with_storage(MemoryStore::new()).unwrap();
    let seen = Rc::new(RefCell::new(Seen::default()));
    s.add_listener(Box::new(Recorder(seen.clone())));

    s.set_control(StyleControl::FontSize, "18").unwrap();
    s.set_control(StyleControl::AccentColor, "#00d4ff").unwrap();
    assert_eq!(s.history().len(), 3);
    assert_eq!(seen.borrow().stylesheets.len(), 2);

    let css = s.compile_stylesheet();
    assert!(css.contains("font-size: 18px !important;"));
    assert!(css.contains("--accent-color: #00d4ff !important;"));

    assert!(s.reset_styles().unwrap());
    assert_eq!(s.compile_stylesheet(), "");
    assert!(!s.reset_styles().unwrap());
    assert_eq!(s.history().len(), 4);
}

#[test]
fn test_cross_origin_preview_degrades_gracefully() {
    let mut s = Session::with_storage(MemoryStore::new()).unwrap();
    let seen = Rc::new(RefCell::new(Seen::default()));
    s.add_listener(Box::new(Recorder(seen.clone())));

    let outcome = s.attach_preview(Box::new(MemoryPreview::cross_origin()));
    assert!(matches!(outcome, InjectionOutcome::Skipped(_)));

    s.set_property("h1", "color", "navy").unwrap();
    assert!(s.compile_stylesheet().contains("h1 {"));
    assert_eq!(seen.borrow().warnings.len(), 2);
}

#[test]
fn test_same_origin_preview_receives_styles() {
    let mut s = Session::with_storage(MemoryStore::new()).unwrap();
    assert!(s
        .attach_preview(Box::new(MemoryPreview::new()))
        .is_applied());
    s.set_custom_css(".banner { display: none; }").unwrap();
    assert!(s.apply_styles().is_applied());
}

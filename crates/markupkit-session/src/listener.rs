//! Render notifications.
//!
//! The session works with no listener attached; listeners only mirror state
//! into a view.

use markupkit_annotate::{Annotation, DragUpdate};
use markupkit_style::DesignConfig;

/// Severity of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
}

/// Receives state changes from a session. Every method defaults to a no-op.
pub trait SessionListener {
    /// The annotation list changed and should be redrawn.
    fn annotations_changed(&mut self, _annotations: &[Annotation]) {}

    /// Style overrides changed; `stylesheet` is the freshly compiled text.
    fn styles_changed(&mut self, _design: &DesignConfig, _stylesheet: &str) {}

    /// A handle moved during a drag. Not recorded in history.
    fn drag_moved(&mut self, _update: &DragUpdate) {}

    /// A user-facing status line.
    fn status(&mut self, _level: StatusLevel, _message: &str) {}
}

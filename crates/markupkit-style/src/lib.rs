//! # MarkupKit Style
//!
//! Visual style editing: per-selector overrides, the control catalog that
//! maps editor inputs onto selectors, the stylesheet compiler and the
//! preview injection seam.

pub mod compiler;
pub mod config;
pub mod controls;
pub mod preview;

pub use compiler::compile;
pub use config::{DesignConfig, PropertyBag};
pub use controls::{with_unit, ControlTarget, StyleControl};
pub use preview::{inject_into, InjectionOutcome, MemoryPreview, PreviewTarget};

//! # MarkupKit
//!
//! Visual design review for live web previews:
//! - Post-it notes, freehand clouds and arrows pinned to the page
//! - Drag-to-reposition with percentage coordinates that survive resizes
//! - A style editor that compiles overrides into an exportable stylesheet
//! - Bounded undo/redo across annotations and styles together
//!
//! ## Architecture
//!
//! MarkupKit is organized as a workspace with multiple crates:
//!
//! 1. **markupkit-core** - Errors, coordinate primitives, constants
//! 2. **markupkit-annotate** - Annotation model, mapper, geometry, store, drag, export
//! 3. **markupkit-style** - Design config, control catalog, compiler, preview seam
//! 4. **markupkit-session** - Session context, history, persistence, configuration
//! 5. **markupkit** - This facade and the command-line binary

pub mod cli;

pub use markupkit_annotate as annotate;
pub use markupkit_session as session;
pub use markupkit_style as style;

pub use markupkit_core::{
    AnnotationError, ContainerRect, Error, PercentPoint, PixelPoint, Result, StorageError,
    StyleError,
};

pub use markupkit_annotate::{
    Annotation, AnnotationId, AnnotationKind, AnnotationStore, Category, CoordinateMapper,
    DragController, DragHandle, ExportFormat, Priority, SubmissionReport,
};

pub use markupkit_style::{compile, DesignConfig, PreviewTarget, StyleControl};

pub use markupkit_session::{
    Capabilities, FileStore, HistoryManager, KeyValueStore, MemoryStore, Session, SessionConfig,
    SessionListener, Tool,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Pretty console output on stderr, so command output on stdout stays clean
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

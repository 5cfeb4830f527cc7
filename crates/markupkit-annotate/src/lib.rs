//! # MarkupKit Annotate
//!
//! Annotation overlay engine: the tagged annotation model, pointer to
//! percentage coordinate mapping, freehand and arrow geometry, the annotation
//! store with its edit sessions, drag handling and export.
//!
//! ## Architecture
//!
//! ```text
//! pointer input
//!   └── CoordinateMapper (client px -> container %)
//!         ├── FreehandCapture / ArrowTool (geometry)
//!         └── DragController (anchor / body drags)
//!               └── AnnotationStore (authoritative list)
//!                     └── export (JSON, markdown, report)
//! ```

pub mod drag;
pub mod export;
pub mod geometry;
pub mod mapper;
pub mod model;
pub mod store;

pub use drag::{ActiveDrag, DragController, DragHandle, DragMode, DragUpdate};
pub use export::{
    export_annotations, markdown_line, markdown_list, ExportFormat, SubmissionReport,
    EMPTY_DESCRIPTION,
};
pub use geometry::{
    arrow_path, arrowhead, centroid, leader_line, outline_pixels, ArrowPath, ArrowTool,
    ArrowToolState, Arrowhead, CloudOutline, FreehandCapture,
};
pub use mapper::CoordinateMapper;
pub use model::{
    cloud_note_position, Annotation, AnnotationId, AnnotationKind, Category, Priority,
};
pub use store::{AnnotationStore, EditOutcome};

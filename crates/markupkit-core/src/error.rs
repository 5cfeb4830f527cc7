//! Error handling for MarkupKit
//!
//! Provides error types for every layer of the engine:
//! - Annotation errors (store, edit sessions, drag handles)
//! - Style errors (design config, preview injection)
//! - Storage errors (persisted blobs)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Annotation error type
///
/// Raised by the annotation store, the edit-session protocol and the drag
/// controller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnnotationError {
    /// No annotation carries the requested id
    #[error("Annotation {id} not found")]
    NotFound {
        /// The id that was looked up.
        id: u64,
    },

    /// An edit operation was issued while no edit session is open
    #[error("No edit session is open")]
    NoEditSession,

    /// An edit operation targeted a different annotation than the open session
    #[error("Edit session is open on annotation {open}, not {requested}")]
    EditSessionMismatch {
        /// The annotation the open session belongs to.
        open: u64,
        /// The annotation the caller addressed.
        requested: u64,
    },

    /// A drag was started on a handle the annotation does not have
    #[error("Annotation {id} has no {handle} handle")]
    InvalidHandle {
        /// The annotation id.
        id: u64,
        /// The handle name.
        handle: String,
    },

    /// A second drag was requested while one is active
    #[error("A drag is already in progress on annotation {id}")]
    DragInProgress {
        /// The annotation currently being dragged.
        id: u64,
    },

    /// An id leaves no room for the next one
    #[error("Annotation id {id} exhausts the id space")]
    IdOverflow {
        /// The offending id.
        id: u64,
    },

    /// A cloud outline was built from too few points
    #[error("Cloud outline needs at least {min} points, got {count}")]
    TooFewPoints {
        /// Number of points supplied.
        count: usize,
        /// Minimum required.
        min: usize,
    },
}

/// Style error type
///
/// Raised by the design config store and the preview injection seam.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleError {
    /// A blank selector was supplied
    #[error("Selector must not be empty")]
    EmptySelector,

    /// A blank property name was supplied
    #[error("Property name must not be empty for selector '{selector}'")]
    EmptyProperty {
        /// The selector the property was addressed to.
        selector: String,
    },

    /// The preview document is cross-origin and cannot receive styles
    #[error("Preview is cross-origin; stylesheet injection skipped")]
    CrossOrigin,

    /// The preview rejected the stylesheet for another reason
    #[error("Stylesheet injection failed: {reason}")]
    InjectionFailed {
        /// Why the injection failed.
        reason: String,
    },
}

/// Storage error type
///
/// Raised by key-value storage backends.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No platform data directory could be resolved
    #[error("No data directory available on this platform")]
    NoDataDir,

    /// A storage key is not usable as a file name
    #[error("Invalid storage key '{key}'")]
    InvalidKey {
        /// The offending key.
        key: String,
    },
}

/// Main error type for MarkupKit
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Annotation error
    #[error(transparent)]
    Annotation(#[from] AnnotationError),

    /// Style error
    #[error(transparent)]
    Style(#[from] StyleError),

    /// Storage error
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A capability is switched off for this session
    #[error("Capability '{capability}' is disabled")]
    CapabilityDisabled {
        /// The disabled capability.
        capability: String,
    },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Create a capability error
    pub fn capability_disabled(capability: impl Into<String>) -> Self {
        Error::CapabilityDisabled {
            capability: capability.into(),
        }
    }

    /// Check if this is an annotation lookup failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Annotation(AnnotationError::NotFound { .. }))
    }

    /// Check if this is a storage error
    pub fn is_storage_error(&self) -> bool {
        matches!(self, Error::Storage(_))
    }

    /// Check if this is a style error
    pub fn is_style_error(&self) -> bool {
        matches!(self, Error::Style(_))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Storage(StorageError::Io(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Storage(StorageError::Json(err))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

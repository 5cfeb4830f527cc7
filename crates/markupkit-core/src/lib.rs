//! # MarkupKit Core
//!
//! Core types, errors, and geometry primitives shared by every MarkupKit crate.
//! Provides the percentage/pixel coordinate types, the unified error hierarchy,
//! and the placement constants.

pub mod constants;
pub mod error;
pub mod geometry;

pub use error::{AnnotationError, Error, Result, StorageError, StyleError};
pub use geometry::{clamp_percent, ContainerRect, PercentPoint, PixelPoint};

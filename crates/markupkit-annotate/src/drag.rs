//! Drag interaction for annotation anchors and note cards.
//!
//! A drag moves exactly one handle of one annotation. Anchor handles follow
//! the pointer directly and clamp to the full container; the note card keeps
//! the grab offset it was picked up with and clamps to the visible-card
//! bounds. Only one drag may be active at a time.

use std::fmt;

use markupkit_core::constants::{ANCHOR_MAX, NOTE_MAX_X, NOTE_MAX_Y};
use markupkit_core::{AnnotationError, PercentPoint, PixelPoint};

use crate::mapper::CoordinateMapper;
use crate::model::{Annotation, AnnotationId};

/// A draggable part of an annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragHandle {
    /// The post-it's target anchor.
    Target,
    /// The arrow's start anchor.
    ArrowStart,
    /// The arrow's end anchor.
    ArrowEnd,
    /// The note card of a post-it or cloud.
    Note,
}

impl DragHandle {
    /// The clamping/offset mode this handle drags in.
    pub fn mode(&self) -> DragMode {
        match self {
            Self::Target | Self::ArrowStart | Self::ArrowEnd => DragMode::Anchor,
            Self::Note => DragMode::Body,
        }
    }
}

impl fmt::Display for DragHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Target => write!(f, "target"),
            Self::ArrowStart => write!(f, "arrow-start"),
            Self::ArrowEnd => write!(f, "arrow-end"),
            Self::Note => write!(f, "note"),
        }
    }
}

/// How pointer positions translate into handle positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    /// Zero offset, clamped to `[0, 100] x [0, 100]`.
    Anchor,
    /// Grab offset preserved, clamped to `[0, 85] x [0, 90]`.
    Body,
}

impl DragMode {
    fn bounds(&self) -> (f64, f64) {
        match self {
            Self::Anchor => (ANCHOR_MAX, ANCHOR_MAX),
            Self::Body => (NOTE_MAX_X, NOTE_MAX_Y),
        }
    }
}

/// The drag currently holding the lock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveDrag {
    pub annotation_id: AnnotationId,
    pub handle: DragHandle,
    /// Pointer minus the handle's top-left at drag start, in pixels.
    pub offset: PixelPoint,
    /// Latest clamped position of the handle.
    pub position: PercentPoint,
}

/// A handle position produced by a move or release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragUpdate {
    pub annotation_id: AnnotationId,
    pub handle: DragHandle,
    pub position: PercentPoint,
}

/// Single-slot drag state machine: `idle -> dragging -> idle`.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    active: Option<ActiveDrag>,
}

impl DragController {
    /// Creates an idle controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a drag holds the lock.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// The active drag, if any.
    pub fn active(&self) -> Option<&ActiveDrag> {
        self.active.as_ref()
    }

    /// Starts dragging `handle` of `annotation` from a pointer-down at `pointer`.
    pub fn begin(
        &mut self,
        annotation: &Annotation,
        handle: DragHandle,
        pointer: PixelPoint,
        mapper: &CoordinateMapper,
    ) -> Result<(), AnnotationError> {
        if let Some(active) = &self.active {
            return Err(AnnotationError::DragInProgress {
                id: active.annotation_id,
            });
        }
        let position =
            annotation
                .handle_position(handle)
                .ok_or_else(|| AnnotationError::InvalidHandle {
                    id: annotation.id,
                    handle: handle.to_string(),
                })?;
        let offset = match handle.mode() {
            DragMode::Anchor => PixelPoint::default(),
            DragMode::Body => pointer.offset_from(&mapper.to_client(position)),
        };
        tracing::debug!(
            "Drag started on annotation {} ({}) at {}",
            annotation.id,
            handle,
            position
        );
        self.active = Some(ActiveDrag {
            annotation_id: annotation.id,
            handle,
            offset,
            position,
        });
        Ok(())
    }

    /// Tracks a pointer move. Returns the new live position, or `None` when idle.
    pub fn pointer_move(
        &mut self,
        pointer: PixelPoint,
        mapper: &CoordinateMapper,
    ) -> Option<DragUpdate> {
        let active = self.active.as_mut()?;
        let grabbed = PixelPoint::new(pointer.x - active.offset.x, pointer.y - active.offset.y);
        let (max_x, max_y) = active.handle.mode().bounds();
        active.position = mapper
            .to_percent_unclamped(grabbed)
            .clamped(max_x, max_y)
            .rounded();
        Some(DragUpdate {
            annotation_id: active.annotation_id,
            handle: active.handle,
            position: active.position,
        })
    }

    /// Ends the drag and releases the lock. Returns the final position, or
    /// `None` when no drag was active.
    pub fn release(&mut self) -> Option<DragUpdate> {
        let active = self.active.take()?;
        tracing::debug!(
            "Drag released on annotation {} ({}) at {}",
            active.annotation_id,
            active.handle,
            active.position
        );
        Some(DragUpdate {
            annotation_id: active.annotation_id,
            handle: active.handle,
            position: active.position,
        })
    }
}

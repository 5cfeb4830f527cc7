//! Annotation data model.
//!
//! An annotation is one of three explicitly tagged kinds (post-it, arrow,
//! cloud) plus the metadata every kind shares. Coordinates are always
//! container percentages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use markupkit_core::constants::{
    CLOUD_NOTE_INITIAL_MAX_X, CLOUD_NOTE_OFFSET_X, CLOUD_NOTE_OFFSET_Y, NOTE_INITIAL_MIN_Y,
    NOTE_MAX_X, NOTE_MAX_Y, POSTIT_NOTE_INITIAL_MAX_X, POSTIT_NOTE_OFFSET_X, POSTIT_NOTE_OFFSET_Y,
};
use markupkit_core::PercentPoint;

use crate::drag::DragHandle;

/// Unique annotation identifier, strictly increasing in creation order.
pub type AnnotationId = u64;

/// How urgent an annotation is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Glyph used in markdown exports.
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::High => "🔴",
            Self::Medium => "🟡",
            Self::Low => "🟢",
        }
    }

    /// Accent color used when rendering the annotation.
    pub fn color(&self) -> &'static str {
        match self {
            Self::High => "#e94560",
            Self::Medium => "#ffc107",
            Self::Low => "#00d97e",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

/// What kind of change an annotation asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Change,
    Bug,
    Add,
    Remove,
    Style,
}

impl Category {
    /// Icon shown next to the category on note cards.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Change => "✏️",
            Self::Bug => "🐛",
            Self::Add => "➕",
            Self::Remove => "➖",
            Self::Style => "🎨",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Change => write!(f, "change"),
            Self::Bug => write!(f, "bug"),
            Self::Add => write!(f, "add"),
            Self::Remove => write!(f, "remove"),
            Self::Style => write!(f, "style"),
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "change" => Ok(Self::Change),
            "bug" => Ok(Self::Bug),
            "add" => Ok(Self::Add),
            "remove" => Ok(Self::Remove),
            "style" => Ok(Self::Style),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

/// Kind-specific geometry of an annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AnnotationKind {
    /// A note card with a leader line to a target anchor.
    Postit {
        target: PercentPoint,
        note: PercentPoint,
    },
    /// A straight arrow between two anchors.
    Arrow {
        start: PercentPoint,
        end: PercentPoint,
    },
    /// A freehand outline with a note placed near its centroid.
    Cloud {
        points: Vec<PercentPoint>,
        note: PercentPoint,
    },
}

impl AnnotationKind {
    /// Builds a post-it for a click at `click`, placing the note up and to
    /// the right of the target.
    pub fn postit_at(click: PercentPoint) -> Self {
        let target = click.clamped_anchor();
        let note = PercentPoint::new(
            (target.x + POSTIT_NOTE_OFFSET_X).min(POSTIT_NOTE_INITIAL_MAX_X),
            (target.y + POSTIT_NOTE_OFFSET_Y).max(NOTE_INITIAL_MIN_Y),
        )
        .clamped(NOTE_MAX_X, NOTE_MAX_Y);
        Self::Postit { target, note }
    }

    /// Builds an arrow between two anchors.
    pub fn arrow(start: PercentPoint, end: PercentPoint) -> Self {
        Self::Arrow {
            start: start.clamped_anchor(),
            end: end.clamped_anchor(),
        }
    }

    /// Lower-case kind name, matching the serialized tag.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Postit { .. } => "postit",
            Self::Arrow { .. } => "arrow",
            Self::Cloud { .. } => "cloud",
        }
    }
}

/// Note position for a cloud outline with the given centroid.
pub fn cloud_note_position(centroid: PercentPoint) -> PercentPoint {
    PercentPoint::new(
        (centroid.x + CLOUD_NOTE_OFFSET_X).min(CLOUD_NOTE_INITIAL_MAX_X),
        (centroid.y + CLOUD_NOTE_OFFSET_Y).max(NOTE_INITIAL_MIN_Y),
    )
    .clamped(NOTE_MAX_X, NOTE_MAX_Y)
    .rounded()
}

/// A single annotation record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: AnnotationId,
    #[serde(flatten)]
    pub kind: AnnotationKind,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub category: Category,
    pub timestamp: DateTime<Utc>,
}

impl Annotation {
    /// Creates an annotation with empty text and default metadata.
    pub fn new(id: AnnotationId, kind: AnnotationKind) -> Self {
        Self {
            id,
            kind,
            text: String::new(),
            priority: Priority::default(),
            category: Category::default(),
            timestamp: Utc::now(),
        }
    }

    /// True while the annotation carries no description.
    pub fn has_empty_text(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Position of the note card, for kinds that have one.
    pub fn note(&self) -> Option<PercentPoint> {
        match &self.kind {
            AnnotationKind::Postit { note, .. } | AnnotationKind::Cloud { note, .. } => {
                Some(*note)
            }
            AnnotationKind::Arrow { .. } => None,
        }
    }

    /// Current position of a drag handle, or `None` if this kind lacks it.
    pub fn handle_position(&self, handle: DragHandle) -> Option<PercentPoint> {
        match (&self.kind, handle) {
            (AnnotationKind::Postit { target, .. }, DragHandle::Target) => Some(*target),
            (AnnotationKind::Arrow { start, .. }, DragHandle::ArrowStart) => Some(*start),
            (AnnotationKind::Arrow { end, .. }, DragHandle::ArrowEnd) => Some(*end),
            (_, DragHandle::Note) => self.note(),
            _ => None,
        }
    }

    /// Moves a drag handle. Returns false if this kind lacks the handle.
    pub fn set_handle_position(&mut self, handle: DragHandle, position: PercentPoint) -> bool {
        match (&mut self.kind, handle) {
            (AnnotationKind::Postit { target, .. }, DragHandle::Target) => *target = position,
            (AnnotationKind::Arrow { start, .. }, DragHandle::ArrowStart) => *start = position,
            (AnnotationKind::Arrow { end, .. }, DragHandle::ArrowEnd) => *end = position,
            (AnnotationKind::Postit { note, .. }, DragHandle::Note)
            | (AnnotationKind::Cloud { note, .. }, DragHandle::Note) => *note = position,
            _ => return false,
        }
        true
    }
}

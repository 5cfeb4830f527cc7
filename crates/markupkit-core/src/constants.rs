//! Placement bounds and geometry constants.
//!
//! All bounds are expressed in container percentages unless the name says
//! otherwise.

/// Upper bound for anchor coordinates (both axes).
pub const ANCHOR_MAX: f64 = 100.0;

/// Horizontal limit for a note's top-left corner so the card stays visible.
pub const NOTE_MAX_X: f64 = 85.0;

/// Vertical limit for a note's top-left corner so the card stays visible.
pub const NOTE_MAX_Y: f64 = 90.0;

/// Horizontal offset of a freshly placed post-it note from its target.
pub const POSTIT_NOTE_OFFSET_X: f64 = 5.0;

/// Vertical offset of a freshly placed post-it note from its target.
pub const POSTIT_NOTE_OFFSET_Y: f64 = -10.0;

/// Rightmost initial position of a post-it note.
pub const POSTIT_NOTE_INITIAL_MAX_X: f64 = 80.0;

/// Horizontal offset of a cloud note from the outline centroid.
pub const CLOUD_NOTE_OFFSET_X: f64 = 10.0;

/// Vertical offset of a cloud note from the outline centroid.
pub const CLOUD_NOTE_OFFSET_Y: f64 = -10.0;

/// Rightmost initial position of a cloud note.
pub const CLOUD_NOTE_INITIAL_MAX_X: f64 = 75.0;

/// Topmost initial position of any note.
pub const NOTE_INITIAL_MIN_Y: f64 = 2.0;

/// Minimum sampled points for a freehand gesture to become a cloud.
pub const MIN_FREEHAND_POINTS: usize = 5;

/// Distance in pixels from the arrow tip back to the arrowhead base.
pub const ARROWHEAD_LENGTH_PX: f64 = 12.0;

/// Half-width in pixels of the arrowhead base.
pub const ARROWHEAD_HALF_WIDTH_PX: f64 = 6.0;

/// Arrows shorter than this (in pixels) are drawn without a head.
pub const ARROWHEAD_MIN_LENGTH_PX: f64 = 10.0;

/// Pixel offset from a note's top-left corner to where its leader line ends.
pub const LEADER_NOTE_OFFSET_PX: (f64, f64) = (75.0, 15.0);

/// Default number of snapshots retained by the history engine.
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Storage key for the annotation list blob.
pub const ANNOTATIONS_KEY: &str = "ds-annotations";

/// Storage key for the design config blob.
pub const DESIGN_CONFIG_KEY: &str = "ds-design-config";

//! Coordinate primitives.
//!
//! Annotations live in container-relative percentage space so they survive
//! container resizes and device-width changes. Pixel space only exists
//! transiently while handling pointer input or rendering.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::ANCHOR_MAX;

/// Clamp a percentage into `[0, max]`. NaN collapses to 0.
pub fn clamp_percent(value: f64, max: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, max)
}

/// A position expressed as a percentage of the container size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PercentPoint {
    pub x: f64,
    pub y: f64,
}

impl PercentPoint {
    /// Creates a new percentage point without clamping.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns this point clamped into `[0, max_x] x [0, max_y]`.
    pub fn clamped(self, max_x: f64, max_y: f64) -> Self {
        Self {
            x: clamp_percent(self.x, max_x),
            y: clamp_percent(self.y, max_y),
        }
    }

    /// Returns this point clamped into the anchor range `[0, 100]`.
    pub fn clamped_anchor(self) -> Self {
        self.clamped(ANCHOR_MAX, ANCHOR_MAX)
    }

    /// Rounds both coordinates to two decimal places.
    pub fn rounded(self) -> Self {
        Self {
            x: (self.x * 100.0).round() / 100.0,
            y: (self.y * 100.0).round() / 100.0,
        }
    }

    /// Midpoint between two percentage points.
    pub fn midpoint(&self, other: &PercentPoint) -> PercentPoint {
        PercentPoint::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

impl fmt::Display for PercentPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}%, {:.2}%)", self.x, self.y)
    }
}

/// A position in pixels, either client space or container-local space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    /// Creates a new pixel point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &PixelPoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Component-wise difference `self - other`.
    pub fn offset_from(&self, other: &PixelPoint) -> PixelPoint {
        PixelPoint::new(self.x - other.x, self.y - other.y)
    }
}

/// The measured bounding rectangle of the preview container, in client pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ContainerRect {
    /// Creates a new container rectangle.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Creates a rectangle anchored at the client origin.
    pub fn with_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// True when the container has no usable area.
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }

    /// Top-left corner in client space.
    pub fn origin(&self) -> PixelPoint {
        PixelPoint::new(self.left, self.top)
    }
}

impl Default for ContainerRect {
    fn default() -> Self {
        Self::with_size(1280.0, 800.0)
    }
}

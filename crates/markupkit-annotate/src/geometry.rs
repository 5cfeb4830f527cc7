//! Freehand outlines, two-click arrows and render geometry.
//!
//! Render geometry (arrowheads, leader lines, outline polylines) is always
//! recomputed from stored percentages against the mapper's current
//! container size. Nothing here caches pixels.

use markupkit_core::constants::{
    ARROWHEAD_HALF_WIDTH_PX, ARROWHEAD_LENGTH_PX, ARROWHEAD_MIN_LENGTH_PX, LEADER_NOTE_OFFSET_PX,
    MIN_FREEHAND_POINTS,
};
use markupkit_core::{AnnotationError, PercentPoint, PixelPoint};

use crate::mapper::CoordinateMapper;
use crate::model::{cloud_note_position, AnnotationKind};

/// Arithmetic mean of a set of points, or `None` if the set is empty.
pub fn centroid(points: &[PercentPoint]) -> Option<PercentPoint> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Some(PercentPoint::new(sx / n, sy / n))
}

/// A committed freehand outline, ready to become a cloud annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct CloudOutline {
    pub points: Vec<PercentPoint>,
    pub centroid: PercentPoint,
    pub note: PercentPoint,
}

impl CloudOutline {
    /// Builds an outline from percentage points, requiring at least
    /// `min_points` of them.
    pub fn from_points(
        points: Vec<PercentPoint>,
        min_points: usize,
    ) -> Result<Self, AnnotationError> {
        let min = min_points.max(1);
        if points.len() < min {
            return Err(AnnotationError::TooFewPoints {
                count: points.len(),
                min,
            });
        }
        let centroid = centroid(&points).ok_or(AnnotationError::TooFewPoints { count: 0, min })?;
        let note = cloud_note_position(centroid);
        Ok(Self {
            points,
            centroid,
            note,
        })
    }

    /// Converts the outline into a cloud annotation kind.
    pub fn into_kind(self) -> AnnotationKind {
        AnnotationKind::Cloud {
            points: self.points,
            note: self.note,
        }
    }
}

/// Collects pointer samples for a freehand gesture.
#[derive(Debug, Clone)]
pub struct FreehandCapture {
    points: Vec<PixelPoint>,
    active: bool,
    min_points: usize,
}

impl FreehandCapture {
    /// Creates a capture with the default point threshold.
    pub fn new() -> Self {
        Self::with_min_points(MIN_FREEHAND_POINTS)
    }

    /// Creates a capture that requires `min_points` samples to commit.
    pub fn with_min_points(min_points: usize) -> Self {
        Self {
            points: Vec::new(),
            active: false,
            min_points: min_points.max(1),
        }
    }

    /// Starts a new gesture at a client position, dropping any previous samples.
    pub fn begin(&mut self, client: PixelPoint) {
        self.points.clear();
        self.points.push(client);
        self.active = true;
    }

    /// Appends a sample. Ignored when no gesture is active.
    pub fn extend(&mut self, client: PixelPoint) {
        if self.active {
            self.points.push(client);
        }
    }

    /// Whether a gesture is in progress.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Number of samples collected so far.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when no samples are held.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Raw samples of the gesture in progress, for live preview drawing.
    pub fn samples(&self) -> &[PixelPoint] {
        &self.points
    }

    /// Ends the gesture. Returns the outline if enough samples were taken;
    /// otherwise the gesture is dropped silently.
    pub fn finish(&mut self, mapper: &CoordinateMapper) -> Option<CloudOutline> {
        let was_active = std::mem::replace(&mut self.active, false);
        let samples = std::mem::take(&mut self.points);
        if !was_active {
            return None;
        }
        if samples.len() < self.min_points {
            tracing::debug!(
                "Freehand gesture discarded: {} of {} points",
                samples.len(),
                self.min_points
            );
            return None;
        }
        let points = samples.into_iter().map(|p| mapper.to_percent(p)).collect();
        CloudOutline::from_points(points, self.min_points).ok()
    }
}

impl Default for FreehandCapture {
    fn default() -> Self {
        Self::new()
    }
}

/// State of the two-click arrow tool.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ArrowToolState {
    #[default]
    Idle,
    StartCaptured(PercentPoint),
}

/// Two-click arrow construction: first click sets the start, second commits.
#[derive(Debug, Clone, Default)]
pub struct ArrowTool {
    state: ArrowToolState,
}

impl ArrowTool {
    /// Creates an idle arrow tool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> ArrowToolState {
        self.state
    }

    /// Start point captured by the first click, if any.
    pub fn pending_start(&self) -> Option<PercentPoint> {
        match self.state {
            ArrowToolState::StartCaptured(start) => Some(start),
            ArrowToolState::Idle => None,
        }
    }

    /// Feeds a click. Returns `(start, end)` when the second click commits.
    pub fn click(&mut self, point: PercentPoint) -> Option<(PercentPoint, PercentPoint)> {
        match self.state {
            ArrowToolState::Idle => {
                self.state = ArrowToolState::StartCaptured(point);
                None
            }
            ArrowToolState::StartCaptured(start) => {
                self.state = ArrowToolState::Idle;
                Some((start, point))
            }
        }
    }

    /// Drops a captured start point.
    pub fn reset(&mut self) {
        self.state = ArrowToolState::Idle;
    }
}

/// Arrowhead triangle in container-local pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrowhead {
    pub tip: PixelPoint,
    pub left: PixelPoint,
    pub right: PixelPoint,
}

impl Arrowhead {
    /// Polygon vertices in drawing order.
    pub fn points(&self) -> [PixelPoint; 3] {
        [self.tip, self.left, self.right]
    }
}

/// Computes the arrowhead for a shaft from `start` to `end` in pixels.
///
/// Returns `None` for shafts shorter than the minimum drawable length.
pub fn arrowhead(start: PixelPoint, end: PixelPoint) -> Option<Arrowhead> {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let len = (dx * dx + dy * dy).sqrt();
    if len.is_nan() || len <= ARROWHEAD_MIN_LENGTH_PX {
        return None;
    }
    let (ux, uy) = (dx / len, dy / len);
    let base = PixelPoint::new(end.x - ux * ARROWHEAD_LENGTH_PX, end.y - uy * ARROWHEAD_LENGTH_PX);
    let (px, py) = (-uy * ARROWHEAD_HALF_WIDTH_PX, ux * ARROWHEAD_HALF_WIDTH_PX);
    Some(Arrowhead {
        tip: end,
        left: PixelPoint::new(base.x + px, base.y + py),
        right: PixelPoint::new(base.x - px, base.y - py),
    })
}

/// Render geometry for an arrow annotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowPath {
    pub start: PixelPoint,
    pub end: PixelPoint,
    pub head: Option<Arrowhead>,
    /// Where the arrow's label card is centered, in percentages.
    pub label: PercentPoint,
}

/// Builds an arrow's render geometry against the current container size.
pub fn arrow_path(start: PercentPoint, end: PercentPoint, mapper: &CoordinateMapper) -> ArrowPath {
    let start_px = mapper.to_local_pixels(start);
    let end_px = mapper.to_local_pixels(end);
    ArrowPath {
        start: start_px,
        end: end_px,
        head: arrowhead(start_px, end_px),
        label: start.midpoint(&end),
    }
}

/// Leader line from a post-it's target anchor to its note card, in pixels.
pub fn leader_line(
    target: PercentPoint,
    note: PercentPoint,
    mapper: &CoordinateMapper,
) -> (PixelPoint, PixelPoint) {
    let from = mapper.to_local_pixels(target);
    let note_px = mapper.to_local_pixels(note);
    let (ox, oy) = LEADER_NOTE_OFFSET_PX;
    (from, PixelPoint::new(note_px.x + ox, note_px.y + oy))
}

/// Cloud outline as a closed polyline in container-local pixels.
pub fn outline_pixels(points: &[PercentPoint], mapper: &CoordinateMapper) -> Vec<PixelPoint> {
    points.iter().map(|p| mapper.to_local_pixels(*p)).collect()
}

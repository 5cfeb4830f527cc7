//! Coordinate mapping between pointer positions and container percentages.
//!
//! Pointer events arrive in client pixels. Annotations are stored as
//! percentages of the preview container so they survive resizes and
//! device-width changes. The mapper owns the only copy of the container's
//! measured rectangle; pixel positions are always derived from it on demand.
//!
//! Formula:
//! ```text
//! x% = (client_x - left) / width * 100
//! y% = (client_y - top) / height * 100
//! ```

use markupkit_core::constants::ANCHOR_MAX;
use markupkit_core::{ContainerRect, PercentPoint, PixelPoint};

/// Maps client pixels to container percentages and back.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateMapper {
    rect: ContainerRect,
}

impl CoordinateMapper {
    /// Creates a mapper for the given container rectangle.
    pub fn new(rect: ContainerRect) -> Self {
        Self { rect }
    }

    /// Gets the current container rectangle.
    pub fn rect(&self) -> ContainerRect {
        self.rect
    }

    /// Gets the container width in pixels.
    pub fn width(&self) -> f64 {
        self.rect.width
    }

    /// Gets the container height in pixels.
    pub fn height(&self) -> f64 {
        self.rect.height
    }

    /// Replaces the container rectangle (resize observer or device toggle).
    pub fn resize(&mut self, rect: ContainerRect) {
        if rect != self.rect {
            tracing::debug!(
                "Container resized from {}x{} to {}x{}",
                self.rect.width,
                self.rect.height,
                rect.width,
                rect.height
            );
        }
        self.rect = rect;
    }

    /// Converts a client position to percentages without clamping.
    ///
    /// A degenerate container maps every position to the origin.
    pub fn to_percent_unclamped(&self, client: PixelPoint) -> PercentPoint {
        if self.rect.is_degenerate() {
            return PercentPoint::default();
        }
        PercentPoint::new(
            (client.x - self.rect.left) / self.rect.width * 100.0,
            (client.y - self.rect.top) / self.rect.height * 100.0,
        )
    }

    /// Converts a client position to percentages clamped into `[0, 100]`,
    /// rounded to two decimals.
    pub fn to_percent(&self, client: PixelPoint) -> PercentPoint {
        self.to_percent_unclamped(client)
            .clamped(ANCHOR_MAX, ANCHOR_MAX)
            .rounded()
    }

    /// Converts percentages to container-local pixels.
    pub fn to_local_pixels(&self, point: PercentPoint) -> PixelPoint {
        PixelPoint::new(
            point.x / 100.0 * self.rect.width,
            point.y / 100.0 * self.rect.height,
        )
    }

    /// Converts percentages to client pixels.
    pub fn to_client(&self, point: PercentPoint) -> PixelPoint {
        let local = self.to_local_pixels(point);
        PixelPoint::new(local.x + self.rect.left, local.y + self.rect.top)
    }
}

impl Default for CoordinateMapper {
    fn default() -> Self {
        Self::new(ContainerRect::default())
    }
}

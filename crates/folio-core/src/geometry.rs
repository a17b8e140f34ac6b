#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Coordinates are CSS pixels relative to the viewport, matching what a host
//! reads from a row's bounding client rect and a pointer event.

use serde::{Deserialize, Serialize};

/// Pointer location reported with a drag event.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

impl PointerPosition {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Which half of a row the pointer is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalHalf {
    Top,
    Bottom,
}

/// A bounding box for hit testing rows and areas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: f64,
    /// Top edge (inclusive).
    pub y: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from origin with given size.
    #[inline]
    pub const fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Vertical midpoint.
    #[inline]
    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Check if the rectangle has zero (or negative) area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub fn contains(&self, point: PointerPosition) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Classify a pointer against the vertical midpoint of this rectangle.
    ///
    /// The upper half maps to [`VerticalHalf::Top`]; the midpoint itself and
    /// everything below it map to [`VerticalHalf::Bottom`]. Pointers outside the
    /// rectangle are classified by the same rule rather than rejected, because
    /// drag-over events can report coordinates a pixel past the row edge.
    #[inline]
    pub fn vertical_half(&self, pointer: PointerPosition) -> VerticalHalf {
        if pointer.y < self.center_y() {
            VerticalHalf::Top
        } else {
            VerticalHalf::Bottom
        }
    }
}

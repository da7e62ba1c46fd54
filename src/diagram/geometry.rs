//! Diagram Geometry
//!
//! Points in the abstract data plane, axis ranges, the data-to-pixel
//! viewport and the arrowhead placement computation.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Distance (in data units) the arrowhead backs off from the destination
/// node so the tip does not overlap the destination marker.
pub const ARROW_OFFSET: f64 = 0.1;

/// A position in the abstract data plane
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: Point) -> f64 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

/// Where an edge's arrowhead goes and which way it points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowPlacement {
    /// Arrowhead position in data space
    pub position: Point,

    /// Counter-clockwise angle from the +x axis, in degrees
    pub angle_deg: f64,
}

/// Compute the arrowhead placement for an edge from `from` to `to`
pub fn arrow_placement(from: Point, to: Point) -> ArrowPlacement {
    arrow_placement_with_offset(from, to, ARROW_OFFSET)
}

/// Same as [`arrow_placement`] with an explicit backoff distance.
///
/// A zero-length edge puts the arrowhead on the destination with no
/// rotation; nothing is normalized in that case.
pub fn arrow_placement_with_offset(from: Point, to: Point, offset: f64) -> ArrowPlacement {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let length_sq = dx * dx + dy * dy;

    if length_sq == 0.0 {
        return ArrowPlacement {
            position: to,
            angle_deg: 0.0,
        };
    }

    let length = length_sq.sqrt();
    ArrowPlacement {
        position: Point::new(to.x - offset * dx / length, to.y - offset * dy / length),
        angle_deg: dy.atan2(dx).to_degrees(),
    }
}

/// Closed interval shown along one axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Reject empty, inverted or non-finite ranges
    pub fn validate(&self, axis: char) -> Result<()> {
        if self.min.is_finite() && self.max.is_finite() && self.min < self.max {
            Ok(())
        } else {
            Err(Error::InvalidRange {
                axis,
                min: self.min,
                max: self.max,
            })
        }
    }
}

impl From<[f64; 2]> for AxisRange {
    fn from([min, max]: [f64; 2]) -> Self {
        Self { min, max }
    }
}

impl From<AxisRange> for [f64; 2] {
    fn from(r: AxisRange) -> Self {
        [r.min, r.max]
    }
}

/// Pixel rectangle (origin top-left, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }
}

/// Maps data coordinates into the plot area of the canvas
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub x_range: AxisRange,
    pub y_range: AxisRange,
    pub plot: PixelRect,
}

impl Viewport {
    pub fn to_pixel(&self, p: Point) -> (f64, f64) {
        let fx = (p.x - self.x_range.min) / self.x_range.span();
        let fy = (p.y - self.y_range.min) / self.y_range.span();
        (
            self.plot.left + fx * self.plot.width,
            self.plot.bottom() - fy * self.plot.height,
        )
    }
}

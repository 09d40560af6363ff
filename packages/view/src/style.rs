//! Visual styles applied to drawn elements.

use serde::{Deserialize, Serialize};
use tract_map_classify::Color;

/// An outline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// Outline color.
    pub color: Color,
    /// Outline width in pixels.
    pub width: f64,
}

/// Fill and outline of one map polygon or chart bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementStyle {
    /// Interior color.
    pub fill: Color,
    /// Outline.
    pub stroke: StrokeStyle,
}

impl ElementStyle {
    /// The same element with `stroke` in place of its outline. Fill never
    /// changes on highlight.
    #[must_use]
    pub const fn with_stroke(self, stroke: StrokeStyle) -> Self {
        Self {
            fill: self.fill,
            stroke,
        }
    }
}

/// A position in frame pixels, origin top-left.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    /// Pixels from the left edge.
    pub x: f64,
    /// Pixels from the top edge.
    pub y: f64,
}

impl ScreenPoint {
    /// Creates a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

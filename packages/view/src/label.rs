//! The floating label that follows the pointer while something is hovered.

use tract_map_attributes::AttributeSpec;
use tract_map_classify::HistogramBin;
use tract_map_region_models::Region;

use crate::style::ScreenPoint;

/// Where a label goes relative to the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelPlacement {
    /// `(x, y)` offset from the pointer.
    pub offset: (f64, f64),
    /// Estimated label width.
    pub label_width: f64,
    /// Width of the frame the label must stay inside.
    pub frame_width: f64,
}

impl LabelPlacement {
    /// Label position for a pointer. The label sits right of the pointer
    /// unless that would overflow the frame, in which case it flips left.
    #[must_use]
    pub fn position(&self, pointer: ScreenPoint) -> ScreenPoint {
        let right = pointer.x + self.offset.0;
        let x = if right + self.label_width > self.frame_width {
            (pointer.x - self.offset.0 - self.label_width).max(0.0)
        } else {
            right
        };
        ScreenPoint::new(x, (pointer.y + self.offset.1).max(0.0))
    }
}

/// Text and position of the hover label.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverLabel {
    /// Active attribute title.
    pub title: String,
    /// Formatted value or value range.
    pub text: String,
    /// Tract id or member count.
    pub detail: String,
    /// Top-left corner in frame pixels.
    pub position: ScreenPoint,
}

impl HoverLabel {
    /// Label for a hovered tract.
    #[must_use]
    pub fn for_region(region: &Region, attribute: &AttributeSpec, position: ScreenPoint) -> Self {
        Self {
            title: attribute.title.clone(),
            text: attribute.format_value(region.value(&attribute.name)),
            detail: format!("Tract {}", region.tract_id),
            position,
        }
    }

    /// Label for a hovered histogram bar.
    #[must_use]
    pub fn for_bin(bin: &HistogramBin, attribute: &AttributeSpec, position: ScreenPoint) -> Self {
        Self {
            title: attribute.title.clone(),
            text: attribute
                .value_kind
                .format_range(bin.lower_bound, bin.upper_bound),
            detail: tract_count(bin.count()),
            position,
        }
    }
}

fn tract_count(count: usize) -> String {
    if count == 1 {
        "1 tract".to_string()
    } else {
        format!("{count} tracts")
    }
}

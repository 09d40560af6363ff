//! The boundary between view logic and whatever renders it.

use tract_map_attributes::ValueKind;
use tract_map_classify::HistogramBin;
use tract_map_graticule::Graticule;
use tract_map_region_models::Region;

use crate::label::HoverLabel;
use crate::style::{ElementStyle, ScreenPoint};

/// Chart axis metadata for the active attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartAxes {
    /// Chart heading.
    pub title: String,
    /// Value axis label.
    pub axis_label: String,
    /// How tick values are formatted.
    pub value_kind: ValueKind,
    /// `[min, max]` of binned values, `None` when nothing is binned.
    pub domain: Option<(f64, f64)>,
    /// Tallest bar, for scaling the count axis.
    pub max_count: usize,
}

impl ChartAxes {
    /// Formatted `(min, max)` tick labels for the value axis.
    #[must_use]
    pub fn domain_labels(&self) -> Option<(String, String)> {
        self.domain
            .map(|(lo, hi)| (self.value_kind.format(lo), self.value_kind.format(hi)))
    }
}

/// A rendering target for the map and chart.
///
/// Views issue draw calls for new elements and style calls for elements
/// already drawn. Implementations own projection, layout, and whatever
/// retained state their backend needs.
pub trait DrawingSurface {
    /// Draws the background grid.
    fn draw_graticule(&mut self, graticule: &Graticule);

    /// Draws a tract polygon.
    fn draw_region(&mut self, region: &Region, style: &ElementStyle);

    /// Restyles an already drawn tract polygon.
    fn style_region(&mut self, tract_id: &str, style: &ElementStyle);

    /// Removes all bars and draws fresh axes.
    fn reset_chart(&mut self, axes: &ChartAxes);

    /// Draws one histogram bar.
    fn draw_bar(&mut self, bin: &HistogramBin, style: &ElementStyle);

    /// Restyles an already drawn bar.
    fn style_bar(&mut self, index: usize, style: &ElementStyle);

    /// Shows the hover label, replacing any existing one.
    fn show_label(&mut self, label: &HoverLabel);

    /// Moves the visible hover label.
    fn move_label(&mut self, position: ScreenPoint);

    /// Removes the hover label if shown.
    fn remove_label(&mut self);

    /// Replaces the map with an error message.
    fn show_error(&mut self, message: &str);
}

impl<T: DrawingSurface + ?Sized> DrawingSurface for &mut T {
    fn draw_graticule(&mut self, graticule: &Graticule) {
        (**self).draw_graticule(graticule);
    }

    fn draw_region(&mut self, region: &Region, style: &ElementStyle) {
        (**self).draw_region(region, style);
    }

    fn style_region(&mut self, tract_id: &str, style: &ElementStyle) {
        (**self).style_region(tract_id, style);
    }

    fn reset_chart(&mut self, axes: &ChartAxes) {
        (**self).reset_chart(axes);
    }

    fn draw_bar(&mut self, bin: &HistogramBin, style: &ElementStyle) {
        (**self).draw_bar(bin, style);
    }

    fn style_bar(&mut self, index: usize, style: &ElementStyle) {
        (**self).style_bar(index, style);
    }

    fn show_label(&mut self, label: &HoverLabel) {
        (**self).show_label(label);
    }

    fn move_label(&mut self, position: ScreenPoint) {
        (**self).move_label(position);
    }

    fn remove_label(&mut self) {
        (**self).remove_label();
    }

    fn show_error(&mut self, message: &str) {
        (**self).show_error(message);
    }
}

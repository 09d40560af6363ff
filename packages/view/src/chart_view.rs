//! Histogram of the active attribute.

use crate::selection::SelectionState;
use crate::style::{ElementStyle, StrokeStyle};
use crate::surface::{ChartAxes, DrawingSurface};

/// Tracks the bars drawn for the active binning and their captured styles.
#[derive(Debug, Clone)]
pub struct ChartView {
    stroke: StrokeStyle,
    base_styles: Vec<ElementStyle>,
    axes: Option<ChartAxes>,
}

impl ChartView {
    /// Creates an empty chart whose bars are outlined with `stroke`.
    #[must_use]
    pub const fn new(stroke: StrokeStyle) -> Self {
        Self {
            stroke,
            base_styles: Vec::new(),
            axes: None,
        }
    }

    /// Axes from the last render.
    #[must_use]
    pub const fn axes(&self) -> Option<&ChartAxes> {
        self.axes.as_ref()
    }

    /// Style captured for bar `index` at the last render.
    #[must_use]
    pub fn base_style(&self, index: usize) -> Option<&ElementStyle> {
        self.base_styles.get(index)
    }

    /// Redraws axes and bars for the active binning. Each bar is filled
    /// with the classification color of its midpoint.
    pub fn render<S: DrawingSurface + ?Sized>(
        &mut self,
        selection: &SelectionState,
        surface: &mut S,
    ) {
        let attribute = selection.active_attribute();
        let binning = selection.binning();
        let classification = selection.classification();

        let axes = ChartAxes {
            title: attribute.title.clone(),
            axis_label: attribute.axis_label.clone(),
            value_kind: attribute.value_kind,
            domain: binning.domain(),
            max_count: binning.max_count(),
        };
        surface.reset_chart(&axes);

        self.base_styles.clear();
        for bin in binning.bins() {
            let style = ElementStyle {
                fill: classification.classify(Some(bin.midpoint())),
                stroke: self.stroke,
            };
            surface.draw_bar(bin, &style);
            self.base_styles.push(style);
        }

        log::debug!("Rendered {} bars for {}", binning.len(), attribute.name);
        self.axes = Some(axes);
    }

    /// Outlines bar `index` with `stroke`, keeping its fill.
    pub fn highlight<S: DrawingSurface + ?Sized>(
        &self,
        index: usize,
        stroke: StrokeStyle,
        surface: &mut S,
    ) {
        if let Some(base) = self.base_styles.get(index) {
            surface.style_bar(index, &base.with_stroke(stroke));
        }
    }

    /// Puts bar `index` back to its captured style.
    pub fn restore<S: DrawingSurface + ?Sized>(&self, index: usize, surface: &mut S) {
        if let Some(base) = self.base_styles.get(index) {
            surface.style_bar(index, base);
        }
    }
}

//! An in-memory [`DrawingSurface`].

use std::collections::BTreeMap;

use tract_map_classify::HistogramBin;
use tract_map_graticule::Graticule;
use tract_map_region_models::Region;

use crate::label::HoverLabel;
use crate::style::{ElementStyle, ScreenPoint};
use crate::surface::{ChartAxes, DrawingSurface};

/// A drawn region and its current style.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRegion {
    /// The region as drawn.
    pub region: Region,
    /// Current style.
    pub style: ElementStyle,
}

/// A drawn bar and its current style.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedBar {
    /// The bin the bar shows.
    pub bin: HistogramBin,
    /// Current style.
    pub style: ElementStyle,
}

/// Keeps the current state of everything drawn, in place of pixels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneRecorder {
    graticule: Option<Graticule>,
    regions: BTreeMap<String, RecordedRegion>,
    axes: Option<ChartAxes>,
    bars: Vec<RecordedBar>,
    label: Option<HoverLabel>,
    labels_shown: usize,
    error: Option<String>,
}

impl SceneRecorder {
    /// The background grid, if drawn.
    #[must_use]
    pub const fn graticule(&self) -> Option<&Graticule> {
        self.graticule.as_ref()
    }

    /// Drawn regions by tract id.
    #[must_use]
    pub const fn regions(&self) -> &BTreeMap<String, RecordedRegion> {
        &self.regions
    }

    /// Current style of region `tract_id`.
    #[must_use]
    pub fn region_style(&self, tract_id: &str) -> Option<&ElementStyle> {
        self.regions.get(tract_id).map(|r| &r.style)
    }

    /// Current chart axes.
    #[must_use]
    pub const fn axes(&self) -> Option<&ChartAxes> {
        self.axes.as_ref()
    }

    /// Drawn bars in bin order.
    #[must_use]
    pub fn bars(&self) -> &[RecordedBar] {
        &self.bars
    }

    /// Current style of bar `index`.
    #[must_use]
    pub fn bar_style(&self, index: usize) -> Option<&ElementStyle> {
        self.bars.iter().find(|b| b.bin.index == index).map(|b| &b.style)
    }

    /// The visible hover label.
    #[must_use]
    pub const fn label(&self) -> Option<&HoverLabel> {
        self.label.as_ref()
    }

    /// How many labels have been shown in total.
    #[must_use]
    pub const fn labels_shown(&self) -> usize {
        self.labels_shown
    }

    /// The error message shown in place of the map.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl DrawingSurface for SceneRecorder {
    fn draw_graticule(&mut self, graticule: &Graticule) {
        self.graticule = Some(graticule.clone());
    }

    fn draw_region(&mut self, region: &Region, style: &ElementStyle) {
        self.regions.insert(
            region.tract_id.clone(),
            RecordedRegion {
                region: region.clone(),
                style: *style,
            },
        );
    }

    fn style_region(&mut self, tract_id: &str, style: &ElementStyle) {
        match self.regions.get_mut(tract_id) {
            Some(recorded) => recorded.style = *style,
            None => log::warn!("Styling undrawn region {tract_id}"),
        }
    }

    fn reset_chart(&mut self, axes: &ChartAxes) {
        self.bars.clear();
        self.axes = Some(axes.clone());
    }

    fn draw_bar(&mut self, bin: &HistogramBin, style: &ElementStyle) {
        self.bars.push(RecordedBar {
            bin: bin.clone(),
            style: *style,
        });
    }

    fn style_bar(&mut self, index: usize, style: &ElementStyle) {
        match self.bars.iter_mut().find(|b| b.bin.index == index) {
            Some(recorded) => recorded.style = *style,
            None => log::warn!("Styling undrawn bar {index}"),
        }
    }

    fn show_label(&mut self, label: &HoverLabel) {
        self.label = Some(label.clone());
        self.labels_shown += 1;
    }

    fn move_label(&mut self, position: ScreenPoint) {
        if let Some(label) = &mut self.label {
            label.position = position;
        }
    }

    fn remove_label(&mut self) {
        self.label = None;
    }

    fn show_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }
}

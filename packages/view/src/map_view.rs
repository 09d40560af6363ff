//! Choropleth map of the joined regions.

use std::collections::BTreeMap;

use tract_map_region_models::Region;

use crate::selection::SelectionState;
use crate::style::{ElementStyle, StrokeStyle};
use crate::surface::DrawingSurface;

/// Owns the joined regions and the style each was last rendered with.
#[derive(Debug, Clone)]
pub struct MapView {
    regions: Vec<Region>,
    index: BTreeMap<String, usize>,
    stroke: StrokeStyle,
    base_styles: BTreeMap<String, ElementStyle>,
    drawn: bool,
}

impl MapView {
    /// Creates a view over `regions`, outlined with `stroke` at rest.
    #[must_use]
    pub fn new(regions: Vec<Region>, stroke: StrokeStyle) -> Self {
        let mut index = BTreeMap::new();
        for (i, region) in regions.iter().enumerate() {
            index.entry(region.tract_id.clone()).or_insert(i);
        }
        Self {
            regions,
            index,
            stroke,
            base_styles: BTreeMap::new(),
            drawn: false,
        }
    }

    /// All regions in draw order.
    #[must_use]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// The region with `tract_id`.
    #[must_use]
    pub fn region(&self, tract_id: &str) -> Option<&Region> {
        self.index.get(tract_id).map(|&i| &self.regions[i])
    }

    /// Style captured for `tract_id` at the last render.
    #[must_use]
    pub fn base_style(&self, tract_id: &str) -> Option<&ElementStyle> {
        self.base_styles.get(tract_id)
    }

    /// Fills every region from the active classification. The first call
    /// draws the regions, later calls restyle them in place.
    pub fn render<S: DrawingSurface + ?Sized>(
        &mut self,
        selection: &SelectionState,
        surface: &mut S,
    ) {
        let attribute = &selection.active_attribute().name;
        let classification = selection.classification();

        for region in &self.regions {
            let style = ElementStyle {
                fill: classification.classify(region.value(attribute)),
                stroke: self.stroke,
            };
            if self.drawn {
                surface.style_region(&region.tract_id, &style);
            } else {
                surface.draw_region(region, &style);
            }
            self.base_styles.insert(region.tract_id.clone(), style);
        }

        log::debug!("Rendered {} regions for {attribute}", self.regions.len());
        self.drawn = true;
    }

    /// Outlines `tract_ids` with `stroke`, keeping their fill.
    pub fn highlight<S: DrawingSurface + ?Sized>(
        &self,
        tract_ids: &[String],
        stroke: StrokeStyle,
        surface: &mut S,
    ) {
        for id in tract_ids {
            if let Some(base) = self.base_styles.get(id) {
                surface.style_region(id, &base.with_stroke(stroke));
            }
        }
    }

    /// Puts `tract_ids` back to their captured styles.
    pub fn restore<S: DrawingSurface + ?Sized>(&self, tract_ids: &[String], surface: &mut S) {
        for id in tract_ids {
            if let Some(base) = self.base_styles.get(id) {
                surface.style_region(id, base);
            }
        }
    }
}

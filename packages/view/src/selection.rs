//! The active attribute and everything derived from it.

use thiserror::Error;
use tract_map_attributes::{AttributeCatalog, AttributeSpec};
use tract_map_classify::{ClassificationEngine, ColorClassification, HistogramBin, HistogramBinning};
use tract_map_region_models::Region;

/// Rejected attribute selections.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// The name is not in the attribute catalog.
    #[error("Unknown attribute '{name}'")]
    UnknownAttribute {
        /// The rejected name.
        name: String,
    },
}

/// The selected attribute with its classification and binning.
///
/// There is always an active attribute. The only way to change it is
/// [`SelectionState::switch_attribute`], which rebuilds both derivations
/// before returning, so readers never see a classification and binning
/// from different attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState {
    active: AttributeSpec,
    classification: ColorClassification,
    binning: HistogramBinning,
}

impl SelectionState {
    /// Starts on the catalog's first attribute.
    #[must_use]
    pub fn new(
        catalog: &AttributeCatalog,
        regions: &[Region],
        engine: &ClassificationEngine,
    ) -> Self {
        Self::for_attribute(catalog.first().clone(), regions, engine)
    }

    fn for_attribute(
        active: AttributeSpec,
        regions: &[Region],
        engine: &ClassificationEngine,
    ) -> Self {
        let classified = engine.classify_attribute(regions, &active.name);
        Self {
            active,
            classification: classified.classification,
            binning: classified.binning,
        }
    }

    /// Makes `name` the active attribute, rebuilding its classification and
    /// binning from the already joined `regions`.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::UnknownAttribute`] and leaves the state
    /// unchanged if `name` is not in `catalog`.
    pub fn switch_attribute(
        &mut self,
        name: &str,
        catalog: &AttributeCatalog,
        regions: &[Region],
        engine: &ClassificationEngine,
    ) -> Result<(), SelectionError> {
        let spec = catalog
            .get(name)
            .ok_or_else(|| SelectionError::UnknownAttribute {
                name: name.to_string(),
            })?;

        log::debug!("Switching attribute {} -> {name}", self.active.name);
        *self = Self::for_attribute(spec.clone(), regions, engine);
        Ok(())
    }

    /// The active attribute.
    #[must_use]
    pub const fn active_attribute(&self) -> &AttributeSpec {
        &self.active
    }

    /// Fill colors for the active attribute.
    #[must_use]
    pub const fn classification(&self) -> &ColorClassification {
        &self.classification
    }

    /// Histogram bins for the active attribute.
    #[must_use]
    pub const fn binning(&self) -> &HistogramBinning {
        &self.binning
    }

    /// The bin holding `region`'s active value, if it has one.
    #[must_use]
    pub fn bin_for_region(&self, region: &Region) -> Option<&HistogramBin> {
        self.binning
            .bin_index_for(region.value(&self.active.name))
            .and_then(|index| self.binning.bin(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tract_map_classify::{Color, Palette};

    fn engine() -> ClassificationEngine {
        ClassificationEngine::new(
            Palette {
                colors: vec![Color::rgb(1, 1, 1), Color::rgb(2, 2, 2), Color::rgb(3, 3, 3)],
                no_data: Color::rgb(0xee, 0xee, 0xee),
            },
            3,
            5,
        )
        .unwrap()
    }

    fn regions() -> Vec<Region> {
        (0_u32..15)
            .map(|i| {
                let mut region = Region::new(format!("t{i}"));
                for (n, spec) in (0_u32..).zip(AttributeCatalog::builtin().iter()) {
                    let value = (i % (n + 2) != 0).then(|| f64::from(i * 100 + n));
                    region.attributes.insert(spec.name.clone(), value);
                }
                region
            })
            .collect()
    }

    #[test]
    fn starts_on_first_catalog_attribute() {
        let catalog = AttributeCatalog::builtin();
        let state = SelectionState::new(&catalog, &regions(), &engine());
        assert_eq!(state.active_attribute(), catalog.first());
    }

    #[test]
    fn switching_away_and_back_reproduces_direct_switch() {
        let catalog = AttributeCatalog::builtin();
        let regions = regions();
        let names: Vec<&str> = catalog.names().collect();
        let (a, b) = (names[1], names[2]);

        let mut direct = SelectionState::new(&catalog, &regions, &engine());
        direct.switch_attribute(a, &catalog, &regions, &engine()).unwrap();

        let mut round_trip = SelectionState::new(&catalog, &regions, &engine());
        round_trip.switch_attribute(a, &catalog, &regions, &engine()).unwrap();
        round_trip.switch_attribute(b, &catalog, &regions, &engine()).unwrap();
        round_trip.switch_attribute(a, &catalog, &regions, &engine()).unwrap();

        assert_eq!(direct, round_trip);
    }

    #[test]
    fn unknown_attribute_is_rejected_without_transition() {
        let catalog = AttributeCatalog::builtin();
        let regions = regions();
        let mut state = SelectionState::new(&catalog, &regions, &engine());
        let before = state.clone();

        let result = state.switch_attribute("median_shoe_size", &catalog, &regions, &engine());

        assert_eq!(
            result,
            Err(SelectionError::UnknownAttribute {
                name: "median_shoe_size".to_string()
            })
        );
        assert_eq!(state, before);
    }

    #[test]
    fn region_resolves_to_the_bin_holding_it() {
        let catalog = AttributeCatalog::builtin();
        let regions = regions();
        let state = SelectionState::new(&catalog, &regions, &engine());

        for region in &regions {
            match state.bin_for_region(region) {
                Some(bin) => assert!(bin.has_member(&region.tract_id)),
                None => assert_eq!(region.value(&state.active_attribute().name), None),
            }
        }
    }
}

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Quantile color classification and histogram binning.
//!
//! Both derivations are pure functions of the value set of one attribute,
//! so switching away from an attribute and back reproduces exactly the
//! same classification and binning.

pub mod classification;
pub mod histogram;
pub mod quantile;

use thiserror::Error;
use tract_map_region_models::Region;

pub use classification::build_color_classification;
pub use histogram::build_histogram;
pub use tract_map_classify_models::{
    Color, ColorClassification, HistogramBin, HistogramBinning, Palette,
};

/// Errors from invalid classification parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    /// The palette has no class colors.
    #[error("Palette has no colors")]
    EmptyPalette,

    /// More classes were requested than the palette can color, or zero.
    #[error("Class count {class_count} must be between 1 and the palette size {palette_size}")]
    InvalidClassCount {
        /// Requested number of classes.
        class_count: usize,
        /// Number of palette colors.
        palette_size: usize,
    },

    /// Zero histogram bins were requested.
    #[error("Histogram bin count must be at least 1")]
    InvalidBinCount,
}

/// Classification and binning of one attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct Classified {
    /// Fill colors for the map.
    pub classification: ColorClassification,
    /// Bars for the chart.
    pub binning: HistogramBinning,
}

/// Validated classification parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationEngine {
    palette: Palette,
    class_count: usize,
    bin_count: usize,
}

impl ClassificationEngine {
    /// Creates an engine.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError`] if the palette is empty, `class_count` is
    /// zero or exceeds the palette, or `bin_count` is zero.
    pub fn new(
        palette: Palette,
        class_count: usize,
        bin_count: usize,
    ) -> Result<Self, ClassifyError> {
        if palette.colors.is_empty() {
            return Err(ClassifyError::EmptyPalette);
        }
        if class_count == 0 || class_count > palette.colors.len() {
            return Err(ClassifyError::InvalidClassCount {
                class_count,
                palette_size: palette.colors.len(),
            });
        }
        if bin_count == 0 {
            return Err(ClassifyError::InvalidBinCount);
        }
        Ok(Self {
            palette,
            class_count,
            bin_count,
        })
    }

    /// The palette classes are colored from.
    #[must_use]
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Number of color classes.
    #[must_use]
    pub const fn class_count(&self) -> usize {
        self.class_count
    }

    /// Number of histogram bins for a non-degenerate domain.
    #[must_use]
    pub const fn bin_count(&self) -> usize {
        self.bin_count
    }

    /// Classifies `attribute` over `regions`.
    #[must_use]
    pub fn color_classification(&self, regions: &[Region], attribute: &str) -> ColorClassification {
        build_color_classification(
            regions.iter().map(|region| region.value(attribute)),
            self.class_count,
            &self.palette,
        )
    }

    /// Bins `attribute` over `regions`, members identified by tract id.
    #[must_use]
    pub fn histogram(&self, regions: &[Region], attribute: &str) -> HistogramBinning {
        build_histogram(
            regions
                .iter()
                .map(|region| (region.tract_id.as_str(), region.value(attribute))),
            self.bin_count,
        )
    }

    /// Builds both the classification and the binning of `attribute`.
    #[must_use]
    pub fn classify_attribute(&self, regions: &[Region], attribute: &str) -> Classified {
        log::debug!("Classifying {} regions on {attribute}", regions.len());
        Classified {
            classification: self.color_classification(regions, attribute),
            binning: self.histogram(regions, attribute),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette() -> Palette {
        Palette {
            colors: vec![
                Color::rgb(1, 0, 0),
                Color::rgb(2, 0, 0),
                Color::rgb(3, 0, 0),
            ],
            no_data: Color::rgb(0xee, 0xee, 0xee),
        }
    }

    fn region(id: &str, rent: Option<f64>, value: Option<f64>) -> Region {
        let mut region = Region::new(id);
        region.attributes.insert("median_rent".to_string(), rent);
        region.attributes.insert("median_value".to_string(), value);
        region
    }

    #[test]
    fn rejects_invalid_parameters() {
        assert_eq!(
            ClassificationEngine::new(
                Palette {
                    colors: Vec::new(),
                    no_data: Color::rgb(0, 0, 0)
                },
                1,
                1
            ),
            Err(ClassifyError::EmptyPalette)
        );
        assert!(matches!(
            ClassificationEngine::new(palette(), 4, 10),
            Err(ClassifyError::InvalidClassCount { .. })
        ));
        assert!(matches!(
            ClassificationEngine::new(palette(), 0, 10),
            Err(ClassifyError::InvalidClassCount { .. })
        ));
        assert_eq!(
            ClassificationEngine::new(palette(), 3, 0),
            Err(ClassifyError::InvalidBinCount)
        );
    }

    #[test]
    fn classification_is_independent_of_switch_history() {
        let engine = ClassificationEngine::new(palette(), 3, 4).unwrap();
        let regions: Vec<Region> = (0..12)
            .map(|i| {
                region(
                    &format!("t{i}"),
                    Some(f64::from(i) * 100.0),
                    (i % 3 != 0).then(|| f64::from(12 - i) * 1000.0),
                )
            })
            .collect();

        let direct = engine.classify_attribute(&regions, "median_value");
        let _rent = engine.classify_attribute(&regions, "median_rent");
        let back = engine.classify_attribute(&regions, "median_value");

        assert_eq!(direct, back);
    }

    #[test]
    fn all_equal_values_produce_single_class_and_bin() {
        let engine = ClassificationEngine::new(palette(), 3, 20).unwrap();
        let regions: Vec<Region> = (0..6)
            .map(|i| region(&format!("t{i}"), Some(1000.0), None))
            .collect();

        let classified = engine.classify_attribute(&regions, "median_rent");

        assert_eq!(classified.classification.class_count(), 1);
        assert_eq!(classified.binning.len(), 1);
        assert_eq!(classified.binning.bins()[0].count(), 6);
        for r in &regions {
            assert_eq!(
                classified.classification.classify(r.value("median_rent")),
                palette().colors[0]
            );
        }
    }

    #[test]
    fn missing_region_renders_no_data_and_is_not_binned() {
        let engine = ClassificationEngine::new(palette(), 3, 5).unwrap();
        let regions = vec![
            region("a", Some(900.0), None),
            region("b", None, None),
            region("c", Some(2100.0), None),
        ];

        let classified = engine.classify_attribute(&regions, "median_rent");

        assert_eq!(
            classified.classification.classify(regions[1].value("median_rent")),
            palette().no_data
        );
        assert_eq!(classified.binning.bin_index_of_member("b"), None);
        assert_eq!(classified.binning.total_members(), 2);
    }
}

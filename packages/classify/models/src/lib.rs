#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Color classification and histogram binning types.
//!
//! Both structures are derived from the joined value set of the active
//! attribute and rebuilt from scratch whenever that attribute changes.

pub mod color;
pub mod histogram;

use serde::{Deserialize, Serialize};

pub use color::{Color, ColorParseError};
pub use histogram::{HistogramBin, HistogramBinning};

/// Ordered class colors plus the neutral "no data" color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    /// Class colors, lowest class first.
    pub colors: Vec<Color>,
    /// Fill for missing values. Should not appear in `colors`.
    pub no_data: Color,
}

/// A quantile classification of one attribute's values.
///
/// `breakpoints` are non-decreasing thresholds splitting the domain into
/// `breakpoints.len() + 1` classes, and `colors` holds exactly one color
/// per class. A classification with no colors is degenerate: it was built
/// from an empty value set and maps everything to the no-data color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorClassification {
    breakpoints: Vec<f64>,
    colors: Vec<Color>,
    no_data: Color,
}

impl ColorClassification {
    /// Creates a classification from thresholds and class colors.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `colors.len() != breakpoints.len() + 1` or
    /// the breakpoints are decreasing anywhere.
    #[must_use]
    pub fn new(breakpoints: Vec<f64>, colors: Vec<Color>, no_data: Color) -> Self {
        debug_assert_eq!(colors.len(), breakpoints.len() + 1);
        debug_assert!(breakpoints.windows(2).all(|w| w[0] <= w[1]));
        Self {
            breakpoints,
            colors,
            no_data,
        }
    }

    /// A classification that maps every value to `no_data`.
    #[must_use]
    pub const fn no_data_only(no_data: Color) -> Self {
        Self {
            breakpoints: Vec::new(),
            colors: Vec::new(),
            no_data,
        }
    }

    /// Ascending class thresholds.
    #[must_use]
    pub fn breakpoints(&self) -> &[f64] {
        &self.breakpoints
    }

    /// Class colors, lowest class first.
    #[must_use]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Fill used for missing values.
    #[must_use]
    pub const fn no_data_color(&self) -> Color {
        self.no_data
    }

    /// Number of classes; zero when degenerate.
    #[must_use]
    pub fn class_count(&self) -> usize {
        self.colors.len()
    }

    /// Whether every value maps to the no-data color.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.colors.is_empty()
    }

    /// Class of a value, by binary search over the breakpoints.
    ///
    /// A value equal to a breakpoint falls in the lower class. Values below
    /// the first breakpoint land in class 0 and values above the last in
    /// the top class. Missing values, non-finite values, and any value
    /// under a degenerate classification have no class.
    #[must_use]
    pub fn class_index(&self, value: Option<f64>) -> Option<usize> {
        let value = value.filter(|v| v.is_finite())?;
        if self.is_degenerate() {
            return None;
        }
        Some(self.breakpoints.partition_point(|b| *b < value))
    }

    /// Fill color for a value.
    #[must_use]
    pub fn classify(&self, value: Option<f64>) -> Color {
        self.class_index(value)
            .map_or(self.no_data, |class| self.colors[class])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classification() -> ColorClassification {
        ColorClassification::new(
            vec![10.0, 20.0, 20.0],
            vec![
                Color::rgb(1, 0, 0),
                Color::rgb(2, 0, 0),
                Color::rgb(3, 0, 0),
                Color::rgb(4, 0, 0),
            ],
            Color::rgb(0xee, 0xee, 0xee),
        )
    }

    #[test]
    fn boundary_values_resolve_to_lower_class() {
        let c = classification();
        assert_eq!(c.class_index(Some(10.0)), Some(0));
        assert_eq!(c.class_index(Some(10.5)), Some(1));
        assert_eq!(c.class_index(Some(20.0)), Some(1));
    }

    #[test]
    fn values_outside_breakpoints_use_boundary_classes() {
        let c = classification();
        assert_eq!(c.class_index(Some(-1e9)), Some(0));
        assert_eq!(c.class_index(Some(1e9)), Some(3));
        assert_eq!(c.classify(Some(1e9)), Color::rgb(4, 0, 0));
    }

    #[test]
    fn missing_values_get_no_data_color() {
        let c = classification();
        assert_eq!(c.class_index(None), None);
        assert_eq!(c.classify(None), Color::rgb(0xee, 0xee, 0xee));
        assert_eq!(c.classify(Some(f64::NAN)), Color::rgb(0xee, 0xee, 0xee));
    }

    #[test]
    fn degenerate_classification_maps_everything_to_no_data() {
        let no_data = Color::rgb(0xee, 0xee, 0xee);
        let c = ColorClassification::no_data_only(no_data);
        assert!(c.is_degenerate());
        assert_eq!(c.classify(Some(5.0)), no_data);
    }
}

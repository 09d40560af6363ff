#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Joins ACS housing records onto census tract geometry.
//!
//! The two inputs are loaded concurrently ([`load::load_inputs`]) and then
//! merged on `tract_id` ([`join::join`]). Data-shape problems (unparseable
//! cells, keys present on only one side) are absorbed here and show up as
//! missing values; only a failure to load either dataset is an error.

pub mod join;
pub mod load;
pub mod parse;

use std::path::PathBuf;

use thiserror::Error;
use tract_map_region_models::TRACT_ID_FIELD;

pub use join::{JoinSummary, join, join_with_summary};
pub use load::{LoadedInputs, load_features, load_inputs, load_records};

/// Errors that can occur while loading either dataset.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The tabular file is not valid CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The geometry file is not valid `GeoJSON`.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// The geometry file is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The tabular header row lacks the join key column.
    #[error("Tabular data has no '{}' column", TRACT_ID_FIELD)]
    MissingKeyColumn,

    /// The geometry document is a bare geometry rather than features.
    #[error("Geometry document must be a FeatureCollection, found {found}")]
    NotFeatureCollection {
        /// Kind of `GeoJSON` object that was found.
        found: &'static str,
    },
}

//! Loaders for the tabular and geometry datasets.
//!
//! Both files are read concurrently and the caller only proceeds once both
//! have loaded and parsed. If either fails nothing is joined.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use geojson::{Feature, GeoJson};
use tract_map_region_models::{TRACT_ID_FIELD, TractRecord};

use crate::LoadError;

/// Both raw datasets, ready to join.
#[derive(Debug, Clone)]
pub struct LoadedInputs {
    /// Rows of the tabular dataset.
    pub records: Vec<TractRecord>,
    /// Features of the geometry dataset.
    pub features: Vec<Feature>,
}

/// Parses CSV with a header row into [`TractRecord`]s.
///
/// Rows with a blank `tract_id` are skipped. Keys are kept verbatim,
/// surrounding whitespace included. Short rows are tolerated;
/// their missing trailing cells read as blank.
///
/// # Errors
///
/// Returns [`LoadError`] if the CSV is malformed or has no `tract_id`
/// column.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<TractRecord>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().trim_start_matches('\u{feff}').to_owned())
        .collect();

    let key_index = headers
        .iter()
        .position(|h| h == TRACT_ID_FIELD)
        .ok_or(LoadError::MissingKeyColumn)?;

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for result in reader.records() {
        let row = result?;

        let tract_id = row.get(key_index).unwrap_or("");
        if tract_id.trim().is_empty() {
            skipped += 1;
            continue;
        }

        let fields: BTreeMap<String, String> = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != key_index)
            .map(|(i, header)| (header.clone(), row.get(i).unwrap_or("").to_owned()))
            .collect();

        records.push(TractRecord {
            tract_id: tract_id.to_owned(),
            fields,
        });
    }

    if skipped > 0 {
        log::warn!("Skipped {skipped} rows with a blank {TRACT_ID_FIELD}");
    }

    Ok(records)
}

/// Parses a `GeoJSON` `FeatureCollection` (or a single `Feature`).
///
/// # Errors
///
/// Returns [`LoadError`] if the document is not valid `GeoJSON` or is a
/// bare geometry.
pub fn read_features<R: Read>(reader: R) -> Result<Vec<Feature>, LoadError> {
    match GeoJson::from_reader(reader)? {
        GeoJson::FeatureCollection(collection) => Ok(collection.features),
        GeoJson::Feature(feature) => Ok(vec![feature]),
        GeoJson::Geometry(_) => Err(LoadError::NotFeatureCollection { found: "Geometry" }),
    }
}

async fn read_file(path: &Path) -> Result<Vec<u8>, LoadError> {
    tokio::fs::read(path).await.map_err(|source| LoadError::Io {
        path: PathBuf::from(path),
        source,
    })
}

/// Loads and parses the tabular dataset.
///
/// # Errors
///
/// Returns [`LoadError`] if the file cannot be read or parsed.
pub async fn load_records(path: &Path) -> Result<Vec<TractRecord>, LoadError> {
    let bytes = read_file(path).await?;
    log::debug!("Read {} bytes from {}", bytes.len(), path.display());
    let records = read_records(bytes.as_slice())?;
    log::info!("Loaded {} tract records from {}", records.len(), path.display());
    Ok(records)
}

/// Loads and parses the geometry dataset.
///
/// # Errors
///
/// Returns [`LoadError`] if the file cannot be read or parsed.
pub async fn load_features(path: &Path) -> Result<Vec<Feature>, LoadError> {
    let bytes = read_file(path).await?;
    log::debug!("Read {} bytes from {}", bytes.len(), path.display());
    let features = read_features(bytes.as_slice())?;
    log::info!("Loaded {} features from {}", features.len(), path.display());
    Ok(features)
}

/// Loads both datasets concurrently and waits for both.
///
/// # Errors
///
/// Returns the first [`LoadError`] from either load. No partial result is
/// returned.
pub async fn load_inputs(tabular: &Path, geometry: &Path) -> Result<LoadedInputs, LoadError> {
    let (records, features) = tokio::try_join!(load_records(tabular), load_features(geometry))?;
    Ok(LoadedInputs { records, features })
}

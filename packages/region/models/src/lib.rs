#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Census tract region and tabular record types.
//!
//! A [`TractRecord`] is one raw row of the ACS table, every cell still a
//! string. A [`Region`] is one geometry feature after the join, carrying
//! the parsed value (or a missing marker) of every catalog attribute.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Name of the key column/property shared by both datasets.
pub const TRACT_ID_FIELD: &str = "tract_id";

/// A parsed attribute value. `None` marks a missing or unparseable cell;
/// it is never coerced to zero.
pub type AttributeValue = Option<f64>;

/// One raw row of the tabular dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TractRecord {
    /// Join key.
    pub tract_id: String,
    /// Every other column, keyed by header, values untrimmed and unparsed.
    pub fields: BTreeMap<String, String>,
}

impl TractRecord {
    /// Creates a record with no attribute columns.
    #[must_use]
    pub fn new(tract_id: impl Into<String>) -> Self {
        Self {
            tract_id: tract_id.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Adds a column value, returning the record for chaining.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Raw cell for a column, if the column exists.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// A geometry feature enriched with the catalog attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Census tract identifier, unique within a load.
    pub tract_id: String,
    /// Attribute key to parsed value. After a join every catalog key is
    /// present, possibly with a missing value.
    pub attributes: BTreeMap<String, AttributeValue>,
    /// Opaque polygon geometry handed to the drawing layer.
    pub geometry: Option<geojson::Geometry>,
    /// The source feature's original properties.
    pub properties: geojson::JsonObject,
}

impl Region {
    /// Creates a region with no attributes yet.
    #[must_use]
    pub fn new(tract_id: impl Into<String>) -> Self {
        Self {
            tract_id: tract_id.into(),
            attributes: BTreeMap::new(),
            geometry: None,
            properties: geojson::JsonObject::new(),
        }
    }

    /// The value of `attribute`, or `None` if it is missing or unknown.
    #[must_use]
    pub fn value(&self, attribute: &str) -> AttributeValue {
        self.attributes.get(attribute).copied().flatten()
    }

    /// Whether the attribute key exists on this region (even if missing).
    #[must_use]
    pub fn has_attribute(&self, attribute: &str) -> bool {
        self.attributes.contains_key(attribute)
    }
}

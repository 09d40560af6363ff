#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Registry of the selectable census tract attributes.
//!
//! The built-in catalog is embedded from `attributes.toml` at compile time.
//! Order matters: the first attribute is the one the map opens on, and the
//! attribute selector lists entries in catalog order.

use std::collections::BTreeSet;

use serde::Deserialize;
use thiserror::Error;

pub use tract_map_attribute_models::{AttributeSpec, NO_DATA_TEXT, ValueKind};

/// Embedded catalog definition.
const BUILTIN_CATALOG_TOML: &str = include_str!("../attributes.toml");

/// Errors that can occur while building an attribute catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The TOML document could not be parsed.
    #[error("Invalid attribute catalog: {0}")]
    Toml(#[from] toml::de::Error),

    /// The catalog defines no attributes.
    #[error("Attribute catalog is empty")]
    Empty,

    /// Two entries share the same key.
    #[error("Duplicate attribute name '{name}'")]
    DuplicateName {
        /// The repeated attribute key.
        name: String,
    },
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    attribute: Vec<AttributeSpec>,
}

/// Ordered, immutable set of selectable attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeCatalog {
    specs: Vec<AttributeSpec>,
}

impl AttributeCatalog {
    /// Returns the built-in ACS housing catalog.
    ///
    /// # Panics
    ///
    /// Panics if the embedded `attributes.toml` is invalid. It is a
    /// compile-time constant, so a failure is a development error caught by
    /// the tests below.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_toml_str(BUILTIN_CATALOG_TOML)
            .unwrap_or_else(|e| panic!("Failed to parse built-in attribute catalog: {e}"))
    }

    /// Parses a catalog from a TOML document of `[[attribute]]` tables.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the document is malformed, empty, or
    /// repeats an attribute name.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::de::from_str(toml_str)?;
        Self::new(file.attribute)
    }

    /// Builds a catalog from an explicit list of specs.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if `specs` is empty or repeats a name.
    pub fn new(specs: Vec<AttributeSpec>) -> Result<Self, CatalogError> {
        if specs.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = BTreeSet::new();
        for spec in &specs {
            if !seen.insert(spec.name.as_str()) {
                return Err(CatalogError::DuplicateName {
                    name: spec.name.clone(),
                });
            }
        }

        log::debug!("Attribute catalog has {} entries", specs.len());

        Ok(Self { specs })
    }

    /// The attribute the map opens on.
    #[must_use]
    pub fn first(&self) -> &AttributeSpec {
        // Non-empty is enforced by `new`.
        &self.specs[0]
    }

    /// Looks up an attribute by its key.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AttributeSpec> {
        self.specs.iter().find(|spec| spec.name == name)
    }

    /// Position of an attribute in selector order.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.specs.iter().position(|spec| spec.name == name)
    }

    /// Whether `name` is a catalog key.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// All attribute keys in catalog order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.specs.iter().map(|spec| spec.name.as_str())
    }

    /// Display titles in catalog order, for the attribute selector.
    #[must_use]
    pub fn display_names(&self) -> Vec<&str> {
        self.specs.iter().map(|spec| spec.title.as_str()).collect()
    }

    /// Iterates the specs in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, AttributeSpec> {
        self.specs.iter()
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Always `false`; an empty catalog cannot be constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl<'a> IntoIterator for &'a AttributeCatalog {
    type Item = &'a AttributeSpec;
    type IntoIter = std::slice::Iter<'a, AttributeSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

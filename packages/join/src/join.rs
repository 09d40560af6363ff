//! Key join of tabular records onto geometry features.

use std::collections::{BTreeMap, BTreeSet};

use geojson::Feature;
use tract_map_attributes::AttributeCatalog;
use tract_map_region_models::{Region, TractRecord};

use crate::parse::{feature_key, parse_attribute_value};

/// Coverage counts from a join. Mismatches are expected sparse coverage,
/// not errors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JoinSummary {
    /// Features that found a matching record.
    pub matched_features: usize,
    /// Features whose key has no record; rendered as "no data".
    pub unmatched_features: usize,
    /// Features without a usable `tract_id`; dropped.
    pub keyless_features: usize,
    /// Records whose key matched no feature; ignored.
    pub unmatched_records: usize,
    /// Records superseded by a later record with the same key.
    pub superseded_records: usize,
}

/// Joins `records` onto `features` by `tract_id`.
///
/// See [`join_with_summary`].
#[must_use]
pub fn join(
    records: &[TractRecord],
    features: &[Feature],
    catalog: &AttributeCatalog,
) -> Vec<Region> {
    join_with_summary(records, features, catalog).0
}

/// Joins `records` onto `features` by exact `tract_id` equality.
///
/// Neither side's key is trimmed or normalized, so `" 1"` and `"1"` are
/// different tracts.
///
/// Every produced [`Region`] carries every catalog attribute key. Values
/// come from the matching record, parsed as decimals; a blank or
/// unparseable cell, or a feature without a matching record, yields a
/// missing value. When several records share a key the last one wins,
/// which is what a row-by-row nested-loop join would leave behind.
/// Records are indexed by key first, so this is `O(rows + features)`.
///
/// Features with no `tract_id` property cannot be identified and are
/// dropped with a warning. Inputs are not modified.
#[must_use]
pub fn join_with_summary(
    records: &[TractRecord],
    features: &[Feature],
    catalog: &AttributeCatalog,
) -> (Vec<Region>, JoinSummary) {
    let mut summary = JoinSummary::default();

    let mut by_key: BTreeMap<&str, &TractRecord> = BTreeMap::new();
    for record in records {
        if by_key.insert(record.tract_id.as_str(), record).is_some() {
            summary.superseded_records += 1;
        }
    }

    let mut matched_keys: BTreeSet<&str> = BTreeSet::new();
    let mut seen_feature_keys: BTreeSet<String> = BTreeSet::new();
    let mut regions = Vec::with_capacity(features.len());

    for feature in features {
        let Some(key) = feature_key(feature) else {
            summary.keyless_features += 1;
            log::warn!("Skipping feature without a tract_id property");
            continue;
        };

        if !seen_feature_keys.insert(key.clone()) {
            log::warn!("Duplicate feature key {key}; both features receive the same values");
        }

        let record = by_key.get_key_value(key.as_str());
        match record {
            Some((matched_key, _)) => {
                summary.matched_features += 1;
                matched_keys.insert(*matched_key);
            }
            None => summary.unmatched_features += 1,
        }

        let attributes = catalog
            .iter()
            .map(|spec| {
                let value = record.and_then(|(_, r)| parse_attribute_value(r.field(&spec.name)));
                (spec.name.clone(), value)
            })
            .collect();

        regions.push(Region {
            tract_id: key,
            attributes,
            geometry: feature.geometry.clone(),
            properties: feature.properties.clone().unwrap_or_default(),
        });
    }

    summary.unmatched_records = by_key.len() - matched_keys.len();

    log::info!(
        "Joined {} records onto {} features: {} matched, {} without data, {} records ignored",
        records.len(),
        features.len(),
        summary.matched_features,
        summary.unmatched_features,
        summary.unmatched_records,
    );

    (regions, summary)
}

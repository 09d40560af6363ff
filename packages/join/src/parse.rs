//! Cell and key parsing shared by the loader and the join.

use geojson::Feature;
use tract_map_region_models::{AttributeValue, TRACT_ID_FIELD};

/// Parses a raw attribute cell. Returns `None` if the cell is absent,
/// blank, not a decimal number, or not finite.
#[must_use]
pub fn parse_attribute_value(raw: Option<&str>) -> AttributeValue {
    let value = raw?.trim().parse::<f64>().ok()?;
    value.is_finite().then_some(value)
}

/// Extracts the join key from a feature's `tract_id` property.
///
/// String keys are used verbatim. Numeric keys are compared by their JSON
/// text, so `36061000100` matches the row key `"36061000100"`. Any other
/// property type yields `None`.
#[must_use]
pub fn feature_key(feature: &Feature) -> Option<String> {
    match feature.property(TRACT_ID_FIELD)? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

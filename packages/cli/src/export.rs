//! Serializes the rendered scene.

use geojson::{Feature, FeatureCollection, JsonObject, JsonValue};
use serde::Serialize;
use tract_map_view::{SceneRecorder, SelectionState};

/// A styled `FeatureCollection` of every drawn tract.
///
/// Each feature keeps its source properties and gains `tract_id`, `fill`,
/// `stroke`, `strokeWidth`, the active `class` and `bin` (null when the
/// value is missing), and every joined attribute value.
pub fn styled_feature_collection(
    scene: &SceneRecorder,
    selection: &SelectionState,
) -> FeatureCollection {
    let attribute = &selection.active_attribute().name;

    let features = scene
        .regions()
        .values()
        .map(|recorded| {
            let region = &recorded.region;
            let value = region.value(attribute);

            let mut properties: JsonObject = region.properties.clone();
            properties.insert("tract_id".to_string(), JsonValue::from(region.tract_id.clone()));
            for (name, value) in &region.attributes {
                properties.insert(name.clone(), JsonValue::from(*value));
            }
            properties.insert("fill".to_string(), JsonValue::from(recorded.style.fill.to_string()));
            properties.insert(
                "stroke".to_string(),
                JsonValue::from(recorded.style.stroke.color.to_string()),
            );
            properties.insert(
                "strokeWidth".to_string(),
                JsonValue::from(recorded.style.stroke.width),
            );
            properties.insert(
                "class".to_string(),
                JsonValue::from(selection.classification().class_index(value)),
            );
            properties.insert(
                "bin".to_string(),
                JsonValue::from(selection.binning().bin_index_for(value)),
            );

            Feature {
                bbox: None,
                geometry: region.geometry.clone(),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// One exported histogram bar.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarExport {
    pub index: usize,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub label: String,
    pub count: usize,
    pub fill: String,
    pub members: Vec<String>,
}

/// The histogram of the active attribute.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistogramExport {
    pub attribute: String,
    pub title: String,
    pub axis_label: String,
    pub bins: Vec<BarExport>,
}

/// Exports the drawn bars with their current fill.
pub fn histogram_export(scene: &SceneRecorder, selection: &SelectionState) -> HistogramExport {
    let attribute = selection.active_attribute();

    HistogramExport {
        attribute: attribute.name.clone(),
        title: attribute.title.clone(),
        axis_label: attribute.axis_label.clone(),
        bins: scene
            .bars()
            .iter()
            .map(|bar| BarExport {
                index: bar.bin.index,
                lower_bound: bar.bin.lower_bound,
                upper_bound: bar.bin.upper_bound,
                label: attribute
                    .value_kind
                    .format_range(bar.bin.lower_bound, bar.bin.upper_bound),
                count: bar.bin.count(),
                fill: bar.style.fill.to_string(),
                members: bar.bin.members.clone(),
            })
            .collect(),
    }
}

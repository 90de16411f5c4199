//! `GeoJSON` conversion for aggregated and filtered features.
//!
//! Each count location becomes a `Point` feature with `[longitude,
//! latitude]` coordinates. Its descriptive fields and summed counts go in
//! the `properties` bag under camelCase keys, plus `selectedSum` and
//! `normalizedSum` for filtered output.

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, feature::Id};
use serde_json::Value;
use traffic_map_traffic_models::{AggregatedFeature, CountPointId};

use crate::filter::FilteredFeature;

fn properties_object(feature: &AggregatedFeature) -> Result<JsonObject, serde_json::Error> {
    match serde_json::to_value(&feature.properties)? {
        Value::Object(map) => Ok(map),
        _ => Ok(JsonObject::new()),
    }
}

fn point_feature(feature: &AggregatedFeature, properties: JsonObject) -> Feature {
    let id = match feature.point_id() {
        CountPointId::Numeric(n) => Id::Number((*n).into()),
        CountPointId::Text(s) => Id::String(s.clone()),
    };

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(geojson::Value::Point(vec![
            feature.longitude,
            feature.latitude,
        ]))),
        id: Some(id),
        properties: Some(properties),
        foreign_members: None,
    }
}

fn collection(features: Vec<Feature>) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Converts aggregated features into a `GeoJSON` feature collection.
///
/// # Errors
///
/// Returns an error if a feature's properties fail to serialize.
pub fn feature_collection(
    features: &[AggregatedFeature],
) -> Result<FeatureCollection, serde_json::Error> {
    let features = features
        .iter()
        .map(|f| Ok(point_feature(f, properties_object(f)?)))
        .collect::<Result<Vec<_>, serde_json::Error>>()?;

    Ok(collection(features))
}

/// Converts the output of a filter pass into a `GeoJSON` feature
/// collection carrying `selectedSum` and `normalizedSum`.
///
/// # Errors
///
/// Returns an error if a feature's properties fail to serialize.
pub fn filtered_feature_collection(
    features: &[FilteredFeature],
) -> Result<FeatureCollection, serde_json::Error> {
    let features = features
        .iter()
        .map(|f| {
            let mut properties = properties_object(&f.feature)?;
            properties.insert("selectedSum".to_string(), f.selected_sum.into());
            properties.insert("normalizedSum".to_string(), f.normalized_sum.into());
            Ok(point_feature(&f.feature, properties))
        })
        .collect::<Result<Vec<_>, serde_json::Error>>()?;

    Ok(collection(features))
}

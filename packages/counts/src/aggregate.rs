//! Folds directional count rows into one feature per count point.

use std::collections::HashMap;

use traffic_map_traffic_models::{AggregatedFeature, CountPointId, RawCountRecord};

/// Groups `records` by `count_point_id`, summing counts across directions.
///
/// The first record seen for an identifier seeds the feature's descriptive
/// fields and coordinates. Later records for the same identifier only add
/// their counts. Output order is the order in which each identifier first
/// appears in `records`.
#[must_use]
pub fn aggregate(records: &[RawCountRecord]) -> Vec<AggregatedFeature> {
    let mut features: Vec<AggregatedFeature> = Vec::new();
    let mut index: HashMap<CountPointId, usize> = HashMap::new();

    for record in records {
        if let Some(&i) = index.get(&record.count_point_id) {
            let feature = &mut features[i];
            if feature.properties.road_name != record.road_name {
                log::debug!(
                    "Count point {} has conflicting road names {:?} and {:?}, keeping the first",
                    record.count_point_id,
                    feature.properties.road_name,
                    record.road_name,
                );
            }
            feature.properties.counts += record.counts();
        } else {
            index.insert(record.count_point_id.clone(), features.len());
            features.push(AggregatedFeature::from(record));
        }
    }

    log::info!(
        "Aggregated {} count records into {} locations",
        records.len(),
        features.len()
    );

    features
}

#[cfg(test)]
mod tests {
    use super::*;
    use traffic_map_traffic_models::{TrafficCounts, VehicleCategory};

    fn record(id: u64, road: &str, cars: f64) -> RawCountRecord {
        RawCountRecord {
            count_point_id: id.into(),
            road_type: Some("Major".to_string()),
            road_name: Some(road.to_string()),
            cars_and_taxis: cars,
            all_motor_vehicles: cars,
            longitude: -3.8,
            latitude: 50.7,
            ..RawCountRecord::default()
        }
    }

    fn total(features: &[AggregatedFeature], category: VehicleCategory) -> f64 {
        features.iter().map(|f| f.counts().get(category)).sum()
    }

    #[test]
    fn merges_directions_of_the_same_count_point() {
        let features = aggregate(&[record(6023, "A38", 100.0), record(6023, "A38", 50.0)]);

        assert_eq!(features.len(), 1);
        assert_eq!(features[0].point_id(), &CountPointId::Numeric(6023));
        assert!((features[0].counts().cars - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn keeps_first_appearance_order() {
        let features = aggregate(&[
            record(3, "A3", 1.0),
            record(1, "A1", 1.0),
            record(3, "A3", 1.0),
            record(2, "A2", 1.0),
            record(1, "A1", 1.0),
        ]);

        let ids: Vec<String> = features.iter().map(|f| f.point_id().to_string()).collect();
        assert_eq!(ids, ["3", "1", "2"]);
    }

    #[test]
    fn first_record_wins_for_descriptive_fields() {
        let mut second = record(7, "B3212", 10.0);
        second.longitude = 1.0;
        second.latitude = 2.0;
        second.start_junction_road_name = Some("Elsewhere".to_string());

        let features = aggregate(&[record(7, "A30", 5.0), second]);

        assert_eq!(features[0].properties.road_name.as_deref(), Some("A30"));
        assert_eq!(features[0].properties.start_junction, None);
        assert!((features[0].longitude - -3.8).abs() < f64::EPSILON);
        assert!((features[0].latitude - 50.7).abs() < f64::EPSILON);
        assert!((features[0].counts().cars - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn preserves_category_totals_and_distinct_ids() {
        let records: Vec<RawCountRecord> = (0..40u32)
            .map(|i| RawCountRecord {
                count_point_id: u64::from(i % 7).into(),
                pedal_cycles: f64::from(i),
                two_wheeled_motor_vehicles: f64::from(i * 2),
                cars_and_taxis: f64::from(i * 3),
                buses_and_coaches: f64::from(i % 4),
                lgvs: f64::from(i + 1),
                all_hgvs: f64::from(i % 5),
                all_motor_vehicles: f64::from(i * 10),
                ..RawCountRecord::default()
            })
            .collect();

        let features = aggregate(&records);
        assert_eq!(features.len(), 7);

        for category in VehicleCategory::all() {
            let raw: f64 = records.iter().map(|r| r.counts().get(*category)).sum();
            assert!(
                (total(&features, *category) - raw).abs() < f64::EPSILON,
                "{category} total changed by aggregation"
            );
        }
    }

    #[test]
    fn numeric_and_string_ids_group_together() {
        let records: Vec<RawCountRecord> = serde_json::from_str(
            r#"[
                { "count_point_id": 6023, "cars_and_taxis": 100 },
                { "count_point_id": "6023", "cars_and_taxis": "50" }
            ]"#,
        )
        .unwrap();

        let features = aggregate(&records);
        assert_eq!(features.len(), 1);
        assert_eq!(
            *features[0].counts(),
            TrafficCounts {
                cars: 150.0,
                ..TrafficCounts::default()
            }
        );
    }

    #[test]
    fn whole_float_ids_group_with_integer_ids() {
        let records: Vec<RawCountRecord> = serde_json::from_str(
            r#"[
                { "count_point_id": 6023, "cars_and_taxis": 100 },
                { "count_point_id": 6023.0, "cars_and_taxis": 50 },
                { "count_point_id": "6023.0", "cars_and_taxis": 1 }
            ]"#,
        )
        .unwrap();

        let features = aggregate(&records);
        assert_eq!(features.len(), 1);
        assert_eq!(*features[0].point_id(), CountPointId::Numeric(6023));
        assert!((features[0].counts().cars - 151.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_input_yields_no_features() {
        assert!(aggregate(&[]).is_empty());
    }
}

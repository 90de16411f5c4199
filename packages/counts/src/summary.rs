//! Dataset-wide totals for the aggregated count locations.

use serde::{Deserialize, Serialize};
use traffic_map_traffic_models::{AggregatedFeature, TrafficCounts};

/// Totals over a loaded dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetSummary {
    /// Number of raw directional records loaded.
    pub record_count: usize,
    /// Number of distinct count locations.
    pub feature_count: usize,
    /// Category totals across every location.
    pub totals: TrafficCounts,
    /// Largest `allMotorVehicles` at any single location (0 when empty).
    pub max_all_motor_vehicles: f64,
}

impl DatasetSummary {
    /// Summarizes `features`, which were aggregated from `record_count`
    /// raw records.
    #[must_use]
    pub fn new(record_count: usize, features: &[AggregatedFeature]) -> Self {
        let mut totals = TrafficCounts::default();
        let mut max_all_motor_vehicles = 0.0_f64;

        for feature in features {
            totals += *feature.counts();
            max_all_motor_vehicles =
                max_all_motor_vehicles.max(feature.counts().all_motor_vehicles);
        }

        Self {
            record_count,
            feature_count: features.len(),
            totals,
            max_all_motor_vehicles,
        }
    }
}

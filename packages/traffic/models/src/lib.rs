#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Traffic count record types, vehicle categories, and filter state.
//!
//! The raw dataset has one [`RawCountRecord`] per direction of travel at a
//! count point. Those rows are folded into one [`AggregatedFeature`] per
//! physical location. [`FilterState`] holds the checkbox flags that decide
//! which [`VehicleCategory`] counts feed the displayed metric.

mod coerce;
pub mod filter;

use std::fmt;
use std::ops::AddAssign;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use strum_macros::{AsRefStr, Display, EnumString};

pub use coerce::{count_or_zero, number_or_zero};
pub use filter::FilterState;

/// A vehicle category that can be toggled on the map.
///
/// [`VehicleCategory::AllMotor`] is a convenience flag standing in for the
/// five individual motor categories at once.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum VehicleCategory {
    /// Pedal cycles
    Pedalbikes,
    /// All motor vehicles combined
    AllMotor,
    /// Two-wheeled motor vehicles
    Motorbikes,
    /// Cars and taxis
    Cars,
    /// Buses and coaches
    Buses,
    /// Light goods vehicles
    Lgvs,
    /// Heavy goods vehicles (all axle classes)
    Hgvs,
}

impl VehicleCategory {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Pedalbikes,
            Self::AllMotor,
            Self::Motorbikes,
            Self::Cars,
            Self::Buses,
            Self::Lgvs,
            Self::Hgvs,
        ]
    }

    /// The five motor categories covered by [`Self::AllMotor`].
    #[must_use]
    pub const fn individual_motor() -> &'static [Self] {
        &[
            Self::Motorbikes,
            Self::Cars,
            Self::Buses,
            Self::Lgvs,
            Self::Hgvs,
        ]
    }

    /// Whether this is one of the five individual motor categories.
    #[must_use]
    pub const fn is_individual_motor(self) -> bool {
        matches!(
            self,
            Self::Motorbikes | Self::Cars | Self::Buses | Self::Lgvs | Self::Hgvs
        )
    }

    /// Human-readable checkbox label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pedalbikes => "Pedal cycles",
            Self::AllMotor => "All motor vehicles",
            Self::Motorbikes => "Motorbikes",
            Self::Cars => "Cars and taxis",
            Self::Buses => "Buses and coaches",
            Self::Lgvs => "Light goods vehicles",
            Self::Hgvs => "Heavy goods vehicles",
        }
    }

    /// Name of the raw dataset field holding this category's count.
    #[must_use]
    pub const fn source_field(self) -> &'static str {
        match self {
            Self::Pedalbikes => "pedal_cycles",
            Self::AllMotor => "all_motor_vehicles",
            Self::Motorbikes => "two_wheeled_motor_vehicles",
            Self::Cars => "cars_and_taxis",
            Self::Buses => "buses_and_coaches",
            Self::Lgvs => "lgvs",
            Self::Hgvs => "all_hgvs",
        }
    }
}

/// Identifier of a physical count point.
///
/// The raw data is not consistent about whether `count_point_id` is a
/// number or a string. Whole non-negative numbers, in either form, are
/// normalized to [`CountPointId::Numeric`] so that `"6023"`, `6023.0` and
/// `6023` name the same location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum CountPointId {
    /// Non-negative integer identifier.
    Numeric(u64),
    /// Any other identifier, kept verbatim.
    Text(String),
}

impl CountPointId {
    /// Builds an identifier from an arbitrary JSON value.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Number(n) => n
                .as_u64()
                .or_else(|| n.as_f64().and_then(whole_number))
                .map_or_else(|| Self::Text(n.to_string()), Self::Numeric),
            Value::String(s) => {
                let trimmed = s.trim();
                trimmed
                    .parse::<u64>()
                    .ok()
                    .or_else(|| trimmed.parse::<f64>().ok().and_then(whole_number))
                    .map_or_else(|| Self::Text(s.clone()), Self::Numeric)
            }
            Value::Null => Self::default(),
            other => Self::Text(other.to_string()),
        }
    }
}

/// `value` as a `u64` when it is finite, non-negative and whole.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::float_cmp
)]
fn whole_number(value: f64) -> Option<u64> {
    (value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value < u64::MAX as f64)
        .then(|| value as u64)
}

impl Default for CountPointId {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl From<u64> for CountPointId {
    fn from(value: u64) -> Self {
        Self::Numeric(value)
    }
}

impl fmt::Display for CountPointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for CountPointId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_json(&value))
    }
}

/// One directional observation from the raw traffic-count dataset.
///
/// Field names match the dataset exactly. Counts and coordinates that are
/// missing or non-numeric decode to zero, as do negative counts, so
/// deserializing a record never fails on its numeric content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCountRecord {
    /// Physical count point the observation belongs to.
    #[serde(default)]
    pub count_point_id: CountPointId,
    /// Road classification.
    #[serde(default, deserialize_with = "coerce::optional_text")]
    pub road_type: Option<String>,
    /// Road name.
    #[serde(default, deserialize_with = "coerce::optional_text")]
    pub road_name: Option<String>,
    /// Junction at the start of the counted link.
    #[serde(default, deserialize_with = "coerce::optional_text")]
    pub start_junction_road_name: Option<String>,
    /// Junction at the end of the counted link.
    #[serde(default, deserialize_with = "coerce::optional_text")]
    pub end_junction_road_name: Option<String>,
    /// Pedal cycles.
    #[serde(default, deserialize_with = "coerce::count")]
    pub pedal_cycles: f64,
    /// Motorcycles and other two-wheeled motor vehicles.
    #[serde(default, deserialize_with = "coerce::count")]
    pub two_wheeled_motor_vehicles: f64,
    /// Cars and taxis.
    #[serde(default, deserialize_with = "coerce::count")]
    pub cars_and_taxis: f64,
    /// Buses and coaches.
    #[serde(default, deserialize_with = "coerce::count")]
    pub buses_and_coaches: f64,
    /// Light goods vans.
    #[serde(default, deserialize_with = "coerce::count")]
    pub lgvs: f64,
    /// Heavy goods vehicles.
    #[serde(default, deserialize_with = "coerce::count")]
    pub all_hgvs: f64,
    /// Every motor vehicle, as reported by the source.
    #[serde(default, deserialize_with = "coerce::count")]
    pub all_motor_vehicles: f64,
    /// Longitude (WGS84).
    #[serde(default, deserialize_with = "coerce::coordinate")]
    pub longitude: f64,
    /// Latitude (WGS84).
    #[serde(default, deserialize_with = "coerce::coordinate")]
    pub latitude: f64,
}

impl RawCountRecord {
    /// The record's vehicle counts.
    #[must_use]
    pub const fn counts(&self) -> TrafficCounts {
        TrafficCounts {
            pushbikes: self.pedal_cycles,
            motorbikes: self.two_wheeled_motor_vehicles,
            cars: self.cars_and_taxis,
            buses: self.buses_and_coaches,
            lgvs: self.lgvs,
            hgvs: self.all_hgvs,
            all_motor_vehicles: self.all_motor_vehicles,
        }
    }
}

/// Vehicle counts for one location, summed over every direction observed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficCounts {
    /// Pedal cycles.
    pub pushbikes: f64,
    /// Two-wheeled motor vehicles.
    pub motorbikes: f64,
    /// Cars and taxis.
    pub cars: f64,
    /// Buses and coaches.
    pub buses: f64,
    /// Light goods vans.
    pub lgvs: f64,
    /// Heavy goods vehicles.
    pub hgvs: f64,
    /// Every motor vehicle, as reported by the source.
    pub all_motor_vehicles: f64,
}

impl TrafficCounts {
    /// Returns the count for a single category.
    #[must_use]
    pub const fn get(&self, category: VehicleCategory) -> f64 {
        match category {
            VehicleCategory::Pedalbikes => self.pushbikes,
            VehicleCategory::AllMotor => self.all_motor_vehicles,
            VehicleCategory::Motorbikes => self.motorbikes,
            VehicleCategory::Cars => self.cars,
            VehicleCategory::Buses => self.buses,
            VehicleCategory::Lgvs => self.lgvs,
            VehicleCategory::Hgvs => self.hgvs,
        }
    }
}

impl AddAssign for TrafficCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.pushbikes += rhs.pushbikes;
        self.motorbikes += rhs.motorbikes;
        self.cars += rhs.cars;
        self.buses += rhs.buses;
        self.lgvs += rhs.lgvs;
        self.hgvs += rhs.hgvs;
        self.all_motor_vehicles += rhs.all_motor_vehicles;
    }
}

/// Descriptive fields and summed counts for a count location.
///
/// Serialized as the `properties` bag of the location's map feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationProperties {
    /// Count point identifier (unique across aggregated features).
    pub point_id: CountPointId,
    /// Road classification (e.g. `"Major"`).
    pub road_type: Option<String>,
    /// Road name (e.g. `"A38"`).
    pub road_name: Option<String>,
    /// Junction at the start of the counted link.
    pub start_junction: Option<String>,
    /// Junction at the end of the counted link.
    pub end_junction: Option<String>,
    #[serde(flatten)]
    pub counts: TrafficCounts,
}

/// One physical count location with counts summed across directions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedFeature {
    pub properties: LocationProperties,
    /// Longitude (WGS84).
    pub longitude: f64,
    /// Latitude (WGS84).
    pub latitude: f64,
}

impl AggregatedFeature {
    /// Identifier of the location this feature represents.
    #[must_use]
    pub const fn point_id(&self) -> &CountPointId {
        &self.properties.point_id
    }

    /// Summed counts for this location.
    #[must_use]
    pub const fn counts(&self) -> &TrafficCounts {
        &self.properties.counts
    }
}

impl From<&RawCountRecord> for AggregatedFeature {
    /// Seeds a feature from the first record seen for its location.
    fn from(record: &RawCountRecord) -> Self {
        Self {
            properties: LocationProperties {
                point_id: record.count_point_id.clone(),
                road_type: record.road_type.clone(),
                road_name: record.road_name.clone(),
                start_junction: record.start_junction_road_name.clone(),
                end_junction: record.end_junction_road_name.clone(),
                counts: record.counts(),
            },
            longitude: record.longitude,
            latitude: record.latitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn category_names_roundtrip_through_strum() {
        for category in VehicleCategory::all() {
            let name = category.to_string();
            let parsed: VehicleCategory = name.parse().unwrap();
            assert_eq!(parsed, *category);
        }
        assert_eq!(VehicleCategory::AllMotor.as_ref(), "allMotor");
        assert!("trams".parse::<VehicleCategory>().is_err());
    }

    #[test]
    fn individual_motor_excludes_aggregate_and_pedal() {
        let motor = VehicleCategory::individual_motor();
        assert_eq!(motor.len(), 5);
        assert!(!motor.contains(&VehicleCategory::AllMotor));
        assert!(!motor.contains(&VehicleCategory::Pedalbikes));
        assert!(motor.iter().all(|c| c.is_individual_motor()));
    }

    #[test]
    fn count_point_id_normalizes_numeric_strings() {
        assert_eq!(
            CountPointId::from_json(&json!("6023")),
            CountPointId::from_json(&json!(6023))
        );
        assert_eq!(
            CountPointId::from_json(&json!("CP-12")),
            CountPointId::Text("CP-12".to_string())
        );
        assert_eq!(CountPointId::from_json(&json!(null)), CountPointId::default());
    }

    #[test]
    fn count_point_id_normalizes_whole_floats() {
        let expected = CountPointId::Numeric(6023);
        assert_eq!(CountPointId::from_json(&json!(6023)), expected);
        assert_eq!(CountPointId::from_json(&json!(6023.0)), expected);
        assert_eq!(CountPointId::from_json(&json!("6023.0")), expected);
        assert_eq!(CountPointId::from_json(&json!(" 6023.0 ")), expected);

        assert_eq!(
            CountPointId::from_json(&json!(6023.5)),
            CountPointId::Text("6023.5".to_string())
        );
        assert_eq!(
            CountPointId::from_json(&json!("-1")),
            CountPointId::Text("-1".to_string())
        );
    }

    #[test]
    fn record_with_negative_counts_keeps_negative_coordinates() {
        let record: RawCountRecord = serde_json::from_value(json!({
            "count_point_id": 6023,
            "cars_and_taxis": "-5",
            "lgvs": -10,
            "longitude": -3.819_44,
            "latitude": "50.724423"
        }))
        .unwrap();

        assert!(record.cars_and_taxis.abs() < f64::EPSILON);
        assert!(record.lgvs.abs() < f64::EPSILON);
        assert!((record.longitude - -3.819_44).abs() < f64::EPSILON);
        assert!((record.latitude - 50.724_423).abs() < f64::EPSILON);
    }

    #[test]
    fn record_with_garbage_counts_decodes_to_zero() {
        let record: RawCountRecord = serde_json::from_value(json!({
            "count_point_id": 6023,
            "road_type": "Major",
            "road_name": "A38",
            "start_junction_road_name": "A380",
            "end_junction_road_name": null,
            "pedal_cycles": "",
            "two_wheeled_motor_vehicles": "12",
            "cars_and_taxis": 100,
            "buses_and_coaches": "n/a",
            "lgvs": null,
            "longitude": "-3.81944",
            "latitude": 50.724_423,
            "direction_of_travel": "N"
        }))
        .unwrap();

        assert_eq!(record.count_point_id, CountPointId::Numeric(6023));
        assert_eq!(record.road_name.as_deref(), Some("A38"));
        assert_eq!(record.end_junction_road_name, None);
        assert!(record.pedal_cycles.abs() < f64::EPSILON);
        assert!((record.two_wheeled_motor_vehicles - 12.0).abs() < f64::EPSILON);
        assert!((record.cars_and_taxis - 100.0).abs() < f64::EPSILON);
        assert!(record.buses_and_coaches.abs() < f64::EPSILON);
        assert!(record.lgvs.abs() < f64::EPSILON);
        assert!(record.all_hgvs.abs() < f64::EPSILON);
        assert!((record.longitude - -3.819_44).abs() < f64::EPSILON);
    }

    #[test]
    fn counts_add_fieldwise() {
        let mut total = TrafficCounts {
            cars: 100.0,
            all_motor_vehicles: 120.0,
            ..TrafficCounts::default()
        };
        total += TrafficCounts {
            cars: 50.0,
            pushbikes: 3.0,
            all_motor_vehicles: 55.0,
            ..TrafficCounts::default()
        };

        assert!((total.get(VehicleCategory::Cars) - 150.0).abs() < f64::EPSILON);
        assert!((total.get(VehicleCategory::Pedalbikes) - 3.0).abs() < f64::EPSILON);
        assert!((total.get(VehicleCategory::AllMotor) - 175.0).abs() < f64::EPSILON);
    }

    #[test]
    fn properties_serialize_flat_in_camel_case() {
        let record = RawCountRecord {
            count_point_id: 6023_u64.into(),
            road_name: Some("A38".to_string()),
            cars_and_taxis: 150.0,
            ..RawCountRecord::default()
        };
        let feature = AggregatedFeature::from(&record);
        let value = serde_json::to_value(&feature.properties).unwrap();

        assert_eq!(value["pointId"], json!(6023));
        assert_eq!(value["roadName"], json!("A38"));
        assert_eq!(value["cars"], json!(150.0));
        assert_eq!(value["allMotorVehicles"], json!(0.0));
    }
}

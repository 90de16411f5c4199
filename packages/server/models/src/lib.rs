#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the traffic map server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the count model types to allow independent evolution of the API
//! contract.

use geojson::FeatureCollection;
use serde::{Deserialize, Serialize};
use traffic_map_traffic_models::{FilterState, VehicleCategory};

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// A vehicle category checkbox as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCategory {
    /// Flag name used in queries and toggle requests.
    pub name: VehicleCategory,
    /// Checkbox label.
    pub label: String,
    /// Raw dataset field the count comes from.
    pub source_field: String,
    /// Whether this is one of the five individual motor categories.
    pub individual_motor: bool,
}

impl From<VehicleCategory> for ApiCategory {
    fn from(category: VehicleCategory) -> Self {
        Self {
            name: category,
            label: category.label().to_string(),
            source_field: category.source_field().to_string(),
            individual_motor: category.is_individual_motor(),
        }
    }
}

/// Query parameters for the features endpoint.
///
/// Each parameter is the checked state of one category checkbox. Omitted
/// parameters are unchecked.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureQueryParams {
    /// Pedal cycles checkbox.
    pub pedalbikes: Option<bool>,
    /// All motor vehicles checkbox.
    pub all_motor: Option<bool>,
    /// Two-wheeled motor vehicles checkbox.
    pub motorbikes: Option<bool>,
    /// Cars and taxis checkbox.
    pub cars: Option<bool>,
    /// Buses and coaches checkbox.
    pub buses: Option<bool>,
    /// Light goods vans checkbox.
    pub lgvs: Option<bool>,
    /// Heavy goods vehicles checkbox.
    pub hgvs: Option<bool>,
}

impl FeatureQueryParams {
    /// The filter described by the query, or `None` when no flag was given
    /// at all (the unfiltered view).
    #[must_use]
    pub fn filter_state(&self) -> Option<FilterState> {
        let flags = [
            self.pedalbikes,
            self.all_motor,
            self.motorbikes,
            self.cars,
            self.buses,
            self.lgvs,
            self.hgvs,
        ];
        if flags.iter().all(Option::is_none) {
            return None;
        }

        Some(FilterState {
            pedalbikes: self.pedalbikes.unwrap_or(false),
            all_motor: self.all_motor.unwrap_or(false),
            motorbikes: self.motorbikes.unwrap_or(false),
            cars: self.cars.unwrap_or(false),
            buses: self.buses.unwrap_or(false),
            lgvs: self.lgvs.unwrap_or(false),
            hgvs: self.hgvs.unwrap_or(false),
        })
    }
}

/// Request body for the filter toggle endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleRequest {
    /// Checkbox state before the click. Defaults to all unchecked.
    #[serde(default)]
    pub state: FilterState,
    /// Checkbox that was clicked.
    pub category: VehicleCategory,
    /// New checked state of that checkbox.
    pub checked: bool,
}

/// Response from the filter toggle endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleResponse {
    /// Checkbox state after the click, with the all-motor flag reconciled.
    pub state: FilterState,
    /// Features recomputed for the new state.
    pub features: FeatureCollection,
}

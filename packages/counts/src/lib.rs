#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Aggregation, category filtering, and `GeoJSON` export for traffic count
//! data.
//!
//! Raw directional rows are folded into one feature per count point by
//! [`aggregate()`]. [`apply_filter()`] then derives a selected sum and a
//! normalized marker size for each feature from the current
//! [`FilterState`](traffic_map_traffic_models::FilterState). Both results
//! convert to `GeoJSON` feature collections for the map frontend.

pub mod aggregate;
pub mod collection;
pub mod dataset;
pub mod filter;
pub mod summary;

pub use aggregate::aggregate;
pub use collection::{feature_collection, filtered_feature_collection};
pub use dataset::{DatasetError, load_dataset, parse_dataset};
pub use filter::{DEGENERATE_NORMALIZED_SUM, FilteredFeature, apply_filter};
pub use summary::DatasetSummary;

//! Selected-sum and normalized marker size for a filter pass.

use serde::{Deserialize, Serialize};
use traffic_map_traffic_models::{AggregatedFeature, FilterState};

/// Normalized sum given to every feature when the largest selected sum is
/// zero (no categories checked, or an all-zero dataset).
pub const DEGENERATE_NORMALIZED_SUM: f64 = 0.1;

/// An aggregated feature with the metrics derived from one filter pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteredFeature {
    pub feature: AggregatedFeature,
    /// Sum of the counts for the active categories.
    pub selected_sum: f64,
    /// `selected_sum` relative to the largest selected sum in the pass.
    pub normalized_sum: f64,
}

/// Computes the selected and normalized sums of every feature for `state`.
///
/// The input is only borrowed, so repeated passes over the same features
/// are independent of each other and of the order they run in.
#[must_use]
pub fn apply_filter(features: &[AggregatedFeature], state: &FilterState) -> Vec<FilteredFeature> {
    let sums: Vec<f64> = features
        .iter()
        .map(|f| state.selected_sum(f.counts()))
        .collect();

    let max = sums.iter().copied().fold(0.0_f64, f64::max);

    log::debug!(
        "Filtering {} features with {:?}: max selected sum {max}",
        features.len(),
        state.active_categories()
    );

    features
        .iter()
        .zip(sums)
        .map(|(feature, selected_sum)| FilteredFeature {
            feature: feature.clone(),
            selected_sum,
            normalized_sum: if max > 0.0 {
                selected_sum / max
            } else {
                DEGENERATE_NORMALIZED_SUM
            },
        })
        .collect()
}

//! HTTP handler functions for the traffic map API.

use actix_web::{HttpResponse, web};
use traffic_map_counts::{apply_filter, feature_collection, filtered_feature_collection};
use traffic_map_server_models::{
    ApiCategory, ApiHealth, FeatureQueryParams, ToggleRequest, ToggleResponse,
};
use traffic_map_traffic_models::VehicleCategory;

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/categories`
///
/// Returns the category checkboxes in display order.
pub async fn categories() -> HttpResponse {
    let categories: Vec<ApiCategory> = VehicleCategory::all()
        .iter()
        .copied()
        .map(ApiCategory::from)
        .collect();

    HttpResponse::Ok().json(categories)
}

/// `GET /api/summary`
pub async fn summary(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(&state.summary)
}

/// `GET /api/features`
///
/// Returns every count location as `GeoJSON`. When any category flag is
/// given, the features also carry `selectedSum` and `normalizedSum` for
/// that filter.
pub async fn features(
    state: web::Data<AppState>,
    params: web::Query<FeatureQueryParams>,
) -> HttpResponse {
    let collection = match params.filter_state() {
        Some(filter) => filtered_feature_collection(&apply_filter(&state.features, &filter)),
        None => feature_collection(&state.features),
    };

    match collection {
        Ok(collection) => HttpResponse::Ok().json(collection),
        Err(e) => collection_error(&e),
    }
}

/// `POST /api/filter/toggle`
///
/// Applies one checkbox click to the submitted filter state and returns
/// the reconciled state with the features recomputed for it.
pub async fn toggle_filter(
    state: web::Data<AppState>,
    body: web::Json<ToggleRequest>,
) -> HttpResponse {
    let request = body.into_inner();
    let next = request.state.toggle(request.category, request.checked);
    log::debug!(
        "Toggled {} to {}: {:?}",
        request.category,
        request.checked,
        next.active_categories()
    );

    match filtered_feature_collection(&apply_filter(&state.features, &next)) {
        Ok(features) => HttpResponse::Ok().json(ToggleResponse {
            state: next,
            features,
        }),
        Err(e) => collection_error(&e),
    }
}

fn collection_error(e: &serde_json::Error) -> HttpResponse {
    log::error!("Failed to build feature collection: {e}");
    HttpResponse::InternalServerError().json(serde_json::json!({
        "error": "Failed to build feature collection"
    }))
}

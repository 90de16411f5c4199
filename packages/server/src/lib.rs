#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web server for the traffic map application.
//!
//! Serves the built map frontend as static files and a small JSON API over
//! the traffic count dataset. The dataset is loaded and aggregated once at
//! startup. Every filter request is computed from that immutable set of
//! aggregated features, so requests never observe each other's filters.

pub mod config;
mod handlers;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use traffic_map_counts::{DatasetError, DatasetSummary, aggregate, load_dataset};
use traffic_map_traffic_models::{AggregatedFeature, RawCountRecord};

pub use config::ServerConfig;

/// Errors that stop the server from starting or running.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The traffic count dataset could not be loaded.
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    /// Binding or running the HTTP server failed.
    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shared application state.
pub struct AppState {
    /// One feature per count location, in dataset order.
    pub features: Vec<AggregatedFeature>,
    /// Totals over the loaded dataset.
    pub summary: DatasetSummary,
}

impl AppState {
    /// Aggregates `records` into the state served by the API.
    #[must_use]
    pub fn from_records(records: &[RawCountRecord]) -> Self {
        let features = aggregate(records);
        let summary = DatasetSummary::new(records.len(), &features);
        Self { features, summary }
    }
}

/// Registers the `/api` routes on a scope.
pub fn api_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(handlers::health))
        .route("/categories", web::get().to(handlers::categories))
        .route("/summary", web::get().to(handlers::summary))
        .route("/features", web::get().to(handlers::features))
        .route("/filter/toggle", web::post().to(handlers::toggle_filter));
}

/// Starts the traffic map server.
///
/// Reads [`ServerConfig`] from the environment (`PORT`, `BIND_ADDR`,
/// `DATA_PATH`, `STATIC_DIR`), loads and aggregates the dataset, and
/// starts the Actix-Web HTTP server. The caller provides the async runtime
/// (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns [`ServerError::Dataset`] if the dataset cannot be loaded, or
/// [`ServerError::Io`] if the HTTP server fails to bind or encounters a
/// runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> Result<(), ServerError> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let config = ServerConfig::from_env();

    log::info!("Loading traffic counts from {}...", config.data_path.display());
    let records = load_dataset(&config.data_path)?;
    let state = web::Data::new(AppState::from_records(&records));

    log::info!(
        "Starting server on {}:{} (static files from {})",
        config.bind_addr,
        config.port,
        config.static_dir.display()
    );

    let static_dir = config.static_dir.clone();

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .service(web::scope("/api").configure(api_routes))
            // Serve the map frontend
            .service(Files::new("/", static_dir.clone()).index_file("index.html"))
    })
    .bind((config.bind_addr.clone(), config.port))?
    .run()
    .await?;

    Ok(())
}

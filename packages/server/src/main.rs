#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web server for the traffic map application.
//!
//! Serves the bundled map frontend and the count location API. See
//! [`traffic_map_server::run_server`] for configuration.

#[actix_web::main]
async fn main() -> Result<(), traffic_map_server::ServerError> {
    traffic_map_server::run_server().await
}

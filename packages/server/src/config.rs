//! Server configuration from environment variables.

use std::path::PathBuf;

/// Default listen port when `PORT` is unset or not a valid port number.
pub const DEFAULT_PORT: u16 = 8080;
/// Default bind address when `BIND_ADDR` is unset.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
/// Default dataset location when `DATA_PATH` is unset.
pub const DEFAULT_DATA_PATH: &str = "data/data.json";
/// Default frontend bundle directory when `STATIC_DIR` is unset.
pub const DEFAULT_STATIC_DIR: &str = "dist";

/// Runtime settings for [`crate::run_server`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind (`BIND_ADDR`).
    pub bind_addr: String,
    /// Port to listen on (`PORT`).
    pub port: u16,
    /// Raw traffic-count dataset (`DATA_PATH`).
    pub data_path: PathBuf,
    /// Directory holding the built frontend (`STATIC_DIR`).
    pub static_dir: PathBuf,
}

impl ServerConfig {
    /// Reads the configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            port,
            data_path: lookup("DATA_PATH").map_or_else(|| DEFAULT_DATA_PATH.into(), PathBuf::from),
            static_dir: lookup("STATIC_DIR")
                .map_or_else(|| DEFAULT_STATIC_DIR.into(), PathBuf::from),
        }
    }
}

//! Loading the raw traffic-count dataset.
//!
//! The bundled dataset is a JSON object with the records under `data`. A
//! bare top-level array of records is accepted as well.

use std::path::Path;

use serde::Deserialize;
use traffic_map_traffic_models::RawCountRecord;

/// Errors that can occur while loading a dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// I/O error reading the dataset file.
    #[error("I/O error reading {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not JSON, or not a list of records.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DatasetFile {
    Wrapped { data: Vec<RawCountRecord> },
    Bare(Vec<RawCountRecord>),
}

/// Parses dataset JSON into raw count records.
///
/// # Errors
///
/// Returns [`DatasetError::Json`] if the input is not valid JSON or is
/// neither an array of records nor an object with a `data` array.
pub fn parse_dataset(json: &str) -> Result<Vec<RawCountRecord>, DatasetError> {
    let records = match serde_json::from_str::<DatasetFile>(json)? {
        DatasetFile::Wrapped { data } => data,
        DatasetFile::Bare(records) => records,
    };
    Ok(records)
}

/// Reads and parses the dataset at `path`.
///
/// # Errors
///
/// Returns [`DatasetError::Io`] if the file cannot be read, or
/// [`DatasetError::Json`] if its contents cannot be parsed.
pub fn load_dataset(path: &Path) -> Result<Vec<RawCountRecord>, DatasetError> {
    let contents = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let records = parse_dataset(&contents)?;
    log::info!("Loaded {} count records from {}", records.len(), path.display());

    Ok(records)
}

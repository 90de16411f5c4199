#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI tool for exporting aggregated traffic counts.
//!
//! Loads the raw dataset, folds it into one feature per count point, and
//! writes the result as `GeoJSON` (optionally filtered by vehicle
//! category) or prints dataset totals.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use traffic_map_counts::{
    DatasetSummary, aggregate, apply_filter, feature_collection, filtered_feature_collection,
    load_dataset,
};
use traffic_map_traffic_models::{FilterState, VehicleCategory};

#[derive(Parser)]
#[command(name = "traffic_map_counts", about = "Traffic count aggregation tool")]
struct Cli {
    /// Raw dataset file
    #[arg(long, default_value = "data/data.json")]
    input: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write count locations as a `GeoJSON` feature collection
    Geojson {
        /// Output file (stdout when omitted)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Category checkbox to check before exporting (repeatable)
        #[arg(long = "category", value_parser = parse_category)]
        categories: Vec<VehicleCategory>,
    },
    /// Print dataset totals as JSON
    Summary,
}

fn parse_category(s: &str) -> Result<VehicleCategory, String> {
    s.parse().map_err(|_| {
        let names: Vec<&str> = VehicleCategory::all().iter().map(|c| c.as_ref()).collect();
        format!("unknown category '{s}', expected one of: {}", names.join(", "))
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();

    let records = load_dataset(&cli.input)?;
    let features = aggregate(&records);

    match cli.command {
        Commands::Geojson {
            output,
            categories,
        } => {
            let collection = if categories.is_empty() {
                feature_collection(&features)?
            } else {
                let state = FilterState::from_checked(categories);
                filtered_feature_collection(&apply_filter(&features, &state))?
            };
            let json = serde_json::to_string(&collection)?;
            write_output(output.as_deref(), &json)?;
        }
        Commands::Summary => {
            let summary = DatasetSummary::new(records.len(), &features);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}

fn write_output(path: Option<&Path>, contents: &str) -> std::io::Result<()> {
    if let Some(path) = path {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        log::info!("GeoJSON written: {}", path.display());
    } else {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(contents.as_bytes())?;
        stdout.write_all(b"\n")?;
    }
    Ok(())
}

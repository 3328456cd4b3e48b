#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! File-driven harness for the air quality map estimation engine.
//!
//! `resolve` binds every feature of a ward boundary `GeoJSON` file to a
//! backend ward or an interpolated estimate and prints the display
//! directives as JSON. `simulate` prints the ward listing under a traffic
//! reduction scenario.

mod input;

use std::path::{Path, PathBuf};

use aqi_map_estimation::{
    EstimationConfig, StationSnapshot, display, feature, resolver, simulate, summary,
};
use aqi_map_estimation_models::{ResolutionSummary, ResolvedFeature, SelectionState};
use clap::{Parser, Subcommand};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "aqi_map_cli", about = "Air quality map estimation tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve ward boundary features to backend wards or estimates
    Resolve {
        /// Ward boundary `GeoJSON` file
        #[arg(long)]
        features: PathBuf,

        /// Backend ward listing (JSON)
        #[arg(long)]
        wards: PathBuf,

        /// Backend station listing (JSON)
        #[arg(long)]
        stations: PathBuf,

        /// Traffic reduction percentage (0-100)
        #[arg(long, default_value_t = 0.0)]
        traffic_reduction: f64,

        /// Feature ID to style as selected
        #[arg(long)]
        selected: Option<String>,

        /// Feature ID to style as hovered
        #[arg(long)]
        hovered: Option<String>,

        /// Estimation config TOML file
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the ward listing under a traffic reduction scenario
    Simulate {
        /// Backend ward listing (JSON)
        #[arg(long)]
        wards: PathBuf,

        /// Traffic reduction percentage (0-100)
        #[arg(long)]
        traffic_reduction: f64,

        /// Estimation config TOML file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResolveOutput {
    features: Vec<ResolvedFeature>,
    summary: ResolutionSummary,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve {
            features,
            wards,
            stations,
            traffic_reduction,
            selected,
            hovered,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let features = feature::parse_features(&std::fs::read_to_string(&features)?)?;
            let wards = input::load_wards(&wards)?;
            let snapshot =
                StationSnapshot::from_stations(input::load_stations(&stations)?, &config.intake);

            let resolved = resolver::resolve_scenario(
                &features,
                &wards,
                &snapshot,
                traffic_reduction,
                &config,
            );
            let summary = summary::summarize(&resolved, snapshot.len());

            log::info!(
                "Resolved {} features ({} estimated)",
                summary.total_wards,
                summary.estimated_wards
            );

            let features = features
                .iter()
                .zip(resolved)
                .map(|(feature, ward)| {
                    let selection = if selected.as_deref() == Some(feature.id.as_str()) {
                        SelectionState::Selected
                    } else if hovered.as_deref() == Some(feature.id.as_str()) {
                        SelectionState::Hovered
                    } else {
                        SelectionState::Idle
                    };
                    display::describe(feature.id.clone(), ward, selection)
                })
                .collect();

            print_json(&ResolveOutput { features, summary })?;
        }
        Commands::Simulate {
            wards,
            traffic_reduction,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let wards = input::load_wards(&wards)?;
            let simulated =
                simulate::simulate_wards(&wards, traffic_reduction, &config.simulation);
            print_json(&simulated)?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<EstimationConfig, Box<dyn std::error::Error>> {
    Ok(match path {
        Some(path) => EstimationConfig::load(path)?,
        None => EstimationConfig::default(),
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

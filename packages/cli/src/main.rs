#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Renders the census tract choropleth and histogram for one ACS
//! attribute, and optionally explores it interactively.
//!
//! The rendered map can be written as styled `GeoJSON` (fill and stroke per
//! tract) and the histogram as JSON.

mod export;
mod interactive;

use std::path::PathBuf;

use clap::Parser;
use tract_map_attributes::AttributeCatalog;
use tract_map_view::{MapConfig, SceneRecorder, Session};

#[derive(Parser)]
#[command(name = "tract_map", about = "Census tract choropleth with a linked histogram")]
struct Cli {
    /// Map configuration (TOML). Built-in defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Tabular dataset (CSV keyed by `tract_id`), overriding the configuration
    #[arg(long)]
    tabular: Option<PathBuf>,

    /// Tract geometry (`GeoJSON`), overriding the configuration
    #[arg(long)]
    geometry: Option<PathBuf>,

    /// Attribute to show instead of the first catalog attribute
    #[arg(long)]
    attribute: Option<String>,

    /// Write the styled map as a `GeoJSON` `FeatureCollection`
    #[arg(long)]
    output: Option<PathBuf>,

    /// Write the histogram bins as JSON
    #[arg(long)]
    histogram: Option<PathBuf>,

    /// Explore attributes, tracts, and bars in the terminal
    #[arg(long)]
    interactive: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = tract_map_cli_utils::init_logger();
    let cli = Cli::parse();

    let mut config = MapConfig::load_or_default(cli.config.as_deref())?;
    if let Some(tabular) = cli.tabular {
        config.data.tabular = tabular;
    }
    if let Some(geometry) = cli.geometry {
        config.data.geometry = geometry;
    }

    let catalog = AttributeCatalog::builtin();
    let mut scene = SceneRecorder::default();

    let spinner = tract_map_cli_utils::load_spinner(&multi, "Loading tract data...");
    let result = Session::bootstrap(&config, catalog, &mut scene).await;
    tract_map_cli_utils::finish_spinner(
        &spinner,
        if result.is_ok() {
            "Tract data loaded"
        } else {
            "Tract data failed to load"
        },
    );
    let mut session = result?;

    if let Some(attribute) = &cli.attribute {
        session.select_attribute(attribute)?;
    }

    if cli.interactive {
        interactive::run(&mut session, &config)?;
    }

    if let Some(path) = &cli.output {
        let collection = export::styled_feature_collection(session.surface(), session.selection());
        std::fs::write(path, serde_json::to_string(&collection)?)?;
        log::info!("Wrote {} tracts to {}", collection.features.len(), path.display());
    }

    if let Some(path) = &cli.histogram {
        let histogram = export::histogram_export(session.surface(), session.selection());
        std::fs::write(path, serde_json::to_string_pretty(&histogram)?)?;
        log::info!("Wrote {} bins to {}", histogram.bins.len(), path.display());
    }

    let summary = session.join_summary();
    println!(
        "{}: {} tracts, {} with data, {} bins",
        session.selection().active_attribute().title,
        session.map().regions().len(),
        summary.matched_features,
        session.selection().binning().len(),
    );

    Ok(())
}

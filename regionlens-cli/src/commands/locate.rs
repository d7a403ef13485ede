//! Locate command - find the region enclosing a position.

use std::path::PathBuf;

use regionlens::resolver::LocateOutcome;

use super::common::{position_arg, print_report, GlobalOptions};
use crate::error::CliError;
use crate::runner::read_features;

/// Arguments for the locate command.
pub struct LocateArgs {
    pub lon: f64,
    pub lat: f64,
    /// GeoJSON FeatureCollection standing in for the loaded region tiles
    pub features: Option<PathBuf>,
}

/// Run the locate command.
///
/// Loads the map the way a browser session would (initial overlays, home
/// view), then runs one locate press with the given coordinates as the
/// device fix.
pub fn run(global: &GlobalOptions, args: LocateArgs) -> Result<(), CliError> {
    let position = position_arg(args.lon, args.lat)?;
    let features = match &args.features {
        Some(path) => read_features(path)?,
        None => Vec::new(),
    };

    let runner = global.runner("locate")?;
    let client = runner.create_client(Some(position), features)?;

    if let Some(report) = client.on_load() {
        print_report(&report);
    }

    let outcome = runner.block_on(client.locate().press())??;
    let label_property = &runner.config().locate.label_property;

    println!();
    match outcome {
        LocateOutcome::Resolved(resolution) => {
            let name = resolution
                .feature
                .property_str(label_property)
                .unwrap_or("<unnamed>");
            println!("Region: {}", name);
            println!("  position: {}", resolution.position);
            println!("  bbox:     {}", resolution.viewport);
        }
        LocateOutcome::NoMatch { position } => {
            println!("No region found at {}", position);
            if args.features.is_none() {
                println!("Pass --features <file.geojson> to supply region polygons.");
            }
        }
        LocateOutcome::NotReady { position } => {
            println!("Map not ready; nothing matched at {}", position);
        }
        LocateOutcome::Failed(reason) => {
            println!("Could not obtain a position: {}", reason);
        }
    }

    Ok(())
}

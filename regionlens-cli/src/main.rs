//! RegionLens CLI - Command-line interface
//!
//! This binary drives the RegionLens map client core against an in-memory
//! engine and the configured Nominatim and tile servers.

mod commands;
mod error;
mod runner;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::common::GlobalOptions;
use commands::config::ConfigCommands;
use commands::layers::LayersArgs;
use commands::locate::LocateArgs;
use commands::search::{SearchArgs, SuggestArgs};
use error::CliError;

#[derive(Parser)]
#[command(name = "regionlens")]
#[command(version = regionlens::VERSION)]
#[command(about = "Region lookup, layer toggles and place search for a US vector tile map", long_about = None)]
struct Cli {
    /// Config file to use instead of ~/.regionlens/config.ini
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Mirror log output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for a place and list the results
    Search {
        /// Free-text query, e.g. "Santa Fe, NM"
        query: String,

        /// Move the camera to the Nth result (1-based)
        #[arg(long)]
        select: Option<usize>,

        /// Print the raw backend records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show as-you-type suggestions for a partial query
    Suggest {
        /// Partial query
        query: String,
    },

    /// Find the region enclosing a position
    Locate {
        /// Longitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Latitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// GeoJSON FeatureCollection of region polygons to match against
        #[arg(long)]
        features: Option<PathBuf>,
    },

    /// Show overlays and toggle them on or off
    Layers {
        /// Layer key to turn on (repeatable)
        #[arg(long)]
        enable: Vec<String>,

        /// Layer key to turn off (repeatable)
        #[arg(long)]
        disable: Vec<String>,

        /// Print the attached sources and layers as a style fragment
        #[arg(long)]
        json: bool,
    },

    /// Show the home view
    Home,

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();
    let global = GlobalOptions {
        config: cli.config,
        verbose: cli.verbose,
    };

    if let Err(e) = run(&global, cli.command) {
        e.exit();
    }
}

fn run(global: &GlobalOptions, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Search {
            query,
            select,
            json,
        } => commands::search::run_search(
            global,
            SearchArgs {
                query,
                select,
                json,
            },
        ),
        Commands::Suggest { query } => commands::search::run_suggest(global, SuggestArgs { query }),
        Commands::Locate { lon, lat, features } => {
            commands::locate::run(global, LocateArgs { lon, lat, features })
        }
        Commands::Layers {
            enable,
            disable,
            json,
        } => commands::layers::run(
            global,
            LayersArgs {
                enable,
                disable,
                json,
            },
        ),
        Commands::Home => commands::home::run(global),
        Commands::Config { command } => commands::config::run(global, command),
    }
}

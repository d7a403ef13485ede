//! Configuration management CLI commands.
//!
//! Provides `config init`, `config show` and `config path`.

use std::path::PathBuf;

use clap::Subcommand;
use regionlens::config::{config_file_path, ConfigFile};

use super::common::GlobalOptions;
use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Write a commented config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show the effective configuration
    Show,

    /// Show the configuration file path
    Path,
}

/// Run a config subcommand.
///
/// These commands do not start logging; they only touch the config file.
pub fn run(global: &GlobalOptions, command: ConfigCommands) -> Result<(), CliError> {
    let path = global.config.clone().unwrap_or_else(config_file_path);
    match command {
        ConfigCommands::Init { force } => run_init(path, force),
        ConfigCommands::Show => run_show(path),
        ConfigCommands::Path => {
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn run_init(path: PathBuf, force: bool) -> Result<(), CliError> {
    if path.exists() && !force {
        println!("Configuration already exists at {}", path.display());
        println!("Use --force to overwrite it with defaults.");
        return Ok(());
    }

    ConfigFile::default().save_to(&path)?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}

fn run_show(path: PathBuf) -> Result<(), CliError> {
    let config = ConfigFile::load_from(&path)?;
    let source = if path.exists() {
        path.display().to_string()
    } else {
        "built-in defaults".to_string()
    };

    println!("Configuration ({})", source);
    println!("======================");
    println!();
    println!("[servers]");
    println!("  nominatim_url = {}", config.servers.nominatim_url);
    println!("  tilejson_url = {}", config.servers.tilejson_url);
    println!("  vector_tile_url = {}", config.servers.vector_tile_url);
    println!("  font_url = {}", config.servers.font_url);
    println!("  timeout = {}s", config.servers.timeout);
    println!();
    println!("[map]");
    println!("  home_bounds = {}", config.map.home_bounds);
    println!("  home_padding = {}", config.map.home_padding);
    println!("  home_max_zoom = {}", config.map.home_max_zoom);
    println!("  home_duration_ms = {}", config.map.home_duration_ms);
    println!();
    println!("[locate]");
    println!("  source = {}", config.locate.source);
    println!("  source_layer = {}", config.locate.source_layer);
    println!("  label_property = {}", config.locate.label_property);
    println!("  high_accuracy = {}", config.locate.high_accuracy);
    println!("  timeout = {}s", config.locate.timeout);
    println!("  maximum_age = {}s", config.locate.maximum_age);
    println!("  padding = {}", config.locate.padding);
    println!("  max_zoom = {}", config.locate.max_zoom);
    println!("  duration_ms = {}", config.locate.duration_ms);
    println!();
    println!("[search]");
    println!("  min_length = {}", config.search.min_length);
    println!("  limit = {}", config.search.limit);
    println!("  debounce_ms = {}", config.search.debounce_ms);
    println!();
    println!("[layers]");
    match &config.layers.enabled {
        Some(keys) if keys.is_empty() => println!("  enabled = (none)"),
        Some(keys) => println!("  enabled = {}", keys.join(", ")),
        None => println!("  enabled = (catalog defaults)"),
    }
    println!();
    println!("[logging]");
    println!("  file = {}", config.logging.file.display());

    Ok(())
}

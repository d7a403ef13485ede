//! User configuration.
//!
//! `~/.regionlens/config.ini` holds server endpoints, the home view, region
//! lookup target, search tuning and the overlays enabled at load. A missing
//! file or missing keys fall back to the library defaults.
//!
//! # Example
//!
//! ```no_run
//! use regionlens::config::ConfigFile;
//!
//! let config = ConfigFile::load()?;
//! let options = config.client_options();
//! let catalog = config.catalog();
//! # Ok::<(), regionlens::config::ConfigFileError>(())
//! ```

mod defaults;
mod file;
mod parser;
mod settings;
mod writer;

pub use file::{
    config_directory, config_file_path, ConfigFile, ConfigFileError, LayerSettings,
    LocateSettings, LoggingSettings, MapSettings, SearchSettings, ServerSettings,
    DEFAULT_FONT_URL, DEFAULT_NOMINATIM_URL, DEFAULT_TILEJSON_URL, DEFAULT_VECTOR_TILE_URL,
};

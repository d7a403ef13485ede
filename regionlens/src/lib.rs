//! RegionLens - region-aware map client core
//!
//! This library holds the logic behind an interactive vector tile map of
//! US administrative regions: toggleable overlays, "which county am I in?"
//! lookup and place search against a Nominatim geocoder.
//!
//! The rendering engine is abstract. Everything is written against the
//! [`engine::MapEngine`] capability trait, so the same core drives a real
//! renderer adapter or the in-process [`engine::InMemoryEngine`].
//!
//! # High-Level API
//!
//! [`controls::MapClient`] wires the home, locate, search and layer panel
//! controls to one engine and one [`events::EventBus`]:
//!
//! ```ignore
//! use regionlens::config::ConfigFile;
//! use regionlens::controls::MapClient;
//! use regionlens::engine::InMemoryEngine;
//! use regionlens::geocode::NominatimGeocoder;
//! use regionlens::http::AsyncReqwestClient;
//! use regionlens::location::FixedLocationProvider;
//!
//! let config = ConfigFile::load()?;
//! let geocoder = NominatimGeocoder::new(&config.servers.nominatim_url, AsyncReqwestClient::new()?)?;
//! let client = MapClient::new(engine, provider, geocoder, config.catalog(), config.client_options());
//!
//! client.on_load();
//! let outcome = client.locate().press().await?;
//! ```

pub mod config;
pub mod controls;
pub mod engine;
pub mod events;
pub mod geocode;
pub mod geometry;
pub mod http;
pub mod layers;
pub mod location;
pub mod logging;
pub mod resolver;

/// Version of the RegionLens library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

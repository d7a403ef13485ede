//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`config`] - Configuration management (init, show, path)
//! - [`home`] - Reset view
//! - [`layers`] - Overlay catalog and toggles
//! - [`locate`] - Region lookup for a position
//! - [`search`] - Forward search and as-you-type suggestions

pub mod common;
pub mod config;
pub mod home;
pub mod layers;
pub mod locate;
pub mod search;

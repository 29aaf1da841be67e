// src/config/mod.rs

//! Configuration loading for `clipfetch`.
//!
//! - [`model`] holds the serde structs mapping `Clipfetch.toml`.
//! - [`loader`] reads and deserializes the file.
//! - [`validate`] turns a [`model::RawConfigFile`] into a validated
//!   [`model::ConfigFile`].

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_or_default};
pub use model::{ConfigFile, DownloadSection, OutputSection, RawConfigFile, ToolsSection};

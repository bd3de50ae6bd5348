//! FoamKit Settings Crate
//!
//! Loads, saves and validates the export configuration.

pub mod config;
pub mod error;

pub use config::{
    Config, OutputSettings, ServiceSettings, SolidSettings, SolidStrategy,
    DEFAULT_SERVICE_TIMEOUT_MS,
};
pub use error::{SettingsError, SettingsResult};

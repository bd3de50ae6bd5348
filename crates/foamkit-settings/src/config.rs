//! Export configuration for FoamKit
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats; the format is chosen by file extension.
//!
//! Configuration is organized into logical sections:
//! - Drawing settings (scale, margin, labels)
//! - Solid settings (strategy, cavity realization)
//! - Service settings (delegated endpoint, timeout)
//! - Output settings (artifact directory)

use crate::error::{SettingsError, SettingsResult};
use foamkit_brep::CavityRealization;
use foamkit_designer::DrawingOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default bound on a delegated solid-model request
pub const DEFAULT_SERVICE_TIMEOUT_MS: u64 = 30_000;

/// Where the solid model is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolidStrategy {
    /// In-process B-rep kernel
    #[default]
    Local,
    /// External solid-model service
    Delegated,
}

impl std::fmt::Display for SolidStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Delegated => write!(f, "delegated"),
        }
    }
}

/// Solid-model settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolidSettings {
    pub strategy: SolidStrategy,
    /// Has no default: the caller must pick one, here or on the command line
    pub realization: Option<CavityRealization>,
}

/// Delegated service settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Endpoint receiving `POST` requests
    pub endpoint: Option<String>,
    /// Request bound in milliseconds
    pub timeout_ms: u64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_ms: DEFAULT_SERVICE_TIMEOUT_MS,
        }
    }
}

/// Artifact output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub directory: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
        }
    }
}

/// Complete export configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub drawing: DrawingOptions,
    pub solid: SolidSettings,
    pub service: ServiceSettings,
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(SettingsError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform config location, `<config dir>/foamkit/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("foamkit").join("config.toml"))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| SettingsError::LoadError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load the given file, or the platform default when it exists, or defaults
    pub fn load_or_default(path: Option<&Path>) -> SettingsResult<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| SettingsError::ConfigDirectory(e.to_string()))?;
        }
        std::fs::write(path, content).map_err(|e| SettingsError::SaveError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if !(self.drawing.scale > 0.0 && self.drawing.scale.is_finite()) {
            return Err(SettingsError::invalid("drawing.scale", "must be > 0"));
        }

        if !(self.drawing.margin >= 0.0 && self.drawing.margin.is_finite()) {
            return Err(SettingsError::invalid("drawing.margin", "must be >= 0"));
        }

        if self.drawing.stroke_width <= 0.0 {
            return Err(SettingsError::invalid("drawing.stroke_width", "must be > 0"));
        }

        if self.service.timeout_ms == 0 {
            return Err(SettingsError::invalid("service.timeout_ms", "must be > 0"));
        }

        if self.solid.strategy == SolidStrategy::Delegated
            && self
                .service
                .endpoint
                .as_deref()
                .is_none_or(|e| e.trim().is_empty())
        {
            return Err(SettingsError::invalid(
                "service.endpoint",
                "required by the delegated strategy",
            ));
        }

        Ok(())
    }
}

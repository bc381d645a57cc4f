use crate::tree::FilterScope;
use crate::types::{SYSTEM_PREFIX, SourceFilter};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// User-facing inspector configuration, read from config.toml at startup.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectorConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub entitlements: EntitlementsConfig,
    #[serde(default)]
    pub source: SourceConfig,
}

impl InspectorConfig {
    /// Returns the config file path within the given data directory.
    pub fn path(data_dir: &Path) -> PathBuf {
        data_dir.join("config.toml")
    }

    /// Loads config from a TOML file. Returns default config if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Validates config values and returns list of validation errors.
    /// Returns empty vec if config is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.catalog.system_prefix.is_empty() {
            errors.push("system_prefix must not be empty".to_string());
        }

        errors
    }

    /// Returns a validated config, replacing invalid values with defaults.
    pub fn with_defaults_for_invalid(&self) -> Self {
        let defaults = Self::default();
        Self {
            catalog: CatalogConfig {
                default_source: self.catalog.default_source,
                system_prefix: if self.catalog.system_prefix.is_empty() {
                    defaults.catalog.system_prefix
                } else {
                    self.catalog.system_prefix.clone()
                },
            },
            entitlements: self.entitlements.clone(),
            source: self.source.clone(),
        }
    }
}

/// Application list settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub default_source: SourceFilter,
    #[serde(default = "default_system_prefix")]
    pub system_prefix: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            default_source: SourceFilter::default(),
            system_prefix: default_system_prefix(),
        }
    }
}

fn default_system_prefix() -> String {
    SYSTEM_PREFIX.to_string()
}

/// Entitlement view settings.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EntitlementsConfig {
    #[serde(default)]
    pub filter_scope: FilterScope,
}

/// Where installed applications come from.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    /// JSON dump of installed applications. Without it the platform source is used.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Errors that can occur when loading config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

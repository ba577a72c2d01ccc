//! Configuration file support for risk-register.
//!
//! Provides YAML-based configuration through `risk-register.config.yml`
//! files, including data structures, file loading, and validation.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

use crate::application::dto::ExportFormat;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "risk-register.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Path of the JSON risk store
    pub store: Option<PathBuf>,
    /// Export format used when `--format` is not given (`json` or `csv`)
    pub export_format: Option<String>,
    /// Maximum number of records read by export, matrix and summary
    pub export_bulk_size: Option<usize>,
    /// `tracing` filter directive used when `RUST_LOG` is unset
    pub log_filter: Option<String>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

impl ConfigFile {
    /// The configured export format; `None` when unset
    pub fn export_format(&self) -> Option<ExportFormat> {
        self.export_format
            .as_deref()
            .and_then(|raw| ExportFormat::from_str(raw).ok())
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    // An empty document deserializes to null, which is not a mapping.
    if content.trim().is_empty() {
        return Ok(ConfigFile::default());
    }

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref raw) = config.export_format {
        if let Err(e) = ExportFormat::from_str(raw) {
            bail!(
                "Invalid config: export_format: {}\n\n💡 Hint: Use 'json' or 'csv'.",
                e
            );
        }
    }

    if config.export_bulk_size == Some(0) {
        bail!(
            "Invalid config: export_bulk_size must be greater than 0.\n\n\
             💡 Hint: Remove the field to use the default of 1000."
        );
    }

    if let Some(ref store) = config.store {
        if store.as_os_str().is_empty() {
            bail!("Invalid config: store must not be empty.");
        }
    }

    if let Some(ref filter) = config.log_filter {
        if let Err(e) = EnvFilter::try_new(filter) {
            bail!(
                "Invalid config: log_filter '{}': {}\n\n\
                 💡 Hint: Use a tracing filter directive such as \"info\" or \"risk_register=debug\".",
                filter,
                e
            );
        }
    }

    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

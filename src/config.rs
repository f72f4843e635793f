//! Tool configuration.
//!
//! Handles loading and validating the optional `format-web.toml`. Every key
//! has a default, so the file only needs the values it overrides, and the tool
//! runs with no file at all. Command-line flags win over the file.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! input = "www"             # Templated source tree
//! output = "www-out"        # Deployable output tree
//!
//! [substitutions]
//! analytics = true          # Expand the analytics marker
//!
//! [files]
//! binary_extensions = ["wasm", "png"]  # Copied byte-for-byte
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::classify::{BinaryExtensions, DEFAULT_BINARY_EXTENSIONS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Config file picked up from the current directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "format-web.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Settings loaded from `format-web.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Source directory (before `~`/`$VAR` expansion).
    pub input: String,
    /// Destination directory (before `~`/`$VAR` expansion).
    pub output: String,
    pub substitutions: SubstitutionsConfig,
    pub files: FilesConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            input: "www".to_string(),
            output: "www-out".to_string(),
            substitutions: SubstitutionsConfig::default(),
            files: FilesConfig::default(),
        }
    }
}

/// Which markers are expanded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SubstitutionsConfig {
    /// Replace `<!-- GOOGLE_SHIT -->` with the analytics snippet.
    pub analytics: bool,
}

impl Default for SubstitutionsConfig {
    fn default() -> Self {
        Self { analytics: true }
    }
}

/// File classification settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilesConfig {
    /// Extensions copied verbatim; a leading dot is accepted and ignored.
    pub binary_extensions: Vec<String>,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            binary_extensions: DEFAULT_BINARY_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
        }
    }
}

impl FilesConfig {
    pub fn binary_extensions(&self) -> BinaryExtensions {
        BinaryExtensions::new(&self.binary_extensions)
    }
}

impl SiteConfig {
    /// Validate values that parse fine but cannot work.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input.trim().is_empty() {
            return Err(ConfigError::Validation("input must not be empty".into()));
        }
        if self.output.trim().is_empty() {
            return Err(ConfigError::Validation("output must not be empty".into()));
        }
        for ext in &self.files.binary_extensions {
            let bare = ext.trim_start_matches('.');
            if bare.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "files.binary_extensions contains an empty extension: {ext:?}"
                )));
            }
            if bare.contains(['/', '\\', '.']) {
                return Err(ConfigError::Validation(format!(
                    "files.binary_extensions entries must be a single extension: {ext:?}"
                )));
            }
        }
        Ok(())
    }
}

/// Apply command-line flags on top of a loaded config.
///
/// A flag that is given wins over the file; one that is absent keeps the
/// file's value, which itself falls back to the built-in default.
pub fn apply_overrides(
    mut config: SiteConfig,
    input: Option<&str>,
    output: Option<&str>,
    no_analytics: bool,
) -> SiteConfig {
    if let Some(input) = input {
        config.input = input.to_string();
    }
    if let Some(output) = output {
        config.output = output.to_string();
    }
    if no_analytics {
        config.substitutions.analytics = false;
    }
    config
}

/// Parse and validate config from a TOML string.
pub fn parse_config(content: &str) -> Result<SiteConfig, ConfigError> {
    let config: SiteConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load config from a file.
///
/// With `required` false a missing file yields the defaults; with `required`
/// true (an explicit `--config`) it is an error.
pub fn load_config(path: &Path, required: bool) -> Result<SiteConfig, ConfigError> {
    if !path.exists() && !required {
        log::debug!("no config at {}, using defaults", path.display());
        return Ok(SiteConfig::default());
    }
    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    log::debug!("loaded config from {}", path.display());
    Ok(config)
}

/// Returns a fully-commented stock config file.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# format-web-templates configuration
# ==================================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Command-line flags override them.
# Unknown keys will cause an error.

# Templated source tree. `~` and $VARS are expanded.
input = "www"

# Deployable output tree. Existing files are overwritten, stale ones kept.
output = "www-out"

# ---------------------------------------------------------------------------
# Marker substitution
# ---------------------------------------------------------------------------
[substitutions]
# Replace <!-- GOOGLE_SHIT --> with the analytics/ads snippet.
# When false the marker is left in the output untouched.
analytics = true

# ---------------------------------------------------------------------------
# File classification
# ---------------------------------------------------------------------------
[files]
# Extensions copied byte-for-byte. Every other file is read as UTF-8 text.
binary_extensions = ["wasm", "png"]
"##
}

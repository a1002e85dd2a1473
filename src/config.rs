//! Configuration management for the condenser
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (condense.toml)
//! - Environment variables (CONDENSE__*)
//!
//! ## Example config file (condense.toml):
//! ```toml
//! [condense]
//! on_cycle = "truncate"
//! max_depth = 64
//!
//! [output]
//! format = "compact"
//! write_checksums = true
//! write_manifest = true
//!
//! [loader]
//! skip_prefixes = ["target/", ".git/", "node_modules/"]
//! include_prefixes = ["tools/"]
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::condense::CondenseOptions;
use crate::loader::LoadConfig;

/// Main configuration for the condenser and its CLI
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CondenseConfig {
    /// Condensation options
    #[serde(default)]
    pub condense: CondenseOptions,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Directory loading filters
    #[serde(default)]
    pub loader: LoadConfig,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// JSON output format (pretty or compact)
    #[serde(default)]
    pub format: OutputFormat,

    /// Write checksums.sha256 in batch mode
    #[serde(default = "default_true")]
    pub write_checksums: bool,

    /// Write manifest.json in batch mode
    #[serde(default = "default_true")]
    pub write_manifest: bool,
}

/// Output format for JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pretty,
    Compact,
}

impl OutputFormat {
    /// Render a serializable value in this format
    pub fn render<T: Serialize>(&self, value: &T) -> serde_json::Result<String> {
        match self {
            OutputFormat::Pretty => serde_json::to_string_pretty(value),
            OutputFormat::Compact => serde_json::to_string(value),
        }
    }
}

fn default_true() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Pretty,
            write_checksums: true,
            write_manifest: true,
        }
    }
}

impl CondenseConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, optionally adding a required config file
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        let config_locations = [
            "condense.toml",
            ".condense.toml",
            "config/condense.toml",
        ];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        if let Some(config_dir) = directories::ProjectDirs::from("dev", "familiar", "schema-condense") {
            let xdg_config = config_dir.config_dir().join("condense.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // CONDENSE__CONDENSE__ON_CYCLE=truncate, CONDENSE__OUTPUT__FORMAT=compact, ...
        builder = builder.add_source(
            Environment::with_prefix("CONDENSE")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = self.to_toml()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }

    /// Render configuration as TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

//! Configuration for the pivot CLI
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (pivot.toml)
//! - Environment variables (PIVOT_*)
//!
//! ## Example config file (pivot.toml):
//! ```toml
//! [diff]
//! output_format = "pretty"
//! text_diff = true
//!
//! [lint]
//! strict = false
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Main configuration for the pivot CLI
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PivotConfig {
    /// Diff settings
    #[serde(default)]
    pub diff: DiffConfig,

    /// Lint settings
    #[serde(default)]
    pub lint: LintConfig,
}

/// Diff configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffConfig {
    /// Output format for reports (pretty or compact)
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Render a line-oriented text diff alongside the structured report
    #[serde(default = "default_true")]
    pub text_diff: bool,
}

/// Lint configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LintConfig {
    /// Treat lint warnings as errors
    #[serde(default)]
    pub strict: bool,
}

/// Output format for JSON reports
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pretty,
    Compact,
}

fn default_true() -> bool {
    true
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::Pretty,
            text_diff: true,
        }
    }
}

impl PivotConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from a specific file
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        let config_locations = ["pivot.toml", ".pivot.toml"];
        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("PIVOT")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PivotConfig::default();
        assert!(config.diff.text_diff);
        assert!(!config.lint.strict);
    }

    #[test]
    fn test_serialize_config() {
        let config = PivotConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[diff]"));
        assert!(toml_str.contains("[lint]"));
    }
}

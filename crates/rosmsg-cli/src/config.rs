//! `rosmsg.toml` configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "rosmsg.toml";

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// rosmsg.toml structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub build: BuildSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildSection {
    /// Prefix of generated namespaces
    pub root_namespace: String,

    pub output_format: OutputFormat,

    /// Additional package roots; their packages are built only when required
    pub dependency_paths: Vec<PathBuf>,

    pub ignore_ros_package_path: bool,

    /// Keep the staging directory of a build
    pub preserve_generated: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSection {
    /// Default filter when `RUST_LOG` is not set
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl CliConfig {
    /// Load the configuration.
    ///
    /// An explicit `path` must exist. Without one, `rosmsg.toml` in the
    /// working directory is used when present and defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => Self::default(),
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config: {:?}", path.as_ref()))?;

        Self::parse(&content)
    }

    /// Parse configuration from a string
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config")
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            anyhow::bail!(
                "Invalid log level '{}', expected one of: {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            );
        }

        let namespace = self.root_namespace();
        if !namespace.is_empty() && !namespace.split('.').all(is_namespace_segment) {
            anyhow::bail!("Invalid root namespace '{}'", self.build.root_namespace);
        }

        Ok(())
    }

    /// Root namespace without surrounding whitespace or trailing dots
    pub fn root_namespace(&self) -> &str {
        self.build.root_namespace.trim().trim_end_matches('.')
    }
}

fn is_namespace_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

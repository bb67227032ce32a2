//! Output configuration for the `impress-isbn` command.
//!
//! Loaded from `config.toml` in the platform config directory:
//!
//! ```toml
//! [output]
//! format = "json"
//! normalize = true
//! uppercase_check = true
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// How parsed ISBNs are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    /// Canonical hyphenated form
    #[default]
    Text,
    /// Digits only
    Barcode,
    /// One JSON report per input
    Json,
}

/// Output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Convert to ISBN-13 before printing
    pub normalize: bool,
    /// Print a lowercase `x` check digit as `X`
    pub uppercase_check: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            normalize: false,
            uppercase_check: true,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct IsbnConfig {
    pub output: OutputConfig,
}

impl IsbnConfig {
    /// `<config dir>/impress-isbn/config.toml`, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("impress-isbn").join("config.toml"))
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse a configuration file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load from `path` (or the default location), falling back to defaults.
    ///
    /// A missing file is not an error; an unreadable one is logged.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path.map(Path::to_path_buf).or_else(Self::default_path) else {
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!("No config at {:?}, using defaults", path);
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::debug!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::warn!("Failed to load config from {:?}: {}, using defaults", path, e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = IsbnConfig::default();
        assert_eq!(config.output.format, OutputFormat::Text);
        assert!(!config.output.normalize);
        assert!(config.output.uppercase_check);
    }

    #[test]
    fn parse_partial_toml() {
        let config = IsbnConfig::from_toml("[output]\nformat = \"barcode\"\n").unwrap();
        assert_eq!(config.output.format, OutputFormat::Barcode);
        assert!(config.output.uppercase_check);

        let empty = IsbnConfig::from_toml("").unwrap();
        assert_eq!(empty, IsbnConfig::default());
    }

    #[test]
    fn toml_roundtrip() {
        let config = IsbnConfig {
            output: OutputConfig {
                format: OutputFormat::Json,
                normalize: true,
                uppercase_check: false,
            },
        };
        let text = toml::to_string(&config).unwrap();
        assert_eq!(IsbnConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn rejects_unknown_format() {
        let err = IsbnConfig::from_toml("[output]\nformat = \"xml\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[output]\nnormalize = true").unwrap();

        let config = IsbnConfig::load_from(file.path()).unwrap();
        assert!(config.output.normalize);
        assert_eq!(IsbnConfig::load_or_default(Some(file.path())), config);
    }

    #[test]
    fn missing_or_broken_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("config.toml");
        assert_eq!(IsbnConfig::load_or_default(Some(&missing)), IsbnConfig::default());

        std::fs::write(&missing, "output = 3").unwrap();
        assert!(IsbnConfig::load_from(&missing).is_err());
        assert_eq!(IsbnConfig::load_or_default(Some(&missing)), IsbnConfig::default());
    }
}

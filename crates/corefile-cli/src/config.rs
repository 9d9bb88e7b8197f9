//! Configuration management for the CLI
//!
//! This module handles loading configuration from:
//! - Default values
//! - Configuration files (YAML/JSON/TOML)
//! - Environment variables
//!
//! Command-line flags are applied on top by the handlers.

use crate::cli::OutputFormat;
use crate::error::{Error, Result};
use corefile_schemas::Catalog;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,

    /// Migration defaults
    pub migration: MigrationConfig,

    /// Catalogue file replacing the built-in release data
    pub catalog: Option<PathBuf>,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub format: OutputFormat,

    /// Use colored output by default
    pub color: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: Option<String>,

    /// Log format (compact, full, json)
    pub format: Option<String>,

    /// Log file path
    pub file: Option<PathBuf>,
}

/// Defaults for the migration commands
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationConfig {
    /// Collect notices during `migrate` when `--deprecations` is not given
    pub deprecations: bool,

    /// Kubernetes release used by `default` when `--k8s-version` is not given
    pub k8s_version: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Human,
            color: true,
        }
    }
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            deprecations: true,
            k8s_version: None,
        }
    }
}

/// On-disk formats understood for config and catalogue files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Yaml,
    Json,
    Toml,
}

impl FileFormat {
    fn of(path: &Path) -> Option<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => Some(Self::Yaml),
            Some("json") => Some(Self::Json),
            Some("toml") => Some(Self::Toml),
            _ => None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;

        let config = match FileFormat::of(path) {
            Some(FileFormat::Yaml) => serde_yaml::from_str(&content)?,
            Some(FileFormat::Json) => serde_json::from_str(&content)?,
            Some(FileFormat::Toml) => toml::from_str(&content)?,
            None => {
                return Err(Error::InvalidFormat {
                    path: path.to_path_buf(),
                    expected: "YAML, JSON or TOML".to_string(),
                })
            }
        };

        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        for path in Self::default_config_paths() {
            if path.exists() {
                match Self::from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        eprintln!("Warning: Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        if let Some(path) = file {
            Self::from_file(path)
        } else {
            Self::load()
        }
    }

    /// Get default configuration file paths to check
    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".corefile-tool.yaml"),
            PathBuf::from(".corefile-tool.yml"),
            PathBuf::from(".corefile-tool.json"),
            PathBuf::from(".corefile-tool.toml"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            let tool_dir = config_dir.join("corefile-tool");
            paths.push(tool_dir.join("config.yaml"));
            paths.push(tool_dir.join("config.json"));
            paths.push(tool_dir.join("config.toml"));
        }

        paths
    }

    /// Load the configured catalogue, if any
    ///
    /// `None` means the built-in catalogue applies.
    pub fn load_catalog(&self) -> Result<Option<Catalog>> {
        let Some(path) = &self.catalog else {
            return Ok(None);
        };
        if !path.exists() {
            return Err(Error::FileNotFound { path: path.clone() });
        }

        let content = std::fs::read_to_string(path)?;
        let catalog = match FileFormat::of(path) {
            Some(FileFormat::Yaml) => Catalog::from_yaml_str(&content)?,
            Some(FileFormat::Json) => Catalog::from_json_str(&content)?,
            _ => {
                return Err(Error::InvalidFormat {
                    path: path.clone(),
                    expected: "YAML or JSON".to_string(),
                })
            }
        };

        tracing::info!(
            path = %path.display(),
            releases = catalog.manifest.releases().len(),
            "loaded custom catalogue"
        );
        Ok(Some(catalog))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.output.format, OutputFormat::Human);
        assert!(config.migration.deprecations);
        assert!(config.catalog.is_none());
        assert!(config.load_catalog().unwrap().is_none());
    }

    #[test]
    fn test_from_file_by_extension() {
        let dir = TempDir::new().unwrap();

        let yaml = dir.path().join("config.yaml");
        fs::write(
            &yaml,
            "output:\n  format: json-pretty\nmigration:\n  deprecations: false\n",
        )
        .unwrap();
        let config = Config::from_file(&yaml).unwrap();
        assert_eq!(config.output.format, OutputFormat::JsonPretty);
        assert!(!config.migration.deprecations);

        let toml_path = dir.path().join("config.toml");
        fs::write(&toml_path, "[migration]\nk8s_version = \"1.16\"\n").unwrap();
        let config = Config::from_file(&toml_path).unwrap();
        assert_eq!(config.migration.k8s_version.as_deref(), Some("1.16"));
        assert!(config.migration.deprecations);

        let json = dir.path().join("config.json");
        fs::write(&json, r#"{"logging": {"level": "debug"}}"#).unwrap();
        let config = Config::from_file(&json).unwrap();
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_from_file_errors() {
        let dir = TempDir::new().unwrap();

        let missing = dir.path().join("absent.yaml");
        assert!(matches!(
            Config::from_file(&missing),
            Err(Error::FileNotFound { .. })
        ));

        let ini = dir.path().join("config.ini");
        fs::write(&ini, "format = json").unwrap();
        assert!(matches!(
            Config::from_file(&ini),
            Err(Error::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_load_catalog_from_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.yaml");
        fs::write(&path, Catalog::builtin().to_yaml().unwrap()).unwrap();

        let config = Config {
            catalog: Some(path),
            ..Config::default()
        };
        let catalog = config.load_catalog().unwrap().unwrap();
        assert_eq!(
            catalog.manifest.versions(),
            Catalog::builtin().manifest.versions()
        );
    }
}

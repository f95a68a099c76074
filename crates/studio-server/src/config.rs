//! Server configuration.
//!
//! Configuration is stored in TOML format at:
//! - Linux/macOS: `~/.config/code-studio/config.toml`
//! - Windows: `%APPDATA%\code-studio\config.toml`
//!
//! The `CODE_STUDIO_CONFIG` environment variable overrides the location.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use studio_files::{ProjectBuilder, ProjectFiles};
use tracing::{debug, info};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "CODE_STUDIO_CONFIG";

/// Server configuration.
///
/// # Examples
///
/// ```toml
/// [general]
/// log_level = "info"
/// log_format = "pretty"
///
/// [project]
/// seed_default = true
/// initial_archive = "/home/me/projects/demo.zip"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct StudioConfig {
    /// General settings
    #[serde(default)]
    pub general: GeneralConfig,

    /// Initial project contents
    #[serde(default)]
    pub project: ProjectConfig,
}

/// General configuration settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneralConfig {
    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Log output format (pretty, json)
    pub log_format: String,
}

/// Initial project configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProjectConfig {
    /// Seed the sample project when no archive is given
    pub seed_default: bool,

    /// Zip archive to load at startup
    pub initial_archive: Option<PathBuf>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            seed_default: true,
            initial_archive: None,
        }
    }
}

impl StudioConfig {
    /// Loads configuration from `path`, the `CODE_STUDIO_CONFIG` variable or
    /// the default location, in that order.
    ///
    /// A missing file at the default location yields the defaults. An
    /// explicitly named file must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let explicit = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

        let config_path = match explicit {
            Some(path) => path,
            None => {
                let Some(path) = default_config_path() else {
                    debug!("No config directory, using defaults");
                    return Ok(Self::default());
                };
                if !path.exists() {
                    debug!("Config file not found, using defaults");
                    return Ok(Self::default());
                }
                path
            }
        };

        Self::from_file(&config_path)
    }

    /// Reads and validates a config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("invalid config file {}", path.display()))?;

        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parses and validates TOML config text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or fails validation.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            anyhow::bail!(
                "invalid log_level '{}', must be one of: {}",
                self.general.log_level,
                valid_levels.join(", ")
            );
        }

        let valid_formats = ["pretty", "json"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            anyhow::bail!(
                "invalid log_format '{}', must be one of: {}",
                self.general.log_format,
                valid_formats.join(", ")
            );
        }

        if let Some(archive) = &self.project.initial_archive
            && archive.as_os_str().is_empty()
        {
            anyhow::bail!("project.initial_archive must not be empty");
        }

        Ok(())
    }

    /// Returns true if logs should be emitted as JSON.
    #[must_use]
    pub fn json_logs(&self) -> bool {
        self.general.log_format == "json"
    }

    /// Builds the project the server starts with.
    ///
    /// An `initial_archive` takes precedence over `seed_default`.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial archive cannot be read or decoded.
    pub fn build_project(&self) -> Result<ProjectFiles> {
        if let Some(archive) = &self.project.initial_archive {
            let mut files = ProjectFiles::new();
            let count = files
                .import_archive_from(archive)
                .with_context(|| format!("failed to load archive {}", archive.display()))?;
            info!(entries = count, archive = %archive.display(), "Loaded initial project");
            return Ok(files);
        }

        if self.project.seed_default {
            return Ok(ProjectBuilder::with_default_project().build());
        }

        Ok(ProjectFiles::new())
    }
}

/// Default configuration file path.
fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("code-studio").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = StudioConfig::default();

        assert!(config.validate().is_ok());
        assert!(config.project.seed_default);
        assert!(!config.json_logs());
    }

    #[test]
    fn test_parse_partial_config() {
        let config = StudioConfig::parse("[general]\nlog_format = \"json\"\n").unwrap();

        assert_eq!(config.general.log_level, "info");
        assert!(config.json_logs());
        assert_eq!(config.project, ProjectConfig::default());
    }

    #[test]
    fn test_parse_empty_config() {
        let config = StudioConfig::parse("").unwrap();
        assert_eq!(config, StudioConfig::default());
    }

    #[test]
    fn test_invalid_log_level() {
        let err = StudioConfig::parse("[general]\nlog_level = \"loud\"\n").unwrap_err();
        assert!(err.to_string().contains("log_level"));
    }

    #[test]
    fn test_invalid_log_format() {
        let err = StudioConfig::parse("[general]\nlog_format = \"xml\"\n").unwrap_err();
        assert!(err.to_string().contains("log_format"));
    }

    #[test]
    fn test_empty_initial_archive_rejected() {
        let err = StudioConfig::parse("[project]\ninitial_archive = \"\"\n").unwrap_err();
        assert!(err.to_string().contains("initial_archive"));
    }

    #[test]
    fn test_malformed_toml() {
        assert!(StudioConfig::parse("[general\nlog_level = ").is_err());
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = StudioConfig::default();
        config.project.initial_archive = Some(PathBuf::from("demo.zip"));

        let text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(StudioConfig::parse(&text).unwrap(), config);
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[project]\nseed_default = false\n").unwrap();

        let config = StudioConfig::load(Some(&path)).unwrap();
        assert!(!config.project.seed_default);
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");

        assert!(StudioConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn test_build_project_seeds_default() {
        let files = StudioConfig::default().build_project().unwrap();

        assert_eq!(files.list_files(), vec!["script.js", "docs/", "docs/README.md"]);
    }

    #[test]
    fn test_build_project_empty() {
        let config = StudioConfig::parse("[project]\nseed_default = false\n").unwrap();
        let files = config.build_project().unwrap();

        assert!(files.list_files().is_empty());
    }

    #[test]
    fn test_build_project_from_archive() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("project.zip");
        let bytes = ProjectBuilder::new()
            .add_file("lib/util.js", "export {};")
            .build()
            .export_archive()
            .unwrap();
        fs::write(&archive, bytes).unwrap();

        let mut config = StudioConfig::default();
        config.project.initial_archive = Some(archive);
        let files = config.build_project().unwrap();

        assert_eq!(files.read_file("lib/util.js"), Some("export {};"));
        assert!(files.is_folder("lib/"));
        assert!(!files.exists("script.js"));
    }

    #[test]
    fn test_build_project_missing_archive() {
        let dir = TempDir::new().unwrap();

        let mut config = StudioConfig::default();
        config.project.initial_archive = Some(dir.path().join("missing.zip"));

        let err = config.build_project().unwrap_err();
        assert!(err.to_string().contains("missing.zip"));
    }
}

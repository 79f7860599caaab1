// Project Configuration
//
// *La Configuration* (The Configuration) - Settings for the LeConseil CLI

use anyhow::{Context, Result};
use leconseil::RankingConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file, relative to the project directory
pub const DEFAULT_CONFIG_FILE: &str = ".leconseil/config.toml";

/// Project configuration
///
/// Every section is optional; missing sections and fields take their defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ProjectConfig {
    /// Catalog location
    pub catalog: CatalogConfig,

    /// Output shaping
    pub output: OutputConfig,

    /// Ranking pipeline tunables
    pub ranking: RankingConfig,
}

impl ProjectConfig {
    /// Load configuration from a directory
    ///
    /// Looks for `.leconseil/config.toml` in the project directory.
    /// If not found, returns default configuration.
    pub fn load<P: AsRef<Path>>(project_path: P) -> Result<Self> {
        let config_path = project_path.as_ref().join(DEFAULT_CONFIG_FILE);

        if !config_path.exists() {
            return Ok(ProjectConfig::default());
        }

        Self::load_file(&config_path)
    }

    /// Load configuration from an explicit file, which must exist
    pub fn load_file<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();

        let content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        let config: ProjectConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;

        config
            .ranking
            .validate()
            .with_context(|| format!("Invalid [ranking] section in {:?}", config_path))?;

        Ok(config)
    }

    /// Save configuration to a directory
    ///
    /// Creates `.leconseil` directory if it doesn't exist.
    pub fn save<P: AsRef<Path>>(&self, project_path: P) -> Result<()> {
        let config_dir = project_path.as_ref().join(".leconseil");
        fs::create_dir_all(&config_dir)
            .with_context(|| format!("Failed to create config directory: {:?}", config_dir))?;

        let config_path = config_dir.join("config.toml");

        let toml_string =
            toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        fs::write(&config_path, toml_string)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        Ok(())
    }

    /// Apply a catalog path given on the command line
    pub fn with_catalog_override(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.catalog.path = path;
        }
        self
    }
}

/// Catalog settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
    /// Path to the catalog JSON file
    pub path: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/catalog.json"),
        }
    }
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Upper bound on recommendations returned to the caller
    pub max_recommendations: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            max_recommendations: 10,
        }
    }
}

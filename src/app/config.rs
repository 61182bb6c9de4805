//! Configuration Management

use crate::gesture::sequencer::GestureConfig;
use crate::pointer::motion::MotionConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Board geometry
    pub grid: GridConfig,
    /// Solver settings
    pub solver: SolverConfig,
    /// Movement controller settings
    pub pointer: MotionConfig,
    /// Gesture timing settings
    pub gesture: GestureConfig,
}

/// Board geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { rows: 4, cols: 4 }
    }
}

/// Solver settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Maximum number of ranked words handed to the sequencer.
    pub limit: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            limit: crate::board::select::DEFAULT_LIMIT,
        }
    }
}

impl Config {
    /// Default config file path (`~/.gridpilot/config.toml`).
    pub fn default_path() -> PathBuf {
        crate::app::cli::Cli::data_dir().join("config.toml")
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the default path, falling back to defaults if no config
    /// file exists yet.
    pub fn load_default() -> crate::Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Write to a TOML file, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Validate config values are within acceptable ranges.
    /// Returns Ok(()) if valid, or Err with a description of the first
    /// invalid field.
    pub fn validate(&self) -> crate::Result<()> {
        if self.grid.rows == 0 || self.grid.cols == 0 {
            return Err(crate::Error::Config(format!(
                "grid dimensions must be nonzero, got {}x{}",
                self.grid.rows, self.grid.cols
            )));
        }
        if self.solver.limit == 0 {
            return Err(crate::Error::Config(
                "solver.limit must be > 0".to_string(),
            ));
        }
        self.pointer.validate()?;
        self.gesture.validate()?;
        Ok(())
    }
}

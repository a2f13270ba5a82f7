//! Store configuration with TOML persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::types::{NeuronError, NeuronResult};

/// Configuration for the `nmem` tool and other embedders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NeuronConfig {
    /// Brain file used when no path is given explicitly
    pub brain_path: PathBuf,

    /// LZ4-compress the payload when saving
    pub compress: bool,

    /// Run the forward migration every time a brain is loaded
    pub migrate_on_load: bool,

    /// Pretty-print JSON exports
    pub pretty_export: bool,
}

impl Default for NeuronConfig {
    fn default() -> Self {
        Self {
            brain_path: PathBuf::from(".neuron/secure_brain.brain"),
            compress: true,
            migrate_on_load: true,
            pretty_export: true,
        }
    }
}

impl NeuronConfig {
    /// Load from TOML file
    pub fn load(path: &Path) -> NeuronResult<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| NeuronError::Config(e.to_string()))
    }

    /// Save to TOML file
    pub fn save(&self, path: &Path) -> NeuronResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| NeuronError::Config(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// `<config dir>/neuron/config.toml`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("neuron")
            .join("config.toml")
    }

    /// Load from the default location, falling back to defaults
    pub fn load_or_default() -> Self {
        let path = Self::default_path();
        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::debug!("Using default config ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }
}

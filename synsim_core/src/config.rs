//! Configuration file support for Synsim.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/synsim/config.toml`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub limits: LimitsConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Input ranges for session parameters.
///
/// These are UI conventions, not engine constraints: the optics engine
/// accepts any real input, and enforcement happens where values are
/// collected.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LimitsConfig {
    #[serde(default = "default_r0_min")]
    pub r0_min: f64,
    #[serde(default = "default_r0_max")]
    pub r0_max: f64,

    #[serde(default = "default_lens_min")]
    pub lens_min: f64,
    #[serde(default = "default_lens_max")]
    pub lens_max: f64,

    #[serde(default = "default_accommodation_min")]
    pub accommodation_min: f64,
    #[serde(default = "default_accommodation_max")]
    pub accommodation_max: f64,

    #[serde(default = "default_near_target_min")]
    pub near_target_min: f64,
    #[serde(default = "default_near_target_max")]
    pub near_target_max: f64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            r0_min: default_r0_min(),
            r0_max: default_r0_max(),
            lens_min: default_lens_min(),
            lens_max: default_lens_max(),
            accommodation_min: default_accommodation_min(),
            accommodation_max: default_accommodation_max(),
            near_target_min: default_near_target_min(),
            near_target_max: default_near_target_max(),
        }
    }
}

impl LimitsConfig {
    pub fn clamp_r0(&self, value: f64) -> f64 {
        value.clamp(self.r0_min, self.r0_max)
    }

    pub fn clamp_lens(&self, value: f64) -> f64 {
        value.clamp(self.lens_min, self.lens_max)
    }

    pub fn clamp_accommodation(&self, value: f64) -> f64 {
        value.clamp(self.accommodation_min, self.accommodation_max)
    }

    pub fn clamp_near_target(&self, value: f64) -> f64 {
        value.clamp(self.near_target_min, self.near_target_max)
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        let home = std::env::var("HOME").expect("HOME environment variable not set");
        PathBuf::from(home).join(".local/share")
    });
    base.join("synsim")
}

fn default_r0_min() -> f64 {
    -6.0
}

fn default_r0_max() -> f64 {
    6.0
}

fn default_lens_min() -> f64 {
    -8.0
}

fn default_lens_max() -> f64 {
    8.0
}

fn default_accommodation_min() -> f64 {
    0.0
}

fn default_accommodation_max() -> f64 {
    12.0
}

fn default_near_target_min() -> f64 {
    -4.0
}

fn default_near_target_max() -> f64 {
    0.0
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
        base.join("synsim").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

//! # Configuration
//!
//! Fitdash configuration is managed by [`confique`], which handles layered loading
//! from a TOML file, environment variables, and compiled defaults.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `FITDASH_DATA_DIR`, `FITDASH_WRITE_POLICY`, etc.
//! 2. **Config file**: `fitdash.toml` in the OS config directory (via `directories`),
//!    or an explicit path.
//! 3. **Compiled Defaults**: `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data_dir` | OS data directory | Where `snapshot.json` is kept |
//! | `write_policy` | `best-effort` | `best-effort` or `strict`, see [`WritePolicy`] |
//! | `hydration_threshold_liters` | `2.0` | Daily water needed to extend the streak |
//! | `recent_weeks` | `4` | Weeks shown in the weekly summary |

use crate::error::{FitdashError, Result};
use crate::metrics::MetricsOptions;
use crate::store::WritePolicy;
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "fitdash.toml";

/// Configuration for fitdash, stored in `fitdash.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FitdashConfig {
    /// Directory holding `snapshot.json`. When absent, the OS data directory is used.
    #[config(env = "FITDASH_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// What to do when the snapshot cannot be written.
    #[config(env = "FITDASH_WRITE_POLICY", default = "best-effort")]
    pub write_policy: WritePolicy,

    /// Liters of water a day needs to count toward the hydration streak.
    #[config(env = "FITDASH_HYDRATION_THRESHOLD", default = 2.0)]
    pub hydration_threshold_liters: f64,

    /// Number of weeks in the weekly summary.
    #[config(env = "FITDASH_RECENT_WEEKS", default = 4)]
    pub recent_weeks: usize,
}

impl Default for FitdashConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            write_policy: WritePolicy::BestEffort,
            hydration_threshold_liters: 2.0,
            recent_weeks: 4,
        }
    }
}

impl FitdashConfig {
    /// Loads from the environment and `path` (or the default config file).
    /// A missing file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(p) => Some(p.to_path_buf()),
            None => default_config_file(),
        };

        let mut builder = FitdashConfig::builder().env();
        if let Some(file) = file {
            builder = builder.file(file);
        }
        let config = builder.load()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.hydration_threshold_liters.is_finite() && self.hydration_threshold_liters >= 0.0)
        {
            return Err(FitdashError::Validation(format!(
                "hydration_threshold_liters must be zero or more, got {}",
                self.hydration_threshold_liters
            )));
        }
        Ok(())
    }

    /// The configured data directory, falling back to the OS data directory.
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => project_dirs()
                .map(|dirs| dirs.data_dir().to_path_buf())
                .ok_or_else(|| {
                    FitdashError::Store(
                        "Could not determine a data directory; set FITDASH_DATA_DIR".to_string(),
                    )
                }),
        }
    }

    pub fn metrics_options(&self) -> MetricsOptions {
        MetricsOptions {
            hydration_threshold_liters: self.hydration_threshold_liters,
        }
    }
}

pub fn default_config_file() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "fitdash", "fitdash")
}

//! Engine configuration for casematch
//!
//! Configuration is read from TOML. Lookup order: an explicit path, then
//! `casematch.toml` in the working directory, then the global config file,
//! then built-in defaults.

pub mod global;
pub mod types;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::bail_invalid;
use crate::error::{CaseMatchError, Result};
use crate::similarity::SimilarOptions;

pub use types::{DuplicatesConfig, EngineConfig, SimilarConfig, DEFAULT_DUPLICATE_THRESHOLD};

/// Name of the per-directory config file
pub const LOCAL_CONFIG_FILE: &str = "casematch.toml";

/// Where a loaded configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Path given explicitly by the caller
    Explicit(PathBuf),
    /// `casematch.toml` in the working directory
    Local(PathBuf),
    /// Global config file
    Global(PathBuf),
    /// No file found
    Defaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Explicit(path) | ConfigSource::Local(path) => {
                write!(f, "{}", path.display())
            }
            ConfigSource::Global(_) => write!(f, "{}", global::source_display()),
            ConfigSource::Defaults => write!(f, "defaults"),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CaseMatchError::io_operation("read config", path.display(), e))?;
        let config: EngineConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| CaseMatchError::Other(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Find and load the configuration that applies to `cwd`
    ///
    /// An explicit path must exist; the local and global files are optional.
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<(Self, ConfigSource)> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, ConfigSource::Explicit(path.to_path_buf())));
        }

        let local = cwd.join(LOCAL_CONFIG_FILE);
        if local.is_file() {
            return Ok((Self::load(&local)?, ConfigSource::Local(local)));
        }

        if let Ok(global) = global::global_config_path() {
            if global.is_file() {
                return Ok((Self::load(&global)?, ConfigSource::Global(global)));
            }
        }

        Ok((Self::default(), ConfigSource::Defaults))
    }

    /// Reject thresholds that are not finite or lie outside `[0, 1]`
    pub fn validate(&self) -> Result<()> {
        validate_threshold("similar.threshold", self.similar.threshold)?;
        validate_threshold("duplicates.threshold", self.duplicates.threshold)?;
        if self.similar.limit == Some(0) {
            bail_invalid!("similar.limit", 0);
        }
        Ok(())
    }

    /// Ranking options for `similar` lookups
    pub fn similar_options(&self) -> SimilarOptions {
        SimilarOptions {
            threshold: self.similar.threshold,
            limit: self.similar.limit,
        }
    }
}

/// Check that a threshold is a usable similarity cut-off
pub fn validate_threshold(context: &str, threshold: f64) -> Result<()> {
    if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
        bail_invalid!(context, threshold);
    }
    Ok(())
}

//! Search configuration loaded from TOML.
//!
//! ```toml
//! parallel_threshold = 4096
//! suggestion_limit = 3
//! default_mode = "prefix"
//! case_sensitive = false
//! ```

use crate::error::Result;
use crate::search::MatchMode;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = "type-decl-index";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Scans over at least this many keys run in parallel.
    pub parallel_threshold: usize,
    /// Maximum number of near-miss suggestions for an empty result.
    pub suggestion_limit: usize,
    /// Match mode used when a query does not choose one.
    pub default_mode: MatchMode,
    /// Case sensitivity used when a query does not choose one.
    pub case_sensitive: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 1024,
            suggestion_limit: 5,
            default_mode: MatchMode::Exact,
            case_sensitive: true,
        }
    }
}

impl SearchConfig {
    /// Loads configuration from an explicit file. Missing keys take defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config at {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Loads the user config file if it exists, otherwise the defaults.
    ///
    /// A config file that exists but cannot be parsed is an error.
    pub fn load_default() -> Result<Self> {
        match default_config_path() {
            Some(path) if path.is_file() => {
                tracing::debug!("Loading config from {}", path.display());
                Self::load(&path)
            }
            Some(path) => {
                tracing::debug!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => {
                tracing::warn!("No config directory on this platform, using defaults");
                Ok(Self::default())
            }
        }
    }
}

/// `<config dir>/type-decl-index/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}

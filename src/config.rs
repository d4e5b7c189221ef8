use std::path::Path;

use log::warn;

use crate::error::ConfigError;

/// Search depth used when nothing else is configured.
pub const DEFAULT_SEARCH_DEPTH: usize = 7;

/// Upper bound for the search depth: a 7x6 game never lasts longer.
pub const MAX_SEARCH_DEPTH: usize = 42;

/// Engine configuration, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Plies the AI looks ahead.
    pub search_depth: usize,
    /// Whether the AI makes the first move.
    pub ai_starts: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search_depth: DEFAULT_SEARCH_DEPTH,
            ai_starts: false,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&content)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search_depth == 0 {
            return Err(ConfigError::Validation("search_depth must be >= 1".into()));
        }
        if self.search_depth > MAX_SEARCH_DEPTH {
            return Err(ConfigError::Validation(format!(
                "search_depth must be <= {MAX_SEARCH_DEPTH}"
            )));
        }
        Ok(())
    }
}

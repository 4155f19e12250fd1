//! Viewer configuration.
//!
//! Settings live in a TOML file (see [`path::get_config_path`]). Every field is
//! optional; a missing file means defaults.
//!
//! ```toml
//! context-lines = 5
//! show-locals = true
//! max-value-width = 120
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub mod path;

pub use path::{get_config_path, set_config_path};

/// Errors loading the config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// How trace views are rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ViewerConfig {
    /// Source lines shown on each side of the highlighted line
    pub context_lines: usize,
    /// Show the focused frame's captured locals
    pub show_locals: bool,
    /// JSON values longer than this many characters are truncated
    pub max_value_width: usize,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            context_lines: 5,
            show_locals: true,
            max_value_width: 120,
        }
    }
}

impl ViewerConfig {
    /// Load from the resolved config path, falling back to defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match get_config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from an explicit path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}

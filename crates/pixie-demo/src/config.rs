use std::path::{Path, PathBuf};

use pixie_engine::input::Key;
use serde::Deserialize;

use crate::bindings::KeyBindings;

/// Errors reading the demo config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("key {0} is bound to more than one direction")]
    DuplicateKey(Key),
}

/// Contents of `pixie.toml`.
///
/// ```toml
/// [bindings]
/// up = "W"
/// down = "S"
/// left = "A"
/// right = "D"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DemoConfig {
    pub bindings: KeyBindings,
}

impl DemoConfig {
    /// Parses a config document.
    pub fn from_toml(src: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: DemoConfig = toml::from_str(src).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(key) = config.bindings.duplicate() {
            return Err(ConfigError::DuplicateKey(key));
        }
        Ok(config)
    }

    /// Loads `path`, or returns `preset` bindings when the file does not exist.
    pub fn load_or(path: impl AsRef<Path>, preset: KeyBindings) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(src) => {
                log::info!("loading {}", path.display());
                Self::from_toml(&src, path)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("{} not found; using preset bindings", path.display());
                Ok(Self { bindings: preset })
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

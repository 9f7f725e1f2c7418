//! Configuration file loader with position-aware error reporting.
//!
//! Loads TOML configuration from a specific path or the default XDG location.
//! When the default location has no file, returns `Config::default()`.

use std::fs;
use std::path::Path;

use crate::config::error::ConfigError;
use crate::config::schema::Config;
use crate::config::xdg;

/// Stateless configuration loader.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate configuration from a specific path.
    ///
    /// Returns `ConfigError::NotFound` if the file does not exist, or
    /// `ConfigError::ReadError` for other I/O failures.
    pub fn load_from_path(path: &Path) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ConfigError::ReadError {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;
        let config = Self::parse_toml(&content, path)?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load configuration from the default XDG location.
    ///
    /// If no file exists at the default path, returns `Config::default()`.
    pub fn load_default() -> Result<Config, ConfigError> {
        let path = xdg::config_path();
        if path.exists() {
            Self::load_from_path(&path)
        } else {
            tracing::debug!("No config file at {:?}, using defaults", path);
            Ok(Config::default())
        }
    }

    /// Load from `path` when given, otherwise from the default location.
    pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Self::load_default(),
        }
    }

    /// Parse a TOML string into `Config` with position-aware error reporting.
    fn parse_toml(content: &str, path: &Path) -> Result<Config, ConfigError> {
        toml::from_str(content).map_err(|e| {
            let (line, column) = e
                .span()
                .map(|span| line_column(content, span.start))
                .unwrap_or((0, 0));
            ConfigError::ParseError {
                path: path.to_path_buf(),
                line,
                column,
                message: e.message().to_string(),
            }
        })
    }
}

/// One-based line and column of byte `offset` in `content`.
fn line_column(content: &str, offset: usize) -> (usize, usize) {
    let before = &content[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|p| p + 1).unwrap_or(0);
    (line, offset - line_start + 1)
}

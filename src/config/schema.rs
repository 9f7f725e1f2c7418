//! TOML configuration schema types.
//!
//! All structs derive `Deserialize` and `Serialize` with defaults via
//! `#[serde(default)]`, so a partial or empty file is always accepted.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::error::ConfigError;
use crate::grid::{DEFAULT_COLUMNS, DEFAULT_SCAN_ROWS, MAX_COLUMNS, MAX_SCAN_ROWS};

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root configuration.
///
/// Corresponds to the full TOML file structure:
/// ```toml
/// [grid]
/// [log]
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Layout grid settings.
    pub grid: GridConfig,
    /// Logging settings.
    pub log: LogConfig,
}

impl Config {
    /// Checks values that parse but cannot be used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_COLUMNS).contains(&self.grid.columns) {
            return Err(ConfigError::Invalid {
                field: "grid.columns",
                message: format!("must be between 1 and {MAX_COLUMNS}"),
            });
        }
        if !(1..=MAX_SCAN_ROWS).contains(&self.grid.scan_rows) {
            return Err(ConfigError::Invalid {
                field: "grid.scan_rows",
                message: format!("must be between 1 and {MAX_SCAN_ROWS}"),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// Layout grid dimensions.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct GridConfig {
    /// Fixed grid width in columns.
    pub columns: u32,
    /// Rows scanned by first-fit placement before appending below.
    pub scan_rows: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            scan_rows: DEFAULT_SCAN_ROWS,
        }
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Logging settings. `BENTO_LOG` takes precedence when set.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// Fallback verbosity.
    pub level: LogLevel,
}

/// Log verbosity levels (lowercase in TOML).
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and warnings.
    Warn,
    /// Informational messages (default).
    #[default]
    Info,
    /// Debug-level detail.
    Debug,
    /// Full trace output.
    Trace,
}

impl LogLevel {
    /// The level as an `EnvFilter` directive.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

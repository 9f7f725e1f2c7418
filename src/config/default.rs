//! Default configuration template and file creation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::error::ConfigError;
use crate::config::xdg;

// ---------------------------------------------------------------------------
// Default TOML template
// ---------------------------------------------------------------------------

/// A commented TOML template with all default values.
///
/// Every value here must match `Config::default()` from `schema.rs`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Bento Grid Configuration
#
# All values shown below are the built-in defaults.
#
# Location: $XDG_CONFIG_HOME/bento-grid/config.toml

# ==============================================================================
# Grid
# ==============================================================================

[grid]

# Width of the layout grid in columns. Items wider than this are narrowed.
columns = 4

# Rows scanned when looking for a free spot for a new widget.
# When every spot in this window is taken the widget goes below everything.
scan_rows = 20

# ==============================================================================
# Logging
# ==============================================================================

[log]

# Verbosity when BENTO_LOG is not set.
# Options: "error", "warn", "info", "debug", "trace"
level = "info"
"#;

// ---------------------------------------------------------------------------
// File creation
// ---------------------------------------------------------------------------

/// Writes the default config file to the XDG location.
///
/// - If the file exists and `force` is `false`, returns `ConfigError::AlreadyExists`.
/// - If the file exists and `force` is `true`, moves it to `config.toml.bak` first.
///
/// Returns the path the config was written to.
pub fn create_default_config(force: bool) -> Result<PathBuf, ConfigError> {
    let path = xdg::config_path();
    create_config_at(&path, force)?;
    Ok(path)
}

/// Writes the default config file to `path`, with the same rules as
/// [`create_default_config`].
pub fn create_config_at(path: &Path, force: bool) -> Result<(), ConfigError> {
    if path.exists() {
        if !force {
            return Err(ConfigError::AlreadyExists {
                path: path.to_path_buf(),
            });
        }
        let backup_path = path.with_extension("toml.bak");
        fs::rename(path, &backup_path).map_err(|e| ConfigError::WriteError {
            path: backup_path.clone(),
            source: e,
        })?;
        tracing::info!("Backed up existing config to {}", backup_path.display());
    }

    if let Some(parent) = path.parent() {
        xdg::ensure_dir(parent).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;
    }
    fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(|e| ConfigError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::info!("Wrote default configuration to {}", path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::Config;
    use crate::config::xdg::tests::with_xdg_config;
    use serial_test::serial;

    // -- Template validity --------------------------------------------------

    #[test]
    fn template_values_match_config_default() {
        let from_template: Config =
            toml::from_str(DEFAULT_CONFIG_TEMPLATE).expect("template should parse");
        assert_eq!(from_template, Config::default());
    }

    #[test]
    fn template_contains_all_section_headers() {
        assert!(DEFAULT_CONFIG_TEMPLATE.contains("[grid]"), "missing [grid]");
        assert!(DEFAULT_CONFIG_TEMPLATE.contains("[log]"), "missing [log]");
    }

    // -- create_config_at ---------------------------------------------------

    #[test]
    fn create_writes_template_and_parent_dirs() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("nested/config.toml");
        create_config_at(&path, false).expect("should create");
        let written = fs::read_to_string(&path).expect("should read back");
        assert_eq!(written, DEFAULT_CONFIG_TEMPLATE);
    }

    #[test]
    fn create_refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "[grid]\ncolumns = 9\n").expect("failed to write");

        let err = create_config_at(&path, false).expect_err("should refuse");
        assert!(matches!(err, ConfigError::AlreadyExists { .. }));
        assert_eq!(
            fs::read_to_string(&path).expect("read"),
            "[grid]\ncolumns = 9\n"
        );
    }

    #[test]
    fn create_with_force_backs_up_existing_file() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "[grid]\ncolumns = 9\n").expect("failed to write");

        create_config_at(&path, true).expect("should overwrite");

        let backup = dir.path().join("config.toml.bak");
        assert_eq!(
            fs::read_to_string(backup).expect("backup exists"),
            "[grid]\ncolumns = 9\n"
        );
        assert_eq!(
            fs::read_to_string(&path).expect("read"),
            DEFAULT_CONFIG_TEMPLATE
        );
    }

    #[test]
    #[serial]
    fn create_default_config_uses_xdg_path() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        with_xdg_config(dir.path().to_str(), || {
            let path = create_default_config(false).expect("should create");
            assert_eq!(path, dir.path().join("bento-grid/config.toml"));
            assert!(path.is_file());
        });
    }
}

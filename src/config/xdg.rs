//! Platform-aware config path resolution for bento-grid.
//!
//! `$XDG_CONFIG_HOME/bento-grid` wins on every platform. Otherwise the
//! platform default from `dirs` is used: `~/.config/bento-grid` on Linux,
//! `~/Library/Application Support/bento-grid` on macOS.

use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "bento-grid";

/// Returns the configuration directory for bento-grid.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg.is_empty() {
            return PathBuf::from(xdg).join(APP_NAME);
        }
    }
    platform_config_dir().join(APP_NAME)
}

/// Platform-native config base directory (without XDG override).
fn platform_config_dir() -> PathBuf {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from(".config"))
}

/// Returns the path to the main configuration file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Creates a directory and all parent directories with mode 0700.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    fs::create_dir_all(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o700))?;
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serial_test::serial;

    /// Run a closure with `XDG_CONFIG_HOME` temporarily set, then restore.
    pub(crate) fn with_xdg_config<F: FnOnce()>(value: Option<&str>, f: F) {
        let original = std::env::var("XDG_CONFIG_HOME").ok();
        match value {
            Some(v) => std::env::set_var("XDG_CONFIG_HOME", v),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
        f();
        match original {
            Some(v) => std::env::set_var("XDG_CONFIG_HOME", v),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
    }

    #[test]
    #[serial]
    fn test_config_path_with_xdg_override() {
        with_xdg_config(Some("/custom/config"), || {
            assert_eq!(
                config_path(),
                PathBuf::from("/custom/config/bento-grid/config.toml")
            );
        });
    }

    #[test]
    #[serial]
    fn test_config_path_without_xdg_uses_platform_default() {
        with_xdg_config(None, || {
            let expected = platform_config_dir().join("bento-grid/config.toml");
            assert_eq!(config_path(), expected);
        });
    }

    #[test]
    #[serial]
    fn test_empty_xdg_is_ignored() {
        with_xdg_config(Some(""), || {
            assert_eq!(config_dir(), platform_config_dir().join("bento-grid"));
        });
    }

    #[test]
    fn test_ensure_dir_creates_nested_directory() {
        let tmp = tempfile::tempdir().expect("failed to create temp dir");
        let nested = tmp.path().join("a/b/c");
        ensure_dir(&nested).expect("ensure_dir failed");
        assert!(nested.is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn test_ensure_dir_sets_permissions() {
        use std::os::unix::fs::PermissionsExt;
        let tmp = tempfile::tempdir().expect("failed to create temp dir");
        let dir = tmp.path().join("secure");
        ensure_dir(&dir).expect("ensure_dir failed");
        let mode = fs::metadata(&dir)
            .expect("failed to read metadata")
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o700);
    }
}

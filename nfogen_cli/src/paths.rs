//! Centralized path management for the nfogen CLI

use std::path::PathBuf;

/// Name of the application configuration directory
const APP_CONFIG_DIR: &str = "nfogen";

/// Name of the configuration file
const CONFIG_FILE: &str = "config.toml";

/// Returns the configuration directory
///
/// `XDG_CONFIG_HOME` wins on Unix-like systems; otherwise the platform
/// configuration directory is used:
/// - `~/.config/nfogen` on Linux
/// - `~/Library/Application Support/nfogen` on macOS
/// - `%APPDATA%/nfogen` on Windows
///
/// Falls back to `.nfogen` in the current directory.
pub fn get_config_dir() -> PathBuf {
    #[cfg(not(target_os = "windows"))]
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
        && !xdg_config.is_empty()
    {
        return PathBuf::from(xdg_config).join(APP_CONFIG_DIR);
    }

    dirs::config_dir()
        .map(|d| d.join(APP_CONFIG_DIR))
        .unwrap_or_else(|| PathBuf::from(".nfogen"))
}

/// Returns the path to the configuration file
pub fn get_config_path() -> PathBuf {
    get_config_dir().join(CONFIG_FILE)
}

use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPathError {
    MissingHomeDirectory,
}

pub(crate) const APP_DIR: &str = "advisordesk";
pub(crate) const SETTINGS_FILE: &str = "advisordesk_settings.json";
pub(crate) const STYLESHEET_FILE: &str = "stylesheet.css";
pub(crate) const LOG_DIR: &str = "logs";
pub(crate) const LOG_FILE: &str = "app.log";

/// Per-user settings file location.
pub(crate) fn settings_path() -> Result<PathBuf, ConfigPathError> {
    let (xdg_config_home, home) = config_env_dirs();
    app_config_path(
        APP_DIR,
        SETTINGS_FILE,
        xdg_config_home.as_deref(),
        home.as_deref(),
    )
}

/// Sibling of the settings file holding the last known-good version.
pub(crate) fn backup_path_for(settings_file: &Path) -> PathBuf {
    settings_file.with_extension("bak")
}

/// Optional user stylesheet template replacing the built-in one.
pub(crate) fn stylesheet_override_for(settings_file: &Path) -> PathBuf {
    settings_file.with_file_name(STYLESHEET_FILE)
}

pub(crate) fn log_file_path_for(settings_file: &Path) -> PathBuf {
    let mut path = settings_file
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    path.push(LOG_DIR);
    path.push(LOG_FILE);
    path
}

#[cfg(not(windows))]
pub(crate) fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

#[cfg(windows)]
pub(crate) fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (None, std::env::var_os("USERPROFILE").map(PathBuf::from))
}

pub(crate) fn app_config_path(
    app_dir: &str,
    file_name: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    let mut path = config_root(xdg_config_home, home)?;
    path.push(app_dir);
    path.push(file_name);
    Ok(path)
}

fn config_root(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    if let Some(xdg) = xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(xdg.to_path_buf());
    }

    let home = home.ok_or(ConfigPathError::MissingHomeDirectory)?;
    Ok(home.join(platform_config_subdir()))
}

#[cfg(not(windows))]
fn platform_config_subdir() -> PathBuf {
    PathBuf::from(".config")
}

#[cfg(windows)]
fn platform_config_subdir() -> PathBuf {
    Path::new("AppData").join("Local")
}

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::{backup_path_for, settings_path, ConfigPathError};

mod defaults;
mod document;

pub use defaults::{default_document, DEFAULT_LOG_LEVEL, DEFAULT_THEME};

const THEME_KEY: &str = "app_settings.app_theme";
const CUSTOM_THEME_KEY: &str = "custom_theme";

pub type SettingsResult<T> = std::result::Result<T, SettingsError>;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("missing HOME environment variable")]
    MissingHomeDirectory,
    #[error("failed to read settings: {path}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write settings: {path}")]
    Write { path: PathBuf, source: io::Error },
    #[error("failed to create settings directory: {path}")]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("failed to serialize settings")]
    Serialize(#[from] serde_json::Error),
}

impl From<ConfigPathError> for SettingsError {
    fn from(error: ConfigPathError) -> Self {
        match error {
            ConfigPathError::MissingHomeDirectory => Self::MissingHomeDirectory,
        }
    }
}

/// Where the document of the last `load`/`reload` came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Primary,
    Backup,
    Defaults,
}

enum ReadOutcome {
    Parsed(Map<String, Value>),
    Missing,
    Corrupt(String),
}

/// Layered settings: static defaults, overlaid by the on-disk document,
/// overlaid by runtime `set` calls until the next `save`.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
    backup_path: PathBuf,
    document: Map<String, Value>,
    source: LoadSource,
}

impl ConfigStore {
    pub fn open_default() -> SettingsResult<Self> {
        Self::load(settings_path()?)
    }

    pub fn load(path: impl Into<PathBuf>) -> SettingsResult<Self> {
        let path = path.into();
        let mut store = Self {
            backup_path: backup_path_for(&path),
            path,
            document: Map::new(),
            source: LoadSource::Defaults,
        };
        store.reload()?;
        Ok(store)
    }

    /// Re-reads the settings file, falling back to the backup and then to
    /// the defaults. Anything not read from the primary file is written
    /// back to it.
    pub fn reload(&mut self) -> SettingsResult<()> {
        let (loaded, source) = self.read_with_fallback()?;

        let mut document = default_document();
        document::deep_merge(&mut document, loaded);
        self.document = document;
        self.source = source;
        self.normalize();

        if source != LoadSource::Primary {
            tracing::info!(
                path = %self.path.display(),
                ?source,
                "persisting repaired settings"
            );
            self.write_primary()?;
        }
        Ok(())
    }

    /// Rotates the current file into the backup slot and writes the whole
    /// document. A failed rotation is logged and the write still happens.
    pub fn save(&self) -> SettingsResult<()> {
        if self.path.exists() {
            if let Err(err) = fs::rename(&self.path, &self.backup_path) {
                tracing::warn!(
                    ?err,
                    backup = %self.backup_path.display(),
                    "could not create settings backup"
                );
            }
        }

        self.write_primary()?;
        tracing::info!(path = %self.path.display(), "settings saved");
        Ok(())
    }

    pub fn get(&self, path: &str) -> Option<&Value> {
        document::lookup(&self.document, path)
    }

    pub fn get_or<'a>(&'a self, path: &str, default: &'a Value) -> &'a Value {
        self.get(path).unwrap_or(default)
    }

    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(Value::as_str)
    }

    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.get(path).and_then(Value::as_bool)
    }

    /// Updates the in-memory document only; call [`ConfigStore::save`] to
    /// persist a batch of edits.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) {
        document::assign(&mut self.document, path, value.into());
    }

    pub fn current_theme(&self) -> &str {
        self.get_str(THEME_KEY)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_THEME)
    }

    pub fn set_current_theme(&mut self, name: &str) {
        self.set(THEME_KEY, name);
    }

    pub fn custom_theme(&self) -> Option<&Map<String, Value>> {
        self.get(CUSTOM_THEME_KEY).and_then(Value::as_object)
    }

    pub fn set_custom_theme(&mut self, palette: Map<String, Value>) {
        self.set(CUSTOM_THEME_KEY, Value::Object(palette));
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backup_path(&self) -> &Path {
        &self.backup_path
    }

    pub fn document(&self) -> &Map<String, Value> {
        &self.document
    }

    pub fn load_source(&self) -> LoadSource {
        self.source
    }

    fn normalize(&mut self) {
        if !document::is_truthy(self.get(THEME_KEY)) {
            tracing::debug!(default = DEFAULT_THEME, "settings had no theme; using default");
            self.set(THEME_KEY, DEFAULT_THEME);
        }
    }

    fn read_with_fallback(&self) -> SettingsResult<(Map<String, Value>, LoadSource)> {
        match read_document(&self.path)? {
            ReadOutcome::Parsed(document) => return Ok((document, LoadSource::Primary)),
            ReadOutcome::Missing => {
                tracing::info!(path = %self.path.display(), "settings file not found");
            }
            ReadOutcome::Corrupt(reason) => {
                tracing::warn!(
                    path = %self.path.display(),
                    reason = %reason,
                    "settings corrupted; trying backup"
                );
            }
        }

        match read_document(&self.backup_path)? {
            ReadOutcome::Parsed(document) => {
                tracing::warn!(backup = %self.backup_path.display(), "restored settings from backup");
                Ok((document, LoadSource::Backup))
            }
            ReadOutcome::Missing => {
                tracing::info!("no settings backup; using defaults");
                Ok((Map::new(), LoadSource::Defaults))
            }
            ReadOutcome::Corrupt(reason) => {
                tracing::error!(
                    backup = %self.backup_path.display(),
                    reason = %reason,
                    "settings backup also corrupted; restoring defaults"
                );
                Ok((Map::new(), LoadSource::Defaults))
            }
        }
    }

    fn write_primary(&self) -> SettingsResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| SettingsError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let serialized = to_pretty_json(&self.document)?;
        fs::write(&self.path, serialized).map_err(|source| SettingsError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

fn read_document(path: &Path) -> SettingsResult<ReadOutcome> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(ReadOutcome::Missing),
        Err(err) if err.kind() == io::ErrorKind::InvalidData => {
            return Ok(ReadOutcome::Corrupt(err.to_string()));
        }
        Err(source) => {
            return Err(SettingsError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    Ok(match serde_json::from_str::<Value>(&contents) {
        Ok(Value::Object(document)) => ReadOutcome::Parsed(document),
        Ok(_) => ReadOutcome::Corrupt("top-level value is not an object".to_string()),
        Err(err) => ReadOutcome::Corrupt(err.to_string()),
    })
}

fn to_pretty_json(document: &Map<String, Value>) -> SettingsResult<Vec<u8>> {
    let mut serialized = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut serialized, formatter);
    document.serialize(&mut serializer)?;
    serialized.push(b'\n');
    Ok(serialized)
}

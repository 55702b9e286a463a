use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use serde::Deserialize;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

use crate::config::log_file_path_for;
use crate::settings::ConfigStore;

const LOG_LEVEL_KEY: &str = "app_settings.log_level";
const LOG_TO_FILE_KEY: &str = "app_settings.log_to_file";

/// Verbosity names as stored in the settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Off,
    #[default]
    Info,
    Debug,
    Verbose,
}

impl LogLevel {
    pub const NAMES: [&'static str; 4] = ["OFF", "INFO", "DEBUG", "VERBOSE"];

    /// Unknown or missing values fall back to `INFO`.
    pub fn from_setting(value: Option<&serde_json::Value>) -> Self {
        let Some(value) = value else {
            return Self::default();
        };
        serde_json::from_value(value.clone()).unwrap_or_else(|_| {
            tracing::warn!(?value, "unknown log level; using INFO");
            Self::default()
        })
    }

    pub fn directive(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Verbose => "trace",
        }
    }
}

struct LoggingHandles {
    filter: reload::Handle<EnvFilter, Registry>,
    /// `RUST_LOG` was set at startup and wins over the settings file.
    env_override: bool,
}

struct OpenLogFile {
    path: PathBuf,
    file: File,
}

static HANDLES: OnceLock<LoggingHandles> = OnceLock::new();
static LOG_FILE: Mutex<Option<OpenLogFile>> = Mutex::new(None);

/// Installs the global subscriber: stderr plus a log file slot that stays
/// closed until [`apply_settings`] opens it.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().ok();
    let env_override = env_filter.is_some();
    let filter = env_filter.unwrap_or_else(|| EnvFilter::new(LogLevel::default().directive()));
    let (filter_layer, filter_handle) = reload::Layer::new(filter);

    let installed = tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt::layer().with_writer(io::stderr))
        .with(fmt::layer().with_ansi(false).with_writer(|| LogFileWriter))
        .try_init();

    match installed {
        Ok(()) => {
            if HANDLES
                .set(LoggingHandles {
                    filter: filter_handle,
                    env_override,
                })
                .is_err()
            {
                tracing::debug!("logging handles already registered");
            }
        }
        Err(err) => {
            eprintln!("advisordesk: logging already initialized: {err}");
        }
    }
}

/// Applies `app_settings.log_level` and `app_settings.log_to_file`. Does
/// nothing before [`init`].
pub fn apply_settings(store: &ConfigStore) {
    let Some(handles) = HANDLES.get() else {
        return;
    };

    let level = LogLevel::from_setting(store.get(LOG_LEVEL_KEY));
    if handles.env_override {
        tracing::debug!(?level, "RUST_LOG set; ignoring configured log level");
    } else if let Err(err) = handles.filter.reload(EnvFilter::new(level.directive())) {
        tracing::warn!(?err, "failed to update log filter");
    }

    let log_to_file = store.get_bool(LOG_TO_FILE_KEY).unwrap_or(false);
    let target = log_to_file.then(|| log_file_path_for(store.path()));
    set_log_file(target.as_deref());
}

fn set_log_file(target: Option<&Path>) {
    let mut slot = lock_log_file();
    match target {
        None => {
            let previous = slot.take();
            // the file layer takes this lock while writing events
            drop(slot);
            if let Some(previous) = previous {
                tracing::debug!(path = %previous.path.display(), "log file closed");
            }
        }
        Some(path) if slot.as_ref().is_some_and(|open| open.path == path) => {}
        Some(path) => match open_log_file(path) {
            Ok(file) => {
                *slot = Some(OpenLogFile {
                    path: path.to_path_buf(),
                    file,
                });
            }
            Err(err) => {
                *slot = None;
                drop(slot);
                tracing::warn!(path = %path.display(), ?err, "failed to open log file");
            }
        },
    }
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

fn lock_log_file() -> MutexGuard<'static, Option<OpenLogFile>> {
    LOG_FILE.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Writes into the currently open log file, or discards when none is open.
struct LogFileWriter;

impl Write for LogFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match lock_log_file().as_mut() {
            Some(open) => open.file.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match lock_log_file().as_mut() {
            Some(open) => open.file.flush(),
            None => Ok(()),
        }
    }
}

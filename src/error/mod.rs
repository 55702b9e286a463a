use crate::settings::SettingsError;
use thiserror::Error;

pub type AppResult<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[cfg(feature = "gtk")]
    #[error("failed to initialize GTK")]
    GtkInit(#[from] gtk4::glib::BoolError),
}

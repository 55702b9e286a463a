pub mod app;
mod config;
pub mod error;
pub mod form;
pub mod logging;
pub mod salutation;
pub mod settings;
pub mod theme;
pub mod ui;
pub use error::{AppError, AppResult};

/// Entrypoint used by higher-level integrations and CLI bindings.
pub fn run() -> AppResult<()> {
    logging::init();
    tracing::info!("starting advisordesk");

    #[cfg(feature = "gtk")]
    gtk4::init()?;

    let app = app::App::start()?;

    tracing::info!(
        theme = ?app.theme().current_theme_name(),
        state = ?app.theme().state(),
        "startup complete"
    );
    Ok(())
}

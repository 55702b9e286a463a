use crate::error::AppResult;
use crate::form::{
    advisor_form, application_form, database_form, paperless_form, themes_form, SettingsForm,
};
use crate::logging;
use crate::salutation::SalutationService;
use crate::settings::ConfigStore;
use crate::theme::{StyleSink, StylesheetTemplate, SystemColorSource, ThemeEngine};

mod bootstrap;
#[cfg(feature = "gtk")]
mod runtime_css;

#[cfg(feature = "gtk")]
pub use runtime_css::GtkStyleSink;

const LANGUAGE_KEY: &str = "app_settings.app_language";

/// Owns the settings store and the theme engine for the lifetime of the UI.
pub struct App {
    store: ConfigStore,
    theme: ThemeEngine,
    salutations: SalutationService,
}

impl App {
    /// Builds the app from the per-user settings file with the host's color
    /// source and style sink.
    pub fn start() -> AppResult<Self> {
        let store = ConfigStore::open_default()?;
        let template = bootstrap::load_stylesheet_template(store.path());
        Ok(Self::bootstrap(
            store,
            bootstrap::system_color_source(),
            template,
            bootstrap::style_sink(),
        ))
    }

    /// Applies logging settings, then the saved theme (or `light` when it is
    /// no longer available) marked as saved.
    pub fn bootstrap(
        store: ConfigStore,
        system: Box<dyn SystemColorSource>,
        template: StylesheetTemplate,
        sink: Box<dyn StyleSink>,
    ) -> Self {
        logging::apply_settings(&store);
        let mut theme = ThemeEngine::new(&store, system, template, sink);
        theme.apply_saved_theme(&store);
        tracing::info!(
            path = %store.path().display(),
            source = ?store.load_source(),
            theme = ?theme.current_theme_name(),
            "settings loaded"
        );
        Self {
            store,
            theme,
            salutations: SalutationService::default(),
        }
    }

    pub fn with_salutations(mut self, salutations: SalutationService) -> Self {
        self.salutations = salutations;
        self
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ConfigStore {
        &mut self.store
    }

    pub fn theme(&self) -> &ThemeEngine {
        &self.theme
    }

    pub fn theme_mut(&mut self) -> &mut ThemeEngine {
        &mut self.theme
    }

    /// Persists the active theme and every pending settings edit, then
    /// re-applies logging settings.
    pub fn save_settings(&mut self) -> AppResult<()> {
        self.theme.save_current_theme(&mut self.store);
        self.store.save()?;
        logging::apply_settings(&self.store);
        Ok(())
    }

    pub fn discard_theme_changes(&mut self) -> AppResult<()> {
        self.theme.reset_to_last_saved(&mut self.store)?;
        Ok(())
    }

    /// Forms of the settings tab, in display order.
    pub fn settings_forms(&self) -> Vec<SettingsForm> {
        vec![
            application_form(),
            themes_form(self.theme.themes()),
            advisor_form(),
            database_form(),
            paperless_form(),
        ]
    }

    /// Choices for the advisor salutation combo in the configured language.
    pub fn salutation_options(&self) -> Vec<String> {
        let language = self.store.get_str(LANGUAGE_KEY).unwrap_or("de");
        self.salutations.salutations(language)
    }
}

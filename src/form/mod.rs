//! Binding between settings keys and the controls of the settings tabs.

mod field;

pub use field::{FieldKind, DATE_FORMAT};

use crate::logging::LogLevel;
use crate::settings::ConfigStore;

/// Name-addressed access to the UI controls of a form. Returns `None` for
/// controls the current view does not have.
pub trait FieldControls {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&mut self, key: &str, text: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldBinding {
    pub key: String,
    pub kind: FieldKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsForm {
    name: &'static str,
    fields: Vec<FieldBinding>,
}

impl SettingsForm {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, key: &str, kind: FieldKind) -> Self {
        self.fields.push(FieldBinding {
            key: key.to_string(),
            kind,
        });
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &[FieldBinding] {
        &self.fields
    }

    /// Fills every control from the store.
    pub fn load(&self, store: &ConfigStore, controls: &mut dyn FieldControls) {
        for binding in &self.fields {
            let text = binding.kind.format(store.get(&binding.key));
            controls.write(&binding.key, &text);
        }
    }

    /// Copies control values into the store in memory. Persisting is up to
    /// the caller.
    pub fn save(&self, controls: &dyn FieldControls, store: &mut ConfigStore) {
        for binding in &self.fields {
            let Some(text) = controls.read(&binding.key) else {
                tracing::debug!(form = self.name, key = binding.key.as_str(), "no control bound");
                continue;
            };
            let value = binding.kind.parse(&text);
            tracing::debug!(
                form = self.name,
                key = binding.key.as_str(),
                value = %binding.kind.loggable(&value),
                "form field stored"
            );
            store.set(&binding.key, value);
        }
    }

    /// True when any present control holds a value that differs from the
    /// stored one after both pass through the field's format.
    pub fn is_dirty(&self, controls: &dyn FieldControls, store: &ConfigStore) -> bool {
        self.fields.iter().any(|binding| {
            controls.read(&binding.key).is_some_and(|text| {
                let stored = binding.kind.parse(&binding.kind.format(store.get(&binding.key)));
                binding.kind.parse(&text) != stored
            })
        })
    }
}

pub fn application_form() -> SettingsForm {
    SettingsForm::new("application")
        .field("app_settings.app_language", FieldKind::Combo)
        .field("app_settings.log_level", FieldKind::Combo)
        .field("app_settings.log_to_file", FieldKind::Toggle)
}

/// Language codes offered by the application form.
pub const LANGUAGES: [&str; 2] = ["de", "en"];

/// Log levels offered by the application form.
pub fn log_level_options() -> [&'static str; 4] {
    LogLevel::NAMES
}

pub fn themes_form<'a>(theme_names: impl IntoIterator<Item = &'a str>) -> SettingsForm {
    SettingsForm::new("themes").field(
        "app_settings.app_theme",
        FieldKind::radio_group(theme_names),
    )
}

pub fn advisor_form() -> SettingsForm {
    SettingsForm::new("advisor")
        .field("advisor.salutation", FieldKind::Combo)
        .field("advisor.given_name", FieldKind::Text)
        .field("advisor.middle_name", FieldKind::Text)
        .field("advisor.surname", FieldKind::Text)
        .field("advisor.birth_date", FieldKind::Date)
}

pub fn database_form() -> SettingsForm {
    SettingsForm::new("database")
        .field("db_hosts.local", FieldKind::Text)
        .field("db_hosts.external", FieldKind::Text)
        .field("database.user", FieldKind::Text)
        .field("database.password", FieldKind::Password)
        .field("database.port", FieldKind::Text)
        .field("database.dbname", FieldKind::Text)
        .field("database.charset", FieldKind::Text)
        .field("database.auto_commit", FieldKind::Toggle)
}

pub fn paperless_form() -> SettingsForm {
    SettingsForm::new("paperless")
        .field("paperless_hosts.local", FieldKind::Text)
        .field("paperless_hosts.external", FieldKind::Text)
        .field("paperless.port", FieldKind::Text)
        .field("paperless.enabled", FieldKind::Toggle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[derive(Default)]
    struct FakeControls {
        values: HashMap<String, String>,
    }

    impl FakeControls {
        fn with(mut self, key: &str, text: &str) -> Self {
            self.values.insert(key.to_string(), text.to_string());
            self
        }
    }

    impl FieldControls for FakeControls {
        fn read(&self, key: &str) -> Option<String> {
            self.values.get(key).cloned()
        }

        fn write(&mut self, key: &str, text: &str) {
            self.values.insert(key.to_string(), text.to_string());
        }
    }

    fn store_in(root: &TempDir) -> ConfigStore {
        let path: PathBuf = root.path().join("advisordesk").join("advisordesk_settings.json");
        ConfigStore::load(path).expect("settings should load")
    }

    #[test]
    fn load_fills_controls_from_defaults() {
        let root = TempDir::new().expect("temp dir should be created");
        let store = store_in(&root);
        let mut controls = FakeControls::default();

        database_form().load(&store, &mut controls);

        assert_eq!(controls.read("db_hosts.local").as_deref(), Some("192.168.178.78"));
        assert_eq!(controls.read("database.port").as_deref(), Some("3309"));
        assert_eq!(controls.read("database.auto_commit").as_deref(), Some("false"));
        assert_eq!(controls.read("database.password").as_deref(), Some(""));
    }

    #[test]
    fn save_writes_parsed_values_without_touching_disk() {
        let root = TempDir::new().expect("temp dir should be created");
        let mut store = store_in(&root);
        let on_disk = std::fs::read_to_string(store.path()).expect("file should be readable");
        let controls = FakeControls::default()
            .with("advisor.given_name", " Maria ")
            .with("advisor.birth_date", "3.7.1975");

        advisor_form().save(&controls, &mut store);

        assert_eq!(store.get("advisor.given_name"), Some(&json!("Maria")));
        assert_eq!(store.get("advisor.birth_date"), Some(&json!("03.07.1975")));
        assert_eq!(store.get("advisor.surname"), Some(&json!("")));
        assert_eq!(
            std::fs::read_to_string(store.path()).expect("file should be readable"),
            on_disk
        );
    }

    #[test]
    fn toggle_is_stored_as_json_bool() {
        let root = TempDir::new().expect("temp dir should be created");
        let mut store = store_in(&root);
        let controls = FakeControls::default().with("paperless.enabled", "true");

        paperless_form().save(&controls, &mut store);

        assert_eq!(store.get_bool("paperless.enabled"), Some(true));
    }

    #[test]
    fn is_dirty_compares_normalized_values() {
        let root = TempDir::new().expect("temp dir should be created");
        let store = store_in(&root);
        let mut controls = FakeControls::default();
        let form = application_form();
        form.load(&store, &mut controls);

        assert!(!form.is_dirty(&controls, &store));

        controls.write("app_settings.log_to_file", "TRUE");
        assert!(form.is_dirty(&controls, &store));
    }

    #[test]
    fn themes_form_only_accepts_available_names() {
        let root = TempDir::new().expect("temp dir should be created");
        let mut store = store_in(&root);
        let form = themes_form(["light", "dark", "custom"]);
        let controls = FakeControls::default().with("app_settings.app_theme", "neon");

        form.save(&controls, &mut store);

        assert_eq!(store.get_str("app_settings.app_theme"), Some(""));
        assert_eq!(store.current_theme(), "light");
    }

    #[test]
    fn application_form_offers_known_log_levels() {
        assert!(log_level_options().contains(&"VERBOSE"));
        assert_eq!(application_form().fields().len(), 3);
        assert!(LANGUAGES.contains(&"de"));
    }
}

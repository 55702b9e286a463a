//! Theme derivation: named base palettes are expanded into semantic role
//! colors and rendered through a stylesheet template.

mod color;
mod palette;
mod roles;
mod sink;
mod system;
mod template;

use crate::settings::{ConfigStore, SettingsResult};
use crate::ui::{LayoutTokens, LAYOUT_TOKENS};

pub use color::{apply_intensity, lighten, Rgb, ERROR_SENTINEL, HOVER_FACTOR};
pub use palette::{builtin_palettes, light_palette, BasePalette, LIGHT_THEME, REQUIRED_KEYS};
pub use roles::{SemanticRoleSet, ROLE_MAPPING, WIDGET_OVERRIDES};
pub use sink::{StyleSink, TracingStyleSink};
#[cfg(feature = "gtk")]
pub use system::GtkSystemColors;
pub use system::{GsettingsColors, NoSystemColors, SystemColorSource};
pub use template::{RenderContext, Rendered, StylesheetTemplate, TemplateError, TemplateResult};

pub const SYSTEM_THEME: &str = "system";
pub const CUSTOM_THEME: &str = "custom";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeState {
    /// No theme applied yet.
    Unapplied,
    Clean,
    /// The active palette differs from the last saved snapshot.
    Dirty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ActiveTheme {
    name: String,
    palette: BasePalette,
}

pub struct ThemeEngine {
    palettes: Vec<(String, BasePalette)>,
    template: StylesheetTemplate,
    layout: LayoutTokens,
    system: Box<dyn SystemColorSource>,
    sink: Box<dyn StyleSink>,
    active: Option<ActiveTheme>,
    saved: Option<BasePalette>,
    stylesheet: String,
}

impl ThemeEngine {
    pub fn new(
        store: &ConfigStore,
        system: Box<dyn SystemColorSource>,
        template: StylesheetTemplate,
        sink: Box<dyn StyleSink>,
    ) -> Self {
        let palettes = collect_palettes(store, system.as_ref());
        Self {
            palettes,
            template,
            layout: LAYOUT_TOKENS,
            system,
            sink,
            active: None,
            saved: None,
            stylesheet: String::new(),
        }
    }

    /// Available theme names: built-ins, then `system` when the host
    /// reported colors, then `custom`.
    pub fn themes(&self) -> impl Iterator<Item = &str> {
        self.palettes.iter().map(|(name, _)| name.as_str())
    }

    pub fn palette(&self, name: &str) -> Option<&BasePalette> {
        self.palettes
            .iter()
            .find(|(candidate, _)| candidate == name)
            .map(|(_, palette)| palette)
    }

    pub fn current_theme_name(&self) -> Option<&str> {
        self.active.as_ref().map(|active| active.name.as_str())
    }

    pub fn current_palette(&self) -> Option<&BasePalette> {
        self.active.as_ref().map(|active| &active.palette)
    }

    pub fn current_roles(&self) -> Option<SemanticRoleSet> {
        self.current_palette().map(SemanticRoleSet::derive)
    }

    /// Last rendered stylesheet; empty before the first apply.
    pub fn stylesheet(&self) -> &str {
        &self.stylesheet
    }

    pub fn state(&self) -> ThemeState {
        match self.active {
            None => ThemeState::Unapplied,
            Some(_) if self.is_dirty() => ThemeState::Dirty,
            Some(_) => ThemeState::Clean,
        }
    }

    pub fn is_dirty(&self) -> bool {
        match (&self.saved, &self.active) {
            (Some(saved), Some(active)) => *saved != active.palette,
            _ => false,
        }
    }

    /// Switches to `name`. Unknown names and the already active theme are
    /// ignored.
    pub fn apply_theme(&mut self, name: &str, mark_saved: bool) {
        let Some(palette) = self.palette(name).cloned() else {
            tracing::error!(theme = name, "unknown theme; keeping current theme");
            return;
        };
        if self.current_theme_name() == Some(name) {
            tracing::debug!(theme = name, "theme already active");
            return;
        }
        self.activate(name, palette, mark_saved);
    }

    /// Edits one base color of the active theme and re-renders. The saved
    /// snapshot is left alone, so the theme turns dirty.
    pub fn update_current_color(&mut self, key: &str, value: &str) {
        let Some(active) = self.active.as_mut() else {
            tracing::debug!(key, "no active theme; color update ignored");
            return;
        };
        active.palette.set(key, value);
        let palette = active.palette.clone();
        self.render(&palette);
    }

    /// Records the active theme in `store` (in memory) and marks it clean.
    /// For `custom` the palette itself is stored too.
    pub fn save_current_theme(&mut self, store: &mut ConfigStore) {
        let Some(active) = self.active.as_ref() else {
            tracing::debug!("no active theme; nothing to save");
            return;
        };
        store.set_current_theme(&active.name);
        if active.name == CUSTOM_THEME {
            store.set_custom_theme(active.palette.to_settings());
            let palette = active.palette.clone();
            if let Some((_, slot)) = self
                .palettes
                .iter_mut()
                .find(|(name, _)| name == CUSTOM_THEME)
            {
                *slot = palette;
            }
        }
        self.saved = Some(active.palette.clone());
        tracing::info!(theme = active.name.as_str(), "theme saved");
    }

    /// Applies the theme named in `store`, falling back to `light`, and
    /// marks it clean even when it is already active.
    pub fn apply_saved_theme(&mut self, store: &ConfigStore) {
        let requested = store.current_theme();
        let (name, palette) = match self.palette(requested) {
            Some(palette) => (requested, palette.clone()),
            None => {
                tracing::warn!(
                    theme = requested,
                    fallback = LIGHT_THEME,
                    "saved theme unavailable"
                );
                (LIGHT_THEME, light_palette())
            }
        };
        self.activate(name, palette, true);
    }

    /// Drops unsaved edits: reloads `store` from disk, rebuilds the palette
    /// list and re-applies the saved theme.
    pub fn reset_to_last_saved(&mut self, store: &mut ConfigStore) -> SettingsResult<()> {
        store.reload()?;
        self.palettes = collect_palettes(store, self.system.as_ref());
        self.apply_saved_theme(store);
        Ok(())
    }

    fn activate(&mut self, name: &str, palette: BasePalette, mark_saved: bool) {
        self.render(&palette);
        if mark_saved {
            self.saved = Some(palette.clone());
        }
        self.active = Some(ActiveTheme {
            name: name.to_string(),
            palette,
        });
        tracing::info!(theme = name, mark_saved, "theme applied");
    }

    fn render(&mut self, palette: &BasePalette) {
        let context = self.render_context(palette);
        let rendered = self.template.render(&context);
        self.sink.apply_stylesheet(&rendered.text);
        self.stylesheet = rendered.text;
    }

    fn render_context(&self, palette: &BasePalette) -> RenderContext {
        let mut context = RenderContext::new();
        for (name, value) in self.layout.placeholders() {
            context.insert(name.to_string(), value);
        }
        for (key, value) in palette.iter() {
            let color = Rgb::parse_hex(value).map(Rgb::to_hex).unwrap_or_else(|| {
                tracing::warn!(key, value, "invalid base color; using error color");
                ERROR_SENTINEL.to_string()
            });
            let hover = lighten(&color).unwrap_or_else(|| ERROR_SENTINEL.to_string());
            context.insert(format!("{key}_hover"), hover);
            context.insert(key.to_string(), color);
        }
        for (role, value) in SemanticRoleSet::derive(palette).iter() {
            context.insert(role.to_string(), value.to_string());
        }
        context
    }
}

fn collect_palettes(
    store: &ConfigStore,
    system: &dyn SystemColorSource,
) -> Vec<(String, BasePalette)> {
    let fallback = light_palette();
    let mut palettes: Vec<(String, BasePalette)> = builtin_palettes()
        .into_iter()
        .map(|(name, palette)| (name.to_string(), palette.normalized(&fallback)))
        .collect();

    match system.palette() {
        Some(palette) => palettes.push((SYSTEM_THEME.to_string(), palette.normalized(&fallback))),
        None => tracing::debug!("no system colors; omitting system theme"),
    }

    let custom = store
        .custom_theme()
        .map(BasePalette::from_settings)
        .unwrap_or_default();
    palettes.push((CUSTOM_THEME.to_string(), custom.normalized(&fallback)));
    palettes
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::fs;
    use std::path::PathBuf;
    use std::rc::Rc;
    use tempfile::TempDir;

    #[derive(Clone, Default)]
    struct RecordingSink {
        applied: Rc<RefCell<Vec<String>>>,
    }

    impl StyleSink for RecordingSink {
        fn apply_stylesheet(&self, css: &str) {
            self.applied.borrow_mut().push(css.to_string());
        }
    }

    struct FixedSystemColors(Option<BasePalette>);

    impl SystemColorSource for FixedSystemColors {
        fn palette(&self) -> Option<BasePalette> {
            self.0.clone()
        }
    }

    const TEMPLATE: &str = "a { color: ${accent_primary}; } a:hover { color: ${accent_primary_hover}; }";

    fn settings_file(root: &TempDir) -> PathBuf {
        root.path().join("advisordesk").join("advisordesk_settings.json")
    }

    fn store_in(root: &TempDir) -> ConfigStore {
        ConfigStore::load(settings_file(root)).expect("store should load")
    }

    fn engine_with(store: &ConfigStore, system: Option<BasePalette>) -> (ThemeEngine, RecordingSink) {
        let sink = RecordingSink::default();
        let engine = ThemeEngine::new(
            store,
            Box::new(FixedSystemColors(system)),
            StylesheetTemplate::new(TEMPLATE),
            Box::new(sink.clone()),
        );
        (engine, sink)
    }

    #[test]
    fn themes_lists_builtins_then_custom_without_system_colors() {
        let root = TempDir::new().expect("temp dir should be created");
        let store = store_in(&root);
        let (engine, _) = engine_with(&store, None);

        let names: Vec<&str> = engine.themes().collect();

        assert_eq!(names, vec!["light", "dark", "green", "orange", "custom"]);
    }

    #[test]
    fn system_theme_sits_before_custom_when_available() {
        let root = TempDir::new().expect("temp dir should be created");
        let store = store_in(&root);
        let system = BasePalette::from_pairs([("main", "#3584e4")]);
        let (engine, _) = engine_with(&store, Some(system));

        let names: Vec<&str> = engine.themes().collect();

        assert_eq!(names, vec!["light", "dark", "green", "orange", "system", "custom"]);
        let system = engine.palette(SYSTEM_THEME).expect("theme should be available");
        assert_eq!(system.get("main"), Some("#3584e4"));
        assert_eq!(system.get("background"), Some("#f5f5f5"));
    }

    #[test]
    fn apply_theme_renders_and_pushes_stylesheet() {
        let root = TempDir::new().expect("temp dir should be created");
        let store = store_in(&root);
        let (mut engine, sink) = engine_with(&store, None);

        engine.apply_theme("light", true);

        assert_eq!(engine.current_theme_name(), Some("light"));
        assert_eq!(
            engine.stylesheet(),
            "a { color: #4caf50; } a:hover { color: #57c95c; }"
        );
        assert_eq!(sink.applied.borrow().len(), 1);
        assert_eq!(engine.state(), ThemeState::Clean);
    }

    #[test]
    fn unknown_theme_is_ignored() {
        let root = TempDir::new().expect("temp dir should be created");
        let store = store_in(&root);
        let (mut engine, sink) = engine_with(&store, None);
        engine.apply_theme("dark", true);

        engine.apply_theme("no-such-theme", true);

        assert_eq!(engine.current_theme_name(), Some("dark"));
        assert_eq!(sink.applied.borrow().len(), 1);
    }

    #[test]
    fn reapplying_the_active_theme_is_a_no_op() {
        let root = TempDir::new().expect("temp dir should be created");
        let store = store_in(&root);
        let (mut engine, sink) = engine_with(&store, None);
        engine.apply_theme("green", true);
        engine.update_current_color("main", "#000000");

        engine.apply_theme("green", true);

        assert_eq!(sink.applied.borrow().len(), 2);
        assert!(engine.is_dirty());
    }

    #[test]
    fn dirty_tracking_follows_edits_and_saves() {
        let root = TempDir::new().expect("temp dir should be created");
        let mut store = store_in(&root);
        let (mut engine, _) = engine_with(&store, None);

        assert_eq!(engine.state(), ThemeState::Unapplied);
        engine.apply_theme("light", true);
        assert!(!engine.is_dirty());

        engine.update_current_color("main", "#123456");
        assert!(engine.is_dirty());
        assert_eq!(engine.state(), ThemeState::Dirty);
        assert!(engine.stylesheet().contains("#123456"));

        engine.save_current_theme(&mut store);
        assert!(!engine.is_dirty());
        assert_eq!(store.current_theme(), "light");
    }

    #[test]
    fn setting_a_color_to_its_current_value_stays_clean() {
        let root = TempDir::new().expect("temp dir should be created");
        let store = store_in(&root);
        let (mut engine, _) = engine_with(&store, None);
        engine.apply_theme("light", true);

        engine.update_current_color("main", "#4caf50");

        assert!(!engine.is_dirty());
    }

    #[test]
    fn update_before_any_apply_does_nothing() {
        let root = TempDir::new().expect("temp dir should be created");
        let store = store_in(&root);
        let (mut engine, sink) = engine_with(&store, None);

        engine.update_current_color("main", "#000000");

        assert_eq!(engine.state(), ThemeState::Unapplied);
        assert!(sink.applied.borrow().is_empty());
    }

    #[test]
    fn save_without_active_theme_leaves_store_untouched() {
        let root = TempDir::new().expect("temp dir should be created");
        let mut store = store_in(&root);
        store.set_current_theme("dark");
        let (mut engine, _) = engine_with(&store, None);

        engine.save_current_theme(&mut store);

        assert_eq!(store.current_theme(), "dark");
    }

    #[test]
    fn switching_without_mark_saved_is_dirty_against_previous_snapshot() {
        let root = TempDir::new().expect("temp dir should be created");
        let store = store_in(&root);
        let (mut engine, _) = engine_with(&store, None);
        engine.apply_theme("light", true);

        engine.apply_theme("dark", false);

        assert!(engine.is_dirty());
    }

    #[test]
    fn saving_custom_persists_palette_and_refreshes_entry() {
        let root = TempDir::new().expect("temp dir should be created");
        let mut store = store_in(&root);
        let (mut engine, _) = engine_with(&store, None);
        engine.apply_theme(CUSTOM_THEME, true);
        engine.update_current_color("main", "#abcdef");

        engine.save_current_theme(&mut store);

        assert_eq!(store.current_theme(), CUSTOM_THEME);
        assert_eq!(
            store.get_str("custom_theme.main"),
            Some("#abcdef")
        );
        assert_eq!(
            engine.palette(CUSTOM_THEME).and_then(|palette| palette.get("main")),
            Some("#abcdef")
        );
    }

    #[test]
    fn saving_builtin_does_not_touch_custom_palette() {
        let root = TempDir::new().expect("temp dir should be created");
        let mut store = store_in(&root);
        let (mut engine, _) = engine_with(&store, None);
        engine.apply_theme("orange", true);
        engine.update_current_color("main", "#010101");

        engine.save_current_theme(&mut store);

        assert_eq!(store.get_str("custom_theme.main"), Some("#4caf50"));
        assert_eq!(engine.palette("orange").and_then(|p| p.get("main")), Some("#ff9800"));
    }

    #[test]
    fn custom_palette_is_normalized_against_light() {
        let root = TempDir::new().expect("temp dir should be created");
        let path = settings_file(&root);
        fs::create_dir_all(path.parent().expect("settings path should have a parent"))
            .expect("settings dir should be created");
        fs::write(&path, r##"{"custom_theme": {"main": "#222222", "error": 5}}"##)
            .expect("file should be written");
        let store = ConfigStore::load(&path).expect("settings should load");
        let (engine, _) = engine_with(&store, None);

        let custom = engine.palette(CUSTOM_THEME).expect("theme should be available");

        assert_eq!(custom.get("main"), Some("#222222"));
        // the default document still supplies the remaining keys
        assert_eq!(custom.get("background"), Some("#f5f5f5"));
        assert_eq!(custom.get("error"), Some("#a51d2d"));
    }

    #[test]
    fn apply_saved_theme_falls_back_to_light() {
        let root = TempDir::new().expect("temp dir should be created");
        let mut store = store_in(&root);
        store.set_current_theme(SYSTEM_THEME);
        let (mut engine, _) = engine_with(&store, None);

        engine.apply_saved_theme(&store);

        assert_eq!(engine.current_theme_name(), Some(LIGHT_THEME));
        assert_eq!(engine.state(), ThemeState::Clean);
    }

    #[test]
    fn reset_to_last_saved_discards_unsaved_edits() {
        let root = TempDir::new().expect("temp dir should be created");
        let mut store = store_in(&root);
        store.set_current_theme("dark");
        store.save().expect("settings should save");
        let (mut engine, sink) = engine_with(&store, None);
        engine.apply_saved_theme(&store);
        engine.update_current_color("background", "#ffffff");
        store.set_current_theme("green");

        engine.reset_to_last_saved(&mut store).expect("saved theme should be restored");

        assert_eq!(store.current_theme(), "dark");
        assert_eq!(engine.current_theme_name(), Some("dark"));
        assert_eq!(engine.current_palette().and_then(|p| p.get("background")), Some("#303030"));
        assert!(!engine.is_dirty());
        assert_eq!(sink.applied.borrow().len(), 3);
    }

    #[test]
    fn invalid_color_edit_renders_sentinel_instead_of_failing() {
        let root = TempDir::new().expect("temp dir should be created");
        let store = store_in(&root);
        let (mut engine, _) = engine_with(&store, None);
        engine.apply_theme("light", true);

        engine.update_current_color("main", "oops");

        assert_eq!(
            engine.stylesheet(),
            "a { color: #ff00ff; } a:hover { color: #ff00ff; }"
        );
    }

    #[test]
    fn invalid_base_color_renders_sentinel_in_builtin_template() {
        let root = TempDir::new().expect("temp dir should be created");
        let store = store_in(&root);
        let mut engine = ThemeEngine::new(
            &store,
            Box::new(NoSystemColors),
            StylesheetTemplate::builtin(),
            Box::new(RecordingSink::default()),
        );
        engine.apply_theme("light", true);

        engine.update_current_color("main", "oops");

        let css = engine.stylesheet();
        assert!(!css.contains("oops"));
        assert!(!css.contains("${"));
        assert!(css.contains(".swatch-main { background: #ff00ff; }"));
        assert!(css.contains(".swatch-main:hover { background: #ff00ff; }"));
    }

    #[test]
    fn unknown_theme_on_fresh_engine_leaves_it_unapplied() {
        let root = TempDir::new().expect("temp dir should be created");
        let store = store_in(&root);
        let (mut engine, sink) = engine_with(&store, None);

        engine.apply_theme("doesnotexist", false);

        assert_eq!(engine.current_theme_name(), None);
        assert_eq!(engine.state(), ThemeState::Unapplied);
        assert!(engine.stylesheet().is_empty());
        assert!(sink.applied.borrow().is_empty());
    }

    #[test]
    fn builtin_template_renders_without_unresolved_tokens() {
        let root = TempDir::new().expect("temp dir should be created");
        let store = store_in(&root);
        let sink = RecordingSink::default();
        let mut engine = ThemeEngine::new(
            &store,
            Box::new(NoSystemColors),
            StylesheetTemplate::builtin(),
            Box::new(sink),
        );

        engine.apply_theme("dark", true);

        assert!(!engine.stylesheet().is_empty());
        assert!(!engine.stylesheet().contains("${"));
    }
}

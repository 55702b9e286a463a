use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::color::ERROR_SENTINEL;

pub const REQUIRED_KEYS: [&str; 5] = ["main", "secondary", "handle", "background", "error"];

pub const LIGHT_THEME: &str = "light";

/// Base colors a theme is built from. Always carries the five
/// [`REQUIRED_KEYS`] once normalized; extra keys ride along untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BasePalette(BTreeMap<String, String>);

impl BasePalette {
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self(
            pairs
                .into_iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        )
    }

    /// Reads the string entries of a settings object. Non-string values are
    /// skipped and left for normalization to fill.
    pub fn from_settings(map: &Map<String, Value>) -> Self {
        let mut entries = BTreeMap::new();
        for (key, value) in map {
            match value.as_str() {
                Some(color) => {
                    entries.insert(key.clone(), color.to_string());
                }
                None => {
                    tracing::warn!(key = key.as_str(), ?value, "ignoring non-string palette entry");
                }
            }
        }
        Self(entries)
    }

    pub fn to_settings(&self) -> Map<String, Value> {
        self.0
            .iter()
            .map(|(key, value)| (key.clone(), Value::String(value.clone())))
            .collect()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fills gaps from `fallback`; required keys absent from both get
    /// [`ERROR_SENTINEL`].
    pub fn normalized(&self, fallback: &BasePalette) -> BasePalette {
        let mut entries = fallback.0.clone();
        entries.extend(self.0.iter().map(|(key, value)| (key.clone(), value.clone())));

        for key in REQUIRED_KEYS {
            entries.entry(key.to_string()).or_insert_with(|| {
                tracing::warn!(key, "palette key missing everywhere; using error color");
                ERROR_SENTINEL.to_string()
            });
        }
        Self(entries)
    }
}

pub fn light_palette() -> BasePalette {
    BasePalette::from_pairs([
        ("main", "#4caf50"),
        ("secondary", "#cccccc"),
        ("handle", "#ffffff"),
        ("background", "#f5f5f5"),
        ("error", "#a51d2d"),
    ])
}

pub fn builtin_palettes() -> Vec<(&'static str, BasePalette)> {
    vec![
        (LIGHT_THEME, light_palette()),
        (
            "dark",
            BasePalette::from_pairs([
                ("main", "#81c784"),
                ("secondary", "#444444"),
                ("handle", "#eeeeee"),
                ("background", "#303030"),
                ("error", "#a51d2d"),
            ]),
        ),
        (
            "green",
            BasePalette::from_pairs([
                ("main", "#00c853"),
                ("secondary", "#9e9e9e"),
                ("handle", "#ffffff"),
                ("background", "#e8f5e9"),
                ("error", "#a51d2d"),
            ]),
        ),
        (
            "orange",
            BasePalette::from_pairs([
                ("main", "#ff9800"),
                ("secondary", "#9e9e9e"),
                ("handle", "#ffffff"),
                ("background", "#fff3e0"),
                ("error", "#a51d2d"),
            ]),
        ),
    ]
}

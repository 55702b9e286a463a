use std::collections::BTreeMap;

use super::color::{apply_intensity, lighten, ERROR_SENTINEL};
use super::palette::BasePalette;

/// `(role, base key, intensity)`
pub const ROLE_MAPPING: &[(&str, &str, f64)] = &[
    ("accent_primary", "main", 1.0),
    ("accent_secondary", "secondary", 1.0),
    ("control_handle", "handle", 1.0),
    ("border_default", "handle", 0.9),
    ("container_bg", "background", 1.0),
    ("container_bg_soft", "background", 0.95),
    ("container_bg_hard", "background", 1.05),
    ("widget_bg", "background", 0.9),
    ("surface_widget", "background", 1.0),
    ("text_primary", "main", 1.0),
    ("text_secondary", "secondary", 0.85),
    ("error_fg", "error", 1.0),
    ("error_bg", "error", 1.15),
];

/// `(name, source role, intensity)`, resolved against already-derived roles.
pub const WIDGET_OVERRIDES: &[(&str, &str, f64)] = &[
    ("sidebar_bg", "container_bg", 0.95),
    ("input_bg", "widget_bg", 1.05),
    ("button_pressed_bg", "accent_primary", 0.85),
    ("toggle_track_off", "accent_secondary", 0.9),
];

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SemanticRoleSet(BTreeMap<String, String>);

impl SemanticRoleSet {
    pub fn derive(palette: &BasePalette) -> Self {
        Self::derive_with(palette, ROLE_MAPPING, WIDGET_OVERRIDES)
    }

    pub fn derive_with(
        palette: &BasePalette,
        mapping: &[(&str, &str, f64)],
        overrides: &[(&str, &str, f64)],
    ) -> Self {
        let mut roles = BTreeMap::new();
        for &(role, base_key, intensity) in mapping {
            let color = palette
                .get(base_key)
                .and_then(|base| apply_intensity(base, intensity))
                .unwrap_or_else(|| {
                    tracing::warn!(
                        role,
                        base_key,
                        value = ?palette.get(base_key),
                        "invalid base color; using error color"
                    );
                    ERROR_SENTINEL.to_string()
                });
            roles.insert(role.to_string(), color);
        }

        let hovers: Vec<(String, String)> = roles
            .iter()
            .map(|(role, color)| {
                let hover = lighten(color).unwrap_or_else(|| ERROR_SENTINEL.to_string());
                (format!("{role}_hover"), hover)
            })
            .collect();
        roles.extend(hovers);

        for &(name, source, intensity) in overrides {
            match roles
                .get(source)
                .and_then(|color| apply_intensity(color, intensity))
            {
                Some(color) => {
                    roles.insert(name.to_string(), color);
                }
                None => {
                    tracing::warn!(name, source, "widget override source role missing; skipped");
                }
            }
        }

        Self(roles)
    }

    pub fn get(&self, role: &str) -> Option<&str> {
        self.0.get(role).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(role, color)| (role.as_str(), color.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

use std::process::Command;

use super::palette::BasePalette;

const GSETTINGS_COMMAND: &str = "gsettings";
const INTERFACE_SCHEMA: &str = "org.gnome.desktop.interface";
const SYSTEM_ERROR_COLOR: &str = "#d32f2f";
const DEFAULT_ACCENT: &str = "blue";

/// Host-provided colors for the `system` theme entry.
pub trait SystemColorSource {
    fn palette(&self) -> Option<BasePalette>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoSystemColors;

impl SystemColorSource for NoSystemColors {
    fn palette(&self) -> Option<BasePalette> {
        None
    }
}

/// Reads the GNOME accent color and color scheme through `gsettings`.
#[derive(Debug, Clone)]
pub struct GsettingsColors {
    command: String,
}

impl Default for GsettingsColors {
    fn default() -> Self {
        Self::with_command(GSETTINGS_COMMAND)
    }
}

impl GsettingsColors {
    pub fn with_command(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    fn query(&self, key: &str) -> Option<String> {
        let outcome = Command::new(&self.command)
            .args(["get", INTERFACE_SCHEMA, key])
            .output()
            .ok()?;
        if !outcome.status.success() {
            tracing::debug!(key, status = ?outcome.status, "gsettings query failed");
            return None;
        }
        parse_gsettings_string(&String::from_utf8_lossy(&outcome.stdout))
    }
}

impl SystemColorSource for GsettingsColors {
    fn palette(&self) -> Option<BasePalette> {
        let accent = self.query("accent-color")?;
        let prefers_dark = self
            .query("color-scheme")
            .is_some_and(|scheme| scheme == "prefer-dark");
        let main = accent_hex(&accent).unwrap_or_else(|| {
            tracing::debug!(accent = accent.as_str(), "unknown accent color name");
            accent_hex(DEFAULT_ACCENT).unwrap_or(SYSTEM_ERROR_COLOR)
        });
        Some(palette_from_scheme(main, prefers_dark))
    }
}

/// `'prefer-dark'\n` -> `prefer-dark`
pub(crate) fn parse_gsettings_string(output: &str) -> Option<String> {
    let value = output.trim();
    let value = value
        .strip_prefix('\'')
        .and_then(|inner| inner.strip_suffix('\''))
        .unwrap_or(value);
    (!value.is_empty()).then(|| value.to_string())
}

/// GNOME accent names to their libadwaita colors.
pub(crate) fn accent_hex(name: &str) -> Option<&'static str> {
    let hex = match name {
        "blue" => "#3584e4",
        "teal" => "#2190a4",
        "green" => "#3a944a",
        "yellow" => "#c88800",
        "orange" => "#ed5b00",
        "red" => "#e62d42",
        "pink" => "#d56199",
        "purple" => "#9141ac",
        "slate" => "#6f8396",
        _ => return None,
    };
    Some(hex)
}

pub(crate) fn palette_from_scheme(main: &str, prefers_dark: bool) -> BasePalette {
    let (secondary, handle, background) = if prefers_dark {
        ("#3a3a3a", "#deddda", "#242424")
    } else {
        ("#deddda", "#ffffff", "#fafafa")
    };
    BasePalette::from_pairs([
        ("main", main),
        ("secondary", secondary),
        ("handle", handle),
        ("background", background),
        ("error", SYSTEM_ERROR_COLOR),
    ])
}

#[cfg(feature = "gtk")]
pub use gtk_colors::GtkSystemColors;

#[cfg(feature = "gtk")]
mod gtk_colors {
    use gtk4::prelude::*;

    use super::{BasePalette, SystemColorSource, SYSTEM_ERROR_COLOR};
    use crate::theme::color::Rgb;

    /// Reads the named colors of the running GTK theme. Needs GTK initialized
    /// on the calling thread.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct GtkSystemColors;

    impl SystemColorSource for GtkSystemColors {
        #[allow(deprecated)]
        fn palette(&self) -> Option<BasePalette> {
            if !gtk4::is_initialized_main_thread() {
                return None;
            }
            let label = gtk4::Label::new(None);
            let context = label.style_context();
            let lookup = |name: &str| {
                context
                    .lookup_color(name)
                    .map(|rgba| Rgb::from_unit(rgba.red(), rgba.green(), rgba.blue()).to_hex())
            };

            let main = lookup("theme_selected_bg_color")?;
            let secondary = lookup("borders")?;
            let handle = lookup("theme_base_color")?;
            let background = lookup("theme_bg_color")?;
            Some(BasePalette::from_pairs([
                ("main", main.as_str()),
                ("secondary", secondary.as_str()),
                ("handle", handle.as_str()),
                ("background", background.as_str()),
                ("error", SYSTEM_ERROR_COLOR),
            ]))
        }
    }
}

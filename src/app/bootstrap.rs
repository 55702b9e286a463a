use std::path::Path;

use crate::config::stylesheet_override_for;
use crate::theme::{StyleSink, StylesheetTemplate, SystemColorSource};

/// User override next to the settings file, else the built-in template.
pub(super) fn load_stylesheet_template(settings_file: &Path) -> StylesheetTemplate {
    let override_path = stylesheet_override_for(settings_file);
    if override_path.exists() {
        tracing::info!(path = %override_path.display(), "using stylesheet override");
        StylesheetTemplate::from_file_or_empty(&override_path)
    } else {
        StylesheetTemplate::builtin()
    }
}

#[cfg(not(feature = "gtk"))]
pub(super) fn system_color_source() -> Box<dyn SystemColorSource> {
    Box::new(crate::theme::GsettingsColors::default())
}

#[cfg(feature = "gtk")]
pub(super) fn system_color_source() -> Box<dyn SystemColorSource> {
    Box::new(crate::theme::GtkSystemColors)
}

#[cfg(not(feature = "gtk"))]
pub(super) fn style_sink() -> Box<dyn StyleSink> {
    Box::new(crate::theme::TracingStyleSink)
}

#[cfg(feature = "gtk")]
pub(super) fn style_sink() -> Box<dyn StyleSink> {
    match super::runtime_css::GtkStyleSink::install() {
        Some(sink) => Box::new(sink),
        None => {
            tracing::warn!("no default display; stylesheet will only be logged");
            Box::new(crate::theme::TracingStyleSink)
        }
    }
}

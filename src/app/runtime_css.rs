use gtk4::CssProvider;

use crate::theme::StyleSink;

/// Application-wide stylesheet on the default display. The provider is added
/// once; each apply replaces its contents.
pub struct GtkStyleSink {
    provider: CssProvider,
}

impl GtkStyleSink {
    /// `None` when there is no default display.
    pub fn install() -> Option<Self> {
        let display = gtk4::gdk::Display::default()?;
        let provider = CssProvider::new();
        gtk4::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
        Some(Self { provider })
    }
}

impl StyleSink for GtkStyleSink {
    fn apply_stylesheet(&self, css: &str) {
        self.provider.load_from_data(css);
        tracing::debug!(bytes = css.len(), "stylesheet loaded into GTK");
    }
}

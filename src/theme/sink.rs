/// Receiver of rendered stylesheets. The GTK build installs one provider on
/// the default display; headless runs only log.
pub trait StyleSink {
    fn apply_stylesheet(&self, css: &str);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingStyleSink;

impl StyleSink for TracingStyleSink {
    fn apply_stylesheet(&self, css: &str) {
        tracing::debug!(bytes = css.len(), "stylesheet applied");
    }
}

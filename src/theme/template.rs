use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::{Captures, Regex};
use thiserror::Error;

const BUILTIN_STYLESHEET: &str = include_str!("stylesheet.css");

pub type TemplateResult<T> = std::result::Result<T, TemplateError>;

/// Values substituted for `${name}` tokens.
pub type RenderContext = BTreeMap<String, String>;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to read stylesheet template: {path}")]
    Read { path: PathBuf, source: io::Error },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Rendered {
    pub text: String,
    /// Placeholder names with no value in the context, in order of first use.
    pub unresolved: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StylesheetTemplate {
    source: String,
}

impl StylesheetTemplate {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn builtin() -> Self {
        Self::new(BUILTIN_STYLESHEET)
    }

    pub fn from_file(path: &Path) -> TemplateResult<Self> {
        let source = fs::read_to_string(path).map_err(|source| TemplateError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(source))
    }

    /// Unreadable templates render as an empty stylesheet.
    pub fn from_file_or_empty(path: &Path) -> Self {
        match Self::from_file(path) {
            Ok(template) => template,
            Err(err) => {
                tracing::error!(path = %path.display(), ?err, "stylesheet template unavailable");
                Self::new(String::new())
            }
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn placeholders(&self) -> Vec<String> {
        substitute(&self.source, &RenderContext::new()).unresolved
    }

    pub fn render(&self, context: &RenderContext) -> Rendered {
        let rendered = substitute(&self.source, context);
        if !rendered.unresolved.is_empty() {
            tracing::warn!(
                unresolved = ?rendered.unresolved,
                "stylesheet placeholders left unresolved"
            );
        }
        rendered
    }
}

/// `$$` or `${name}`. The escape is matched first so `$${x}` stays literal.
fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\$|\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder pattern is valid")
    })
}

fn substitute(source: &str, context: &RenderContext) -> Rendered {
    let mut unresolved: Vec<String> = Vec::new();
    let text = placeholder_pattern()
        .replace_all(source, |caps: &Captures| {
            let Some(name) = caps.get(1).map(|m| m.as_str()) else {
                return "$".to_string();
            };
            match context.get(name) {
                Some(value) => value.clone(),
                None => {
                    if !unresolved.iter().any(|seen| seen == name) {
                        unresolved.push(name.to_string());
                    }
                    caps[0].to_string()
                }
            }
        })
        .into_owned();

    Rendered { text, unresolved }
}

use thiserror::Error;

pub type SalutationResult<T> = std::result::Result<T, SalutationError>;

#[derive(Debug, Error)]
pub enum SalutationError {
    #[error("salutation source unavailable: {message}")]
    Unavailable { message: String },
    #[error("salutation query failed for language {language}: {message}")]
    Query { language: String, message: String },
}

/// External source of salutations, e.g. the client database.
pub trait SalutationRepository {
    fn salutations(&self, language: &str) -> SalutationResult<Vec<String>>;
}

const GERMAN: [&str; 3] = ["Herr", "Frau", "Divers"];
const ENGLISH: [&str; 3] = ["Mr.", "Ms.", "Mx."];

/// Built-in salutations. Unknown languages get the German list, matching
/// the default application language.
pub fn default_salutations(language: &str) -> &'static [&'static str] {
    match language {
        "en" => &ENGLISH,
        _ => &GERMAN,
    }
}

/// Prefers repository values and falls back to the built-in lists when the
/// repository is missing, failing or empty.
pub struct SalutationService {
    repository: Option<Box<dyn SalutationRepository>>,
}

impl Default for SalutationService {
    fn default() -> Self {
        Self::without_repository()
    }
}

impl SalutationService {
    pub fn new(repository: Box<dyn SalutationRepository>) -> Self {
        Self {
            repository: Some(repository),
        }
    }

    pub fn without_repository() -> Self {
        Self { repository: None }
    }

    pub fn salutations(&self, language: &str) -> Vec<String> {
        if let Some(repository) = &self.repository {
            match repository.salutations(language) {
                Ok(values) if !values.is_empty() => return values,
                Ok(_) => {
                    tracing::debug!(language, "repository returned no salutations");
                }
                Err(err) => {
                    tracing::warn!(language, ?err, "salutation lookup failed; using defaults");
                }
            }
        }

        default_salutations(language)
            .iter()
            .map(|salutation| salutation.to_string())
            .collect()
    }
}

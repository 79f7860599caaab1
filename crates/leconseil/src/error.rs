// Error Handling
//
// *La Gestion des Erreurs* (The Error Management) - Construction errors for the engine

use thiserror::Error;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Engine construction errors
///
/// Query evaluation never fails; degenerate queries yield empty or reduced
/// results instead.
#[derive(Debug, Error)]
pub enum Error {
    /// The catalog could not be loaded or validated
    #[error("Catalog error: {0}")]
    Catalog(#[from] lecatalogue::Error),

    /// The corpus index could not be built
    #[error("Index error: {0}")]
    Index(#[from] lerecherche::Error),

    /// Invalid engine configuration
    #[error("Configuration error: {message}")]
    Config {
        /// What is wrong
        message: String,
        /// How to fix it
        suggestion: Option<String>,
    },
}

impl Error {
    /// Create a config error
    pub fn config_error(message: impl Into<String>, suggestion: Option<String>) -> Self {
        Error::Config {
            message: message.into(),
            suggestion,
        }
    }

    /// Suggested remedy, when one is known
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Error::Catalog(lecatalogue::Error::EmptyCatalog) => {
                Some("Provide a catalog with at least one assessment")
            }
            Error::Index(lerecherche::Error::EmptyVocabulary) => {
                Some("Catalog names and descriptions must contain searchable words")
            }
            Error::Config { suggestion, .. } => suggestion.as_deref(),
            _ => None,
        }
    }
}

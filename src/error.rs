use thiserror::Error;

/// Message surfaced whenever a locale-dependent access happens with no active locale.
pub const TRANSLATIONS_DISABLED_MESSAGE: &str = "Enable translations to use TranslationJsonField.";

/// Errors raised by translation resolution and field wiring.
#[derive(Error, Debug)]
pub enum TranslationError {
    /// A read or write needed the active locale but none could be determined
    #[error("{}", TRANSLATIONS_DISABLED_MESSAGE)]
    Configuration,

    /// The same model was handed to the translator twice
    #[error("The model {model} is already registered")]
    AlreadyRegistered { model: String },

    /// Attribute access named a field the model does not translate
    #[error("Model {model} has no translated field '{field}'")]
    UnknownField { model: String, field: String },

    /// A stored column value was neither a JSON object nor null
    #[error("Stored translations must be a JSON object or null, got {0}")]
    InvalidRawValue(String),

    /// A stored column value could not be parsed as JSON
    #[error("Failed to parse stored translations: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TranslationError>;

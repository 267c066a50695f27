//! Error types for message catalog operations

use nowcast_common::NowcastError;
use thiserror::Error;

/// Errors that can occur while building or querying a catalog
#[derive(Error, Debug)]
pub enum I18nError {
    /// Failed to parse a language identifier
    #[error("Invalid language identifier: {0}")]
    InvalidLanguageId(String),

    /// No catalog is bundled for the language
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Failed to parse a Fluent resource
    #[error("Failed to parse Fluent resource for {locale}: {errors:?}")]
    FluentParseError { locale: String, errors: Vec<String> },

    /// Message not found in the catalog
    #[error("Message not found: {key}")]
    MessageNotFound { key: String },

    /// Failed to format a message
    #[error("Failed to format message '{key}': {errors:?}")]
    MessageFormatError { key: String, errors: Vec<String> },
}

/// Result type for i18n operations
pub type I18nResult<T> = Result<T, I18nError>;

impl From<I18nError> for NowcastError {
    fn from(err: I18nError) -> Self {
        let locale = match &err {
            I18nError::InvalidLanguageId(locale)
            | I18nError::UnsupportedLanguage(locale)
            | I18nError::FluentParseError { locale, .. } => locale.clone(),
            _ => String::new(),
        };
        NowcastError::localization_with_locale(err.to_string(), locale)
    }
}

//! FluentBundle construction and message formatting

use crate::error::{I18nError, I18nResult};
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource};
use tracing::{debug, warn};
use unic_langid::LanguageIdentifier;

/// Language used when none is configured.
pub const DEFAULT_LANGUAGE: &str = "ja-JP";

const RESOURCES: &[(&str, &str)] = &[
    ("ja-JP", include_str!("../locales/ja-JP.ftl")),
    ("en-US", include_str!("../locales/en-US.ftl")),
];

/// Languages with a bundled catalog.
pub fn supported_languages() -> impl Iterator<Item = &'static str> {
    RESOURCES.iter().map(|(code, _)| *code)
}

/// A single-locale message catalog.
pub struct Catalog {
    language: String,
    bundle: FluentBundle<FluentResource>,
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("language", &self.language)
            .field("bundle", &"FluentBundle<FluentResource>")
            .finish()
    }
}

impl Catalog {
    /// Build the catalog for a bundled language such as `ja-JP`.
    pub fn new(language: &str) -> I18nResult<Self> {
        let lang_id: LanguageIdentifier = language
            .parse()
            .map_err(|_| I18nError::InvalidLanguageId(language.to_string()))?;

        let source = RESOURCES
            .iter()
            .find(|(code, _)| code.eq_ignore_ascii_case(language))
            .map(|(_, source)| *source)
            .ok_or_else(|| I18nError::UnsupportedLanguage(language.to_string()))?;

        let resource = FluentResource::try_new(source.to_string()).map_err(|(_, errors)| {
            I18nError::FluentParseError {
                locale: language.to_string(),
                errors: errors.into_iter().map(|e| format!("{:?}", e)).collect(),
            }
        })?;

        let mut bundle = FluentBundle::new_concurrent(vec![lang_id]);
        // Plain output: no Unicode isolation marks around placeables
        bundle.set_use_isolating(false);
        bundle
            .add_resource(resource)
            .map_err(|errors| I18nError::FluentParseError {
                locale: language.to_string(),
                errors: errors.into_iter().map(|e| format!("{:?}", e)).collect(),
            })?;

        debug!("Loaded message catalog for {}", language);
        Ok(Self {
            language: language.to_string(),
            bundle,
        })
    }

    /// The language this catalog was built for.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Whether the catalog defines a message.
    pub fn has_message(&self, id: &str) -> bool {
        self.bundle.has_message(id)
    }

    /// Format a message with optional arguments.
    pub fn format(&self, id: &str, args: Option<&FluentArgs>) -> I18nResult<String> {
        let message = self
            .bundle
            .get_message(id)
            .ok_or_else(|| I18nError::MessageNotFound { key: id.to_string() })?;
        let pattern = message
            .value()
            .ok_or_else(|| I18nError::MessageNotFound { key: id.to_string() })?;

        let mut errors = Vec::new();
        let formatted = self.bundle.format_pattern(pattern, args, &mut errors);

        if !errors.is_empty() {
            let errors: Vec<String> = errors.into_iter().map(|e| format!("{:?}", e)).collect();
            warn!("Formatting errors for message '{}': {:?}", id, errors);
            return Err(I18nError::MessageFormatError {
                key: id.to_string(),
                errors,
            });
        }

        Ok(formatted.into_owned())
    }
}

/// Helper to build FluentArgs from string pairs
pub fn string_args<'a>(pairs: &[(&'a str, String)]) -> FluentArgs<'a> {
    let mut args = FluentArgs::new();
    for (key, value) in pairs {
        args.set(*key, value.clone());
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_languages_parse() {
        for language in supported_languages() {
            let catalog = Catalog::new(language).unwrap();
            assert_eq!(catalog.language(), language);
            assert!(catalog.has_message("summary-no-rain"));
        }
    }

    #[test]
    fn test_unknown_language() {
        assert!(matches!(
            Catalog::new("fr-FR"),
            Err(I18nError::UnsupportedLanguage(_))
        ));
        assert!(matches!(
            Catalog::new("not a language"),
            Err(I18nError::InvalidLanguageId(_))
        ));
    }

    #[test]
    fn test_format_without_isolation_marks() {
        let catalog = Catalog::new("en-US").unwrap();
        let args = string_args(&[("place", "Umeda".to_string())]);
        let text = catalog.format("chart-place-rain-series", Some(&args)).unwrap();
        assert_eq!(text, "Umeda precipitation probability");
    }

    #[test]
    fn test_missing_argument_is_an_error() {
        let catalog = Catalog::new("ja-JP").unwrap();
        let err = catalog.format("summary-rain", None).unwrap_err();
        assert!(matches!(err, I18nError::MessageFormatError { .. }));
    }

    #[test]
    fn test_missing_message() {
        let catalog = Catalog::new("ja-JP").unwrap();
        assert!(matches!(
            catalog.format("no-such-message", None),
            Err(I18nError::MessageNotFound { .. })
        ));
    }
}

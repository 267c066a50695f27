//! Integration tests for nowcast-i18n crate.
//!
//! These tests verify that every bundled catalog is complete and formats the
//! summary templates as expected.

use nowcast_common::NowcastError;
use nowcast_i18n::{supported_languages, MessageKey, Messages, DEFAULT_LANGUAGE};
use proptest::prelude::*;

#[test]
fn test_every_language_defines_every_message() {
    for language in supported_languages() {
        let messages = Messages::new(language).unwrap();
        for key in MessageKey::ALL {
            let result = match key {
                MessageKey::SummaryRain => messages.get_with_args(
                    key,
                    &[("probability", "1.0".to_string()), ("coverage", "2.0".to_string())],
                ),
                MessageKey::PlaceRainSeries => {
                    messages.get_with_args(key, &[("place", "x".to_string())])
                }
                MessageKey::IconsCaption => messages.get_with_args(key, &[("hour", "9".to_string())]),
                _ => messages.get(key),
            };
            assert!(result.is_ok(), "{} is broken in {}: {:?}", key.id(), language, result);
        }
    }
}

#[test]
fn test_japanese_summary_templates() {
    let messages = Messages::new(DEFAULT_LANGUAGE).unwrap();
    assert_eq!(messages.language(), "ja-JP");

    let no_rain = messages.get(MessageKey::SummaryNoRain).unwrap();
    assert!(no_rain.starts_with("ナウキャストに雨雲はありません。"));

    let rain = messages
        .get_with_args(
            MessageKey::SummaryRain,
            &[("probability", "98.08".to_string()), ("coverage", "93.59".to_string())],
        )
        .unwrap();
    assert!(rain.starts_with("ナウキャストから推測される今後1時間の降水確率は98.08%"));
    assert!(rain.contains("93.59%"));
}

#[test]
fn test_unsupported_language_maps_to_localization_error() {
    let err: NowcastError = Messages::new("de-DE").unwrap_err().into();
    assert!(matches!(
        err,
        NowcastError::Localization { locale: Some(ref l), .. } if l == "de-DE"
    ));
}

proptest! {
    #[test]
    fn prop_place_names_are_inserted_verbatim(place in "[a-zA-Z0-9 ]{1,20}") {
        let messages = Messages::new("en-US").unwrap();
        let text = messages
            .get_with_args(MessageKey::PlaceRainSeries, &[("place", place.clone())])
            .unwrap();
        prop_assert!(text.starts_with(&place));
    }
}

//! Integration tests for nowcast-common crate.

use nowcast_common::{format_float, NowcastError, Run};
use proptest::prelude::*;
use serde_json::Value;

const SAMPLE_EVENT: &str = include_str!("../fixtures/sample_event.json");

#[test]
fn test_sample_event_decodes() {
    let run = Run::from_json_str(SAMPLE_EVENT).unwrap();

    assert_eq!(run.hour, "14");
    assert_eq!(run.len(), 12);
    assert!(run.reply_to.is_none());
    assert_eq!(run.data[0].density, 93.59);
    assert_eq!(run.data[0].bucket_count(1), 3619);
    assert!(run.data[0].place["kanku"].is_unknown());
    assert!(!run.data[0].place["tobita"].is_unknown());
}

#[test]
fn test_legacy_string_event_decodes() {
    let wrapped = Value::String(SAMPLE_EVENT.to_string());
    let run = Run::from_event(wrapped).unwrap();
    assert_eq!(run, Run::from_json_str(SAMPLE_EVENT).unwrap());
}

#[test]
fn test_decode_error_is_named() {
    let err = Run::from_json_str(r#"{"hour": "14", "data": [{"histgram": {}}]}"#).unwrap_err();
    match err {
        NowcastError::Decode { message, field } => {
            assert!(message.contains("sample 0"));
            assert_eq!(field.as_deref(), Some("data"));
        }
        other => panic!("expected decode error, got {other:?}"),
    }
}

proptest! {
    #[test]
    fn prop_format_float_round_trips(value in -1.0e6f64..1.0e6f64) {
        let text = format_float(value);
        prop_assert_eq!(text.parse::<f64>().unwrap(), value);
        prop_assert!(text.contains('.') || text.contains('e'));
    }
}

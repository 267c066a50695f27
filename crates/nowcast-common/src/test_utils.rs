//! Test utilities and shared fixtures for Nowcast Notice.
//!
//! Available to other crates' tests through the `testing` feature.

use crate::types::{Run, HISTOGRAM_BUCKETS};
use serde_json::{json, Map, Value};

/// A captured twelve-step event from a rainy afternoon.
pub const SAMPLE_EVENT: &str = include_str!("../fixtures/sample_event.json");

/// Location keys present in [`SAMPLE_EVENT`].
pub const SAMPLE_PLACES: [&str; 6] = ["tobita", "umeda", "kadoma", "sakai", "yao", "kanku"];

/// The decoded [`SAMPLE_EVENT`].
pub fn sample_run() -> Run {
    Run::from_json_str(SAMPLE_EVENT).expect("sample fixture must decode")
}

/// The raw JSON of [`SAMPLE_EVENT`], for tests that mutate the event.
pub fn sample_event_value() -> Value {
    serde_json::from_str(SAMPLE_EVENT).expect("sample fixture must be JSON")
}

/// Build an event from per-step densities and per-step basements shared by
/// every location in [`SAMPLE_PLACES`].
pub fn event_with(hour: &str, densities: &[f64], basements: &[f64]) -> Value {
    let data: Vec<Value> = densities
        .iter()
        .zip(basements.iter().chain(std::iter::repeat(&0.0)))
        .enumerate()
        .map(|(step, (density, basement))| {
            let histogram: Map<String, Value> = (0..HISTOGRAM_BUCKETS)
                .map(|bucket| (bucket.to_string(), json!((step + bucket) as u64)))
                .collect();
            let place: Map<String, Value> = SAMPLE_PLACES
                .iter()
                .map(|key| {
                    (
                        (*key).to_string(),
                        json!({"basement": format!("{:.2}", basement), "index": "1"}),
                    )
                })
                .collect();
            json!({
                "density": format!("{:.2}", density),
                "histgram": histogram,
                "place": place,
            })
        })
        .collect();

    json!({"hour": hour, "replyTo": "", "data": data})
}

/// A twelve-step run with no rain anywhere.
pub fn dry_run() -> Run {
    Run::from_event(event_with("6", &[0.0; 12], &[0.0; 12])).expect("dry fixture must decode")
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "tempfile")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_decode() {
        let run = sample_run();
        assert_eq!(run.len(), 12);
        assert_eq!(run.hour, "14");

        let dry = dry_run();
        assert_eq!(dry.len(), 12);
        assert!(dry.data.iter().all(|s| s.density == 0.0));
    }

    #[test]
    fn test_event_with_pads_basements() {
        let run = Run::from_event(event_with("10", &[1.0, 2.0, 3.0], &[50.0])).unwrap();
        assert_eq!(run.len(), 3);
        assert_eq!(run.data[0].place["tobita"].basement_value(), Some(50.0));
        assert_eq!(run.data[2].place["tobita"].basement_value(), Some(0.0));
    }
}

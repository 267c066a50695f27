//! Series extraction and derived values over a decoded run.

use crate::color;
use nowcast_common::types::{Run, HISTOGRAM_BUCKETS};
use tracing::warn;

/// Probability reported for a step whose reading cannot be used.
pub const UNKNOWN_PROBABILITY: f64 = -1.0;

/// Precipitation probabilities of one location across the run.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceSeries {
    /// Location key.
    pub key: String,
    /// One value per step, or the single zero fallback.
    pub values: Vec<f64>,
    /// Whether extraction failed and `values` is the fallback.
    pub degraded: bool,
}

impl PlaceSeries {
    /// Largest value of the series; never empty.
    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

/// Extract the `basement` series of a location.
///
/// A missing location, a missing basement or a non-numeric basement in any
/// sample replaces the whole series with `[0.0]`.
pub fn place_series(run: &Run, key: &str) -> PlaceSeries {
    let values: Option<Vec<f64>> = run
        .data
        .iter()
        .map(|sample| sample.place.get(key).and_then(|r| r.basement_value()))
        .collect();

    match values {
        Some(values) if !values.is_empty() => PlaceSeries {
            key: key.to_string(),
            values,
            degraded: false,
        },
        _ => {
            warn!(place = key, "Unusable probability series, falling back to zero");
            PlaceSeries {
                key: key.to_string(),
                values: vec![0.0],
                degraded: true,
            }
        }
    }
}

/// Rain-cloud coverage per step.
pub fn density_series(run: &Run) -> Vec<f64> {
    run.data.iter().map(|s| s.density).collect()
}

/// Sum of coverage over all steps.
pub fn density_sum(run: &Run) -> f64 {
    run.data.iter().map(|s| s.density).sum()
}

/// Largest coverage of any step, `0.0` for an empty run.
pub fn density_max(run: &Run) -> f64 {
    run.data.iter().map(|s| s.density).fold(0.0, f64::max)
}

/// Probability of a location at one step, or [`UNKNOWN_PROBABILITY`].
pub fn step_probability(run: &Run, key: &str, step: usize) -> f64 {
    let Some(reading) = run.data.get(step).and_then(|s| s.place.get(key)) else {
        return UNKNOWN_PROBABILITY;
    };
    if reading.is_unknown() {
        return UNKNOWN_PROBABILITY;
    }
    reading.basement_value().unwrap_or(UNKNOWN_PROBABILITY)
}

/// Per-step probability levels of a location.
pub fn place_levels(run: &Run, key: &str) -> Vec<PopLevel> {
    (0..run.len())
        .map(|step| PopLevel::classify(step_probability(run, key, step)))
        .collect()
}

/// One bucket of the stacked histogram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketLayer {
    /// Bucket index, `0..8`.
    pub bucket: usize,
    /// Count per step.
    pub counts: Vec<u64>,
    /// Sum of the lower buckets per step.
    pub bottoms: Vec<u64>,
}

impl BucketLayer {
    /// Upper edge of each bar.
    pub fn tops(&self) -> Vec<u64> {
        self.counts
            .iter()
            .zip(&self.bottoms)
            .map(|(count, bottom)| count.saturating_add(*bottom))
            .collect()
    }
}

/// Histogram buckets stacked in ascending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistogramStack {
    /// Layers from bucket 0 upwards.
    pub layers: Vec<BucketLayer>,
    /// Height of the full stack per step.
    pub totals: Vec<u64>,
}

impl HistogramStack {
    /// Stack the histograms of every step.
    pub fn from_run(run: &Run) -> Self {
        let mut running = vec![0u64; run.len()];
        let layers = (0..HISTOGRAM_BUCKETS)
            .map(|bucket| {
                let counts: Vec<u64> = run.data.iter().map(|s| s.bucket_count(bucket)).collect();
                let bottoms = running.clone();
                for (offset, count) in running.iter_mut().zip(&counts) {
                    *offset = offset.saturating_add(*count);
                }
                BucketLayer {
                    bucket,
                    counts,
                    bottoms,
                }
            })
            .collect();

        Self {
            layers,
            totals: running,
        }
    }

    /// Tallest stack of the run.
    pub fn max_total(&self) -> u64 {
        self.totals.iter().copied().max().unwrap_or(0)
    }
}

/// Rain likelihood class of a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopLevel {
    /// 50% and above.
    Rain,
    /// From 10% up to 50%.
    Caution,
    /// Below 10%.
    NoRain,
    /// Negative or not a number.
    Unknown,
}

impl PopLevel {
    /// Classify a probability percentage.
    pub fn classify(probability: f64) -> Self {
        if probability.is_nan() || probability < 0.0 {
            Self::Unknown
        } else if probability >= 50.0 {
            Self::Rain
        } else if probability >= 10.0 {
            Self::Caution
        } else {
            Self::NoRain
        }
    }

    /// Wedge color; unknown steps look dry.
    pub fn color(self) -> u32 {
        match self {
            Self::Rain => color::RAIN,
            Self::Caution => color::CAUTION,
            Self::NoRain | Self::Unknown => color::CLEAR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nowcast_common::test_utils::{event_with, sample_event_value, sample_run};
    use nowcast_common::types::Sample;
    use proptest::prelude::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn test_place_series_from_fixture() {
        let run = sample_run();
        let series = place_series(&run, "tobita");
        assert!(!series.degraded);
        assert_eq!(series.values.len(), 12);
        assert_eq!(series.max(), 98.08);
    }

    #[test]
    fn test_place_series_falls_back_to_zero() {
        let run = sample_run();
        let missing = place_series(&run, "nowhere");
        assert!(missing.degraded);
        assert_eq!(missing.values, vec![0.0]);
        assert_eq!(missing.max(), 0.0);

        let mut event = sample_event_value();
        event["data"][4]["place"]["umeda"]["basement"] = json!("n/a");
        let run = Run::from_event(event).unwrap();
        assert_eq!(place_series(&run, "umeda").values, vec![0.0]);
        assert!(!place_series(&run, "tobita").degraded);
    }

    #[test]
    fn test_density_helpers() {
        let run = Run::from_event(event_with("3", &[0.5, 2.0, 1.5], &[])).unwrap();
        assert_eq!(density_series(&run), vec![0.5, 2.0, 1.5]);
        assert_eq!(density_sum(&run), 4.0);
        assert_eq!(density_max(&run), 2.0);

        let fixture = sample_run();
        assert_eq!(density_max(&fixture), 93.59);
        assert_eq!(density_series(&fixture)[0], 93.59);
    }

    #[test]
    fn test_step_probability_sentinel() {
        let run = sample_run();
        assert_eq!(step_probability(&run, "kanku", 0), UNKNOWN_PROBABILITY);
        assert_eq!(step_probability(&run, "nowhere", 0), UNKNOWN_PROBABILITY);
        assert_eq!(step_probability(&run, "tobita", 99), UNKNOWN_PROBABILITY);
        assert!(step_probability(&run, "tobita", 0) >= 0.0);
        assert!(place_levels(&run, "kanku")
            .iter()
            .all(|level| *level == PopLevel::Unknown));
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(PopLevel::classify(-1.0), PopLevel::Unknown);
        assert_eq!(PopLevel::classify(f64::NAN), PopLevel::Unknown);
        assert_eq!(PopLevel::classify(0.0), PopLevel::NoRain);
        assert_eq!(PopLevel::classify(9.99), PopLevel::NoRain);
        assert_eq!(PopLevel::classify(10.0), PopLevel::Caution);
        assert_eq!(PopLevel::classify(49.99), PopLevel::Caution);
        assert_eq!(PopLevel::classify(50.0), PopLevel::Rain);
        assert_eq!(PopLevel::classify(100.0), PopLevel::Rain);
        assert_eq!(PopLevel::Unknown.color(), PopLevel::NoRain.color());
    }

    #[test]
    fn test_stack_of_fixture() {
        let run = sample_run();
        let stack = HistogramStack::from_run(&run);
        assert_eq!(stack.layers.len(), HISTOGRAM_BUCKETS);
        assert!(stack.layers[0].bottoms.iter().all(|b| *b == 0));
        for (step, sample) in run.data.iter().enumerate() {
            assert_eq!(stack.totals[step], sample.histogram_total());
            assert_eq!(stack.layers[7].tops()[step], sample.histogram_total());
        }
    }

    fn sample_from(counts: &[u64]) -> Sample {
        Sample {
            density: 0.0,
            histogram: counts
                .iter()
                .enumerate()
                .map(|(bucket, count)| (bucket.to_string(), *count))
                .collect(),
            place: BTreeMap::new(),
        }
    }

    #[test]
    fn test_huge_counts_saturate() {
        let run = Run {
            hour: "12".to_string(),
            reply_to: None,
            data: vec![sample_from(&[u64::MAX - 1, 5, 7]), sample_from(&[3, 4])],
        };
        let stack = HistogramStack::from_run(&run);

        assert_eq!(stack.layers[1].bottoms, vec![u64::MAX - 1, 3]);
        assert_eq!(stack.layers[1].tops(), vec![u64::MAX, 7]);
        assert_eq!(stack.layers[2].bottoms[0], u64::MAX);
        assert_eq!(stack.totals, vec![u64::MAX, 7]);
        assert_eq!(stack.max_total(), u64::MAX);
        assert_eq!(run.data[0].histogram_total(), u64::MAX);
    }

    proptest! {
        #[test]
        fn prop_layers_rest_on_lower_buckets(
            steps in prop::collection::vec(prop::collection::vec(0u64..10_000, 8), 1..16)
        ) {
            let run = Run {
                hour: "12".to_string(),
                reply_to: None,
                data: steps.iter().map(|counts| sample_from(counts)).collect(),
            };
            let stack = HistogramStack::from_run(&run);

            for (step, counts) in steps.iter().enumerate() {
                for layer in &stack.layers {
                    let below: u64 = counts[..layer.bucket].iter().sum();
                    prop_assert_eq!(layer.bottoms[step], below);
                }
                prop_assert_eq!(stack.totals[step], counts.iter().sum::<u64>());
            }
        }

        #[test]
        fn prop_classification_is_monotonic(a in -10.0f64..110.0, b in -10.0f64..110.0) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            let rank = |level: PopLevel| match level {
                PopLevel::Unknown => 0,
                PopLevel::NoRain => 1,
                PopLevel::Caution => 2,
                PopLevel::Rain => 3,
            };
            prop_assert!(rank(PopLevel::classify(low)) <= rank(PopLevel::classify(high)));
        }
    }
}

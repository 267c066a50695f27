//! Nowcast data model and trigger event decoding.

use crate::error::{NowcastError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Number of precipitation-intensity buckets in every histogram.
pub const HISTOGRAM_BUCKETS: usize = 8;

/// Index value the capture side writes when a location's pixel matched no
/// known intensity color.
pub const UNKNOWN_INDEX: i64 = -1;

/// One location's reading at one timestep.
///
/// Both fields are kept as raw JSON so series extraction can decide how to
/// treat missing or non-numeric values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceReading {
    /// Precipitation probability percentage, usually a decimal string.
    #[serde(default)]
    pub basement: Option<Value>,
    /// Intensity color index at the location, `-1` when unknown.
    #[serde(default)]
    pub index: Option<Value>,
}

impl PlaceReading {
    /// The probability percentage, if present and numeric.
    pub fn basement_value(&self) -> Option<f64> {
        self.basement.as_ref().and_then(numeric_value)
    }

    /// The color index, if present and an integer (number or string).
    pub fn index_value(&self) -> Option<i64> {
        match self.index.as_ref()? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Whether the capture side flagged this location as unreadable.
    pub fn is_unknown(&self) -> bool {
        self.index_value() == Some(UNKNOWN_INDEX)
    }
}

/// One timestep of nowcast data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Percentage of the map area covered by rain clouds.
    #[serde(deserialize_with = "deserialize_numeric")]
    pub density: f64,
    /// Cell counts per intensity bucket, keyed `"0"`..`"7"`.
    #[serde(rename = "histgram", alias = "histogram")]
    pub histogram: BTreeMap<String, u64>,
    /// Readings keyed by location.
    #[serde(default)]
    pub place: BTreeMap<String, PlaceReading>,
}

impl Sample {
    /// Count for a bucket index; zero when the bucket is absent.
    pub fn bucket_count(&self, bucket: usize) -> u64 {
        self.histogram
            .get(&bucket.to_string())
            .copied()
            .unwrap_or(0)
    }

    /// Sum of all histogram counts of this sample.
    pub fn histogram_total(&self) -> u64 {
        self.histogram
            .values()
            .fold(0u64, |total, count| total.saturating_add(*count))
    }
}

/// A decoded invocation: one hour of nowcast samples.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Run {
    /// Hour of day the run was generated for, as received (e.g. `"14"`).
    pub hour: String,
    /// Message id to reply to; `None` for a top-level post.
    pub reply_to: Option<String>,
    /// Ordered samples, one per 5-minute step.
    pub data: Vec<Sample>,
}

#[derive(Deserialize)]
struct RawEvent {
    hour: Value,
    #[serde(rename = "replyTo", default)]
    reply_to: Option<String>,
    data: Value,
}

impl Run {
    /// Decode a trigger event.
    ///
    /// The event is either the JSON object itself or a JSON string holding the
    /// encoded object.
    pub fn from_event(event: Value) -> Result<Self> {
        let event = match event {
            Value::String(encoded) => serde_json::from_str(&encoded)
                .map_err(|e| NowcastError::decode(format!("event string is not JSON: {}", e)))?,
            other => other,
        };

        let Value::Object(ref map) = event else {
            return Err(NowcastError::decode("event must be a JSON object"));
        };
        for field in ["hour", "data"] {
            if !map.contains_key(field) {
                return Err(NowcastError::decode_field("missing required field", field));
            }
        }

        let raw: RawEvent = serde_json::from_value(event)
            .map_err(|e| NowcastError::decode(format!("malformed event: {}", e)))?;

        let hour = match raw.hour {
            Value::String(hour) => hour,
            _ => return Err(NowcastError::decode_field("hour must be a string", "hour")),
        };
        parse_hour(&hour)?;

        let Value::Array(items) = raw.data else {
            return Err(NowcastError::decode_field("data must be an array", "data"));
        };
        if items.is_empty() {
            return Err(NowcastError::decode_field("data must not be empty", "data"));
        }

        let data = items
            .into_iter()
            .enumerate()
            .map(|(step, item)| decode_sample(step, item))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            hour,
            reply_to: raw.reply_to.filter(|id| !id.trim().is_empty()),
            data,
        })
    }

    /// Decode a trigger event from its JSON text.
    pub fn from_json_str(input: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(input)
            .map_err(|e| NowcastError::decode(format!("event is not JSON: {}", e)))?;
        Self::from_event(value)
    }

    /// Number of timesteps.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false for a decoded run; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The hour as an integer in `0..=23`.
    pub fn hour_of_day(&self) -> u32 {
        parse_hour(&self.hour).unwrap_or(0)
    }
}

fn decode_sample(step: usize, item: Value) -> Result<Sample> {
    let sample: Sample = serde_json::from_value(item).map_err(|e| {
        NowcastError::decode_field(format!("sample {} is malformed: {}", step, e), "data")
    })?;

    if let Some(bucket) = (0..HISTOGRAM_BUCKETS).find(|b| !sample.histogram.contains_key(&b.to_string())) {
        return Err(NowcastError::decode_field(
            format!("sample {} is missing histogram bucket {}", step, bucket),
            "histgram",
        ));
    }

    Ok(sample)
}

fn parse_hour(hour: &str) -> Result<u32> {
    hour.trim()
        .parse::<u32>()
        .ok()
        .filter(|h| *h < 24)
        .ok_or_else(|| {
            NowcastError::decode_field(format!("hour '{}' is not an hour of day", hour), "hour")
        })
}

/// Interpret a JSON number or numeric string as `f64`.
pub fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

fn deserialize_numeric<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    numeric_value(&value)
        .ok_or_else(|| serde::de::Error::custom(format!("expected a numeric value, got {}", value)))
}

/// The archived analysis of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// Hour of day as received.
    pub hour: String,
    /// Highest precipitation probability of the target location.
    pub tobita_max: f64,
    /// Precipitation probability series of the target location.
    pub tobita_pops: Vec<f64>,
}

//! Configuration schema definitions.

use nowcast_common::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Main configuration structure for Nowcast Notice.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Twitter API credentials and endpoints.
    pub twitter: TwitterConfig,
    /// Archive object storage.
    pub storage: StorageConfig,
    /// Chart rendering settings.
    pub charts: ChartsConfig,
    /// Summary text settings.
    pub summary: SummaryConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Twitter API configuration (OAuth 1.0a user context).
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TwitterConfig {
    /// Consumer (app) key.
    pub app_key: String,
    /// Consumer (app) secret.
    pub app_secret: String,
    /// User access token.
    pub access_token: String,
    /// User access token secret.
    pub access_secret: String,
    /// Base URL of the v2 API (tweets).
    pub api_base_url: String,
    /// Base URL of the v1.1 media upload API.
    pub upload_base_url: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl fmt::Debug for TwitterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TwitterConfig")
            .field("app_key", &redact(&self.app_key))
            .field("app_secret", &redact(&self.app_secret))
            .field("access_token", &redact(&self.access_token))
            .field("access_secret", &redact(&self.access_secret))
            .field("api_base_url", &self.api_base_url)
            .field("upload_base_url", &self.upload_base_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

/// S3-compatible archive storage configuration.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Bucket the analysis summary is written to.
    pub bucket: String,
    /// Custom endpoint (e.g. an R2 account URL); AWS when absent.
    pub endpoint: Option<String>,
    /// Region name; `auto` for R2.
    pub region: String,
    /// Access key id.
    pub access_key_id: String,
    /// Secret access key.
    pub secret_access_key: String,
    /// Object key of the archived summary. Each run overwrites it.
    pub archive_key: String,
}

impl fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageConfig")
            .field("bucket", &self.bucket)
            .field("endpoint", &self.endpoint)
            .field("region", &self.region)
            .field("access_key_id", &redact(&self.access_key_id))
            .field("secret_access_key", &redact(&self.secret_access_key))
            .field("archive_key", &self.archive_key)
            .finish()
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

/// Chart rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartsConfig {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Font family used for all text; needs CJK glyphs for Japanese labels.
    pub font_family: String,
    /// Font file registered under `font_family`; the bundled Latin font when unset.
    pub font_path: Option<PathBuf>,
    /// Directory the chart images are written to.
    pub output_dir: PathBuf,
    /// Locations drawn on the precipitation probability line chart.
    pub place_rain: Vec<PlaceConfig>,
    /// Locations drawn on the pie icon chart, at most five.
    pub place_icons: Vec<PlaceConfig>,
}

/// A named location with its chart color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceConfig {
    /// Key of the location in each sample's `place` map.
    pub key: String,
    /// Line color.
    pub color: HexColor,
    /// Name shown in legends and titles.
    pub display: String,
}

impl PlaceConfig {
    /// Creates a location descriptor.
    pub fn new(key: &str, color: u32, display: &str) -> Self {
        Self {
            key: key.to_string(),
            color: HexColor(color),
            display: display.to_string(),
        }
    }
}

/// A 24-bit RGB color written as `#RRGGBB` in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor(pub u32);

impl HexColor {
    /// The packed `0xRRGGBB` value.
    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.0 & 0x00FF_FFFF)
    }
}

impl FromStr for HexColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .or_else(|| s.strip_prefix("0x"))
            .ok_or_else(|| format!("color '{}' must start with '#' or '0x'", s))?;
        if hex.len() != 6 {
            return Err(format!("color '{}' must have six hex digits", s));
        }
        u32::from_str_radix(hex, 16)
            .map(HexColor)
            .map_err(|_| format!("color '{}' is not valid hex", s))
    }
}

impl Serialize for HexColor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Summary text configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    /// Location whose series provides the headline probability.
    pub target_place: String,
    /// Message catalog language (e.g. `ja-JP`, `en-US`).
    pub language: String,
}

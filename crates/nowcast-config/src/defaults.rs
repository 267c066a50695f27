//! Default values for every configuration section.

use crate::schema::*;
use nowcast_common::LoggingConfig;
use std::path::PathBuf;

/// Object key the analysis summary is archived under.
pub const DEFAULT_ARCHIVE_KEY: &str = "current-nowcast.json";

/// Location whose series drives the summary headline.
pub const DEFAULT_TARGET_PLACE: &str = "tobita";

impl Default for Config {
    fn default() -> Self {
        Self {
            twitter: TwitterConfig::default(),
            storage: StorageConfig::default(),
            charts: ChartsConfig::default(),
            summary: SummaryConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for TwitterConfig {
    fn default() -> Self {
        Self {
            app_key: String::new(),
            app_secret: String::new(),
            access_token: String::new(),
            access_secret: String::new(),
            api_base_url: "https://api.twitter.com".to_string(),
            upload_base_url: "https://upload.twitter.com".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            endpoint: None,
            region: "auto".to_string(),
            access_key_id: String::new(),
            secret_access_key: String::new(),
            archive_key: DEFAULT_ARCHIVE_KEY.to_string(),
        }
    }
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            font_family: "Noto Sans JP".to_string(),
            font_path: None,
            output_dir: std::env::temp_dir(),
            place_rain: default_place_rain(),
            place_icons: default_place_icons(),
        }
    }
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            target_place: DEFAULT_TARGET_PLACE.to_string(),
            language: "ja-JP".to_string(),
        }
    }
}

/// Every location the capture side reports, with its chart color.
pub fn known_places() -> Vec<PlaceConfig> {
    vec![
        PlaceConfig::new("tobita", 0xFFD54F, "飛田新地"),
        PlaceConfig::new("umeda", 0xE57373, "梅田駅"),
        PlaceConfig::new("kadoma", 0x4DD0E1, "門真市"),
        PlaceConfig::new("sakai", 0xA1887F, "堺市"),
        PlaceConfig::new("yao", 0x9575CD, "八尾市"),
        PlaceConfig::new("kanku", 0x81C784, "関西国際空港"),
    ]
}

/// Locations on the line chart: the station and the target.
pub fn default_place_rain() -> Vec<PlaceConfig> {
    pick(&["umeda", "tobita"])
}

/// The wider five-location set, used for the pie icons and optionally the line chart.
pub fn default_place_icons() -> Vec<PlaceConfig> {
    pick(&["tobita", "umeda", "kadoma", "sakai", "yao"])
}

fn pick(keys: &[&str]) -> Vec<PlaceConfig> {
    let places = known_places();
    keys.iter()
        .filter_map(|key| places.iter().find(|p| p.key == *key).cloned())
        .collect()
}

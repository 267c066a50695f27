//! Runtime validation of a loaded configuration.

use crate::schema::Config;
use nowcast_common::{NowcastError, Result};

/// Most pies the icon chart lays out (one grid cell is the caption).
pub const MAX_ICON_PLACES: usize = 5;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration. Credentials are only checked when the run
    /// will publish and archive.
    pub fn validate(config: &Config, require_credentials: bool) -> Result<()> {
        let mut problems = Vec::new();

        if !(100..=4000).contains(&config.charts.width) {
            problems.push("charts.width must be between 100 and 4000".to_string());
        }
        if !(100..=4000).contains(&config.charts.height) {
            problems.push("charts.height must be between 100 and 4000".to_string());
        }
        if let Some(path) = &config.charts.font_path {
            if !path.is_file() {
                problems.push(format!("charts.font_path {} is not a file", path.display()));
            }
        }
        if config.charts.place_rain.is_empty() {
            problems.push("charts.place_rain must name at least one location".to_string());
        }
        if config.charts.place_icons.is_empty() || config.charts.place_icons.len() > MAX_ICON_PLACES {
            problems.push(format!(
                "charts.place_icons must name between 1 and {} locations",
                MAX_ICON_PLACES
            ));
        }
        if config.summary.target_place.is_empty() {
            problems.push("summary.target_place cannot be empty".to_string());
        }
        if config.storage.archive_key.is_empty() {
            problems.push("storage.archive_key cannot be empty".to_string());
        }

        if require_credentials {
            let twitter = &config.twitter;
            for (name, value) in [
                ("ENV_TWITTER_APP_KEY", &twitter.app_key),
                ("ENV_TWITTER_APP_SECRET", &twitter.app_secret),
                ("ENV_TWITTER_ACCESS_TOKEN", &twitter.access_token),
                ("ENV_TWITTER_ACCESS_SECRET", &twitter.access_secret),
                ("R2_BUCKET_NAME", &config.storage.bucket),
                ("ENV_R2_ACCESS_KEY_ID", &config.storage.access_key_id),
                ("ENV_R2_SECRET_KEY", &config.storage.secret_access_key),
            ] {
                if value.is_empty() {
                    problems.push(format!("{} is not set", name));
                }
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(NowcastError::config(problems.join("; ")))
        }
    }
}

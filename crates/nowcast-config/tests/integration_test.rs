//! Integration tests for nowcast-config crate.

use nowcast_config::{Config, ConfigLoader, ConfigValidator, HexColor};

#[test]
fn test_default_config_validation() {
    let mut config = Config::default();

    // Publishing needs every credential
    assert!(ConfigValidator::validate(&config, true).is_err());

    config.twitter.app_key = "app-key".to_string();
    config.twitter.app_secret = "app-secret".to_string();
    config.twitter.access_token = "token".to_string();
    config.twitter.access_secret = "token-secret".to_string();
    config.storage.bucket = "weather".to_string();
    config.storage.access_key_id = "access".to_string();
    config.storage.secret_access_key = "secret".to_string();

    assert!(ConfigValidator::validate(&config, true).is_ok());
}

#[test]
fn test_secrets_are_redacted_in_debug_output() {
    let mut config = Config::default();
    config.twitter.app_secret = "very-secret-value".to_string();
    config.storage.secret_access_key = "another-secret".to_string();

    let debug = format!("{:?}", config);
    assert!(!debug.contains("very-secret-value"));
    assert!(!debug.contains("another-secret"));
    assert!(debug.contains("<redacted>"));
}

#[test]
fn test_hex_color_parsing() {
    assert_eq!("#FFD54F".parse::<HexColor>().unwrap(), HexColor(0xFFD54F));
    assert_eq!("0xe57373".parse::<HexColor>().unwrap(), HexColor(0xE57373));
    assert!("FFD54F".parse::<HexColor>().is_err());
    assert!("#FFD5".parse::<HexColor>().is_err());
    assert!("#GGGGGG".parse::<HexColor>().is_err());
    assert_eq!(HexColor(0x4DD0E1).to_string(), "#4DD0E1");
}

#[test]
fn test_overrides_apply_on_top_of_defaults() {
    let mut config = Config::default();
    ConfigLoader::apply_overrides_from(&mut config, |var| match var {
        "NOWCAST_ARCHIVE_KEY" => Some("analysis/latest.json".to_string()),
        "NOWCAST_LANGUAGE" => Some("en-US".to_string()),
        _ => None,
    })
    .unwrap();

    assert_eq!(config.storage.archive_key, "analysis/latest.json");
    assert_eq!(config.summary.language, "en-US");
    assert_eq!(config.twitter.api_base_url, "https://api.twitter.com");
}

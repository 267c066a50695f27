//! OAuth 1.0a request signing (HMAC-SHA1, user context).

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use nowcast_common::{NowcastError, Result};
use nowcast_config::TwitterConfig;
use rand::distributions::Alphanumeric;
use rand::Rng;
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

const SIGNATURE_METHOD: &str = "HMAC-SHA1";
const VERSION: &str = "1.0";
const NONCE_LEN: usize = 32;

/// Consumer and access token pairs of one account.
#[derive(Clone)]
pub struct OAuthCredentials {
    consumer_key: String,
    consumer_secret: String,
    token: String,
    token_secret: String,
}

impl std::fmt::Debug for OAuthCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthCredentials")
            .field("consumer_key", &self.consumer_key)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// RFC 3986 percent-encoding; only unreserved characters pass through.
pub fn percent_encode(input: &str) -> String {
    urlencoding::encode(input).into_owned()
}

/// The signature base string: method, URL and the sorted, encoded parameters.
pub fn signature_base(method: &str, url: &str, params: &[(&str, &str)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    encoded.sort();
    let joined = encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        percent_encode(url),
        percent_encode(&joined)
    )
}

/// Base64 HMAC-SHA1 of `base` keyed with both secrets.
pub fn sign(base: &str, consumer_secret: &str, token_secret: &str) -> Result<String> {
    let key = format!("{}&{}", percent_encode(consumer_secret), percent_encode(token_secret));
    let mut mac = HmacSha1::new_from_slice(key.as_bytes())
        .map_err(|e| NowcastError::publish(format!("cannot create request signer: {}", e)))?;
    mac.update(base.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

fn nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LEN)
        .map(char::from)
        .collect()
}

impl OAuthCredentials {
    /// Credentials from explicit values.
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        token: impl Into<String>,
        token_secret: impl Into<String>,
    ) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            token: token.into(),
            token_secret: token_secret.into(),
        }
    }

    /// Credentials of the configured account.
    pub fn from_config(config: &TwitterConfig) -> Self {
        Self::new(
            &config.app_key,
            &config.app_secret,
            &config.access_token,
            &config.access_secret,
        )
    }

    /// `Authorization` header for a request with a fresh nonce and timestamp.
    ///
    /// `params` are the query or form parameters that take part in the
    /// signature; JSON and multipart bodies do not.
    pub fn authorization(&self, method: &str, url: &str, params: &[(&str, &str)]) -> Result<String> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        self.authorization_with(method, url, params, &nonce(), &timestamp)
    }

    /// `Authorization` header with a given nonce and timestamp.
    pub fn authorization_with(
        &self,
        method: &str,
        url: &str,
        params: &[(&str, &str)],
        nonce: &str,
        timestamp: &str,
    ) -> Result<String> {
        let mut oauth = vec![
            ("oauth_consumer_key", self.consumer_key.as_str()),
            ("oauth_nonce", nonce),
            ("oauth_signature_method", SIGNATURE_METHOD),
            ("oauth_timestamp", timestamp),
            ("oauth_token", self.token.as_str()),
            ("oauth_version", VERSION),
        ];

        let mut signed: Vec<(&str, &str)> = oauth.clone();
        signed.extend_from_slice(params);
        let signature = sign(
            &signature_base(method, url, &signed),
            &self.consumer_secret,
            &self.token_secret,
        )?;
        oauth.push(("oauth_signature", signature.as_str()));
        oauth.sort();

        let fields = oauth
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
            .collect::<Vec<_>>()
            .join(", ");
        Ok(format!("OAuth {}", fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Worked example from the Twitter developer documentation.
    fn documented() -> OAuthCredentials {
        OAuthCredentials::new(
            "xvz1evFS4wEEPTGEFPHBog",
            "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw",
            "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb",
            "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE",
        )
    }

    const URL: &str = "https://api.twitter.com/1.1/statuses/update.json";
    const NONCE: &str = "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg";
    const TIMESTAMP: &str = "1318622958";
    const PARAMS: [(&str, &str); 2] = [
        ("include_entities", "true"),
        ("status", "Hello Ladies + Gentlemen, a signed OAuth request!"),
    ];

    #[test]
    fn test_percent_encode() {
        assert_eq!(percent_encode("Ladies + Gentlemen"), "Ladies%20%2B%20Gentlemen");
        assert_eq!(percent_encode("An encoded string!"), "An%20encoded%20string%21");
        assert_eq!(percent_encode("Dogs, Cats & Mice"), "Dogs%2C%20Cats%20%26%20Mice");
        assert_eq!(percent_encode("-._~"), "-._~");
        assert_eq!(percent_encode("☃"), "%E2%98%83");
    }

    #[test]
    fn test_documented_signature() {
        let mut params: Vec<(&str, &str)> = PARAMS.to_vec();
        params.extend_from_slice(&[
            ("oauth_consumer_key", "xvz1evFS4wEEPTGEFPHBog"),
            ("oauth_nonce", NONCE),
            ("oauth_signature_method", "HMAC-SHA1"),
            ("oauth_timestamp", TIMESTAMP),
            ("oauth_token", "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb"),
            ("oauth_version", "1.0"),
        ]);
        let base = signature_base("post", URL, &params);
        assert!(base.starts_with(
            "POST&https%3A%2F%2Fapi.twitter.com%2F1.1%2Fstatuses%2Fupdate.json&include_entities%3Dtrue%26oauth_consumer_key"
        ));
        assert_eq!(
            sign(
                &base,
                "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw",
                "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE"
            )
            .unwrap(),
            "hCtSmYh+iHYCEqBWrE7C7hYmtUk="
        );
    }

    #[test]
    fn test_authorization_header() {
        let header = documented()
            .authorization_with("POST", URL, &PARAMS, NONCE, TIMESTAMP)
            .unwrap();
        assert!(header.starts_with("OAuth oauth_consumer_key=\"xvz1evFS4wEEPTGEFPHBog\", "));
        assert!(header.contains("oauth_signature=\"hCtSmYh%2BiHYCEqBWrE7C7hYmtUk%3D\""));
        assert!(header.contains("oauth_version=\"1.0\""));
        assert!(!header.contains("include_entities"));
    }

    #[test]
    fn test_fresh_nonce_per_request() {
        let creds = documented();
        let first = creds.authorization("POST", URL, &[]).unwrap();
        let second = creds.authorization("POST", URL, &[]).unwrap();
        assert_ne!(first, second);
        assert!(!format!("{:?}", creds).contains("GmHx"));
    }
}

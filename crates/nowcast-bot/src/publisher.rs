//! Posting charts and text to the social-media account.

use crate::oauth::OAuthCredentials;
use async_trait::async_trait;
use nowcast_common::{truncate_string, NowcastError, Result};
use nowcast_config::TwitterConfig;
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};
use url::Url;

const MEDIA_UPLOAD_PATH: &str = "1.1/media/upload.json";
const TWEETS_PATH: &str = "2/tweets";
const ERROR_BODY_CHARS: usize = 200;

/// Opaque reference to uploaded media.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MediaId(pub String);

impl fmt::Display for MediaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque reference to a published post.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostId(pub String);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A status post with its attachments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
    /// Post text.
    pub text: String,
    /// Attached media in display order.
    pub media_ids: Vec<MediaId>,
    /// Post to reply to; `None` for a top-level post.
    pub in_reply_to: Option<String>,
}

/// What the publisher needs from a social-media service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SocialClient: Send + Sync {
    /// Upload one image file.
    async fn upload_media(&self, path: &Path) -> Result<MediaId>;

    /// Publish a status.
    async fn post_status(&self, update: &StatusUpdate) -> Result<PostId>;
}

#[derive(Deserialize)]
struct MediaUploadResponse {
    media_id_string: String,
}

#[derive(Serialize)]
struct TweetRequest<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    media: Option<TweetMedia<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply: Option<TweetReply<'a>>,
}

#[derive(Serialize)]
struct TweetMedia<'a> {
    media_ids: Vec<&'a str>,
}

#[derive(Serialize)]
struct TweetReply<'a> {
    in_reply_to_tweet_id: &'a str,
}

#[derive(Deserialize)]
struct TweetResponse {
    data: TweetData,
}

#[derive(Deserialize)]
struct TweetData {
    id: String,
}

/// Twitter API client signing every request with OAuth 1.0a.
#[derive(Debug, Clone)]
pub struct TwitterClient {
    http: reqwest::Client,
    credentials: OAuthCredentials,
    media_url: Url,
    tweets_url: Url,
}

fn endpoint(base: &str, path: &str) -> Result<Url> {
    Url::parse(base)
        .and_then(|base| base.join(path))
        .map_err(|e| NowcastError::config_with_source(format!("invalid API base URL '{}'", base), e))
}

async fn check_status(response: reqwest::Response, action: &str) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(NowcastError::publish_with_status(
        format!("{} failed with {}: {}", action, status, truncate_string(&body, ERROR_BODY_CHARS)),
        status.as_u16(),
    ))
}

impl TwitterClient {
    /// Creates a client for the configured account and endpoints.
    pub fn new(config: &TwitterConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("nowcast-notice/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            credentials: OAuthCredentials::from_config(config),
            media_url: endpoint(&config.upload_base_url, MEDIA_UPLOAD_PATH)?,
            tweets_url: endpoint(&config.api_base_url, TWEETS_PATH)?,
        })
    }
}

#[async_trait]
impl SocialClient for TwitterClient {
    #[instrument(skip_all, fields(path = %path.display()))]
    async fn upload_media(&self, path: &Path) -> Result<MediaId> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "chart.png".to_string());
        let part = Part::bytes(bytes).file_name(file_name).mime_str("image/png")?;
        let form = Form::new().part("media", part);

        let auth = self
            .credentials
            .authorization("POST", self.media_url.as_str(), &[])?;
        let response = self
            .http
            .post(self.media_url.clone())
            .header(AUTHORIZATION, auth)
            .multipart(form)
            .send()
            .await?;
        let uploaded: MediaUploadResponse = check_status(response, "Media upload").await?.json().await?;

        debug!(media_id = %uploaded.media_id_string, "Uploaded media");
        Ok(MediaId(uploaded.media_id_string))
    }

    #[instrument(skip_all, fields(media = update.media_ids.len(), reply = update.in_reply_to.is_some()))]
    async fn post_status(&self, update: &StatusUpdate) -> Result<PostId> {
        let request = TweetRequest {
            text: &update.text,
            media: (!update.media_ids.is_empty()).then(|| TweetMedia {
                media_ids: update.media_ids.iter().map(|id| id.0.as_str()).collect(),
            }),
            reply: update.in_reply_to.as_deref().map(|id| TweetReply {
                in_reply_to_tweet_id: id,
            }),
        };

        let auth = self
            .credentials
            .authorization("POST", self.tweets_url.as_str(), &[])?;
        let response = self
            .http
            .post(self.tweets_url.clone())
            .header(AUTHORIZATION, auth)
            .json(&request)
            .send()
            .await?;
        let created: TweetResponse = check_status(response, "Status post").await?.json().await?;

        Ok(PostId(created.data.id))
    }
}

/// Result of a publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Published {
    /// Uploaded media in image order.
    pub media_ids: Vec<MediaId>,
    /// The new post.
    pub post_id: PostId,
}

/// Uploads every image, then posts once.
#[derive(Clone)]
pub struct Publisher {
    client: Arc<dyn SocialClient>,
}

impl fmt::Debug for Publisher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Publisher").finish_non_exhaustive()
    }
}

impl Publisher {
    /// Creates a publisher over a client.
    pub fn new(client: Arc<dyn SocialClient>) -> Self {
        Self { client }
    }

    /// Upload `images` in order and post `text` with them.
    ///
    /// The first failure aborts; nothing is posted unless every upload
    /// succeeded.
    #[instrument(skip_all, fields(images = images.len(), reply_to = ?reply_to))]
    pub async fn publish(
        &self,
        text: &str,
        images: &[PathBuf],
        reply_to: Option<&str>,
    ) -> Result<Published> {
        let mut media_ids = Vec::with_capacity(images.len());
        for image in images {
            media_ids.push(self.client.upload_media(image).await?);
        }

        let update = StatusUpdate {
            text: text.to_string(),
            media_ids: media_ids.clone(),
            in_reply_to: reply_to.map(str::to_string),
        };
        let post_id = self.client.post_status(&update).await?;
        info!(post_id = %post_id, "Published status with {} images", media_ids.len());

        Ok(Published { media_ids, post_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::Sequence;

    fn images() -> Vec<PathBuf> {
        ["a.png", "b.png", "c.png", "d.png"]
            .iter()
            .map(PathBuf::from)
            .collect()
    }

    #[tokio::test]
    async fn test_uploads_in_order_then_posts_once() {
        let mut client = MockSocialClient::new();
        let mut seq = Sequence::new();
        for (i, image) in images().into_iter().enumerate() {
            client
                .expect_upload_media()
                .withf(move |path| path == image.as_path())
                .times(1)
                .in_sequence(&mut seq)
                .returning(move |_| Ok(MediaId(format!("m{}", i))));
        }
        client
            .expect_post_status()
            .withf(|update| {
                update.text == "hello"
                    && update.in_reply_to.as_deref() == Some("42")
                    && update.media_ids
                        == vec![
                            MediaId("m0".into()),
                            MediaId("m1".into()),
                            MediaId("m2".into()),
                            MediaId("m3".into()),
                        ]
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(PostId("p1".into())));

        let published = Publisher::new(Arc::new(client))
            .publish("hello", &images(), Some("42"))
            .await
            .unwrap();
        assert_eq!(published.post_id, PostId("p1".into()));
        assert_eq!(published.media_ids.len(), 4);
    }

    #[tokio::test]
    async fn test_upload_failure_prevents_post() {
        let mut client = MockSocialClient::new();
        client
            .expect_upload_media()
            .times(2)
            .returning(|path| {
                if path == Path::new("b.png") {
                    Err(NowcastError::publish_with_status("too large", 413))
                } else {
                    Ok(MediaId("ok".into()))
                }
            });
        client.expect_post_status().times(0);

        let err = Publisher::new(Arc::new(client))
            .publish("hello", &images(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, NowcastError::Publish { status_code: Some(413), .. }));
    }

    #[tokio::test]
    async fn test_top_level_post_has_no_reply() {
        let mut client = MockSocialClient::new();
        client
            .expect_post_status()
            .withf(|update| update.in_reply_to.is_none() && update.media_ids.is_empty())
            .times(1)
            .returning(|_| Ok(PostId("p2".into())));

        let published = Publisher::new(Arc::new(client))
            .publish("text only", &[], None)
            .await
            .unwrap();
        assert!(published.media_ids.is_empty());
    }

    #[test]
    fn test_tweet_request_shape() {
        let request = TweetRequest {
            text: "t",
            media: Some(TweetMedia {
                media_ids: vec!["1", "2"],
            }),
            reply: None,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({"text": "t", "media": {"media_ids": ["1", "2"]}})
        );
    }

    #[test]
    fn test_endpoint_join() {
        assert_eq!(
            endpoint("https://upload.twitter.com", MEDIA_UPLOAD_PATH)
                .unwrap()
                .as_str(),
            "https://upload.twitter.com/1.1/media/upload.json"
        );
        assert!(endpoint("not a url", TWEETS_PATH).is_err());
    }
}

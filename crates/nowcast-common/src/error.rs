//! Error types and utilities for Nowcast Notice

use thiserror::Error;

/// Result type alias for nowcast operations
pub type Result<T> = std::result::Result<T, NowcastError>;

/// Main error type for nowcast operations
#[derive(Error, Debug)]
pub enum NowcastError {
    /// Malformed or missing fields in the trigger event
    #[error("Decode error: {message}")]
    Decode {
        message: String,
        field: Option<String>,
    },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Network related errors (HTTP transport, timeouts)
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Social media API errors (media upload, status post)
    #[error("Publish error: {message}")]
    Publish {
        message: String,
        status_code: Option<u16>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Object storage errors
    #[error("Archive error: {message}")]
    Archive {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Chart rendering and encoding errors
    #[error("Graph error: {message}")]
    Graph {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Message catalog errors
    #[error("Localization error: {message}")]
    Localization {
        message: String,
        locale: Option<String>,
    },
}

impl NowcastError {
    /// Create a new decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode {
            message: msg.into(),
            field: None,
        }
    }

    /// Create a new decode error naming the offending field
    pub fn decode_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Decode {
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new network error with source
    pub fn network_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Network {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new publish error
    pub fn publish(msg: impl Into<String>) -> Self {
        Self::Publish {
            message: msg.into(),
            status_code: None,
            source: None,
        }
    }

    /// Create a new publish error carrying the HTTP status returned by the API
    pub fn publish_with_status(msg: impl Into<String>, status: u16) -> Self {
        Self::Publish {
            message: msg.into(),
            status_code: Some(status),
            source: None,
        }
    }

    /// Create a new archive error
    pub fn archive(msg: impl Into<String>) -> Self {
        Self::Archive {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new archive error with source
    pub fn archive_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Archive {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new graph error
    pub fn graph(msg: impl Into<String>) -> Self {
        Self::Graph {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new graph error with source
    pub fn graph_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Graph {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new localization error with locale
    pub fn localization_with_locale(msg: impl Into<String>, locale: impl Into<String>) -> Self {
        Self::Localization {
            message: msg.into(),
            locale: Some(locale.into()),
        }
    }

    /// Whether this error came from decoding the trigger event
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}

// Error conversion implementations for external types

/// Convert from reqwest::Error to NowcastError
impl From<reqwest::Error> for NowcastError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::network_with_source("Request timeout", err)
        } else if err.is_connect() {
            Self::network_with_source("Connection failed", err)
        } else if err.is_status() {
            let status_code = err.status().map(|s| s.as_u16()).unwrap_or(0);
            Self::network_with_source(format!("HTTP error: {}", status_code), err)
        } else {
            Self::network_with_source("Network request failed", err)
        }
    }
}

/// Convert from plotters drawing errors to NowcastError
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for NowcastError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::graph_with_source("Chart rendering failed", err)
    }
}

impl From<image::ImageError> for NowcastError {
    fn from(err: image::ImageError) -> Self {
        Self::graph_with_source("Image encoding failed", err)
    }
}

impl From<object_store::Error> for NowcastError {
    fn from(err: object_store::Error) -> Self {
        Self::archive_with_source("Object storage request failed", err)
    }
}

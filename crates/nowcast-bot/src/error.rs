//! Stage-level error of a pipeline run.

use nowcast_common::NowcastError;

/// Which stage of a run failed, with the underlying error.
#[derive(thiserror::Error, Debug)]
pub enum RunError {
    /// The trigger event could not be decoded.
    #[error("Decode failed: {0}")]
    Decode(#[source] NowcastError),

    /// Charts or the summary text could not be produced.
    #[error("Render failed: {0}")]
    Render(#[source] NowcastError),

    /// A media upload or the status post failed.
    #[error("Publish failed: {0}")]
    Publish(#[source] NowcastError),

    /// The analysis summary could not be stored.
    #[error("Archive failed: {0}")]
    Archive(#[source] NowcastError),
}

impl RunError {
    /// Stage name for logs.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Decode(_) => "decode",
            Self::Render(_) => "render",
            Self::Publish(_) => "publish",
            Self::Archive(_) => "archive",
        }
    }

    /// The underlying error.
    pub fn inner(&self) -> &NowcastError {
        match self {
            Self::Decode(e) | Self::Render(e) | Self::Publish(e) | Self::Archive(e) => e,
        }
    }
}

/// Result of a pipeline run.
pub type RunResult<T> = Result<T, RunError>;

//! One invocation: decode, render, compose, publish, archive.

use crate::archiver::Archiver;
use crate::error::{RunError, RunResult};
use crate::publisher::{MediaId, PostId, Publisher, TwitterClient};
use crate::summary::{Summary, SummaryComposer};
use nowcast_common::types::Run;
use nowcast_common::{NowcastError, Result};
use nowcast_config::Config;
use nowcast_graphs::ChartSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Renders the charts of a run to files.
pub trait ChartWriter: Send + Sync {
    /// Write every chart under `dir` and return the paths in posting order.
    fn write_charts(&self, run: &Run, dir: &Path) -> Result<Vec<PathBuf>>;
}

impl ChartWriter for ChartSet {
    fn write_charts(&self, run: &Run, dir: &Path) -> Result<Vec<PathBuf>> {
        self.render_all(run, dir)
    }
}

/// Where the outputs of a successful run went.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Hour of the run.
    pub hour: String,
    /// Composed text and analysis.
    pub summary: Summary,
    /// Rendered chart files.
    pub charts: Vec<PathBuf>,
    /// Uploaded media; empty in a dry run.
    pub media_ids: Vec<MediaId>,
    /// The new post; `None` in a dry run.
    pub post_id: Option<PostId>,
    /// Object key of the archived summary; `None` in a dry run.
    pub archive_key: Option<String>,
}

struct Delivery {
    publisher: Publisher,
    archiver: Archiver,
}

/// The nowcast notice pipeline.
pub struct Pipeline {
    charts: Box<dyn ChartWriter>,
    composer: SummaryComposer,
    output_dir: PathBuf,
    delivery: Option<Delivery>,
}

impl Pipeline {
    /// A pipeline that renders and composes only.
    pub fn new(
        charts: Box<dyn ChartWriter>,
        composer: SummaryComposer,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            charts,
            composer,
            output_dir: output_dir.into(),
            delivery: None,
        }
    }

    /// Publish and archive after rendering.
    pub fn with_delivery(mut self, publisher: Publisher, archiver: Archiver) -> Self {
        self.delivery = Some(Delivery {
            publisher,
            archiver,
        });
        self
    }

    /// Build the pipeline described by `config`.
    ///
    /// A dry run needs no credentials and never touches the network.
    pub fn from_config(config: &Config, dry_run: bool) -> Result<Self> {
        let charts = ChartSet::from_config(&config.charts, &config.summary.language)?;
        let composer = SummaryComposer::from_config(&config.summary)?;
        let pipeline = Self::new(Box::new(charts), composer, config.charts.output_dir.clone());
        if dry_run {
            return Ok(pipeline);
        }

        let client = TwitterClient::new(&config.twitter)?;
        let archiver = Archiver::from_config(&config.storage)?;
        Ok(pipeline.with_delivery(Publisher::new(Arc::new(client)), archiver))
    }

    /// Whether publishing and archiving are skipped.
    pub fn is_dry_run(&self) -> bool {
        self.delivery.is_none()
    }

    /// Run on a trigger event given as JSON text.
    pub async fn run_str(&self, input: &str) -> RunResult<RunReport> {
        let event: Value = serde_json::from_str(input).map_err(|e| {
            RunError::Decode(NowcastError::decode(format!("event is not JSON: {}", e)))
        })?;
        self.run(event).await
    }

    /// Run on a trigger event.
    ///
    /// Every chart is rendered before the first upload, every upload precedes
    /// the post, and the archive follows the post.
    #[instrument(skip_all, fields(dry_run = self.is_dry_run()))]
    pub async fn run(&self, event: Value) -> RunResult<RunReport> {
        let run = Run::from_event(event).map_err(RunError::Decode)?;
        info!(hour = %run.hour, steps = run.len(), "Decoded nowcast run");

        let charts = self
            .charts
            .write_charts(&run, &self.output_dir)
            .map_err(RunError::Render)?;
        let summary = self.composer.compose(&run).map_err(RunError::Render)?;

        let mut report = RunReport {
            hour: run.hour.clone(),
            summary,
            charts,
            media_ids: Vec::new(),
            post_id: None,
            archive_key: None,
        };

        let Some(delivery) = &self.delivery else {
            info!("Dry run; skipping publish and archive");
            return Ok(report);
        };

        let published = delivery
            .publisher
            .publish(&report.summary.text, &report.charts, run.reply_to.as_deref())
            .await
            .map_err(RunError::Publish)?;
        report.media_ids = published.media_ids;
        report.post_id = Some(published.post_id);

        delivery
            .archiver
            .archive(&report.summary.analysis)
            .await
            .map_err(RunError::Archive)?;
        report.archive_key = Some(delivery.archiver.key().to_string());

        Ok(report)
    }
}

/// Outcome of one invocation as reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationResult {
    /// `200` on success, `500` on any failure.
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

impl InvocationResult {
    /// Successful invocation.
    pub const OK: Self = Self { status_code: 200 };
    /// Failed invocation.
    pub const FAILED: Self = Self { status_code: 500 };

    /// Whether the invocation succeeded.
    pub fn is_success(&self) -> bool {
        self.status_code == Self::OK.status_code
    }
}

impl From<&RunResult<RunReport>> for InvocationResult {
    fn from(outcome: &RunResult<RunReport>) -> Self {
        match outcome {
            Ok(report) => {
                info!(hour = %report.hour, post_id = ?report.post_id, "Invocation succeeded");
                Self::OK
            }
            Err(err) => {
                error!(stage = err.stage(), "Invocation failed: {}", err);
                Self::FAILED
            }
        }
    }
}

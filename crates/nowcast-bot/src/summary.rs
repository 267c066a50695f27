//! Status text and archived analysis of a run.

use nowcast_common::types::{AnalysisSummary, Run};
use nowcast_common::{format_float, Result};
use nowcast_config::SummaryConfig;
use nowcast_graphs::{density_max, density_sum, place_series};
use nowcast_i18n::{MessageKey, Messages};
use tracing::debug;

/// What a run produces besides its charts.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Status text to post.
    pub text: String,
    /// Analysis to archive.
    pub analysis: AnalysisSummary,
}

/// Composes the status text from the target location and the coverage.
#[derive(Debug)]
pub struct SummaryComposer {
    messages: Messages,
    target_place: String,
}

impl SummaryComposer {
    /// Creates a composer for a location key.
    pub fn new(messages: Messages, target_place: impl Into<String>) -> Self {
        Self {
            messages,
            target_place: target_place.into(),
        }
    }

    /// Creates a composer from summary configuration.
    pub fn from_config(config: &SummaryConfig) -> Result<Self> {
        Ok(Self::new(Messages::new(&config.language)?, config.target_place.clone()))
    }

    /// Location whose probability heads the text.
    pub fn target_place(&self) -> &str {
        &self.target_place
    }

    /// Compose the text and the analysis.
    ///
    /// The no-rain text is chosen only when the coverage sums to exactly zero.
    pub fn compose(&self, run: &Run) -> Result<Summary> {
        let target = place_series(run, &self.target_place);
        let text = if density_sum(run) == 0.0 {
            self.messages.get(MessageKey::SummaryNoRain)?
        } else {
            self.messages.get_with_args(
                MessageKey::SummaryRain,
                &[
                    ("probability", format_float(target.max())),
                    ("coverage", format_float(density_max(run))),
                ],
            )?
        };
        debug!(place = %self.target_place, max = target.max(), "Composed summary");

        Ok(Summary {
            text,
            analysis: AnalysisSummary {
                hour: run.hour.clone(),
                tobita_max: target.max(),
                tobita_pops: target.values,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nowcast_common::test_utils::{dry_run, event_with, sample_run};

    fn composer() -> SummaryComposer {
        SummaryComposer::new(Messages::new("ja-JP").unwrap(), "tobita")
    }

    #[test]
    fn test_no_rain() {
        let summary = composer().compose(&dry_run()).unwrap();
        assert!(summary.text.starts_with("ナウキャストに雨雲はありません。"));
        assert_eq!(summary.analysis.hour, "6");
        assert_eq!(summary.analysis.tobita_max, 0.0);
        assert_eq!(summary.analysis.tobita_pops, vec![0.0; 12]);
    }

    #[test]
    fn test_rain_headline() {
        let summary = composer().compose(&sample_run()).unwrap();
        assert_eq!(
            summary.text,
            "ナウキャストから推測される今後1時間の降水確率は98.08%、雨雲の画面占有率は最大93.59%です。（気象庁 高解像度降水ナウキャストより）"
        );
        assert_eq!(summary.analysis.tobita_max, 98.08);
        assert_eq!(summary.analysis.tobita_pops.len(), 12);
    }

    #[test]
    fn test_tiny_coverage_still_counts_as_rain() {
        let mut densities = [0.0; 12];
        densities[5] = 0.01;
        let run = Run::from_event(event_with("9", &densities, &[])).unwrap();
        let summary = composer().compose(&run).unwrap();
        assert!(summary.text.contains("降水確率は0.0%"));
        assert!(summary.text.contains("最大0.01%"));
    }

    #[test]
    fn test_missing_target_falls_back_to_zero() {
        let composer = SummaryComposer::new(Messages::new("en-US").unwrap(), "nowhere");
        let summary = composer.compose(&sample_run()).unwrap();
        assert_eq!(summary.analysis.tobita_pops, vec![0.0]);
        assert!(summary.text.contains("probability for the next hour is 0.0%"));
    }
}

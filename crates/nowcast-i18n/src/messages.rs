//! Typed message accessors.

use crate::catalog::{string_args, Catalog};
use crate::error::I18nResult;

/// Every message the application formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    /// Summary when the nowcast shows no rain clouds at all.
    SummaryNoRain,
    /// Summary with headline probability and coverage; args `probability`, `coverage`.
    SummaryRain,
    /// X axis of the time series charts.
    TimeAxis,
    /// Y axis of the place-rain chart.
    PlaceRainAxis,
    /// Legend entry of one location; arg `place`.
    PlaceRainSeries,
    /// Y axis of the density chart.
    AreaRainAxis,
    /// Legend entry of the density series.
    AreaRainSeries,
    /// Y axis of the intensity histogram.
    HistogramAxis,
    /// Caption of the pie icon chart; arg `hour`.
    IconsCaption,
    /// Legend title for rain wedges.
    LegendRain,
    /// Legend explanation for rain wedges.
    LegendRainDetail,
    /// Legend title for caution wedges.
    LegendCaution,
    /// Legend explanation for caution wedges.
    LegendCautionDetail,
    /// Legend title for dry or unknown wedges.
    LegendClear,
    /// Legend explanation for dry or unknown wedges.
    LegendClearDetail,
}

impl MessageKey {
    /// All keys, for completeness checks.
    pub const ALL: [MessageKey; 15] = [
        MessageKey::SummaryNoRain,
        MessageKey::SummaryRain,
        MessageKey::TimeAxis,
        MessageKey::PlaceRainAxis,
        MessageKey::PlaceRainSeries,
        MessageKey::AreaRainAxis,
        MessageKey::AreaRainSeries,
        MessageKey::HistogramAxis,
        MessageKey::IconsCaption,
        MessageKey::LegendRain,
        MessageKey::LegendRainDetail,
        MessageKey::LegendCaution,
        MessageKey::LegendCautionDetail,
        MessageKey::LegendClear,
        MessageKey::LegendClearDetail,
    ];

    /// The Fluent message id.
    pub fn id(self) -> &'static str {
        match self {
            MessageKey::SummaryNoRain => "summary-no-rain",
            MessageKey::SummaryRain => "summary-rain",
            MessageKey::TimeAxis => "chart-time-axis",
            MessageKey::PlaceRainAxis => "chart-place-rain-axis",
            MessageKey::PlaceRainSeries => "chart-place-rain-series",
            MessageKey::AreaRainAxis => "chart-area-rain-axis",
            MessageKey::AreaRainSeries => "chart-area-rain-series",
            MessageKey::HistogramAxis => "chart-histogram-axis",
            MessageKey::IconsCaption => "chart-icons-caption",
            MessageKey::LegendRain => "chart-icons-legend-rain",
            MessageKey::LegendRainDetail => "chart-icons-legend-rain-detail",
            MessageKey::LegendCaution => "chart-icons-legend-caution",
            MessageKey::LegendCautionDetail => "chart-icons-legend-caution-detail",
            MessageKey::LegendClear => "chart-icons-legend-clear",
            MessageKey::LegendClearDetail => "chart-icons-legend-clear-detail",
        }
    }
}

/// Message accessor for one configured language.
#[derive(Debug)]
pub struct Messages {
    catalog: Catalog,
}

impl Messages {
    /// Load the messages of a language.
    pub fn new(language: &str) -> I18nResult<Self> {
        Ok(Self {
            catalog: Catalog::new(language)?,
        })
    }

    /// The language these messages are written in.
    pub fn language(&self) -> &str {
        self.catalog.language()
    }

    /// Gets a message that takes no arguments.
    pub fn get(&self, key: MessageKey) -> I18nResult<String> {
        self.catalog.format(key.id(), None)
    }

    /// Gets a message with string arguments.
    pub fn get_with_args(&self, key: MessageKey, args: &[(&str, String)]) -> I18nResult<String> {
        let args = string_args(args);
        self.catalog.format(key.id(), Some(&args))
    }
}

//! Chart renderer trait and the shared render inputs.

use crate::canvas::ChartCanvas;
use nowcast_common::types::Run;
use nowcast_common::Result;
use nowcast_config::ChartsConfig;
use nowcast_i18n::Messages;
use plotters::prelude::*;

/// Size and typography shared by every chart of a set.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Font family used for all text.
    pub font_family: String,
    /// Size of labels and legend text.
    pub font_size: u32,
    /// Size of titles and captions.
    pub title_size: u32,
}

impl ChartStyle {
    /// Style for the configured chart size and font.
    pub fn from_config(config: &ChartsConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            font_family: config.font_family.clone(),
            font_size: 14,
            title_size: 18,
        }
    }

    /// Text style for labels.
    pub fn text(&self) -> TextStyle<'_> {
        (self.font_family.as_str(), self.font_size)
            .into_font()
            .color(&BLACK)
    }

    /// Text style for titles.
    pub fn title(&self) -> TextStyle<'_> {
        (self.font_family.as_str(), self.title_size)
            .into_font()
            .color(&BLACK)
    }

    /// Height of one legend row in pixels.
    pub fn row_height(&self) -> i32 {
        (self.font_size as i32 * 3) / 2 + 4
    }
}

/// Everything a renderer reads besides the run itself.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Size and typography.
    pub style: &'a ChartStyle,
    /// Localized labels.
    pub messages: &'a Messages,
}

/// A chart that can be drawn from one run.
pub trait ChartRenderer: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// File name the chart is written to.
    fn file_name(&self) -> &'static str;

    /// What the chart shows.
    fn description(&self) -> &'static str;

    /// Draw the chart onto `canvas`.
    fn render(&self, run: &Run, ctx: &RenderContext<'_>, canvas: &mut ChartCanvas) -> Result<()>;
}

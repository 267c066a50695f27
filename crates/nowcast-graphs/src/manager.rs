//! The full set of charts posted with one run.

use crate::area_rain::AreaRainChart;
use crate::canvas::ChartCanvas;
use crate::fonts;
use crate::histogram::HistogramChart;
use crate::place_icons::PlaceIconsChart;
use crate::place_rain::PlaceRainChart;
use crate::traits::{ChartRenderer, ChartStyle, RenderContext};
use nowcast_common::types::Run;
use nowcast_common::Result;
use nowcast_config::{ChartsConfig, PlaceConfig};
use nowcast_i18n::Messages;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// A chart encoded in memory.
#[derive(Debug, Clone)]
pub struct RenderedChart {
    /// Renderer name.
    pub name: &'static str,
    /// File name the chart is saved under.
    pub file_name: &'static str,
    /// PNG bytes.
    pub png: Vec<u8>,
}

/// Renders the place-rain, coverage, histogram and icon charts in that order.
pub struct ChartSet {
    renderers: Vec<Box<dyn ChartRenderer>>,
    style: ChartStyle,
    messages: Messages,
}

impl std::fmt::Debug for ChartSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartSet")
            .field("renderers", &self.renderers.iter().map(|r| r.name()).collect::<Vec<_>>())
            .field("style", &self.style)
            .field("language", &self.messages.language())
            .finish()
    }
}

impl ChartSet {
    /// Creates the set from explicit location lists.
    pub fn new(
        style: ChartStyle,
        messages: Messages,
        place_rain: Vec<PlaceConfig>,
        place_icons: Vec<PlaceConfig>,
    ) -> Self {
        let renderers: Vec<Box<dyn ChartRenderer>> = vec![
            Box::new(PlaceRainChart::new(place_rain)),
            Box::new(AreaRainChart::new()),
            Box::new(HistogramChart::new()),
            Box::new(PlaceIconsChart::new(place_icons)),
        ];
        Self {
            renderers,
            style,
            messages,
        }
    }

    /// Creates the set from chart configuration and a message language, and
    /// registers the configured font.
    pub fn from_config(config: &ChartsConfig, language: &str) -> Result<Self> {
        let messages = Messages::new(language)?;
        fonts::prepare(&config.font_family, config.font_path.as_deref(), language)?;
        Ok(Self::new(
            ChartStyle::from_config(config),
            messages,
            config.place_rain.clone(),
            config.place_icons.clone(),
        ))
    }

    /// Renderers in output order.
    pub fn renderers(&self) -> impl Iterator<Item = &dyn ChartRenderer> {
        self.renderers.iter().map(|r| r.as_ref())
    }

    fn draw(&self, renderer: &dyn ChartRenderer, run: &Run) -> Result<ChartCanvas> {
        let ctx = RenderContext {
            style: &self.style,
            messages: &self.messages,
        };
        let mut canvas = ChartCanvas::new(self.style.width, self.style.height);
        renderer.render(run, &ctx, &mut canvas)?;
        debug!(chart = renderer.name(), "Drew {}", renderer.description());
        Ok(canvas)
    }

    /// Render every chart to PNG bytes.
    #[instrument(skip_all, fields(hour = %run.hour))]
    pub fn render_to_bytes(&self, run: &Run) -> Result<Vec<RenderedChart>> {
        self.renderers()
            .map(|renderer| {
                Ok(RenderedChart {
                    name: renderer.name(),
                    file_name: renderer.file_name(),
                    png: self.draw(renderer, run)?.encode_png()?,
                })
            })
            .collect()
    }

    /// Render every chart and save them under `dir`.
    ///
    /// All charts are drawn before the first file is written. Returns the
    /// written paths in output order.
    #[instrument(skip_all, fields(hour = %run.hour, dir = %dir.display()))]
    pub fn render_all(&self, run: &Run, dir: &Path) -> Result<Vec<PathBuf>> {
        let canvases = self
            .renderers()
            .map(|renderer| Ok((renderer.file_name(), self.draw(renderer, run)?)))
            .collect::<Result<Vec<_>>>()?;

        fs::create_dir_all(dir)?;
        let mut paths = Vec::with_capacity(canvases.len());
        for (file_name, canvas) in canvases {
            let path = dir.join(file_name);
            canvas.save_png(&path)?;
            paths.push(path);
        }

        info!("Rendered {} charts to {}", paths.len(), dir.display());
        Ok(paths)
    }
}

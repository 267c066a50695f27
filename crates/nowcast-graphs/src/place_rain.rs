//! Precipitation probability per location over the hour.

use crate::aggregator::place_series;
use crate::canvas::ChartCanvas;
use crate::color::rgb;
use crate::traits::{ChartRenderer, RenderContext};
use crate::utils::{
    draw_legend, legend_height, step_range, tick_label, time_ticks, LegendEntry, LegendMark,
};
use nowcast_common::types::Run;
use nowcast_common::Result;
use nowcast_config::PlaceConfig;
use nowcast_i18n::MessageKey;
use plotters::prelude::*;
use tracing::debug;

const LEGEND_COLUMNS: usize = 3;

/// One line per configured location, y fixed to `0..100`.
#[derive(Debug, Clone)]
pub struct PlaceRainChart {
    places: Vec<PlaceConfig>,
}

impl PlaceRainChart {
    /// Chart over the given locations, drawn in order.
    pub fn new(places: Vec<PlaceConfig>) -> Self {
        Self { places }
    }

    fn legend(&self, ctx: &RenderContext<'_>) -> Result<Vec<LegendEntry>> {
        self.places
            .iter()
            .map(|place| {
                let label = ctx
                    .messages
                    .get_with_args(MessageKey::PlaceRainSeries, &[("place", place.display.clone())])?;
                Ok(LegendEntry {
                    label,
                    color: rgb(place.color.value()),
                    mark: LegendMark::Line,
                })
            })
            .collect()
    }
}

impl ChartRenderer for PlaceRainChart {
    fn name(&self) -> &'static str {
        "place_rain"
    }

    fn file_name(&self) -> &'static str {
        "place_rain.png"
    }

    fn description(&self) -> &'static str {
        "5-minute precipitation probability per location"
    }

    fn render(&self, run: &Run, ctx: &RenderContext<'_>, canvas: &mut ChartCanvas) -> Result<()> {
        let style = ctx.style;
        let entries = self.legend(ctx)?;
        let time_axis = ctx.messages.get(MessageKey::TimeAxis)?;
        let value_axis = ctx.messages.get(MessageKey::PlaceRainAxis)?;
        let ticks = time_ticks(run);

        let root = canvas.root();
        root.fill(&WHITE)?;
        let (header, body) = root.split_vertically(legend_height(entries.len(), LEGEND_COLUMNS, style));
        draw_legend(&header, &entries, LEGEND_COLUMNS, style)?;

        let mut chart = ChartBuilder::on(&body)
            .margin(12)
            .x_label_area_size(48)
            .y_label_area_size(64)
            .build_cartesian_2d(step_range(run), 0.0..100.0)?;

        chart
            .configure_mesh()
            .x_labels(run.len())
            .x_label_formatter(&|x| tick_label(&ticks, *x))
            .y_labels(6)
            .disable_x_mesh()
            .light_line_style(TRANSPARENT)
            .bold_line_style(BLACK.mix(0.1))
            .x_desc(time_axis)
            .y_desc(value_axis)
            .label_style(style.text())
            .axis_desc_style(style.text())
            .draw()?;

        for (place, entry) in self.places.iter().zip(&entries) {
            let series = place_series(run, &place.key);
            debug!(place = %place.key, max = series.max(), "Drawing place series");
            chart.draw_series(LineSeries::new(
                series.values.iter().enumerate().map(|(step, v)| (step as f64, *v)),
                entry.color.stroke_width(2),
            ))?;
        }

        root.present()?;
        Ok(())
    }
}

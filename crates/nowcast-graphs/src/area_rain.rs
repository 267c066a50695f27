//! Rain-cloud coverage of the map over the hour.

use crate::aggregator::{density_max, density_series};
use crate::canvas::ChartCanvas;
use crate::color::{rgb, DENSITY_LINE};
use crate::traits::{ChartRenderer, RenderContext};
use crate::utils::{
    draw_legend, legend_height, step_range, tick_label, time_ticks, LegendEntry, LegendMark,
};
use nowcast_common::types::Run;
use nowcast_common::Result;
use nowcast_i18n::MessageKey;
use plotters::prelude::*;

/// A single line of per-step coverage.
#[derive(Debug, Clone, Default)]
pub struct AreaRainChart;

impl AreaRainChart {
    /// Creates the coverage chart.
    pub fn new() -> Self {
        Self
    }
}

/// Upper bound of the y axis: a tenth of headroom, never below 1.
fn y_limit(max: f64) -> f64 {
    (max * 1.1).max(1.0)
}

impl ChartRenderer for AreaRainChart {
    fn name(&self) -> &'static str {
        "area_rain"
    }

    fn file_name(&self) -> &'static str {
        "area_rain.png"
    }

    fn description(&self) -> &'static str {
        "Share of the map covered by rain clouds"
    }

    fn render(&self, run: &Run, ctx: &RenderContext<'_>, canvas: &mut ChartCanvas) -> Result<()> {
        let style = ctx.style;
        let time_axis = ctx.messages.get(MessageKey::TimeAxis)?;
        let value_axis = ctx.messages.get(MessageKey::AreaRainAxis)?;
        let ticks = time_ticks(run);
        let densities = density_series(run);
        let entries = [LegendEntry {
            label: ctx.messages.get(MessageKey::AreaRainSeries)?,
            color: rgb(DENSITY_LINE),
            mark: LegendMark::Line,
        }];

        let root = canvas.root();
        root.fill(&WHITE)?;
        let (header, body) = root.split_vertically(legend_height(entries.len(), 1, style));
        draw_legend(&header, &entries, 1, style)?;

        let mut chart = ChartBuilder::on(&body)
            .margin(12)
            .x_label_area_size(48)
            .y_label_area_size(64)
            .build_cartesian_2d(step_range(run), 0.0..y_limit(density_max(run)))?;

        chart
            .configure_mesh()
            .x_labels(run.len())
            .x_label_formatter(&|x| tick_label(&ticks, *x))
            .disable_x_mesh()
            .light_line_style(TRANSPARENT)
            .bold_line_style(BLACK.mix(0.1))
            .x_desc(time_axis)
            .y_desc(value_axis)
            .label_style(style.text())
            .axis_desc_style(style.text())
            .draw()?;

        chart.draw_series(LineSeries::new(
            densities.iter().enumerate().map(|(step, v)| (step as f64, *v)),
            rgb(DENSITY_LINE).stroke_width(2),
        ))?;

        root.present()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nowcast_common::test_utils::assert_approx_eq;

    #[test]
    fn test_y_limit() {
        assert_eq!(y_limit(0.0), 1.0);
        assert_approx_eq(y_limit(93.59), 102.949, 1e-9);
    }
}

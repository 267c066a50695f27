//! Stacked precipitation-intensity histogram.

use crate::aggregator::HistogramStack;
use crate::canvas::ChartCanvas;
use crate::color::{rgb, INTENSITY_BUCKETS};
use crate::traits::{ChartRenderer, RenderContext};
use crate::utils::{
    draw_legend, legend_height, step_range, tick_label, time_ticks, LegendEntry, LegendMark,
};
use nowcast_common::types::Run;
use nowcast_common::Result;
use nowcast_i18n::MessageKey;
use plotters::prelude::*;

const LEGEND_COLUMNS: usize = 4;
const BAR_HALF_WIDTH: f64 = 0.4;

/// Eight bucket layers per step, lowest intensity at the bottom.
#[derive(Debug, Clone, Default)]
pub struct HistogramChart;

impl HistogramChart {
    /// Creates the histogram chart.
    pub fn new() -> Self {
        Self
    }
}

fn legend() -> Vec<LegendEntry> {
    INTENSITY_BUCKETS
        .iter()
        .map(|bucket| LegendEntry {
            label: bucket.label.to_string(),
            color: rgb(bucket.color),
            mark: LegendMark::Swatch,
        })
        .collect()
}

impl ChartRenderer for HistogramChart {
    fn name(&self) -> &'static str {
        "area_histgram"
    }

    fn file_name(&self) -> &'static str {
        "area_histgram.png"
    }

    fn description(&self) -> &'static str {
        "Share of each precipitation intensity"
    }

    fn render(&self, run: &Run, ctx: &RenderContext<'_>, canvas: &mut ChartCanvas) -> Result<()> {
        let style = ctx.style;
        let entries = legend();
        let time_axis = ctx.messages.get(MessageKey::TimeAxis)?;
        let value_axis = ctx.messages.get(MessageKey::HistogramAxis)?;
        let ticks = time_ticks(run);
        let stack = HistogramStack::from_run(run);
        let y_max = (stack.max_total().max(1) as f64) * 1.05;

        let root = canvas.root();
        root.fill(&WHITE)?;
        let (header, body) = root.split_vertically(legend_height(entries.len(), LEGEND_COLUMNS, style));
        draw_legend(&header, &entries, LEGEND_COLUMNS, style)?;

        let mut chart = ChartBuilder::on(&body)
            .margin(12)
            .x_label_area_size(48)
            .y_label_area_size(72)
            .build_cartesian_2d(step_range(run), 0.0..y_max)?;

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

        for (layer, bucket) in stack.layers.iter().zip(INTENSITY_BUCKETS.iter()) {
            let fill = rgb(bucket.color).filled();
            chart.draw_series(layer.counts.iter().zip(&layer.bottoms).enumerate().map(
                |(step, (count, bottom))| {
                    let x = step as f64;
                    Rectangle::new(
                        [
                            (x - BAR_HALF_WIDTH, *bottom as f64),
                            (x + BAR_HALF_WIDTH, bottom.saturating_add(*count) as f64),
                        ],
                        fill,
                    )
                },
            ))?;
        }

        root.present()?;
        Ok(())
    }
}

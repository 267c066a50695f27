//! Time axis labels and legend layout shared by the charts.

use crate::traits::ChartStyle;
use nowcast_common::types::Run;
use nowcast_common::Result;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::ops::Range;

/// Steps that carry an x-axis label, ten minutes apart.
pub const TICK_STEPS: [usize; 6] = [1, 3, 5, 7, 9, 11];

/// Wall clock label such as `14:10`; the hour is kept as received.
pub fn clock_label(hour: &str, minute: u32) -> String {
    format!("{}:{:02}", hour, minute)
}

/// Tick positions and labels for the steps present in the run.
pub fn time_ticks(run: &Run) -> Vec<(usize, String)> {
    TICK_STEPS
        .iter()
        .enumerate()
        .filter(|(_, step)| **step < run.len())
        .map(|(i, step)| (*step, clock_label(&run.hour, i as u32 * 10)))
        .collect()
}

/// Label of the tick closest to `x`, empty between ticks.
pub fn tick_label(ticks: &[(usize, String)], x: f64) -> String {
    ticks
        .iter()
        .find(|(step, _)| (*step as f64 - x).abs() < 0.5)
        .map(|(_, label)| label.clone())
        .unwrap_or_default()
}

/// X range with half a step of padding on both sides.
pub fn step_range(run: &Run) -> Range<f64> {
    -0.5..(run.len().max(1) as f64 - 0.5)
}

/// Marker drawn next to a legend label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendMark {
    /// Short line, for line series.
    Line,
    /// Filled box, for bars and wedges.
    Swatch,
}

/// One legend entry.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    /// Text next to the marker.
    pub label: String,
    /// Marker color.
    pub color: RGBColor,
    /// Marker shape.
    pub mark: LegendMark,
}

/// Pixel height a legend of `entries` laid out in `columns` needs.
pub fn legend_height(entries: usize, columns: usize, style: &ChartStyle) -> i32 {
    let rows = entries.div_ceil(columns.max(1)) as i32;
    rows * style.row_height() + 8
}

/// Draw entries row by row, left to right, in equal-width columns.
pub fn draw_legend<DB>(
    area: &DrawingArea<DB, Shift>,
    entries: &[LegendEntry],
    columns: usize,
    style: &ChartStyle,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    if entries.is_empty() {
        return Ok(());
    }
    let columns = columns.clamp(1, entries.len());
    let (width, _) = area.dim_in_pixel();
    let cell_width = width as i32 / columns as i32;
    let row_height = style.row_height();
    let text = style.text().pos(Pos::new(HPos::Left, VPos::Center));

    for (i, entry) in entries.iter().enumerate() {
        let x = (i % columns) as i32 * cell_width + 12;
        let y = (i / columns) as i32 * row_height + row_height / 2 + 4;
        match entry.mark {
            LegendMark::Line => area.draw(&PathElement::new(
                vec![(x, y), (x + 24, y)],
                entry.color.stroke_width(2),
            ))?,
            LegendMark::Swatch => {
                area.draw(&Rectangle::new([(x, y - 6), (x + 24, y + 6)], entry.color.filled()))?;
                area.draw(&Rectangle::new(
                    [(x, y - 6), (x + 24, y + 6)],
                    BLACK.mix(0.3).stroke_width(1),
                ))?;
            }
        }
        area.draw(&Text::new(entry.label.clone(), (x + 30, y), text.clone()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nowcast_common::test_utils::{event_with, sample_run};

    #[test]
    fn test_ticks_for_full_hour() {
        let ticks = time_ticks(&sample_run());
        let expected: Vec<(usize, String)> = vec![
            (1, "14:00".to_string()),
            (3, "14:10".to_string()),
            (5, "14:20".to_string()),
            (7, "14:30".to_string()),
            (9, "14:40".to_string()),
            (11, "14:50".to_string()),
        ];
        assert_eq!(ticks, expected);
    }

    #[test]
    fn test_ticks_stop_at_run_length() {
        let run = Run::from_event(event_with("0", &[0.0; 6], &[])).unwrap();
        let steps: Vec<usize> = time_ticks(&run).iter().map(|(s, _)| *s).collect();
        assert_eq!(steps, vec![1, 3, 5]);
        assert_eq!(time_ticks(&run)[0].1, "0:00");
    }

    #[test]
    fn test_zero_padded_hour_is_kept() {
        let run = Run::from_event(event_with("09", &[0.0; 12], &[])).unwrap();
        let labels: Vec<String> = time_ticks(&run).into_iter().map(|(_, l)| l).collect();
        assert_eq!(labels, vec!["09:00", "09:10", "09:20", "09:30", "09:40", "09:50"]);
    }

    #[test]
    fn test_tick_label_lookup() {
        let ticks = time_ticks(&sample_run());
        assert_eq!(tick_label(&ticks, 3.0), "14:10");
        assert_eq!(tick_label(&ticks, 2.0), "");
        assert_eq!(tick_label(&ticks, 11.2), "14:50");
    }

    #[test]
    fn test_step_range_pads_half_a_step() {
        assert_eq!(step_range(&sample_run()), -0.5..11.5);
    }

    #[test]
    fn test_legend_height_rounds_rows_up() {
        let style = ChartStyle {
            width: 640,
            height: 480,
            font_family: "sans-serif".to_string(),
            font_size: 14,
            title_size: 18,
        };
        assert_eq!(legend_height(8, 4, &style), 2 * style.row_height() + 8);
        assert_eq!(legend_height(5, 3, &style), 2 * style.row_height() + 8);
        assert_eq!(legend_height(1, 3, &style), style.row_height() + 8);
    }
}

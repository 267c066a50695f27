//! Pie icons: one clock-face pie per location, one wedge per step.

use crate::aggregator::{place_levels, PopLevel};
use crate::canvas::ChartCanvas;
use crate::color::rgb;
use crate::traits::{ChartRenderer, ChartStyle, RenderContext};
use nowcast_common::types::Run;
use nowcast_common::{truncate_string, Result};
use nowcast_config::PlaceConfig;
use nowcast_i18n::{MessageKey, Messages};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::f64::consts::PI;

/// Icons that fit next to the caption cell.
pub const MAX_ICONS: usize = 5;

const GRID: (usize, usize) = (2, 3);
const QUARTER_LABELS: [&str; 4] = ["00", "15", "30", "45"];
const FIRST_LABEL_RADIUS: f64 = 1.15;
const LABEL_RADIUS: f64 = 1.0;
const LABEL_OFFSET_Y: f64 = -0.03;
const ARC_SEGMENTS: usize = 12;
const TITLE_CHARS: usize = 12;

/// Start and end angle in degrees of wedge `step`, counter-clockwise from
/// 3 o'clock. The first wedge starts at 12 o'clock; later wedges follow
/// clockwise, so `end < start`.
pub fn wedge_span(step: usize, steps: usize) -> (f64, f64) {
    let width = 360.0 / steps.max(1) as f64;
    let start = 90.0 - step as f64 * width;
    (start, start - width)
}

/// Minute label of a wedge that starts on a quarter hour.
pub fn quarter_label(step: usize, steps: usize) -> Option<&'static str> {
    if steps == 0 || (step * 4) % steps != 0 {
        return None;
    }
    QUARTER_LABELS.get(step * 4 / steps).copied()
}

/// Label anchor of wedge `step` in radius units from the pie center.
pub fn label_position(step: usize, steps: usize) -> (f64, f64) {
    let (start, end) = wedge_span(step, steps);
    let bisector = ((start + end) / 2.0).to_radians();
    let distance = if step == 0 { FIRST_LABEL_RADIUS } else { LABEL_RADIUS };
    (
        distance * bisector.cos(),
        distance * bisector.sin() + LABEL_OFFSET_Y,
    )
}

fn to_pixel(center: (i32, i32), radius: f64, point: (f64, f64)) -> (i32, i32) {
    (
        center.0 + (point.0 * radius).round() as i32,
        center.1 - (point.1 * radius).round() as i32,
    )
}

/// Closed outline of a wedge: the center, then the arc from start to end.
pub fn wedge_outline(center: (i32, i32), radius: f64, span: (f64, f64)) -> Vec<(i32, i32)> {
    let (start, end) = span;
    let mut points = Vec::with_capacity(ARC_SEGMENTS + 2);
    points.push(center);
    for i in 0..=ARC_SEGMENTS {
        let angle = (start + (end - start) * i as f64 / ARC_SEGMENTS as f64) * PI / 180.0;
        points.push(to_pixel(center, radius, (angle.cos(), angle.sin())));
    }
    points
}

/// Pie center and radius inside a grid cell, below the title row.
fn pie_geometry(width: i32, height: i32, style: &ChartStyle) -> ((i32, i32), f64) {
    let title_height = style.row_height() + 8;
    let radius = f64::from(width.min(height - title_height)) * 0.36;
    let center = (width / 2, title_height + (height - title_height) / 2);
    (center, radius)
}

/// A 2×3 grid of location pies; the last cell holds the caption.
#[derive(Debug, Clone)]
pub struct PlaceIconsChart {
    places: Vec<PlaceConfig>,
}

impl PlaceIconsChart {
    /// Icons for the given locations; anything past [`MAX_ICONS`] is dropped.
    pub fn new(mut places: Vec<PlaceConfig>) -> Self {
        places.truncate(MAX_ICONS);
        Self { places }
    }

    fn draw_icon<DB>(
        &self,
        cell: &DrawingArea<DB, Shift>,
        run: &Run,
        place: &PlaceConfig,
        style: &ChartStyle,
    ) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        let (width, height) = cell.dim_in_pixel();
        let (width, height) = (width as i32, height as i32);

        cell.draw(&Text::new(
            truncate_string(&place.display, TITLE_CHARS),
            (width / 2, 6),
            style.title().pos(Pos::new(HPos::Center, VPos::Top)),
        ))?;

        let (center, radius) = pie_geometry(width, height, style);
        let levels = place_levels(run, &place.key);
        let steps = levels.len();
        let label_style = style.text().pos(Pos::new(HPos::Center, VPos::Center));

        for (step, level) in levels.iter().enumerate() {
            let outline = wedge_outline(center, radius, wedge_span(step, steps));
            cell.draw(&Polygon::new(outline.clone(), rgb(level.color()).filled()))?;
            let mut edge = outline;
            edge.push(center);
            cell.draw(&PathElement::new(edge, WHITE.stroke_width(1)))?;
        }

        for step in 0..steps {
            if let Some(label) = quarter_label(step, steps) {
                let anchor = to_pixel(center, radius, label_position(step, steps));
                cell.draw(&Text::new(label, anchor, label_style.clone()))?;
            }
        }
        Ok(())
    }
}

fn draw_caption<DB>(
    cell: &DrawingArea<DB, Shift>,
    run: &Run,
    messages: &Messages,
    style: &ChartStyle,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let caption = messages.get_with_args(
        MessageKey::IconsCaption,
        &[("hour", run.hour_of_day().to_string())],
    )?;
    let legend = [
        (PopLevel::Rain, MessageKey::LegendRain, MessageKey::LegendRainDetail),
        (PopLevel::Caution, MessageKey::LegendCaution, MessageKey::LegendCautionDetail),
        (PopLevel::NoRain, MessageKey::LegendClear, MessageKey::LegendClearDetail),
    ];

    let row = style.row_height();
    let left = 12;
    let text = style.text().pos(Pos::new(HPos::Left, VPos::Center));
    cell.draw(&Text::new(
        caption,
        (left, 6),
        style.title().pos(Pos::new(HPos::Left, VPos::Top)),
    ))?;

    let mut y = 6 + row * 2;
    for (level, title, detail) in legend {
        let color = rgb(level.color());
        cell.draw(&Rectangle::new([(left, y - 7), (left + 14, y + 7)], color.filled()))?;
        cell.draw(&Rectangle::new(
            [(left, y - 7), (left + 14, y + 7)],
            BLACK.mix(0.3).stroke_width(1),
        ))?;
        cell.draw(&Text::new(messages.get(title)?, (left + 22, y), text.clone()))?;
        cell.draw(&Text::new(messages.get(detail)?, (left + 22, y + row), text.clone()))?;
        y += row * 2 + 4;
    }
    Ok(())
}

impl ChartRenderer for PlaceIconsChart {
    fn name(&self) -> &'static str {
        "place_icons"
    }

    fn file_name(&self) -> &'static str {
        "place_icons.png"
    }

    fn description(&self) -> &'static str {
        "Per-location rain outlook as clock-face pies"
    }

    fn render(&self, run: &Run, ctx: &RenderContext<'_>, canvas: &mut ChartCanvas) -> Result<()> {
        let root = canvas.root();
        root.fill(&WHITE)?;
        let cells = root.split_evenly(GRID);

        for (place, cell) in self.places.iter().zip(&cells) {
            self.draw_icon(cell, run, place, ctx.style)?;
        }
        if let Some(cell) = cells.last() {
            draw_caption(cell, run, ctx.messages, ctx.style)?;
        }

        root.present()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{CLEAR, RAIN};
    use crate::fonts;
    use nowcast_common::test_utils::sample_run;

    const FONT: &str = "Nowcast Icons Sans";

    fn assert_close(left: f64, right: f64) {
        assert!((left - right).abs() < 1e-9, "{} != {}", left, right);
    }

    #[test]
    fn test_wedges_run_clockwise_from_noon() {
        assert_eq!(wedge_span(0, 12), (90.0, 60.0));
        assert_eq!(wedge_span(1, 12), (60.0, 30.0));
        assert_eq!(wedge_span(3, 12), (0.0, -30.0));
        assert_eq!(wedge_span(11, 12), (-240.0, -270.0));
        assert_eq!(wedge_span(0, 4), (90.0, 0.0));
    }

    #[test]
    fn test_quarter_labels() {
        let labelled: Vec<(usize, &str)> = (0..12)
            .filter_map(|step| quarter_label(step, 12).map(|l| (step, l)))
            .collect();
        assert_eq!(labelled, vec![(0, "00"), (3, "15"), (6, "30"), (9, "45")]);
        assert_eq!(quarter_label(0, 0), None);
    }

    #[test]
    fn test_label_positions() {
        let (x, y) = label_position(0, 12);
        assert_close(x, 1.15 * 75f64.to_radians().cos());
        assert_close(y, 1.15 * 75f64.to_radians().sin() - 0.03);

        let (x, y) = label_position(3, 12);
        assert_close(x, (-15f64).to_radians().cos());
        assert_close(y, (-15f64).to_radians().sin() - 0.03);
    }

    #[test]
    fn test_wedge_outline_starts_at_center_and_top() {
        let outline = wedge_outline((100, 100), 50.0, wedge_span(0, 12));
        assert_eq!(outline.len(), ARC_SEGMENTS + 2);
        assert_eq!(outline[0], (100, 100));
        assert_eq!(outline[1], (100, 50));
        let last = outline[outline.len() - 1];
        assert!(last.0 > 100 && last.1 < 100);
    }

    #[test]
    fn test_icon_count_is_capped() {
        let places = (0..7)
            .map(|i| PlaceConfig::new(&format!("p{}", i), 0x123456, "x"))
            .collect();
        assert_eq!(PlaceIconsChart::new(places).places.len(), MAX_ICONS);
    }

    #[test]
    fn test_rendered_noon_wedges_follow_levels() {
        fonts::register_family(FONT, None).unwrap();
        let style = ChartStyle {
            width: 640,
            height: 480,
            font_family: FONT.to_string(),
            font_size: 14,
            title_size: 18,
        };
        let messages = Messages::new("en-US").unwrap();
        let ctx = RenderContext {
            style: &style,
            messages: &messages,
        };
        let chart = PlaceIconsChart::new(vec![
            PlaceConfig::new("tobita", 0x1E88E5, "Tobita"),
            PlaceConfig::new("kanku", 0x81C784, "Kansai Airport"),
        ]);

        let mut canvas = ChartCanvas::new(style.width, style.height);
        let cells: Vec<((i32, i32), (u32, u32))> = canvas
            .root()
            .split_evenly(GRID)
            .iter()
            .map(|cell| (cell.get_base_pixel(), cell.dim_in_pixel()))
            .collect();
        chart.render(&sample_run(), &ctx, &mut canvas).unwrap();

        // Middle of the first wedge, between 12 and 1 o'clock.
        let noon_wedge = |cell: usize| {
            let ((left, top), (width, height)) = cells[cell];
            let (center, radius) = pie_geometry(width as i32, height as i32, &style);
            let bisector = 75f64.to_radians();
            let (x, y) = to_pixel(center, radius * 0.6, (bisector.cos(), bisector.sin()));
            canvas.pixel(left + x, top + y)
        };
        assert_eq!(noon_wedge(0), Some(rgb(RAIN)));
        assert_eq!(noon_wedge(1), Some(rgb(CLEAR)));
        // Unused cells stay blank.
        assert_eq!(noon_wedge(2), Some(WHITE));
    }
}

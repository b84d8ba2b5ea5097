//! PNG rendering of [`ChartSpec`]s with `plotters`.

use chrono::{Duration, NaiveDate};
use plotters::prelude::*;
use std::path::Path;
use tracing::info;

use super::ChartRenderer;
use super::chart::{Bar, ChartData, ChartSpec, LineSeries as Line};
use crate::config::Layout;
use crate::error::{DashboardError, Result};

const PALETTE: [RGBColor; 8] = [
    RGBColor(31, 119, 180),  // Blue
    RGBColor(255, 127, 14),  // Orange
    RGBColor(44, 160, 44),   // Green
    RGBColor(214, 39, 40),   // Red
    RGBColor(148, 103, 189), // Purple
    RGBColor(140, 86, 75),   // Brown
    RGBColor(227, 119, 194), // Pink
    RGBColor(127, 127, 127), // Gray
];

const BAR_COLOR: RGBColor = RGBColor(49, 104, 160);

/// Draws charts to PNG files sized by the page layout.
#[derive(Debug, Clone, Copy)]
pub struct PngRenderer {
    layout: Layout,
}

impl PngRenderer {
    pub fn new(layout: Layout) -> Self {
        Self { layout }
    }
}

impl ChartRenderer for PngRenderer {
    fn draw(&self, spec: &ChartSpec, path: &Path) -> Result<()> {
        match &spec.data {
            ChartData::Lines(lines) => {
                draw_lines(spec, lines, path, self.layout.line_chart_size())?
            }
            ChartData::Bars(bars) => draw_bars(spec, bars, path, self.layout.bar_chart_size())?,
        }
        info!(chart = spec.name, path = %path.display(), "Chart rendered");
        Ok(())
    }

    fn extension(&self) -> &'static str {
        "png"
    }
}

/// Upper bound of the y axis: the maximum plus 10%, or 1.0 for empty charts.
pub fn y_axis_max(max: f64) -> f64 {
    if max > 0.0 { max * 1.1 } else { 1.0 }
}

/// Compact tick label: `1.5M`, `12k`, `0.5`.
pub fn format_value(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1e9 {
        format!("{:.1}B", value / 1e9)
    } else if abs >= 1e6 {
        format!("{:.1}M", value / 1e6)
    } else if abs >= 1e3 {
        format!("{:.0}k", value / 1e3)
    } else if abs >= 1.0 || abs == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

fn day_offset(origin: NaiveDate, date: NaiveDate) -> f64 {
    (date - origin).num_days() as f64
}

fn day_label(origin: NaiveDate, offset: f64) -> String {
    (origin + Duration::days(offset.round() as i64))
        .format("%Y-%m")
        .to_string()
}

fn draw_lines(spec: &ChartSpec, lines: &[Line], path: &Path, size: (u32, u32)) -> Result<()> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(DashboardError::render)?;

    let (origin, span) = match spec.date_range() {
        Some((lo, hi)) => (lo, day_offset(lo, hi).max(1.0)),
        None => (NaiveDate::MIN, 1.0),
    };

    let mut chart = ChartBuilder::on(&root)
        .caption(spec.title, ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(0f64..span, 0f64..y_axis_max(spec.max_value()))
        .map_err(DashboardError::render)?;

    chart
        .configure_mesh()
        .x_desc(spec.x_label)
        .y_desc(spec.y_label.as_str())
        .x_labels(8)
        .x_label_formatter(&|x| day_label(origin, *x))
        .y_label_formatter(&|y| format_value(*y))
        .draw()
        .map_err(DashboardError::render)?;

    for (i, line) in lines.iter().enumerate() {
        let color = PALETTE[i % PALETTE.len()];
        let mut labeled = false;
        for segment in &line.segments {
            let points = segment.iter().map(|(d, v)| (day_offset(origin, *d), *v));
            let series = chart
                .draw_series(LineSeries::new(points, color.stroke_width(2)))
                .map_err(DashboardError::render)?;
            if !labeled {
                series.label(line.label.clone()).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
                labeled = true;
            }
        }
    }

    if !spec.is_empty() {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(DashboardError::render)?;
    }

    root.present().map_err(DashboardError::render)?;
    Ok(())
}

fn draw_bars(spec: &ChartSpec, bars: &[Bar], path: &Path, size: (u32, u32)) -> Result<()> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(DashboardError::render)?;

    let slots = bars.len().max(1) as u32;
    let mut chart = ChartBuilder::on(&root)
        .caption(spec.title, ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d((0u32..slots).into_segmented(), 0f64..y_axis_max(spec.max_value()))
        .map_err(DashboardError::render)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(spec.x_label)
        .y_desc(spec.y_label.as_str())
        .x_labels(slots as usize)
        .x_label_formatter(&|x| match x {
            SegmentValue::CenterOf(i) => bars
                .get(*i as usize)
                .map(|b| b.label.clone())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .y_label_formatter(&|y| format_value(*y))
        .draw()
        .map_err(DashboardError::render)?;

    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(BAR_COLOR.filled())
                .margin(20)
                .data(bars.iter().enumerate().map(|(i, b)| (i as u32, b.value))),
        )
        .map_err(DashboardError::render)?;

    root.present().map_err(DashboardError::render)?;
    Ok(())
}

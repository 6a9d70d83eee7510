//! Static Chart Renderer
//! Draws charts with plotters into an RGB buffer and writes them as PNG.
//!
//! Both charts use a 1200x600 canvas:
//! 1. Histogram: seven bars with black edges, horizontal grid lines
//! 2. Line chart: two point-marked series over five month labels, legend
//!    in the upper left

use crate::charts::plotter::{month_label, HistogramData, LineChartData, PlotError, MONTHS};
use image::{ImageFormat, RgbImage};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

pub const CHART_SIZE: (u32, u32) = (1200, 600);

const HISTOGRAM_TITLE: &str =
    "Distribution of Average Outstanding Balance per Borrower (November 2022)";
const HISTOGRAM_X_DESC: &str = "Average Balance per borrower in dollars";
const HISTOGRAM_Y_DESC: &str = "Number of States";

const LINE_TITLE: &str = "Change in Average Outstanding Balance Over Time";
const LINE_X_DESC: &str = "Month";
const LINE_Y_DESC: &str = "Average balance in dollars";

// Colors (RGB)
const BAR_FILL: RGBColor = RGBColor(91, 155, 213);
const SERIES_COLORS: [RGBColor; 2] = [RGBColor(91, 155, 213), RGBColor(237, 125, 49)];

type Canvas<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

pub struct ChartRenderer;

impl ChartRenderer {
    /// Render the histogram and save it to `output_path`.
    pub fn render_histogram(data: &HistogramData, output_path: &Path) -> Result<(), PlotError> {
        Self::render_png(output_path, |root| Self::draw_histogram(root, data))
    }

    /// Render the two-region line chart and save it to `output_path`.
    pub fn render_line_chart(data: &LineChartData, output_path: &Path) -> Result<(), PlotError> {
        Self::render_png(output_path, |root| Self::draw_line_chart(root, data))
    }

    /// Draw into a white in-memory canvas, then encode the pixels as PNG.
    fn render_png<F>(output_path: &Path, draw: F) -> Result<(), PlotError>
    where
        F: FnOnce(&Canvas<'_>) -> Result<(), PlotError>,
    {
        let (width, height) = CHART_SIZE;
        let mut buffer = vec![0u8; (width * height * 3) as usize];

        {
            let root = BitMapBackend::with_buffer(&mut buffer, CHART_SIZE).into_drawing_area();
            root.fill(&WHITE)
                .map_err(|e| PlotError::DrawingArea(e.to_string()))?;
            draw(&root)?;
            root.present()
                .map_err(|e| PlotError::Drawing(e.to_string()))?;
        }

        let image = RgbImage::from_raw(width, height, buffer).ok_or_else(|| {
            PlotError::InvalidData("pixel buffer does not match chart size".to_string())
        })?;
        image.save_with_format(output_path, ImageFormat::Png)?;

        tracing::info!(path = %output_path.display(), "chart saved");
        Ok(())
    }

    fn draw_histogram(root: &Canvas<'_>, data: &HistogramData) -> Result<(), PlotError> {
        let (x_min, x_max) = data.x_range();
        let y_max = data.max_count() as u32 + 1;

        let mut chart = ChartBuilder::on(root)
            .caption(HISTOGRAM_TITLE, ("sans-serif", 26))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(70)
            .build_cartesian_2d(x_min..x_max, 0u32..y_max)
            .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .bold_line_style(BLACK.mix(0.2))
            .light_line_style(TRANSPARENT)
            .x_desc(HISTOGRAM_X_DESC)
            .y_desc(HISTOGRAM_Y_DESC)
            .axis_desc_style(("sans-serif", 20))
            .label_style(("sans-serif", 16))
            .x_label_formatter(&|x| format!("{:.0}", x))
            .draw()
            .map_err(|e| PlotError::Drawing(e.to_string()))?;

        chart
            .draw_series(data.bins.iter().map(|bin| {
                Rectangle::new(
                    [(bin.lower, 0u32), (bin.upper, bin.count as u32)],
                    BAR_FILL.filled(),
                )
            }))
            .map_err(|e| PlotError::Drawing(e.to_string()))?;

        // Black bar edges
        chart
            .draw_series(data.bins.iter().map(|bin| {
                Rectangle::new(
                    [(bin.lower, 0u32), (bin.upper, bin.count as u32)],
                    BLACK.stroke_width(1),
                )
            }))
            .map_err(|e| PlotError::Drawing(e.to_string()))?;

        Ok(())
    }

    fn draw_line_chart(root: &Canvas<'_>, data: &LineChartData) -> Result<(), PlotError> {
        let (lo, hi) = data.y_bounds();
        if !lo.is_finite() || !hi.is_finite() {
            return Err(PlotError::InvalidData(
                "line chart has no values".to_string(),
            ));
        }
        let pad = ((hi - lo) * 0.1).max(1.0);
        let last = (MONTHS.len() - 1) as f64;

        let mut chart = ChartBuilder::on(root)
            .caption(LINE_TITLE, ("sans-serif", 26))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(90)
            .build_cartesian_2d(-0.25..last + 0.25, (lo - pad)..(hi + pad))
            .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

        chart
            .configure_mesh()
            .x_labels(MONTHS.len() * 2)
            .x_label_formatter(&month_label)
            .y_label_formatter(&|y| format!("{:.0}", y))
            .bold_line_style(BLACK.mix(0.2))
            .light_line_style(TRANSPARENT)
            .x_desc(LINE_X_DESC)
            .y_desc(LINE_Y_DESC)
            .axis_desc_style(("sans-serif", 20))
            .label_style(("sans-serif", 16))
            .draw()
            .map_err(|e| PlotError::Drawing(e.to_string()))?;

        for (series, color) in data.series.iter().zip(SERIES_COLORS) {
            let points: Vec<(f64, f64)> = series
                .values
                .iter()
                .enumerate()
                .map(|(i, &v)| (i as f64, v))
                .collect();

            chart
                .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))
                .map_err(|e| PlotError::Drawing(e.to_string()))?
                .label(series.name.as_str())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });

            chart
                .draw_series(
                    points
                        .iter()
                        .map(|&point| Circle::new(point, 4, color.filled())),
                )
                .map_err(|e| PlotError::Drawing(e.to_string()))?;
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(("sans-serif", 16))
            .draw()
            .map_err(|e| PlotError::Drawing(e.to_string()))?;

        Ok(())
    }
}

/// Open a saved chart with the system's default viewer.
///
/// Launch failures are logged, not returned.
pub fn display(path: &Path) {
    match open::that(path) {
        Ok(()) => tracing::debug!(path = %path.display(), "opened chart viewer"),
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "could not open chart viewer"),
    }
}

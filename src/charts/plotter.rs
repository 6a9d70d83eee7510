//! Chart Plotter Module
//! Prepares histogram bins and line series from balance data.

use crate::data::Dataset;
use crate::input::{InputError, RegionSource};
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur during chart preparation and rendering
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error(transparent)]
    Input(#[from] InputError),
}

/// Number of equal-width histogram bins.
pub const HISTOGRAM_BINS: usize = 7;

/// Millions of dollars per borrower-count unit to hundreds of dollars.
pub const BALANCE_SCALE: f64 = 100.0;

/// X-axis labels of the line chart; one value per label is plotted.
pub const MONTHS: [&str; 5] = ["Nov 2022", "Dec 2022", "Jan 2023", "Feb 2023", "March 2023"];

pub const FIRST_REGION_PROMPT: &str = "Enter the first state for the comparison: ";
pub const SECOND_REGION_PROMPT: &str = "Enter the second state for the comparison: ";

/// One histogram bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Values and their bins.
#[derive(Debug, Clone, Serialize)]
pub struct HistogramData {
    pub values: Vec<f64>,
    pub bins: Vec<HistogramBin>,
}

impl HistogramData {
    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }

    /// Bin range covered by the x-axis.
    pub fn x_range(&self) -> (f64, f64) {
        match (self.bins.first(), self.bins.last()) {
            (Some(first), Some(last)) => (first.lower, last.upper),
            _ => (0.0, 1.0),
        }
    }
}

/// A named line of month values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
}

/// Two regions to compare.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChartData {
    pub series: Vec<Series>,
}

impl LineChartData {
    /// Smallest and largest plotted value across all series.
    pub fn y_bounds(&self) -> (f64, f64) {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            })
    }
}

/// Split `values` into `bin_count` equal-width bins over their range.
///
/// The last bin is closed on the right. A zero-width range is widened to
/// one unit around the value.
pub fn bin_values(values: &[f64], bin_count: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bin_count == 0 {
        return Vec::new();
    }

    let mut lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }

    let width = (hi - lo) / bin_count as f64;
    let mut bins: Vec<HistogramBin> = (0..bin_count)
        .map(|i| HistogramBin {
            lower: lo + width * i as f64,
            upper: if i + 1 == bin_count {
                hi
            } else {
                lo + width * (i + 1) as f64
            },
            count: 0,
        })
        .collect();

    for &v in values {
        let idx = (((v - lo) / width) as usize).min(bin_count - 1);
        bins[idx].count += 1;
    }

    bins
}

/// Tick label for a line-chart x position; blank between months.
pub fn month_label(x: &f64) -> String {
    let rounded = x.round();
    if (x - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    MONTHS
        .get(rounded as usize)
        .map(|m| m.to_string())
        .unwrap_or_default()
}

/// Builds chart inputs from the balance dataset.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Mean of the second and third value columns per region, scaled by
    /// [`BALANCE_SCALE`].
    pub fn average_balances(dataset: &Dataset) -> Result<Vec<f64>, PlotError> {
        if dataset.month_count() < 3 {
            return Err(PlotError::InvalidData(format!(
                "histogram needs at least 3 value columns, found {}",
                dataset.month_count()
            )));
        }

        dataset
            .rows
            .iter()
            .map(|row| match row.values.get(1..3) {
                Some([second, third]) => Ok((second + third) / 2.0 * BALANCE_SCALE),
                _ => Err(PlotError::InvalidData(format!(
                    "region {:?} has {} monthly values, the histogram needs 3",
                    row.region,
                    row.values.len()
                ))),
            })
            .collect()
    }

    pub fn histogram_data(dataset: &Dataset) -> Result<HistogramData, PlotError> {
        let values = Self::average_balances(dataset)?;
        if values.is_empty() {
            return Err(PlotError::InvalidData(
                "histogram needs at least one region".to_string(),
            ));
        }

        let bins = bin_values(&values, HISTOGRAM_BINS);
        Ok(HistogramData { values, bins })
    }

    /// Scaled values of one region, truncated to the month labels.
    ///
    /// `Ok(None)` when the region is absent.
    pub fn region_series(dataset: &Dataset, region: &str) -> Result<Option<Series>, PlotError> {
        let Some(row) = dataset.find_region(region) else {
            return Ok(None);
        };

        if row.values.len() < MONTHS.len() {
            return Err(PlotError::InvalidData(format!(
                "region {:?} has {} monthly values, the line chart needs {}",
                row.region,
                row.values.len(),
                MONTHS.len()
            )));
        }

        let values = row
            .values
            .iter()
            .take(MONTHS.len())
            .map(|v| v * BALANCE_SCALE)
            .collect();

        Ok(Some(Series {
            name: region.to_string(),
            values,
        }))
    }

    /// Series for two regions, or `None` if either is missing.
    ///
    /// Both names must pick out different rows; naming one region twice
    /// leaves the second slot empty and counts as missing.
    pub fn line_chart_data(
        dataset: &Dataset,
        first: &str,
        second: &str,
    ) -> Result<Option<LineChartData>, PlotError> {
        if first.to_lowercase() == second.to_lowercase() {
            tracing::debug!(region = %first, "same region named twice for the comparison");
            return Ok(None);
        }

        let first = Self::region_series(dataset, first)?;
        let second = Self::region_series(dataset, second)?;

        Ok(match (first, second) {
            (Some(a), Some(b)) => Some(LineChartData { series: vec![a, b] }),
            _ => None,
        })
    }

    /// Ask for two regions and build their series.
    pub fn line_chart_from_prompts(
        input: &mut dyn RegionSource,
        dataset: &Dataset,
    ) -> Result<Option<LineChartData>, PlotError> {
        let first = input.ask(FIRST_REGION_PROMPT)?;
        let second = input.ask(SECOND_REGION_PROMPT)?;
        Self::line_chart_data(dataset, &first, &second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Row;
    use crate::input::ScriptedSource;

    fn balance(rows: &[(&str, &[f64])]) -> Dataset {
        let width = rows.first().map(|(_, v)| v.len()).unwrap_or(6);
        Dataset {
            label_column: "State".into(),
            month_columns: (0..width).map(|i| format!("m{i}")).collect(),
            rows: rows
                .iter()
                .map(|(region, values)| Row::new(*region, values.to_vec()))
                .collect(),
        }
    }

    #[test]
    fn average_balances_use_second_and_third_values() {
        let ds = balance(&[
            ("A", &[9.0, 10.0, 20.0, 9.0, 9.0, 9.0]),
            ("B", &[0.0, 1.0, 2.0, 0.0, 0.0, 0.0]),
        ]);
        assert_eq!(
            ChartPlotter::average_balances(&ds).unwrap(),
            vec![1500.0, 150.0]
        );
    }

    #[test]
    fn histogram_requires_three_value_columns() {
        let ds = balance(&[("A", &[1.0, 2.0])]);
        assert!(matches!(
            ChartPlotter::histogram_data(&ds),
            Err(PlotError::InvalidData(_))
        ));
    }

    #[test]
    fn row_shorter_than_header_is_invalid_for_histogram() {
        let ds = Dataset {
            label_column: "State".into(),
            month_columns: vec!["a".into(), "b".into(), "c".into()],
            rows: vec![Row::new("NY", vec![1.0])],
        };
        assert!(matches!(
            ChartPlotter::average_balances(&ds),
            Err(PlotError::InvalidData(msg)) if msg.contains("\"NY\"")
        ));
    }

    #[test]
    fn histogram_of_no_regions_is_invalid() {
        let ds = balance(&[]);
        assert!(matches!(
            ChartPlotter::histogram_data(&ds),
            Err(PlotError::InvalidData(_))
        ));
    }

    #[test]
    fn seven_equal_bins_cover_the_range() {
        let values: Vec<f64> = (0..=14).map(f64::from).collect();
        let bins = bin_values(&values, HISTOGRAM_BINS);

        assert_eq!(bins.len(), 7);
        assert_eq!(bins[0].lower, 0.0);
        assert_eq!(bins[6].upper, 14.0);
        for bin in &bins {
            assert!((bin.upper - bin.lower - 2.0).abs() < 1e-9);
        }
        // [0,2) [2,4) ... [12,14]
        let counts: Vec<usize> = bins.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![2, 2, 2, 2, 2, 2, 3]);
        assert_eq!(counts.iter().sum::<usize>(), values.len());
    }

    #[test]
    fn identical_values_share_a_widened_range() {
        let bins = bin_values(&[5.0, 5.0, 5.0], HISTOGRAM_BINS);
        assert_eq!(bins.first().unwrap().lower, 4.5);
        assert_eq!(bins.last().unwrap().upper, 5.5);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 3);
        assert_eq!(bins[3].count, 3);
    }

    #[test]
    fn histogram_reports_tallest_bar() {
        let ds = balance(&[
            ("A", &[0.0, 1.0, 1.0, 0.0, 0.0, 0.0]),
            ("B", &[0.0, 1.0, 1.0, 0.0, 0.0, 0.0]),
            ("C", &[0.0, 8.0, 8.0, 0.0, 0.0, 0.0]),
        ]);
        let hist = ChartPlotter::histogram_data(&ds).unwrap();
        assert_eq!(hist.max_count(), 2);
        assert_eq!(hist.x_range(), (100.0, 800.0));
    }

    #[test]
    fn region_series_scales_and_keeps_five_values() {
        let ds = balance(&[("NY", &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0])]);
        let series = ChartPlotter::region_series(&ds, "ny").unwrap().unwrap();
        assert_eq!(series.name, "ny");
        assert_eq!(series.values, vec![100.0, 200.0, 300.0, 400.0, 500.0]);
    }

    #[test]
    fn short_rows_cannot_be_charted() {
        let ds = balance(&[("NY", &[1.0, 2.0, 3.0])]);
        assert!(matches!(
            ChartPlotter::region_series(&ds, "NY"),
            Err(PlotError::InvalidData(_))
        ));
    }

    #[test]
    fn missing_region_skips_the_chart() {
        let ds = balance(&[("NY", &[1.0; 6]), ("CA", &[2.0; 6])]);
        assert_eq!(ChartPlotter::line_chart_data(&ds, "NY", "Atlantis").unwrap(), None);
        assert_eq!(ChartPlotter::line_chart_data(&ds, "Atlantis", "ca").unwrap(), None);
    }

    #[test]
    fn prompts_drive_the_line_chart() {
        let ds = balance(&[("NY", &[1.0; 6]), ("CA", &[2.0; 6])]);
        let mut input = ScriptedSource::new(["ca", "NY"]);

        let data = ChartPlotter::line_chart_from_prompts(&mut input, &ds)
            .unwrap()
            .unwrap();

        assert_eq!(input.prompts, vec![FIRST_REGION_PROMPT, SECOND_REGION_PROMPT]);
        assert_eq!(data.series[0].name, "ca");
        assert_eq!(data.series[0].values, vec![200.0; 5]);
        assert_eq!(data.series[1].name, "NY");
        assert_eq!(data.y_bounds(), (100.0, 200.0));
    }

    #[test]
    fn same_region_twice_counts_as_missing() {
        let ds = balance(&[("NY", &[1.0; 6]), ("CA", &[2.0; 6])]);
        assert_eq!(ChartPlotter::line_chart_data(&ds, "ny", "NY").unwrap(), None);
        assert_eq!(ChartPlotter::line_chart_data(&ds, "CA", "ca").unwrap(), None);
    }

    #[test]
    fn month_labels_only_on_whole_positions() {
        assert_eq!(month_label(&0.0), "Nov 2022");
        assert_eq!(month_label(&4.0), "March 2023");
        assert_eq!(month_label(&0.5), "");
        assert_eq!(month_label(&-1.0), "");
        assert_eq!(month_label(&5.0), "");
    }
}

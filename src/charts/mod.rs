//! Charts module - histogram and line chart output

mod plotter;
mod renderer;

pub use plotter::{
    bin_values, month_label, ChartPlotter, HistogramBin, HistogramData, LineChartData, PlotError,
    Series, BALANCE_SCALE, FIRST_REGION_PROMPT, HISTOGRAM_BINS, MONTHS, SECOND_REGION_PROMPT,
};
pub use renderer::{display, ChartRenderer, CHART_SIZE};

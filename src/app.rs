//! Pipeline driver: load, report, chart.

use crate::charts::{display, ChartPlotter, ChartRenderer, HistogramBin, LineChartData};
use crate::config::Config;
use crate::data::{load_dataset, Dataset};
use crate::input::RegionSource;
use crate::report::{MonthlyIncreaseAnswer, Reporter, Summary};
use crate::stats::{DistributionSummary, StatsCalculator};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const REGIONS_NOT_FOUND: &str = "One or both states not found in the data.";

/// Everything one run computed.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub summary: Summary,
    pub monthly_increase: MonthlyIncreaseAnswer,
    pub histogram: HistogramReport,
    /// `None` when a compared region was not found.
    pub line_chart: Option<LineChartData>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistogramReport {
    pub distribution: DistributionSummary,
    pub bins: Vec<HistogramBin>,
}

/// Borrower and balance datasets, in that order.
pub fn load(config: &Config) -> Result<(Dataset, Dataset)> {
    let borrowers = load_dataset(&config.borrowers).with_context(|| {
        format!("loading borrowers from {}", config.borrowers.display())
    })?;
    let balance = load_dataset(&config.balance)
        .with_context(|| format!("loading balances from {}", config.balance.display()))?;
    Ok((borrowers, balance))
}

/// Answers 1 through 8.
pub fn answer_questions<W: Write>(
    borrowers: &Dataset,
    balance: &Dataset,
    input: &mut dyn RegionSource,
    out: W,
) -> Result<(Summary, MonthlyIncreaseAnswer)> {
    let summary = Summary::compute(borrowers, balance).context("computing summary")?;

    let mut reporter = Reporter::new(out);
    reporter.write_summary(&summary)?;
    let monthly = reporter
        .answer_monthly_increase(input, balance)
        .context("answering average monthly increase")?;

    Ok((summary, monthly))
}

/// Build, save and show the histogram.
pub fn histogram(config: &Config, balance: &Dataset) -> Result<HistogramReport> {
    let data = ChartPlotter::histogram_data(balance).context("preparing histogram")?;
    let distribution = StatsCalculator::describe(&data.values);

    tracing::info!(
        regions = distribution.count,
        mean = distribution.mean,
        median = distribution.median,
        std_dev = distribution.std_dev,
        "average balance per borrower"
    );
    for bin in &data.bins {
        tracing::debug!(lower = bin.lower, upper = bin.upper, count = bin.count, "histogram bin");
    }

    ChartRenderer::render_histogram(&data, &config.histogram_out)
        .with_context(|| format!("rendering {}", config.histogram_out.display()))?;
    if !config.no_display {
        display(&config.histogram_out);
    }

    Ok(HistogramReport {
        distribution,
        bins: data.bins,
    })
}

/// Ask for two regions, then build, save and show their line chart.
///
/// A missing region is reported on `out` and nothing is drawn.
pub fn line_chart<W: Write>(
    config: &Config,
    balance: &Dataset,
    input: &mut dyn RegionSource,
    mut out: W,
) -> Result<Option<LineChartData>> {
    let Some(data) = ChartPlotter::line_chart_from_prompts(input, balance)
        .context("preparing line chart")?
    else {
        writeln!(out, "{REGIONS_NOT_FOUND}")?;
        out.flush()?;
        return Ok(None);
    };

    ChartRenderer::render_line_chart(&data, &config.line_chart_out)
        .with_context(|| format!("rendering {}", config.line_chart_out.display()))?;
    if !config.no_display {
        display(&config.line_chart_out);
    }

    Ok(Some(data))
}

pub fn write_json_report(path: &Path, report: &RunReport) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report)
        .with_context(|| format!("writing {}", path.display()))?;
    writer.flush()?;
    tracing::info!(path = %path.display(), "json report saved");
    Ok(())
}

/// Full run in stage order.
pub fn run<W: Write>(config: &Config, input: &mut dyn RegionSource, mut out: W) -> Result<RunReport> {
    let (borrowers, balance) = load(config)?;

    let (summary, monthly_increase) = answer_questions(&borrowers, &balance, input, &mut out)?;
    let histogram = histogram(config, &balance)?;
    let line_chart = line_chart(config, &balance, input, &mut out)?;

    let report = RunReport {
        summary,
        monthly_increase,
        histogram,
        line_chart,
    };

    if let Some(path) = &config.report_json {
        write_json_report(path, &report)?;
    }

    Ok(report)
}

//! Report Module
//! Computes the eight answers and writes them as text lines.

use crate::data::Dataset;
use crate::input::{InputError, RegionSource};
use crate::stats::{RegionIncrease, StatsCalculator, StatsError};
use serde::Serialize;
use std::io::{self, Write};
use thiserror::Error;

/// Balance files are in millions of dollars.
pub const DOLLARS_PER_MILLION: f64 = 1_000_000.0;

/// Scale applied to the average monthly increase (answer 8).
///
/// Not the same as [`DOLLARS_PER_MILLION`].
pub const MONTHLY_INCREASE_SCALE: f64 = 100_000.0;

pub const MONTHLY_INCREASE_PROMPT: &str =
    "8. Enter a state name to calculate the average monthly increase: ";

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to write report: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Stats(#[from] StatsError),
    #[error(transparent)]
    Input(#[from] InputError),
}

/// Answers 1 through 7.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub total_borrowers: f64,
    pub total_balance_dollars: f64,
    /// `None` when no borrowers are recorded.
    pub average_balance_per_borrower: Option<f64>,
    /// Increase in dollars.
    pub greatest_increase: RegionIncrease,
    /// Increase in dollars.
    pub smallest_increase: RegionIncrease,
}

impl Summary {
    pub fn compute(borrowers: &Dataset, balance: &Dataset) -> Result<Self, StatsError> {
        let total_borrowers = StatsCalculator::sum_last_column(borrowers);
        let total_balance_dollars = StatsCalculator::sum_last_column(balance) * DOLLARS_PER_MILLION;

        let average_balance_per_borrower = if total_borrowers == 0.0 {
            tracing::warn!("no borrowers recorded; average balance is undefined");
            None
        } else {
            Some(total_balance_dollars / total_borrowers)
        };

        let extremes = StatsCalculator::find_max_min_increase(balance)?;
        let to_dollars = |ri: RegionIncrease| RegionIncrease {
            region: ri.region,
            increase: ri.increase * DOLLARS_PER_MILLION,
        };

        Ok(Self {
            total_borrowers,
            total_balance_dollars,
            average_balance_per_borrower,
            greatest_increase: to_dollars(extremes.max),
            smallest_increase: to_dollars(extremes.min),
        })
    }
}

/// Answer 8.
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyIncreaseAnswer {
    pub region: String,
    /// `None` when the region is not in the balance data.
    pub avg_monthly_increase: Option<f64>,
}

/// Writes report lines to any output stream.
pub struct Reporter<W: Write> {
    out: W,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Lines 1 through 7.
    pub fn write_summary(&mut self, summary: &Summary) -> Result<(), ReportError> {
        writeln!(
            self.out,
            "1. Total borrowers in March 2023: {:.0}",
            summary.total_borrowers
        )?;
        writeln!(
            self.out,
            "2. Total balance in March 2023: ${:.2}",
            summary.total_balance_dollars
        )?;
        match summary.average_balance_per_borrower {
            Some(avg) => writeln!(
                self.out,
                "3. Average balance per student in March 2023: ${:.2}",
                avg
            )?,
            None => writeln!(
                self.out,
                "3. Average balance per student in March 2023: undefined (no borrowers recorded)"
            )?,
        }
        writeln!(
            self.out,
            "4. State with the greatest increase: {}",
            summary.greatest_increase.region
        )?;
        writeln!(
            self.out,
            "5. Increase in balance: ${:.2}",
            summary.greatest_increase.increase
        )?;
        writeln!(
            self.out,
            "6. State with the smallest increase: {}",
            summary.smallest_increase.region
        )?;
        writeln!(
            self.out,
            "7. Increase in balance: ${:.2}",
            summary.smallest_increase.increase
        )?;
        self.out.flush()?;
        Ok(())
    }

    /// Ask for a region and write line 8.
    ///
    /// An unknown region is reported on the output and is not an error.
    pub fn answer_monthly_increase(
        &mut self,
        input: &mut dyn RegionSource,
        balance: &Dataset,
    ) -> Result<MonthlyIncreaseAnswer, ReportError> {
        let region = input.ask(MONTHLY_INCREASE_PROMPT)?;

        let avg_monthly_increase =
            match StatsCalculator::calculate_avg_monthly_increase(&region, balance) {
                Ok(avg) => {
                    let dollars = avg * MONTHLY_INCREASE_SCALE;
                    writeln!(
                        self.out,
                        "8. Average monthly increase in {} is: ${:.2}",
                        region, dollars
                    )?;
                    Some(dollars)
                }
                Err(StatsError::RegionNotFound(_)) => {
                    tracing::debug!(region = %region, "region lookup failed");
                    writeln!(self.out, "8. State not found in the data")?;
                    None
                }
                Err(e) => return Err(e.into()),
            };
        self.out.flush()?;

        Ok(MonthlyIncreaseAnswer {
            region,
            avg_monthly_increase,
        })
    }
}

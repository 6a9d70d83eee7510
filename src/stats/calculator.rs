//! Statistics Calculator Module
//! Sums, balance increases and distribution summaries over cleaned datasets.

use crate::data::{Dataset, Row};
use serde::Serialize;
use statrs::statistics::{Data, Median, Statistics};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    #[error("Dataset has no data rows")]
    EmptyDataset,
    #[error("Region {0:?} not found")]
    RegionNotFound(String),
    #[error("Region {0:?} has a single value column; no monthly interval to average over")]
    NoIntervals(String),
}

/// A region paired with its balance increase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionIncrease {
    pub region: String,
    pub increase: f64,
}

/// Regions with the largest and smallest increase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncreaseExtremes {
    pub max: RegionIncrease,
    pub min: RegionIncrease,
}

/// Descriptive statistics for a set of values.
#[derive(Debug, Clone, Serialize)]
pub struct DistributionSummary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl Default for DistributionSummary {
    fn default() -> Self {
        Self {
            count: 0,
            mean: f64::NAN,
            median: f64::NAN,
            std_dev: f64::NAN,
            min: f64::NAN,
            max: f64::NAN,
        }
    }
}

/// Last value minus first value.
fn row_increase(row: &Row) -> f64 {
    match (row.last_value(), row.first_value()) {
        (Some(last), Some(first)) => last - first,
        _ => 0.0,
    }
}

/// Handles aggregate computations over datasets.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Sum of the final value column across all data rows.
    pub fn sum_last_column(dataset: &Dataset) -> f64 {
        dataset.rows.iter().filter_map(Row::last_value).sum()
    }

    /// Regions with the greatest and smallest increase between the first and
    /// last value columns.
    ///
    /// On ties the earliest row wins.
    pub fn find_max_min_increase(dataset: &Dataset) -> Result<IncreaseExtremes, StatsError> {
        let mut rows = dataset.rows.iter();
        let first = rows.next().ok_or(StatsError::EmptyDataset)?;

        let seed = RegionIncrease {
            region: first.region.clone(),
            increase: row_increase(first),
        };
        let mut max = seed.clone();
        let mut min = seed;

        for row in rows {
            let increase = row_increase(row);
            if increase > max.increase {
                max = RegionIncrease {
                    region: row.region.clone(),
                    increase,
                };
            }
            if increase < min.increase {
                min = RegionIncrease {
                    region: row.region.clone(),
                    increase,
                };
            }
        }

        Ok(IncreaseExtremes { max, min })
    }

    /// Average change per month for one region.
    ///
    /// The divisor is the record's field count minus two, i.e. the number of
    /// value columns minus one.
    pub fn calculate_avg_monthly_increase(
        region: &str,
        dataset: &Dataset,
    ) -> Result<f64, StatsError> {
        let row = dataset
            .find_region(region)
            .ok_or_else(|| StatsError::RegionNotFound(region.to_string()))?;

        let intervals = row.field_count().saturating_sub(2);
        if intervals == 0 {
            return Err(StatsError::NoIntervals(row.region.clone()));
        }

        Ok(row_increase(row) / intervals as f64)
    }

    /// Compute descriptive statistics for an array of values.
    pub fn describe(values: &[f64]) -> DistributionSummary {
        if values.is_empty() {
            return DistributionSummary::default();
        }

        DistributionSummary {
            count: values.len(),
            mean: values.mean(),
            median: Data::new(values.to_vec()).median(),
            std_dev: values.std_dev(),
            min: Statistics::min(values),
            max: Statistics::max(values),
        }
    }
}

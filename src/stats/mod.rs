//! Statistics module - aggregation over cleaned datasets

mod calculator;

pub use calculator::{
    DistributionSummary, IncreaseExtremes, RegionIncrease, StatsCalculator, StatsError,
};

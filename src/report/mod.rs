//! Report module - text answers on standard output

mod reporter;

pub use reporter::{
    MonthlyIncreaseAnswer, ReportError, Reporter, Summary, DOLLARS_PER_MILLION,
    MONTHLY_INCREASE_PROMPT, MONTHLY_INCREASE_SCALE,
};

//! PSLF Stats - borrower & balance analysis for Public Service Loan Forgiveness data
//!
//! Loads two CSV files (borrower counts and outstanding balances per region),
//! prints eight summary answers and saves two charts.

pub mod app;
pub mod charts;
pub mod config;
pub mod data;
pub mod input;
pub mod logging;
pub mod report;
pub mod stats;

pub use config::Config;
pub use data::{load_dataset, Dataset, Row};
pub use input::{RegionSource, ScriptedSource, StdinSource};

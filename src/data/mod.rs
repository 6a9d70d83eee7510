//! Data module - CSV loading and cleaning

mod dataset;
mod loader;
mod processor;

pub use dataset::{Dataset, Row};
pub use loader::{DataLoader, LoaderError};
pub use processor::{clean_cell, DataProcessor, ProcessorError};

use std::path::Path;

/// Load and clean one CSV file.
///
/// Record widths are checked before Polars parses the file.
pub fn load_dataset(path: &Path) -> Result<Dataset, ProcessorError> {
    DataProcessor::check_field_counts(&DataLoader::field_counts(path)?)?;
    let df = DataLoader::load_csv(path)?;
    let dataset = DataProcessor::clean_frame(&df)?;
    tracing::info!(
        path = %path.display(),
        regions = dataset.row_count(),
        months = dataset.month_count(),
        "dataset ready"
    );
    Ok(dataset)
}

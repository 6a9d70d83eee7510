//! CSV Data Loader Module
//! Reads a CSV file into a text-only DataFrame using Polars.
//! Record widths are scanned separately with the `csv` crate, since Polars
//! pads short rows with nulls.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Input file not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Failed to scan CSV records: {0}")]
    Scan(#[from] csv::Error),
}

/// Loads CSV files with every column kept as text.
///
/// Schema inference is disabled so that formatted cells such as `"$1,234.56"`
/// survive untouched until [`crate::data::DataProcessor`] cleans them.
pub struct DataLoader;

impl DataLoader {
    fn ensure_exists(file_path: &Path) -> Result<(), LoaderError> {
        if file_path.exists() {
            Ok(())
        } else {
            Err(LoaderError::NotFound(file_path.to_path_buf()))
        }
    }

    /// Number of fields in every record, header first.
    ///
    /// Blank lines are skipped.
    pub fn field_counts(file_path: &Path) -> Result<Vec<usize>, LoaderError> {
        Self::ensure_exists(file_path)?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(file_path)?;

        let mut counts = Vec::new();
        for record in reader.byte_records() {
            counts.push(record?.len());
        }
        Ok(counts)
    }

    /// Load a CSV file, header row included as column names.
    pub fn load_csv(file_path: &Path) -> Result<DataFrame, LoaderError> {
        Self::ensure_exists(file_path)?;

        let df = LazyCsvReader::new(file_path)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .finish()?
            .collect()?;

        tracing::debug!(
            path = %file_path.display(),
            rows = df.height(),
            columns = df.width(),
            "loaded csv"
        );

        Ok(df)
    }

    /// Header names in column order.
    pub fn column_names(df: &DataFrame) -> Vec<String> {
        df.get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Every data row as owned text; missing cells become empty strings.
    pub fn records(df: &DataFrame) -> Result<Vec<Vec<String>>, LoaderError> {
        let columns = df
            .get_columns()
            .iter()
            .map(|col| col.str())
            .collect::<PolarsResult<Vec<_>>>()?;

        let records = (0..df.height())
            .map(|i| {
                columns
                    .iter()
                    .map(|ca| ca.get(i).unwrap_or_default().to_string())
                    .collect()
            })
            .collect();

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn missing_file_is_reported_by_path() {
        let err = DataLoader::load_csv(Path::new("definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, LoaderError::NotFound(p) if p.ends_with("here.csv")));
    }

    #[test]
    fn keeps_formatted_cells_as_text() {
        let file = write_csv("State,May 2022,Mar 2023\nNY,\"$1,200.5\",\"$1,300\"\nCA,7,9\n");
        let df = DataLoader::load_csv(file.path()).unwrap();

        assert_eq!(
            DataLoader::column_names(&df),
            vec!["State", "May 2022", "Mar 2023"]
        );

        let records = DataLoader::records(&df).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], vec!["NY", "$1,200.5", "$1,300"]);
        assert_eq!(records[1], vec!["CA", "7", "9"]);
    }

    #[test]
    fn field_counts_see_short_and_long_records() {
        let file = write_csv("State,May,Mar\nNY,1\nCA,\"2,5\",3,4\n\nTX,1,2\n");
        assert_eq!(DataLoader::field_counts(file.path()).unwrap(), vec![3, 2, 4, 3]);
    }

    #[test]
    fn field_counts_of_missing_file_is_not_found() {
        let err = DataLoader::field_counts(Path::new("definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, LoaderError::NotFound(_)));
    }
}

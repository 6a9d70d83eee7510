//! Data Processor Module
//! Cleans formatted numeric text and builds validated datasets.

use crate::data::{DataLoader, Dataset, LoaderError, Row};
use polars::prelude::DataFrame;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error(transparent)]
    Loader(#[from] LoaderError),
    #[error("Row {row}, column {column}: cannot parse {raw:?} as a number")]
    Parse {
        row: usize,
        column: usize,
        raw: String,
    },
    #[error("Row {row} has {found} fields, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Header has no value columns after the region label")]
    NoValueColumns,
    #[error("Region {0:?} appears more than once")]
    DuplicateRegion(String),
}

/// Strip everything but ASCII digits and decimal points, then parse.
///
/// Returns `None` when nothing parseable remains (`""`, `"."`, `"1.2.3"`).
pub fn clean_cell(raw: &str) -> Option<f64> {
    let digits: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    digits.parse::<f64>().ok()
}

/// Handles data cleaning and conversion into [`Dataset`]s.
pub struct DataProcessor;

impl DataProcessor {
    /// Clean a text DataFrame produced by [`DataLoader::load_csv`].
    pub fn clean_frame(df: &DataFrame) -> Result<Dataset, ProcessorError> {
        let header = DataLoader::column_names(df);
        let records = DataLoader::records(df)?;
        Self::clean_records(header, records)
    }

    /// Check that every record is as wide as the header.
    ///
    /// `counts` is the output of [`DataLoader::field_counts`], header first.
    pub fn check_field_counts(counts: &[usize]) -> Result<(), ProcessorError> {
        let Some((&expected, records)) = counts.split_first() else {
            return Ok(());
        };

        match records.iter().position(|&found| found != expected) {
            Some(idx) => Err(ProcessorError::Ragged {
                row: idx + 1,
                expected,
                found: records[idx],
            }),
            None => Ok(()),
        }
    }

    /// Build a dataset from a header and raw text records.
    ///
    /// Column 0 is kept verbatim as the region label; every other cell goes
    /// through [`clean_cell`]. Row numbers in errors are 1-based data rows
    /// (the header is not counted).
    pub fn clean_records(
        header: Vec<String>,
        records: Vec<Vec<String>>,
    ) -> Result<Dataset, ProcessorError> {
        let mut header = header.into_iter();
        let label_column = header.next().unwrap_or_default();
        let month_columns: Vec<String> = header.collect();
        if month_columns.is_empty() {
            return Err(ProcessorError::NoValueColumns);
        }

        let expected = month_columns.len() + 1;
        let mut seen = HashSet::new();
        let mut rows = Vec::with_capacity(records.len());

        for (idx, record) in records.into_iter().enumerate() {
            let row_number = idx + 1;
            if record.len() != expected {
                return Err(ProcessorError::Ragged {
                    row: row_number,
                    expected,
                    found: record.len(),
                });
            }

            let mut fields = record.into_iter();
            let region = fields.next().unwrap_or_default();
            if !seen.insert(region.to_lowercase()) {
                return Err(ProcessorError::DuplicateRegion(region));
            }

            let values = fields
                .enumerate()
                .map(|(col, raw)| {
                    clean_cell(&raw).ok_or(ProcessorError::Parse {
                        row: row_number,
                        column: col + 1,
                        raw,
                    })
                })
                .collect::<Result<Vec<f64>, _>>()?;

            rows.push(Row::new(region, values));
        }

        Ok(Dataset {
            label_column,
            month_columns,
            rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn cleans_currency_and_thousands_separators() {
        assert_eq!(clean_cell("$1,234.56"), Some(1234.56));
        assert_eq!(clean_cell(" 42 "), Some(42.0));
        assert_eq!(clean_cell("7.5%"), Some(7.5));
    }

    #[test]
    fn minus_sign_is_stripped_like_any_other_symbol() {
        assert_eq!(clean_cell("-5"), Some(5.0));
    }

    #[test]
    fn rejects_text_without_a_number() {
        assert_eq!(clean_cell("abc"), None);
        assert_eq!(clean_cell(""), None);
        assert_eq!(clean_cell("."), None);
        assert_eq!(clean_cell("1.2.3"), None);
    }

    #[test]
    fn keeps_label_column_untouched() {
        let ds = DataProcessor::clean_records(
            strings(&["State", "May 2022", "Mar 2023"]),
            vec![strings(&["New York 2", "$1,000", "1,250.5"])],
        )
        .unwrap();

        assert_eq!(ds.label_column, "State");
        assert_eq!(ds.month_columns, strings(&["May 2022", "Mar 2023"]));
        assert_eq!(ds.rows[0].region, "New York 2");
        assert_eq!(ds.rows[0].values, vec![1000.0, 1250.5]);
    }

    #[test]
    fn parse_failure_names_row_column_and_text() {
        let err = DataProcessor::clean_records(
            strings(&["State", "May", "Mar"]),
            vec![strings(&["A", "1", "2"]), strings(&["B", "3", "n/a"])],
        )
        .unwrap_err();

        match err {
            ProcessorError::Parse { row, column, raw } => {
                assert_eq!(row, 2);
                assert_eq!(column, 2);
                assert_eq!(raw, "n/a");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = DataProcessor::clean_records(
            strings(&["State", "May", "Mar"]),
            vec![strings(&["A", "1"])],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ProcessorError::Ragged {
                row: 1,
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn field_counts_name_the_first_mismatched_row() {
        assert!(DataProcessor::check_field_counts(&[3, 3, 3]).is_ok());
        assert!(DataProcessor::check_field_counts(&[]).is_ok());

        let err = DataProcessor::check_field_counts(&[3, 3, 4, 2]).unwrap_err();
        assert!(matches!(
            err,
            ProcessorError::Ragged {
                row: 2,
                expected: 3,
                found: 4
            }
        ));
    }

    #[test]
    fn header_without_values_is_rejected() {
        let err = DataProcessor::clean_records(strings(&["State"]), vec![]).unwrap_err();
        assert!(matches!(err, ProcessorError::NoValueColumns));
    }

    #[test]
    fn duplicate_regions_differing_in_case_are_rejected() {
        let err = DataProcessor::clean_records(
            strings(&["State", "May"]),
            vec![strings(&["NY", "1"]), strings(&["ny", "2"])],
        )
        .unwrap_err();
        assert!(matches!(err, ProcessorError::DuplicateRegion(r) if r == "ny"));
    }

    #[test]
    fn header_only_input_gives_an_empty_dataset() {
        let ds = DataProcessor::clean_records(strings(&["State", "May"]), vec![]).unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.month_count(), 1);
    }
}

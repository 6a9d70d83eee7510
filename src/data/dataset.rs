//! Dataset Module
//! In-memory table of cleaned region rows.

use serde::Serialize;

/// One region's monthly observations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub region: String,
    pub values: Vec<f64>,
}

impl Row {
    pub fn new(region: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            region: region.into(),
            values,
        }
    }

    /// Number of fields in the source record, label included.
    pub fn field_count(&self) -> usize {
        self.values.len() + 1
    }

    /// Value of the first month column.
    pub fn first_value(&self) -> Option<f64> {
        self.values.first().copied()
    }

    /// Value of the last month column.
    pub fn last_value(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// Case-insensitive match against the region label.
    pub fn matches(&self, region: &str) -> bool {
        self.region.to_lowercase() == region.to_lowercase()
    }
}

/// A cleaned table: header plus rectangular rows.
///
/// Construction goes through [`crate::data::DataProcessor`], which enforces
/// that every row has one value per month column and that region labels
/// are unique.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub label_column: String,
    pub month_columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Dataset {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn month_count(&self) -> usize {
        self.month_columns.len()
    }

    /// First row whose label matches `region`, ignoring case.
    pub fn find_region(&self, region: &str) -> Option<&Row> {
        self.rows.iter().find(|row| row.matches(region))
    }

    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row.region.as_str())
    }
}

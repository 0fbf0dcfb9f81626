//! Manifest file handling (input CSV)
//!
//! The manifest is a UTF-8 CSV whose header row defines column names. Each
//! data row describes one unit of work: a required `file` column holding the
//! source URL, an optional `identifier` column, and any number of free-form
//! metadata columns.

use crate::error::{CliError, Result};
use std::path::Path;

/// Column holding the source URL. Required in every manifest.
pub const FILE_COLUMN: &str = "file";

/// Column holding an explicit remote identifier. Optional.
pub const IDENTIFIER_COLUMN: &str = "identifier";

/// One manifest row: an ordered mapping of column name to value.
///
/// Column order is preserved from the CSV header because the hash identifier
/// policy digests values in that order. Rows are immutable once read and are
/// consumed by exactly one pipeline invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    columns: Vec<(String, String)>,
}

impl Row {
    /// Build a row from (column, value) pairs, preserving order
    pub fn new(columns: Vec<(String, String)>) -> Self {
        Self { columns }
    }

    /// Look up a column value by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|(col, _)| col == name)
            .map(|(_, value)| value.as_str())
    }

    /// The source URL for this row
    pub fn file_url(&self) -> Result<&str> {
        self.get(FILE_COLUMN)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| CliError::MissingField(FILE_COLUMN.to_string()))
    }

    /// All values in column order
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(_, value)| value.as_str())
    }

    /// All (column, value) pairs in column order
    pub fn columns(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns
            .iter()
            .map(|(col, value)| (col.as_str(), value.as_str()))
    }
}

/// A parsed manifest: the ordered sequence of rows to process
#[derive(Debug, Clone)]
pub struct Manifest {
    rows: Vec<Row>,
}

impl Manifest {
    /// Load and parse a manifest from a CSV file
    ///
    /// Fails the whole run if the file is unreadable, the CSV is malformed,
    /// or the header lacks a `file` column. An empty manifest is valid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CliError::invalid_manifest(format!(
                "manifest file not found: {}",
                path.display()
            )));
        }

        let mut reader = csv::Reader::from_path(path)?;
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        if !headers.iter().any(|h| h == FILE_COLUMN) {
            return Err(CliError::invalid_manifest(format!(
                "header row must contain a '{}' column, found: {}",
                FILE_COLUMN,
                headers.join(", ")
            )));
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let columns = headers
                .iter()
                .zip(record.iter())
                .map(|(col, value)| (col.clone(), value.to_string()))
                .collect();
            rows.push(Row::new(columns));
        }

        Ok(Self { rows })
    }

    /// Number of rows in the manifest
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the manifest has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Consume the manifest, yielding its rows in file order
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}

use crate::error::SourceError;
use std::collections::{HashMap, HashSet};

/// One data row, keyed by column name.
pub type Record = HashMap<String, String>;

/// Header plus records in source order. Every record carries exactly the header's keys.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    header: Vec<String>,
    records: Vec<Record>,
}

impl Table {
    /// Builds a table from a header and positional rows.
    ///
    /// Rows are numbered from 2 in errors, the header being record 1.
    pub fn from_rows(header: Vec<String>, rows: Vec<Vec<String>>) -> Result<Table, SourceError> {
        if header.is_empty() {
            return Err(SourceError::NoHeader);
        }

        let mut seen = HashSet::with_capacity(header.len());
        for name in &header {
            if !seen.insert(name.as_str()) {
                return Err(SourceError::DuplicateColumn(name.to_owned()));
            }
        }

        let mut records = Vec::with_capacity(rows.len());
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != header.len() {
                return Err(SourceError::InconsistentRow {
                    record: i + 2,
                    expected: header.len(),
                    found: row.len(),
                });
            }
            records.push(header.iter().cloned().zip(row).collect::<Record>());
        }

        Ok(Table { header, records })
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.header.iter().any(|h| h == name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

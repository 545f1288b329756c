use crate::database::{Record, Table};
use crate::error::{JobDataError, Result};
use crate::source::RecordSource;
use once_cell::sync::OnceCell;
use std::collections::BTreeSet;
use tracing::{debug, error, info};

/// Job listings loaded from a [`RecordSource`] on first use.
///
/// The source is read at most once successfully. A failed load leaves the table empty
/// and the next query tries again. All queries return owned copies of the stored records.
pub struct JobTable<S> {
    source: S,
    table: OnceCell<Table>,
}

impl<S: RecordSource> JobTable<S> {
    pub fn new(source: S) -> JobTable<S> {
        JobTable {
            source,
            table: OnceCell::new(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.table.get().is_some()
    }

    /// Column names in source order.
    pub fn header(&self) -> Result<Vec<String>> {
        Ok(self.load()?.header().to_vec())
    }

    /// Distinct values of `field`, sorted ascending.
    pub fn find_all_values(&self, field: &str) -> Result<Vec<String>> {
        let table = self.load()?;
        require_column(table, field)?;

        let values = table
            .records()
            .iter()
            .filter_map(|row| row.get(field))
            .map(String::as_str)
            .collect::<BTreeSet<_>>();

        Ok(values.into_iter().map(|v| v.to_owned()).collect())
    }

    pub fn find_all_records(&self) -> Result<Vec<Record>> {
        Ok(self.load()?.records().to_vec())
    }

    /// Records whose `column` contains `value`, ignoring case.
    ///
    /// For example, searching employer for "Enterprise" includes "Enterprise Holdings, Inc".
    pub fn find_by_column_and_value(&self, column: &str, value: &str) -> Result<Vec<Record>> {
        let table = self.load()?;
        require_column(table, column)?;

        let value = value.to_lowercase();
        Ok(table
            .records()
            .iter()
            .filter(|row| contains_ignore_case(row.get(column), &value))
            .cloned()
            .collect())
    }

    /// Records with at least one column containing `value`, ignoring case.
    pub fn find_by_value(&self, value: &str) -> Result<Vec<Record>> {
        let table = self.load()?;

        let value = value.to_lowercase();
        Ok(table
            .records()
            .iter()
            .filter(|row| {
                table
                    .header()
                    .iter()
                    .any(|column| contains_ignore_case(row.get(column), &value))
            })
            .cloned()
            .collect())
    }

    fn load(&self) -> Result<&Table> {
        self.table.get_or_try_init(|| {
            let origin = self.source.describe();
            debug!(origin = %origin, "loading job data");

            match self.source.read_table() {
                Ok(table) => {
                    info!(
                        origin = %origin,
                        columns = table.header().len(),
                        rows = table.len(),
                        "job data loaded"
                    );
                    Ok(table)
                }
                Err(e) => {
                    error!(origin = %origin, error = %e, "failed to load job data");
                    Err(JobDataError::Load { origin, source: e })
                }
            }
        })
    }
}

fn require_column(table: &Table, column: &str) -> Result<()> {
    if table.has_column(column) {
        Ok(())
    } else {
        Err(JobDataError::ColumnNotFound(column.to_owned()))
    }
}

/// `needle` must already be lowercase.
fn contains_ignore_case(haystack: Option<&String>, needle: &str) -> bool {
    match haystack {
        Some(v) => v.to_lowercase().contains(needle),
        None => false,
    }
}

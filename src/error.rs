use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures of a record source while producing a table.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed CSV in record {record}: {message}")]
    Parse { record: usize, message: String },
    #[error("no header in CSV")]
    NoHeader,
    #[error("duplicate column in header: {0}")]
    DuplicateColumn(String),
    #[error("inconsistent amount of data in record {record} (should have: {expected} columns, has: {found})")]
    InconsistentRow {
        record: usize,
        expected: usize,
        found: usize,
    },
}

/// Errors returned by [`JobTable`](crate::JobTable) queries.
#[derive(Debug, Error)]
pub enum JobDataError {
    #[error("failed to load job data from {origin}")]
    Load {
        origin: String,
        #[source]
        source: SourceError,
    },
    #[error("no column: {0} found")]
    ColumnNotFound(String),
}

pub type Result<T> = std::result::Result<T, JobDataError>;

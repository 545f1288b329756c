//! In-memory job listings loaded once from CSV and searched by column or across all columns.

pub mod config;
pub mod csv;
pub mod database;
pub mod error;
pub mod job_table;
pub mod source;

pub use crate::config::Config;
pub use crate::csv::{parse_csv, read_csv, CsvSource};
pub use crate::database::{Record, Table};
pub use crate::error::{JobDataError, SourceError};
pub use crate::job_table::JobTable;
pub use crate::source::RecordSource;

use crate::database::Table;
use crate::error::SourceError;

/// Supplies the full table in one read.
pub trait RecordSource {
    /// Where the records come from, for diagnostics.
    fn describe(&self) -> String;

    fn read_table(&self) -> Result<Table, SourceError>;
}

/// A table that is already in memory.
impl RecordSource for Table {
    fn describe(&self) -> String {
        "in-memory table".to_owned()
    }

    fn read_table(&self) -> Result<Table, SourceError> {
        Ok(self.clone())
    }
}

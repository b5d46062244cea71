use thiserror::Error;

/// Failures crossing the host store boundary.
///
/// The rename, sequence and diff computations are total functions and never
/// produce errors; everything here originates from fetching or writing
/// records in the host table.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record '{id}' not found")]
    NotFound { id: String },

    #[error("failed to fetch record '{id}': {reason}")]
    Fetch { id: String, reason: String },

    #[error("record '{id}' has a malformed attachment cell: {reason}")]
    MalformedCell { id: String, reason: String },

    #[error("failed to write {records} record(s): {reason}")]
    Write { records: usize, reason: String },
}

impl StoreError {
    pub fn fetch(id: impl Into<String>, reason: impl ToString) -> Self {
        Self::Fetch {
            id: id.into(),
            reason: reason.to_string(),
        }
    }

    pub fn write(records: usize, reason: impl ToString) -> Self {
        Self::Write {
            records,
            reason: reason.to_string(),
        }
    }
}

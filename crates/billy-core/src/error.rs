use std::io;

use billy_domain::{EntryError, PeriodError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Nothing to undo")]
    EmptyUndo,
    #[error("Entry {index} is out of range (ledger has {len} entries)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("No bill file is open")]
    NoFileOpen,
    #[error("File already exists: {0}")]
    AlreadyExists(String),
    #[error("Format error: {0}")]
    Format(String),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;

impl From<EntryError> for CoreError {
    fn from(err: EntryError) -> Self {
        CoreError::Validation(err.to_string())
    }
}

impl From<PeriodError> for CoreError {
    fn from(err: PeriodError) -> Self {
        CoreError::Format(err.to_string())
    }
}

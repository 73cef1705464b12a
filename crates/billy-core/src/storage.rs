use std::path::Path;

use crate::{error::CoreResult, ledger::Ledger};

/// Result of creating a bill file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    Overwritten,
}

/// Abstraction over persistence backends capable of storing monthly bill files.
pub trait LedgerStorage: Send + Sync {
    fn load(&self, path: &Path) -> CoreResult<Ledger>;
    fn save(&self, path: &Path, ledger: &Ledger) -> CoreResult<()>;
    /// Bill file names found directly inside `dir`, sorted ascending.
    fn list_available(&self, dir: &Path) -> CoreResult<Vec<String>>;
    /// Writes an empty bill file. Fails with `AlreadyExists` when the file is
    /// present and `overwrite` is false.
    fn create(&self, path: &Path, overwrite: bool) -> CoreResult<CreateOutcome>;
}

//! billy-core
//!
//! Ledger editing, undo, search, statistics and session orchestration for bill files.
//! Depends on billy-domain. No CLI, no terminal I/O, no direct file access.

pub mod error;
pub mod ledger;
pub mod session;
pub mod statistics;
pub mod storage;
pub mod undo;

pub use error::{CoreError, CoreResult};
pub use ledger::Ledger;
pub use session::{LedgerView, NoopRenderer, Renderer, Session};
pub use statistics::*;
pub use storage::{CreateOutcome, LedgerStorage};
pub use undo::{UndoStack, DEFAULT_UNDO_LIMIT};

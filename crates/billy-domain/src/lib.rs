//! billy-domain
//!
//! Pure domain models for monthly bill files (Entry, Amount, Period, sort and move enums).
//! No I/O, no CLI, no storage. Only data types and their validation rules.

pub mod amount;
pub mod common;
pub mod entry;
pub mod period;

pub use amount::*;
pub use common::*;
pub use entry::*;
pub use period::*;

//! Standalone helpers exposed through the shell.

pub mod detab;

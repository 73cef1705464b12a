//! billy-config
//!
//! Persistent user preferences for the bill shell.
//! Owns the Config data structure plus disk persistence helpers.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::{ConfigManager, HOME_ENV};
pub use model::Config;

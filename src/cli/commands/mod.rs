//! Shell command handlers grouped by concern.

pub mod config;
pub mod entry;
pub mod file;
pub mod stats;
pub mod system;
pub mod tools;

use crate::cli::registry::{CommandEntry, CommandRegistry};

pub(crate) fn all_definitions() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(file::definitions());
    commands.extend(entry::definitions());
    commands.extend(stats::definitions());
    commands.extend(config::definitions());
    commands.extend(tools::definitions());
    commands.extend(system::definitions());
    commands
}

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    for entry in all_definitions() {
        registry.register(entry);
    }
}

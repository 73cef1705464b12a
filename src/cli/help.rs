use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::cli::table::{Table, TableColumn, TableRenderer};

pub fn print_overview(registry: &CommandRegistry) {
    let mut table = Table::new(
        Some("Available commands"),
        vec![TableColumn::new("Command"), TableColumn::new("Description")],
    );
    for entry in registry.list() {
        table.add_row(vec![entry.name, entry.description]);
    }
    TableRenderer::render(&table);
    io::print_hint("Use `help <command>` for details. Entry numbers start at 1.");
}

pub fn print_command(entry: &CommandEntry) {
    output_section(format!("Help: {}", entry.name));
    io::print_info(format!("  Description: {}", entry.description));
    io::print_info(format!("  Usage: {}", entry.usage));
    if !entry.aliases.is_empty() {
        io::print_info(format!("  Aliases: {}", entry.aliases.join(", ")));
    }
}

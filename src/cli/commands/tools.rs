use std::path::Path;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::tools::detab;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "detab",
        "Replace tabs with four spaces in a text file",
        "detab <file>",
        cmd_detab,
    )]
}

fn cmd_detab(_context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [file] = args else {
        return Err(CommandError::InvalidArguments("usage: detab <file>".into()));
    };
    let path = Path::new(file);
    let replaced = detab::detab_file(path)?;
    if replaced == 0 {
        io::print_info(format!("No tabs in {}.", path.display()));
    } else {
        io::print_success(format!(
            "Replaced {} tab(s) in {}.",
            replaced,
            path.display()
        ));
    }
    Ok(())
}

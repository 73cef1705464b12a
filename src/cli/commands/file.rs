//! Bill file commands: listing, opening, creating and saving monthly files.

use billy_core::{CoreError, CreateOutcome};
use billy_domain::Period;

use crate::cli::core::{split_options, CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "files",
            "List bill files in the data directory",
            "files",
            cmd_files,
        ),
        CommandEntry::new("open", "Open a monthly bill file", "open <YYYYMM>", cmd_open),
        CommandEntry::new(
            "new",
            "Create a bill file for a month and open it",
            "new [<YYYY> <MM>] [--force]",
            cmd_new,
        ),
        CommandEntry::new("save", "Write the open file back to disk", "save", cmd_save),
    ]
}

fn cmd_files(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let files = context.session.available_files()?;
    if files.is_empty() {
        io::print_info(format!(
            "No bill files in {}.",
            context.session.data_dir().display()
        ));
        io::print_hint("Create one with `new <YYYY> <MM>`.");
        return Ok(());
    }
    let current = context.session.current_file();
    for name in &files {
        if Some(name.as_str()) == current {
            io::println_text(&format!("* {name}"));
        } else {
            io::println_text(&format!("  {name}"));
        }
    }
    Ok(())
}

fn cmd_open(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [name] = args else {
        return Err(CommandError::InvalidArguments("usage: open <YYYYMM>".into()));
    };
    context.resolve_unsaved_changes()?;
    let count = context.session.open(name)?;
    let file = context.session.current_file().map(str::to_string);
    context.remember_file(file.as_deref())?;
    io::print_success(format!(
        "Opened {} ({} entries).",
        file.unwrap_or_default(),
        count
    ));
    Ok(())
}

fn cmd_new(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (positional, options) = split_options(args, &["!force"])?;
    let force = !options.is_empty();
    let period = match positional.as_slice() {
        [] => Period::current(),
        [year, month] => Period::parse(year, month).map_err(|err| {
            CommandError::InvalidArguments(err.to_string())
        })?,
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: new [<YYYY> <MM>] [--force]".into(),
            ))
        }
    };

    context.resolve_unsaved_changes()?;
    let outcome = match context.session.create(period, force) {
        Err(CoreError::AlreadyExists(name)) => {
            if context.mode == CliMode::Script {
                return Err(CommandError::Message(format!(
                    "{name} already exists. Pass --force to overwrite it."
                )));
            }
            if !context.confirm(&format!("{name} already exists. Overwrite?"), false)? {
                io::print_info("Operation cancelled.");
                return Ok(());
            }
            context.session.create(period, true)?
        }
        other => other?,
    };

    let file_name = period.file_name();
    context.remember_file(Some(&file_name))?;
    match outcome {
        CreateOutcome::Created => io::print_success(format!("Created {file_name}")),
        CreateOutcome::Overwritten => io::print_success(format!("Overwrote {file_name}")),
    }
    Ok(())
}

fn cmd_save(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let path = context.session.save()?;
    io::print_success(format!("Saved {}", path.display()));
    Ok(())
}

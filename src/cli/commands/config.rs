use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn, TableRenderer};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View or change CLI preferences",
        "config [show | <key> <value> | set <key> <value>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let args = match args {
        [first, rest @ ..] if first.eq_ignore_ascii_case("set") => rest,
        other => other,
    };
    match args {
        [] => show_config(context),
        [only] if only.eq_ignore_ascii_case("show") => show_config(context),
        [key, value @ ..] if !value.is_empty() => set_config_value(context, key, &value.join(" ")),
        _ => Err(CommandError::InvalidArguments(
            "usage: config [show | <key> <value>]".into(),
        )),
    }
}

fn show_config(context: &ShellContext) -> CommandResult {
    let mut table = Table::new(
        Some(format!(
            "Configuration ({})",
            context.config_manager.config_path().display()
        )),
        vec![TableColumn::new("Key"), TableColumn::new("Value")],
    );
    for (key, value) in context.config.entries() {
        table.add_row(vec![key.to_string(), value]);
    }
    TableRenderer::render(&table);
    Ok(())
}

fn set_config_value(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    context.config.set_value(key, value)?;
    context.persist_config()?;
    context.apply_config();
    io::print_success(format!("Set {} = {}", key, value));
    Ok(())
}

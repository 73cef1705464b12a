//! Entry editing commands that operate on the open bill file.

use billy_domain::{EntryFields, MoveDirection, SortField};

use crate::cli::core::{
    parse_index, parse_indices, split_options, CommandError, CommandResult, ShellContext,
};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::table;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "list",
            "Show the entries of the open file",
            "list [--json]",
            cmd_list,
        )
        .with_aliases(&["ls"]),
        CommandEntry::new(
            "add",
            "Add an entry after the selection, or at the end",
            "add <date> <name> <amount> [note] [--after N]",
            cmd_add,
        ),
        CommandEntry::new(
            "update",
            "Overwrite the given entries with new values",
            "update <idx,...> <date> <name> <amount> [note]",
            cmd_update,
        )
        .with_aliases(&["edit"]),
        CommandEntry::new(
            "delete",
            "Delete the given entries",
            "delete <idx,...>",
            cmd_delete,
        )
        .with_aliases(&["rm"]),
        CommandEntry::new("up", "Move entries one row up", "up <idx,...>", cmd_up),
        CommandEntry::new("down", "Move entries one row down", "down <idx,...>", cmd_down),
        CommandEntry::new(
            "sort",
            "Sort the view by a column; repeat to reverse",
            "sort <date|name|amount|note>",
            cmd_sort,
        ),
        CommandEntry::new("reset", "Show entries in file order", "reset", cmd_reset),
        CommandEntry::new("undo", "Revert the last change", "undo", cmd_undo),
        CommandEntry::new(
            "find",
            "Select entries containing a keyword",
            "find <keyword>",
            cmd_find,
        )
        .with_aliases(&["search"]),
        CommandEntry::new(
            "select",
            "Select entries; without arguments clears the selection",
            "select [idx,...]",
            cmd_select,
        ),
    ]
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (_, options) = split_options(args, &["!json"])?;
    if context.session.current_file().is_none() {
        return Err(CommandError::NoFileOpen);
    }
    let view = context.session.view();
    if options.is_empty() {
        table::print_view(&view);
    } else {
        let rows: Vec<EntryFields> = view.rows.iter().map(|entry| entry.to_fields()).collect();
        io::println_text(&serde_json::to_string_pretty(&rows)?);
    }
    Ok(())
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (positional, options) = split_options(args, &["after"])?;
    let fields = fields_from(&positional, "add <date> <name> <amount> [note] [--after N]")?;
    let index = match options.first() {
        Some((_, Some(after))) => {
            let after = parse_index(after)?;
            context.session.add_at(&fields, Some(after))?
        }
        _ => context.session.add(&fields)?,
    };
    io::print_success(format!("Added entry #{}", index + 1));
    Ok(())
}

fn cmd_update(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    const USAGE: &str = "update <idx,...> <date> <name> <amount> [note]";
    let Some((targets, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(format!("usage: {USAGE}")));
    };
    let indices = parse_indices(&[*targets])?;
    let fields = fields_from(rest, USAGE)?;
    let count = context.session.update_entries(&indices, &fields)?;
    io::print_success(format!("Updated {} {}", count, plural(count)));
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let indices = parse_indices(args)?;
    let count = context.session.delete_entries(&indices)?;
    io::print_success(format!("Deleted {} {}", count, plural(count)));
    Ok(())
}

fn cmd_up(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    move_entries(context, args, MoveDirection::Up)
}

fn cmd_down(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    move_entries(context, args, MoveDirection::Down)
}

fn move_entries(context: &mut ShellContext, args: &[&str], direction: MoveDirection) -> CommandResult {
    let indices = parse_indices(args)?;
    if context.session.move_entries(&indices, direction)? {
        let positions: Vec<String> = context
            .session
            .selection()
            .iter()
            .map(|index| format!("#{}", index + 1))
            .collect();
        io::print_success(format!("Moved to {}", positions.join(", ")));
    } else {
        io::print_info("Nothing to move.");
    }
    Ok(())
}

fn cmd_sort(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [field] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: sort <date|name|amount|note>".into(),
        ));
    };
    let field = field
        .parse::<SortField>()
        .map_err(|err| CommandError::InvalidArguments(err.to_string()))?;
    let state = context.session.sort_by(field);
    io::print_success(format!(
        "Sorted by {} {}",
        state.field,
        state.direction.arrow()
    ));
    Ok(())
}

fn cmd_reset(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.session.reset_display();
    io::print_success("Showing entries in file order.");
    Ok(())
}

fn cmd_undo(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.session.undo()?;
    io::print_success("Undid last change.");
    Ok(())
}

fn cmd_find(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let keyword = args.join(" ");
    if keyword.trim().is_empty() {
        return Err(CommandError::InvalidArguments("usage: find <keyword>".into()));
    }
    let matches = context.session.search(keyword.trim());
    if matches.is_empty() {
        io::print_info(format!("No entries match `{}`.", keyword.trim()));
        return Ok(());
    }
    let positions: Vec<String> = matches.iter().map(|index| format!("#{}", index + 1)).collect();
    io::print_success(format!(
        "{} {} selected: {}",
        matches.len(),
        plural(matches.len()),
        positions.join(", ")
    ));
    Ok(())
}

fn cmd_select(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        context.session.clear_selection();
        io::print_info("Selection cleared.");
        return Ok(());
    }
    let indices = parse_indices(args)?;
    context.session.select(&indices)?;
    io::println_text(&table::totals_line(&context.session.totals()));
    Ok(())
}

fn fields_from(args: &[&str], usage: &str) -> Result<EntryFields, CommandError> {
    match args {
        [date, name, amount] => Ok(EntryFields::new(*date, *name, *amount, "")),
        [date, name, amount, note] => Ok(EntryFields::new(*date, *name, *amount, *note)),
        _ => Err(CommandError::InvalidArguments(format!("usage: {usage}"))),
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        "entry"
    } else {
        "entries"
    }
}

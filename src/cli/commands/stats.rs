//! Running totals and the filtered income/expense breakdown.

use billy_core::{AdvancedFilter, StatisticsService};
use billy_domain::AmountType;

use crate::cli::core::{split_options, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{format_amount, totals_line, Table, TableColumn, TableRenderer};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "totals",
            "Show the file, selection and same-name totals",
            "totals",
            cmd_totals,
        ),
        CommandEntry::new(
            "stats",
            "Break down entries matching a filter",
            "stats [--from D] [--to D] [--name S] [--note S] [--type 收入|支出|all]",
            cmd_stats,
        ),
    ]
}

fn cmd_totals(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.session.current_file().is_none() {
        return Err(CommandError::NoFileOpen);
    }
    io::println_text(&totals_line(&context.session.totals()));
    Ok(())
}

fn cmd_stats(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (positional, options) = split_options(args, &["from", "to", "name", "note", "type"])?;
    if !positional.is_empty() {
        return Err(CommandError::InvalidArguments(format!(
            "unexpected argument `{}`",
            positional[0]
        )));
    }
    if context.session.current_file().is_none() {
        return Err(CommandError::NoFileOpen);
    }

    let filter = build_filter(&options)?;
    let report = StatisticsService::advanced_filter(context.session.ledger().entries(), &filter);
    let breakdown = &report.breakdown;

    let mut table = Table::new(
        Some(format!("Statistics ({})", filter.amount_type)),
        vec![
            TableColumn::new("Kind"),
            TableColumn::right("Count"),
            TableColumn::right("Amount"),
        ],
    );
    table.add_row(vec![
        "收入".to_string(),
        breakdown.income_count.to_string(),
        format_amount(breakdown.income_total),
    ]);
    table.add_row(vec![
        "支出".to_string(),
        breakdown.expense_count.to_string(),
        format_amount(-breakdown.expense_total),
    ]);
    table.add_highlighted_row(vec![
        "Net".to_string(),
        breakdown.count.to_string(),
        format_amount(breakdown.net),
    ]);
    TableRenderer::render(&table);
    Ok(())
}

fn build_filter(options: &[(&str, Option<&str>)]) -> Result<AdvancedFilter, CommandError> {
    let mut filter = AdvancedFilter::default();
    for (name, value) in options {
        let value = value.map(str::to_string);
        match *name {
            "from" => filter.date_from = value,
            "to" => filter.date_to = value,
            "name" => filter.name_contains = value,
            "note" => filter.note_contains = value,
            "type" => {
                filter.amount_type = value
                    .unwrap_or_default()
                    .parse::<AmountType>()
                    .map_err(|err| CommandError::InvalidArguments(err.to_string()))?;
            }
            _ => {}
        }
    }
    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_fill_the_filter() {
        let filter = build_filter(&[
            ("from", Some("0301")),
            ("name", Some("午饭")),
            ("type", Some("支出")),
        ])
        .unwrap();
        assert_eq!(filter.date_from.as_deref(), Some("0301"));
        assert_eq!(filter.date_to, None);
        assert_eq!(filter.name_contains.as_deref(), Some("午饭"));
        assert_eq!(filter.amount_type, AmountType::Expense);

        assert!(build_filter(&[("type", Some("refund"))]).is_err());
    }
}

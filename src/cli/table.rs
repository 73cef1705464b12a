//! Padded text tables and the terminal renderer for ledger views.

use billy_core::{LedgerView, Renderer, Totals};
use billy_domain::{Entry, SortField};
use unicode_width::UnicodeWidthStr;

use crate::cli::{io, output};

/// Declarative description of a table column.
#[derive(Debug, Clone)]
pub struct TableColumn {
    pub header: String,
    pub align_right: bool,
}

impl TableColumn {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            align_right: false,
        }
    }

    pub fn right(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            align_right: true,
        }
    }
}

/// Simple table model whose column widths follow the widest cell.
#[derive(Debug, Clone)]
pub struct Table {
    pub title: Option<String>,
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<String>>,
    highlighted: Vec<bool>,
}

impl Table {
    pub fn new<T: Into<String>>(title: Option<T>, columns: Vec<TableColumn>) -> Self {
        Self {
            title: title.map(|value| value.into()),
            columns,
            rows: Vec::new(),
            highlighted: Vec::new(),
        }
    }

    pub fn add_row<S: Into<String>>(&mut self, cells: Vec<S>) {
        self.push_row(cells, false);
    }

    pub fn add_highlighted_row<S: Into<String>>(&mut self, cells: Vec<S>) {
        self.push_row(cells, true);
    }

    fn push_row<S: Into<String>>(&mut self, cells: Vec<S>, highlighted: bool) {
        self.rows
            .push(cells.into_iter().map(|value| value.into()).collect());
        self.highlighted.push(highlighted);
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(idx))
                    .map(|cell| display_width(cell))
                    .chain(std::iter::once(display_width(&column.header)))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Lines without styling: title, header, rule, rows.
    pub fn lines(&self) -> Vec<String> {
        let widths = self.widths();
        let mut lines = Vec::with_capacity(self.rows.len() + 3);
        if let Some(title) = &self.title {
            lines.push(title.clone());
        }
        let headers: Vec<&str> = self.columns.iter().map(|c| c.header.as_str()).collect();
        lines.push(self.format_row(&headers, &widths));
        let total: usize = widths.iter().sum::<usize>() + 3 * widths.len().saturating_sub(1);
        lines.push("-".repeat(total.max(1)));
        for row in &self.rows {
            let cells: Vec<&str> = row.iter().map(String::as_str).collect();
            lines.push(self.format_row(&cells, &widths));
        }
        lines
    }

    fn format_row(&self, cells: &[&str], widths: &[usize]) -> String {
        let mut line = String::new();
        for (idx, column) in self.columns.iter().enumerate() {
            if idx > 0 {
                line.push_str(" | ");
            }
            let cell = cells.get(idx).copied().unwrap_or("");
            line.push_str(&pad(cell, widths[idx], column.align_right));
        }
        line.trim_end().to_string()
    }
}

/// Prints [`Table`] instances with a bold header and highlighted rows.
pub struct TableRenderer;

impl TableRenderer {
    pub fn render(table: &Table) {
        let lines = table.lines();
        let offset = usize::from(table.title.is_some());
        for (idx, line) in lines.iter().enumerate() {
            if idx < offset {
                output::section(line);
            } else if idx == offset {
                io::println_text(&output::emphasize(line));
            } else if idx >= offset + 2 && table.highlighted[idx - offset - 2] {
                io::println_text(&output::highlight(line));
            } else {
                io::println_text(line);
            }
        }
    }
}

/// [`Renderer`] that redraws the entry table after each change.
pub struct BillTableRenderer {
    enabled: bool,
}

impl BillTableRenderer {
    /// A disabled renderer stays silent; the `list` command still prints.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Renderer for BillTableRenderer {
    fn render(&mut self, view: &LedgerView<'_>) {
        if self.enabled {
            print_view(view);
        }
    }
}

pub fn print_view(view: &LedgerView<'_>) {
    TableRenderer::render(&view_table(view));
    io::println_text(&totals_line(&view.totals));
}

pub fn view_table(view: &LedgerView<'_>) -> Table {
    let title = match (view.file, view.sort) {
        (Some(file), Some(sort)) => format!("{file} (sorted by {} {})", sort.field, sort.direction.arrow()),
        (Some(file), None) => file.to_string(),
        (None, _) => "(no file open)".to_string(),
    };
    let mut columns = vec![TableColumn::right("#")];
    for field in SortField::ALL {
        let mut header = field.column_title().to_string();
        if let Some(sort) = view.sort.filter(|sort| sort.field == field) {
            header.push(' ');
            header.push_str(sort.direction.arrow());
        }
        columns.push(if field == SortField::Amount {
            TableColumn::right(header)
        } else {
            TableColumn::new(header)
        });
    }

    let mut table = Table::new(Some(title), columns);
    for (idx, entry) in view.rows.iter().enumerate() {
        let cells = entry_cells(idx, entry);
        if view.selection.contains(&idx) {
            table.add_highlighted_row(cells);
        } else {
            table.add_row(cells);
        }
    }
    table
}

fn entry_cells(idx: usize, entry: &Entry) -> Vec<String> {
    vec![
        (idx + 1).to_string(),
        entry.date.clone(),
        entry.name.clone(),
        entry.amount.to_string(),
        entry.note.clone(),
    ]
}

pub fn totals_line(totals: &Totals) -> String {
    format!(
        "Total: {} | Selected: {} | Same name: {}",
        format_amount(totals.total),
        format_amount(totals.selected),
        format_amount(totals.same_name)
    )
}

/// Two decimals with an explicit `+` on positive values.
pub fn format_amount(value: f64) -> String {
    if value > 0.0 {
        format!("+{value:.2}")
    } else if value == 0.0 {
        "0.00".to_string()
    } else {
        format!("{value:.2}")
    }
}

fn pad(text: &str, width: usize, align_right: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(display_width(text)));
    if align_right {
        format!("{fill}{text}")
    } else {
        format!("{text}{fill}")
    }
}

/// Terminal columns taken by `text`; wide characters count twice.
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

//! Markdown table codec for monthly bill files.
//!
//! ```text
//! # 2024年03月账单
//!
//! | 日期 | 名称 | 流水 | 备注 |
//! | ---- | ---- | ---- | ---- |
//! | 0301 | 工资 | +8000 |  |
//! ```

use billy_domain::{Entry, EntryFields, Period};

/// Start of the header row. Data rows begin two lines below it.
pub const HEADER_PREFIX: &str = "| 日期";
pub const HEADER_ROW: &str = "| 日期 | 名称 | 流水 | 备注 |";
pub const SEPARATOR_ROW: &str = "| ---- | ---- | ---- | ---- |";

const MIN_CELLS: usize = 3;

/// Row that looked like table data but could not become an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// One-based line number in the source text.
    pub line: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct ParsedTable {
    pub entries: Vec<Entry>,
    pub skipped: Vec<SkippedRow>,
}

pub fn parse_table(text: &str) -> ParsedTable {
    let lines: Vec<&str> = text.lines().collect();
    let start = lines
        .iter()
        .position(|line| line.starts_with(HEADER_PREFIX))
        .map(|index| index + 2)
        .unwrap_or(0);

    let mut parsed = ParsedTable::default();
    for (index, raw) in lines.iter().enumerate().skip(start) {
        let line = raw.trim();
        if !line.starts_with('|') {
            continue;
        }
        let cells = split_cells(line);
        if cells.len() < MIN_CELLS {
            parsed.skipped.push(SkippedRow {
                line: index + 1,
                reason: format!("expected at least {MIN_CELLS} cells, found {}", cells.len()),
            });
            continue;
        }
        let fields = EntryFields::new(
            cells[0],
            cells[1],
            cells[2],
            cells.get(3).copied().unwrap_or_default(),
        );
        match fields.validate() {
            Ok(entry) => parsed.entries.push(entry),
            Err(err) => parsed.skipped.push(SkippedRow {
                line: index + 1,
                reason: err.to_string(),
            }),
        }
    }
    parsed
}

pub fn render_table(period: Period, entries: &[Entry]) -> String {
    let mut out = String::new();
    out.push_str(&period.heading());
    out.push_str("\n\n");
    out.push_str(HEADER_ROW);
    out.push('\n');
    out.push_str(SEPARATOR_ROW);
    out.push('\n');
    for entry in entries {
        out.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            entry.date, entry.name, entry.amount, entry.note
        ));
    }
    out
}

// Segments strictly between the first and last `|`, trimmed.
fn split_cells(line: &str) -> Vec<&str> {
    let segments: Vec<&str> = line.split('|').collect();
    if segments.len() < 2 {
        return Vec::new();
    }
    segments[1..segments.len() - 1]
        .iter()
        .map(|cell| cell.trim())
        .collect()
}

//! Net totals and filtered breakdowns over bill entries.

use std::collections::HashSet;

use billy_domain::{AmountType, Entry};

use crate::ledger::Ledger;

/// Criteria of the advanced statistics filter. Empty strings count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdvancedFilter {
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub name_contains: Option<String>,
    pub note_contains: Option<String>,
    pub amount_type: AmountType,
}

impl AdvancedFilter {
    pub fn matches(&self, entry: &Entry) -> bool {
        let from = non_empty(&self.date_from);
        let to = non_empty(&self.date_to);
        let date_ok = match (from, to) {
            (Some(from), Some(to)) => date_in_range(entry.date.trim(), from, to),
            (Some(from), None) => entry.date == from,
            (None, Some(to)) => entry.date == to,
            (None, None) => true,
        };
        if !date_ok {
            return false;
        }
        if let Some(needle) = non_empty(&self.name_contains) {
            if !entry.name.contains(needle) {
                return false;
            }
        }
        if let Some(needle) = non_empty(&self.note_contains) {
            if !entry.note.contains(needle) {
                return false;
            }
        }
        match self.amount_type {
            AmountType::All => true,
            AmountType::Income => entry.is_income(),
            AmountType::Expense => !entry.is_income(),
        }
    }
}

/// Counts and totals for a set of entries. Expense totals are positive
/// magnitudes; `net` is income minus expenses.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Breakdown {
    pub count: usize,
    pub income_count: usize,
    pub expense_count: usize,
    pub income_total: f64,
    pub expense_total: f64,
    pub net: f64,
}

#[derive(Debug, Clone)]
pub struct FilterReport<'a> {
    pub matches: Vec<&'a Entry>,
    pub breakdown: Breakdown,
}

/// Figures shown next to the entry table.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    /// Net over every entry.
    pub total: f64,
    /// Net over the selected entries.
    pub selected: f64,
    /// Net over every entry sharing a name with the selection.
    pub same_name: f64,
}

pub struct StatisticsService;

impl StatisticsService {
    pub fn sum<'a>(entries: impl IntoIterator<Item = &'a Entry>) -> f64 {
        entries.into_iter().map(|entry| entry.amount.signed()).sum()
    }

    pub fn filtered_sum<'a, P>(entries: impl IntoIterator<Item = &'a Entry>, predicate: P) -> f64
    where
        P: Fn(&Entry) -> bool,
    {
        Self::sum(entries.into_iter().filter(|entry| predicate(*entry)))
    }

    pub fn same_name_sum<'a>(
        entries: impl IntoIterator<Item = &'a Entry>,
        names: &HashSet<String>,
    ) -> f64 {
        Self::filtered_sum(entries, |entry| names.contains(&entry.name))
    }

    pub fn breakdown<'a>(entries: impl IntoIterator<Item = &'a Entry>) -> Breakdown {
        let mut breakdown = Breakdown::default();
        for entry in entries {
            breakdown.count += 1;
            let value = entry.amount.value();
            if entry.is_income() {
                breakdown.income_count += 1;
                breakdown.income_total += value;
            } else {
                breakdown.expense_count += 1;
                breakdown.expense_total += value;
            }
        }
        breakdown.net = breakdown.income_total - breakdown.expense_total;
        breakdown
    }

    pub fn advanced_filter<'a>(entries: &'a [Entry], filter: &AdvancedFilter) -> FilterReport<'a> {
        let matches: Vec<&Entry> = entries.iter().filter(|entry| filter.matches(entry)).collect();
        let breakdown = Self::breakdown(matches.iter().copied());
        FilterReport { matches, breakdown }
    }

    /// Totals for a ledger and a selection of display positions. Positions
    /// outside the ledger are ignored.
    pub fn totals(ledger: &Ledger, selection: &[usize]) -> Totals {
        let selected: Vec<&Entry> = selection
            .iter()
            .filter_map(|&index| ledger.entry_at(index))
            .collect();
        let names: HashSet<String> = selected.iter().map(|entry| entry.name.clone()).collect();
        let same_name = if names.is_empty() {
            0.0
        } else {
            Self::same_name_sum(ledger.entries(), &names)
        };
        Totals {
            total: Self::sum(ledger.entries()),
            selected: Self::sum(selected.iter().copied()),
            same_name,
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

// Numeric comparison when all three tokens are integers, raw text order otherwise.
fn date_in_range(date: &str, from: &str, to: &str) -> bool {
    match (
        date.parse::<i64>(),
        from.parse::<i64>(),
        to.parse::<i64>(),
    ) {
        (Ok(date), Ok(from), Ok(to)) => from <= date && date <= to,
        _ => from <= date && date <= to,
    }
}

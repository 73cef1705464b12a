//! Shared traits and enums used when viewing and reordering bill entries.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Exposes a stable identifier for entities held in a ledger.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} `{value}`")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseEnumError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Column an entry list can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Date,
    Name,
    Amount,
    Note,
}

impl SortField {
    pub const ALL: [SortField; 4] = [
        SortField::Date,
        SortField::Name,
        SortField::Amount,
        SortField::Note,
    ];

    /// Column title used in the persisted table header.
    pub fn column_title(self) -> &'static str {
        match self {
            SortField::Date => "日期",
            SortField::Name => "名称",
            SortField::Amount => "流水",
            SortField::Note => "备注",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SortField::Date => "date",
            SortField::Name => "name",
            SortField::Amount => "amount",
            SortField::Note => "note",
        };
        f.write_str(label)
    }
}

impl FromStr for SortField {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date" | "日期" => Ok(SortField::Date),
            "name" | "名称" => Ok(SortField::Name),
            "amount" | "流水" => Ok(SortField::Amount),
            "note" | "备注" => Ok(SortField::Note),
            _ => Err(ParseEnumError::new("sort field", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SortDirection::Ascending => "ascending",
            SortDirection::Descending => "descending",
        };
        f.write_str(label)
    }
}

/// Active display sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveDirection {
    Up,
    Down,
}

/// Income/expense restriction used by the advanced filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AmountType {
    #[default]
    All,
    Income,
    Expense,
}

impl fmt::Display for AmountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AmountType::All => "全部",
            AmountType::Income => "收入",
            AmountType::Expense => "支出",
        };
        f.write_str(label)
    }
}

impl FromStr for AmountType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" | "全部" => Ok(AmountType::All),
            "income" | "收入" => Ok(AmountType::Income),
            "expense" | "支出" => Ok(AmountType::Expense),
            _ => Err(ParseEnumError::new("amount type", s)),
        }
    }
}

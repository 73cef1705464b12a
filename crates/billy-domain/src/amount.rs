//! Signed amount text using the leading `+` income marker.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix that marks an amount as income. Amounts without it are expenses.
pub const INCOME_MARKER: char = '+';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("amount must not be empty")]
    Empty,
    #[error("amount `{0}` is not a valid number")]
    Malformed(String),
}

/// Amount kept verbatim as entered, alongside its parsed magnitude.
///
/// `"+10"` is an income of 10, `"5"` is an expense of 5. The text is what gets
/// written back to disk, so the sign marker survives a load/save cycle untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Amount {
    raw: String,
    value: f64,
}

impl Amount {
    pub fn parse(input: &str) -> Result<Self, AmountError> {
        let raw = input.trim();
        if raw.is_empty() {
            return Err(AmountError::Empty);
        }
        let digits = raw.strip_prefix(INCOME_MARKER).unwrap_or(raw).trim();
        let value: f64 = digits
            .parse()
            .map_err(|_| AmountError::Malformed(raw.to_string()))?;
        if !value.is_finite() {
            return Err(AmountError::Malformed(raw.to_string()));
        }
        Ok(Self {
            raw: raw.to_string(),
            value,
        })
    }

    /// Returns `true` when the amount carries the income marker.
    pub fn is_income(&self) -> bool {
        self.raw.starts_with(INCOME_MARKER)
    }

    /// Number written after the optional marker. Used as the amount sort key.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Contribution to a net total: positive for income, negated for expenses.
    pub fn signed(&self) -> f64 {
        if self.is_income() {
            self.value
        } else {
            -self.value
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Amount::parse(s)
    }
}

impl TryFrom<String> for Amount {
    type Error = AmountError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Amount::parse(&value)
    }
}

impl From<Amount> for String {
    fn from(amount: Amount) -> Self {
        amount.raw
    }
}

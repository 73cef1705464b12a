//! Year/month period encoded in bill file names (`YYYYMM.md`).

use std::{fmt, path::Path};

use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const BILL_FILE_EXTENSION: &str = "md";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    #[error("`{0}` is not a YYYYMM.md bill file name")]
    InvalidFileName(String),
    #[error("year `{0}` must be a four digit number")]
    InvalidYear(String),
    #[error("month `{0}` must be between 01 and 12")]
    InvalidMonth(String),
}

/// Month covered by one bill file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Period {
    year: u16,
    month: u8,
}

impl Period {
    pub fn new(year: u16, month: u8) -> Result<Self, PeriodError> {
        if year > 9999 {
            return Err(PeriodError::InvalidYear(year.to_string()));
        }
        if !(1..=12).contains(&month) {
            return Err(PeriodError::InvalidMonth(month.to_string()));
        }
        Ok(Self { year, month })
    }

    /// Parses separate year and month tokens such as `"2024"` and `"3"` or `"03"`.
    pub fn parse(year: &str, month: &str) -> Result<Self, PeriodError> {
        let year_text = year.trim();
        if year_text.len() != 4 || !year_text.chars().all(|ch| ch.is_ascii_digit()) {
            return Err(PeriodError::InvalidYear(year_text.to_string()));
        }
        let year_value: u16 = year_text
            .parse()
            .map_err(|_| PeriodError::InvalidYear(year_text.to_string()))?;
        let month_text = month.trim();
        let month_value: u8 = month_text
            .parse()
            .map_err(|_| PeriodError::InvalidMonth(month_text.to_string()))?;
        Self::new(year_value, month_value)
    }

    /// Parses a compact `YYYYMM` token, with or without the `.md` extension.
    pub fn parse_compact(token: &str) -> Result<Self, PeriodError> {
        let trimmed = token.trim();
        let stem = trimmed
            .strip_suffix(&format!(".{}", BILL_FILE_EXTENSION))
            .unwrap_or(trimmed);
        if stem.len() != 6 || !stem.chars().all(|ch| ch.is_ascii_digit()) {
            return Err(PeriodError::InvalidFileName(trimmed.to_string()));
        }
        let (year, month) = stem.split_at(4);
        Self::parse(year, month)
    }

    /// Derives the period from the file name component of `path`.
    pub fn from_path(path: &Path) -> Result<Self, PeriodError> {
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| PeriodError::InvalidFileName(path.display().to_string()))?;
        if !name.ends_with(&format!(".{}", BILL_FILE_EXTENSION)) {
            return Err(PeriodError::InvalidFileName(name.to_string()));
        }
        Self::parse_compact(name)
    }

    /// Period containing today's local date.
    pub fn current() -> Self {
        let today = Local::now().date_naive();
        Self {
            year: today.year().clamp(0, 9999) as u16,
            month: today.month() as u8,
        }
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn file_name(&self) -> String {
        format!("{}.{}", self, BILL_FILE_EXTENSION)
    }

    /// Heading line written at the top of the bill file.
    pub fn heading(&self) -> String {
        format!("# {:04}年{:02}月账单", self.year, self.month)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_file_name_and_heading() {
        let period = Period::new(2024, 3).unwrap();
        assert_eq!(period.file_name(), "202403.md");
        assert_eq!(period.heading(), "# 2024年03月账单");
    }

    #[test]
    fn parses_compact_names() {
        let period = Period::parse_compact("202512.md").unwrap();
        assert_eq!((period.year(), period.month()), (2025, 12));
        assert_eq!(Period::parse_compact("202401").unwrap().month(), 1);
        assert!(Period::parse_compact("2024.md").is_err());
        assert!(matches!(
            Period::parse_compact("202413"),
            Err(PeriodError::InvalidMonth(_))
        ));
    }

    #[test]
    fn from_path_requires_md_extension() {
        assert!(Period::from_path(Path::new("/tmp/bills/202402.md")).is_ok());
        assert!(Period::from_path(Path::new("202402.txt")).is_err());
        assert!(Period::from_path(Path::new("notes.md")).is_err());
    }

    #[test]
    fn parse_accepts_single_digit_month() {
        assert_eq!(Period::parse("2024", "7").unwrap().file_name(), "202407.md");
        assert!(Period::parse("24", "07").is_err());
        assert!(Period::parse("2024", "0").is_err());
    }
}

//! A single bill record and the raw form fields it is built from.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::{amount::Amount, amount::AmountError, common::Identifiable, common::SortField};

pub type EntryId = Uuid;

/// Characters that would break a table row when written back to disk.
const FORBIDDEN_CHARS: [char; 3] = ['|', '\n', '\r'];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    #[error("{0} must not be empty")]
    MissingField(&'static str),
    #[error("{0} must not contain `|` or line breaks")]
    ForbiddenCharacter(&'static str),
    #[error(transparent)]
    Amount(#[from] AmountError),
}

/// One bill line: date token, grouping name, signed amount, free-form note.
///
/// The `id` lives only in memory. It is assigned on creation, survives edits
/// and undo snapshots, and is never written to the bill file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(skip, default = "Uuid::new_v4")]
    pub id: EntryId,
    pub date: String,
    pub name: String,
    pub amount: Amount,
    #[serde(default)]
    pub note: String,
}

impl Entry {
    pub fn new(
        date: impl Into<String>,
        name: impl Into<String>,
        amount: Amount,
        note: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date: date.into(),
            name: name.into(),
            amount,
            note: note.into(),
        }
    }

    /// Validates raw form input and builds a fresh entry from it.
    pub fn from_fields(fields: &EntryFields) -> Result<Self, EntryError> {
        let date = required(&fields.date, "date")?;
        let name = required(&fields.name, "name")?;
        let amount_text = required(&fields.amount, "amount")?;
        let note = fields.note.trim();
        reject_forbidden(note, "note")?;
        let amount = Amount::parse(amount_text)?;
        Ok(Self::new(date, name, amount, note))
    }

    /// Copies the four content fields from `other`, keeping this entry's id.
    pub fn replace_content(&mut self, other: &Entry) {
        self.date = other.date.clone();
        self.name = other.name.clone();
        self.amount = other.amount.clone();
        self.note = other.note.clone();
    }

    /// Structural equality over date, name, amount text and note.
    pub fn same_content(&self, other: &Entry) -> bool {
        self.date == other.date
            && self.name == other.name
            && self.amount.as_str() == other.amount.as_str()
            && self.note == other.note
    }

    pub fn is_income(&self) -> bool {
        self.amount.is_income()
    }

    /// Text of the given column.
    pub fn field(&self, field: SortField) -> &str {
        match field {
            SortField::Date => &self.date,
            SortField::Name => &self.name,
            SortField::Amount => self.amount.as_str(),
            SortField::Note => &self.note,
        }
    }

    /// Case-insensitive substring match against every column.
    pub fn contains_keyword(&self, keyword: &str) -> bool {
        let needle = keyword.to_lowercase();
        SortField::ALL
            .iter()
            .any(|field| self.field(*field).to_lowercase().contains(&needle))
    }

    pub fn to_fields(&self) -> EntryFields {
        EntryFields::new(
            self.date.clone(),
            self.name.clone(),
            self.amount.as_str(),
            self.note.clone(),
        )
    }
}

impl Identifiable for Entry {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Unvalidated date/name/amount/note strings as typed into a form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryFields {
    pub date: String,
    pub name: String,
    pub amount: String,
    #[serde(default)]
    pub note: String,
}

impl EntryFields {
    pub fn new(
        date: impl Into<String>,
        name: impl Into<String>,
        amount: impl Into<String>,
        note: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            name: name.into(),
            amount: amount.into(),
            note: note.into(),
        }
    }

    pub fn validate(&self) -> Result<Entry, EntryError> {
        Entry::from_fields(self)
    }
}

fn required<'a>(value: &'a str, label: &'static str) -> Result<&'a str, EntryError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EntryError::MissingField(label));
    }
    reject_forbidden(trimmed, label)?;
    Ok(trimmed)
}

fn reject_forbidden(value: &str, label: &'static str) -> Result<(), EntryError> {
    if value.contains(&FORBIDDEN_CHARS[..]) {
        Err(EntryError::ForbiddenCharacter(label))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(date: &str, name: &str, amount: &str, note: &str) -> EntryFields {
        EntryFields::new(date, name, amount, note)
    }

    #[test]
    fn builds_trimmed_entry() {
        let entry = fields(" 0101 ", " 午饭 ", " 15 ", "  ").validate().unwrap();
        assert_eq!(entry.date, "0101");
        assert_eq!(entry.name, "午饭");
        assert_eq!(entry.amount.as_str(), "15");
        assert_eq!(entry.note, "");
    }

    #[test]
    fn reports_missing_fields_in_order() {
        assert_eq!(
            fields("", "", "", "").validate().unwrap_err(),
            EntryError::MissingField("date")
        );
        assert_eq!(
            fields("0101", " ", "1", "").validate().unwrap_err(),
            EntryError::MissingField("name")
        );
        assert_eq!(
            fields("0101", "x", "", "").validate().unwrap_err(),
            EntryError::MissingField("amount")
        );
    }

    #[test]
    fn rejects_malformed_amount_and_pipes() {
        assert!(matches!(
            fields("0101", "x", "abc", "").validate(),
            Err(EntryError::Amount(AmountError::Malformed(_)))
        ));
        assert_eq!(
            fields("0101", "a|b", "1", "").validate().unwrap_err(),
            EntryError::ForbiddenCharacter("name")
        );
        assert_eq!(
            fields("0101", "a", "1", "x|y").validate().unwrap_err(),
            EntryError::ForbiddenCharacter("note")
        );
    }

    #[test]
    fn replace_content_keeps_identity() {
        let mut entry = fields("0101", "a", "1", "").validate().unwrap();
        let id = entry.id;
        let other = fields("0102", "b", "+2", "n").validate().unwrap();
        entry.replace_content(&other);
        assert_eq!(entry.id, id);
        assert!(entry.same_content(&other));
        assert_ne!(entry, other);
    }

    #[test]
    fn keyword_match_ignores_case() {
        let entry = fields("0101", "Coffee", "3", "Morning").validate().unwrap();
        assert!(entry.contains_keyword("coff"));
        assert!(entry.contains_keyword("MORN"));
        assert!(entry.contains_keyword("010"));
        assert!(!entry.contains_keyword("tea"));
    }
}

//! In-memory bill list with a sortable display view and undo history.
//!
//! The backing order is the canonical, persisted order. The display order is a
//! permutation of backing positions that can be sorted without touching the
//! backing order. Every public index taken by the editing operations is a
//! display index.

use std::cmp::Ordering;

use billy_domain::{
    Entry, EntryFields, EntryId, Identifiable, MoveDirection, SortDirection, SortField, SortState,
};
use tracing::debug;

use crate::{
    error::{CoreError, CoreResult},
    undo::{UndoStack, DEFAULT_UNDO_LIMIT},
};

#[derive(Debug, Clone)]
pub struct Ledger {
    entries: Vec<Entry>,
    view: Vec<usize>,
    sort: Option<SortState>,
    history: UndoStack,
    dirty: bool,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self::with_undo_limit(DEFAULT_UNDO_LIMIT)
    }

    pub fn with_undo_limit(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            view: Vec::new(),
            sort: None,
            history: UndoStack::new(limit),
            dirty: false,
        }
    }

    /// Wraps already validated entries, e.g. the rows of a freshly loaded file.
    pub fn from_entries(entries: Vec<Entry>) -> Self {
        let mut ledger = Self::new();
        ledger.view = (0..entries.len()).collect();
        ledger.entries = entries;
        ledger
    }

    pub fn set_undo_limit(&mut self, limit: usize) {
        self.history.set_limit(limit);
    }

    /// Entries in backing order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Entries in display order.
    pub fn display(&self) -> Vec<&Entry> {
        self.view
            .iter()
            .map(|&position| &self.entries[position])
            .collect()
    }

    pub fn entry_at(&self, index: usize) -> Option<&Entry> {
        self.view.get(index).map(|&position| &self.entries[position])
    }

    pub fn display_index_of(&self, id: EntryId) -> Option<usize> {
        self.view
            .iter()
            .position(|&position| self.entries[position].id() == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn sort_state(&self) -> Option<SortState> {
        self.sort
    }

    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    /// `true` once anything changed since load or the last [`Ledger::mark_clean`].
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Inserts a new entry right after display position `after`, or appends.
    /// Returns the display position of the new entry.
    pub fn add(&mut self, fields: &EntryFields, after: Option<usize>) -> CoreResult<usize> {
        let entry = fields.validate()?;
        let position = match after {
            Some(index) => self.backing_position(index)? + 1,
            None => self.entries.len(),
        };
        let id = entry.id();
        self.checkpoint();
        self.entries.insert(position, entry);
        self.rebuild_view();
        debug!(position, "entry added");
        Ok(self.display_index_of(id).unwrap_or(position))
    }

    /// Overwrites the content of every selected entry with `fields`.
    pub fn update(&mut self, indices: &[usize], fields: &EntryFields) -> CoreResult<usize> {
        let positions = self.resolve_selection(indices)?;
        let template = fields.validate()?;
        self.checkpoint();
        for &position in &positions {
            self.entries[position].replace_content(&template);
        }
        debug!(count = positions.len(), "entries updated");
        Ok(positions.len())
    }

    pub fn delete(&mut self, indices: &[usize]) -> CoreResult<usize> {
        let mut positions = self.resolve_selection(indices)?;
        positions.sort_unstable_by(|a, b| b.cmp(a));
        self.checkpoint();
        for &position in &positions {
            self.entries.remove(position);
        }
        self.rebuild_view();
        debug!(count = positions.len(), "entries deleted");
        Ok(positions.len())
    }

    /// Shifts the selected entries one step in `direction`.
    ///
    /// The selection is resolved against the current view, then an active
    /// sort is dropped so display and backing order agree. Returns `None` without recording
    /// history when nothing is selected or a selected entry already sits at
    /// the edge; otherwise the new display positions, in selection order.
    pub fn move_entries(
        &mut self,
        indices: &[usize],
        direction: MoveDirection,
    ) -> CoreResult<Option<Vec<usize>>> {
        let positions = if indices.is_empty() {
            None
        } else {
            Some(self.resolve_selection(indices)?)
        };
        if self.sort.is_some() {
            self.reset_display();
        }
        let Some(positions) = positions else {
            return Ok(None);
        };
        let last = self.entries.len() - 1;
        let blocked = match direction {
            MoveDirection::Up => positions.contains(&0),
            MoveDirection::Down => positions.contains(&last),
        };
        if blocked {
            return Ok(None);
        }

        self.checkpoint();
        let mut ordered = positions.clone();
        match direction {
            MoveDirection::Up => {
                ordered.sort_unstable();
                for position in ordered {
                    self.entries.swap(position, position - 1);
                }
            }
            MoveDirection::Down => {
                ordered.sort_unstable_by(|a, b| b.cmp(a));
                for position in ordered {
                    self.entries.swap(position, position + 1);
                }
            }
        }
        self.rebuild_view();
        debug!(?direction, count = positions.len(), "entries moved");

        let moved = positions
            .into_iter()
            .map(|position| match direction {
                MoveDirection::Up => position - 1,
                MoveDirection::Down => position + 1,
            })
            .collect();
        Ok(Some(moved))
    }

    /// Sorts the display order. Repeating the same field flips the direction,
    /// a different field starts ascending.
    pub fn sort_by(&mut self, field: SortField) -> SortState {
        let direction = match self.sort {
            Some(state) if state.field == field => state.direction.toggled(),
            _ => SortDirection::Ascending,
        };
        let state = SortState { field, direction };
        self.sort = Some(state);
        self.apply_sort(state);
        state
    }

    pub fn reset_display(&mut self) {
        self.sort = None;
        self.view = (0..self.entries.len()).collect();
    }

    pub fn undo(&mut self) -> CoreResult<()> {
        let snapshot = self.history.pop().ok_or(CoreError::EmptyUndo)?;
        self.entries = snapshot;
        self.reset_display();
        self.dirty = true;
        debug!(remaining = self.history.len(), "undo applied");
        Ok(())
    }

    /// Display positions whose date, name, amount or note contain `keyword`,
    /// ignoring case.
    pub fn search(&self, keyword: &str) -> Vec<usize> {
        if keyword.is_empty() {
            return Vec::new();
        }
        self.view
            .iter()
            .enumerate()
            .filter(|(_, position)| self.entries[**position].contains_keyword(keyword))
            .map(|(index, _)| index)
            .collect()
    }

    fn backing_position(&self, index: usize) -> CoreResult<usize> {
        self.view
            .get(index)
            .copied()
            .ok_or(CoreError::IndexOutOfRange {
                index,
                len: self.view.len(),
            })
    }

    fn resolve_selection(&self, indices: &[usize]) -> CoreResult<Vec<usize>> {
        if indices.is_empty() {
            return Err(CoreError::Validation("no entries selected".into()));
        }
        let mut positions = Vec::with_capacity(indices.len());
        for &index in indices {
            let position = self.backing_position(index)?;
            if !positions.contains(&position) {
                positions.push(position);
            }
        }
        Ok(positions)
    }

    fn checkpoint(&mut self) {
        self.history.push(self.entries.clone());
        self.dirty = true;
    }

    // Structural changes invalidate the permutation; an active sort is re-applied.
    fn rebuild_view(&mut self) {
        self.view = (0..self.entries.len()).collect();
        if let Some(state) = self.sort {
            self.apply_sort(state);
        }
    }

    fn apply_sort(&mut self, state: SortState) {
        let entries = &self.entries;
        self.view.sort_by(|&a, &b| {
            let ordering = compare_entries(&entries[a], &entries[b], state.field);
            match state.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }
}

fn compare_entries(a: &Entry, b: &Entry, field: SortField) -> Ordering {
    match field {
        SortField::Amount => a.amount.value().total_cmp(&b.amount.value()),
        _ => a.field(field).cmp(b.field(field)),
    }
}

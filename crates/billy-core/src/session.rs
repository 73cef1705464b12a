//! Session state shared by every front end: which bill file is open, the
//! loaded ledger, the current selection, and where redraws go.

use std::path::{Path, PathBuf};

use billy_domain::{Entry, EntryFields, MoveDirection, Period, SortField, SortState};
use tracing::{info, warn};

use crate::{
    error::{CoreError, CoreResult},
    ledger::Ledger,
    statistics::{StatisticsService, Totals},
    storage::{CreateOutcome, LedgerStorage},
    undo::DEFAULT_UNDO_LIMIT,
};

/// Snapshot handed to a [`Renderer`] after every change.
#[derive(Debug)]
pub struct LedgerView<'a> {
    pub file: Option<&'a str>,
    pub rows: Vec<&'a Entry>,
    pub selection: &'a [usize],
    pub sort: Option<SortState>,
    pub totals: Totals,
}

/// Presentation callback invoked whenever the visible ledger changes.
pub trait Renderer {
    fn render(&mut self, view: &LedgerView<'_>);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRenderer;

impl Renderer for NoopRenderer {
    fn render(&mut self, _view: &LedgerView<'_>) {}
}

pub struct Session {
    storage: Box<dyn LedgerStorage>,
    data_dir: PathBuf,
    current_file: Option<String>,
    current_path: Option<PathBuf>,
    ledger: Ledger,
    selection: Vec<usize>,
    renderer: Box<dyn Renderer>,
    undo_limit: usize,
}

impl Session {
    pub fn new(
        storage: Box<dyn LedgerStorage>,
        data_dir: impl Into<PathBuf>,
        renderer: Box<dyn Renderer>,
    ) -> Self {
        Self {
            storage,
            data_dir: data_dir.into(),
            current_file: None,
            current_path: None,
            ledger: Ledger::new(),
            selection: Vec::new(),
            renderer,
            undo_limit: DEFAULT_UNDO_LIMIT,
        }
    }

    pub fn with_undo_limit(mut self, limit: usize) -> Self {
        self.set_undo_limit(limit);
        self
    }

    pub fn set_undo_limit(&mut self, limit: usize) {
        self.undo_limit = limit;
        self.ledger.set_undo_limit(limit);
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Points the session at another directory. An open file stays open and
    /// keeps saving to the path it was loaded from.
    pub fn set_data_dir(&mut self, dir: impl Into<PathBuf>) {
        self.data_dir = dir.into();
    }

    pub fn current_file(&self) -> Option<&str> {
        self.current_file.as_deref()
    }

    /// Full path of the open file as it was when opened.
    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_deref()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Selected display positions, in selection order.
    pub fn selection(&self) -> &[usize] {
        &self.selection
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.current_file.is_some() && self.ledger.is_dirty()
    }

    pub fn available_files(&self) -> CoreResult<Vec<String>> {
        self.storage.list_available(&self.data_dir)
    }

    /// Loads `name` (`YYYYMM` or `YYYYMM.md`) from the data directory and
    /// returns the number of entries read.
    ///
    /// A failed load leaves the session with no open file and an empty ledger.
    pub fn open(&mut self, name: &str) -> CoreResult<usize> {
        let file_name = Period::parse_compact(name)?.file_name();
        let path = self.data_dir.join(&file_name);
        self.selection.clear();
        match self.storage.load(&path) {
            Ok(mut ledger) => {
                ledger.set_undo_limit(self.undo_limit);
                let count = ledger.len();
                self.ledger = ledger;
                self.current_file = Some(file_name);
                self.current_path = Some(path.clone());
                info!(path = %path.display(), entries = count, "bill file opened");
                self.render();
                Ok(count)
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to open bill file");
                self.ledger = Ledger::with_undo_limit(self.undo_limit);
                self.current_file = None;
                self.current_path = None;
                self.render();
                Err(err)
            }
        }
    }

    /// Writes the ledger back to the open file and returns its path.
    pub fn save(&mut self) -> CoreResult<PathBuf> {
        let path = self.current_path.clone().ok_or(CoreError::NoFileOpen)?;
        self.storage.save(&path, &self.ledger)?;
        self.ledger.mark_clean();
        info!(path = %path.display(), entries = self.ledger.len(), "bill file saved");
        Ok(path)
    }

    /// Creates the bill file for `period` and opens it.
    pub fn create(&mut self, period: Period, overwrite: bool) -> CoreResult<CreateOutcome> {
        let path = self.data_dir.join(period.file_name());
        let outcome = self.storage.create(&path, overwrite)?;
        info!(path = %path.display(), ?outcome, "bill file created");
        self.open(&period.file_name())?;
        Ok(outcome)
    }

    /// Replaces the selection. Duplicates are dropped, order is kept.
    pub fn select(&mut self, indices: &[usize]) -> CoreResult<()> {
        self.selection = checked_selection(indices, self.ledger.len())?;
        self.render();
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.render();
    }

    /// Adds an entry after the last selected one, or at the end, and selects it.
    pub fn add(&mut self, fields: &EntryFields) -> CoreResult<usize> {
        let after = self.selection.last().copied();
        self.add_at(fields, after)
    }

    pub fn add_at(&mut self, fields: &EntryFields, after: Option<usize>) -> CoreResult<usize> {
        self.require_open()?;
        let index = self.ledger.add(fields, after)?;
        self.selection = vec![index];
        self.render();
        Ok(index)
    }

    /// Overwrites every selected entry with `fields`.
    pub fn update(&mut self, fields: &EntryFields) -> CoreResult<usize> {
        let selection = self.selection.clone();
        self.update_entries(&selection, fields)
    }

    /// Overwrites the entries at `indices` and selects them once the edit
    /// has been applied. A rejected edit leaves the selection alone.
    pub fn update_entries(&mut self, indices: &[usize], fields: &EntryFields) -> CoreResult<usize> {
        self.require_open()?;
        let count = self.ledger.update(indices, fields)?;
        self.selection = checked_selection(indices, self.ledger.len())?;
        self.render();
        Ok(count)
    }

    pub fn delete(&mut self) -> CoreResult<usize> {
        let selection = self.selection.clone();
        self.delete_entries(&selection)
    }

    pub fn delete_entries(&mut self, indices: &[usize]) -> CoreResult<usize> {
        self.require_open()?;
        let count = self.ledger.delete(indices)?;
        self.selection.clear();
        self.render();
        Ok(count)
    }

    /// Moves the selection one step. Returns `false` when nothing moved.
    pub fn move_selection(&mut self, direction: MoveDirection) -> CoreResult<bool> {
        let selection = self.selection.clone();
        self.move_entries(&selection, direction)
    }

    /// Moves the entries at `indices` one step and selects them at their new
    /// positions. When nothing moves the selection is kept, unless dropping
    /// an active sort invalidated it.
    pub fn move_entries(&mut self, indices: &[usize], direction: MoveDirection) -> CoreResult<bool> {
        self.require_open()?;
        let was_sorted = self.ledger.sort_state().is_some();
        let moved = self.ledger.move_entries(indices, direction)?;
        let changed = match moved {
            Some(positions) => {
                self.selection = positions;
                true
            }
            None if was_sorted => {
                self.selection.clear();
                false
            }
            None => {
                self.selection = checked_selection(indices, self.ledger.len())?;
                false
            }
        };
        self.render();
        Ok(changed)
    }

    pub fn sort_by(&mut self, field: SortField) -> SortState {
        let state = self.ledger.sort_by(field);
        self.selection.clear();
        self.render();
        state
    }

    pub fn reset_display(&mut self) {
        self.ledger.reset_display();
        self.selection.clear();
        self.render();
    }

    pub fn undo(&mut self) -> CoreResult<()> {
        self.ledger.undo()?;
        self.selection.clear();
        self.render();
        Ok(())
    }

    /// Selects every entry matching `keyword` and returns their positions.
    pub fn search(&mut self, keyword: &str) -> Vec<usize> {
        let matches = self.ledger.search(keyword);
        self.selection = matches.clone();
        self.render();
        matches
    }

    pub fn totals(&self) -> Totals {
        StatisticsService::totals(&self.ledger, &self.selection)
    }

    /// Current state as handed to the renderer.
    pub fn view(&self) -> LedgerView<'_> {
        build_view(self.current_file.as_deref(), &self.ledger, &self.selection)
    }

    /// Redraws without changing anything.
    pub fn refresh(&mut self) {
        self.render();
    }

    fn require_open(&self) -> CoreResult<()> {
        if self.current_file.is_some() {
            Ok(())
        } else {
            Err(CoreError::NoFileOpen)
        }
    }

    fn render(&mut self) {
        let view = build_view(self.current_file.as_deref(), &self.ledger, &self.selection);
        self.renderer.render(&view);
    }
}

// Range-checked, de-duplicated display positions in the given order.
fn checked_selection(indices: &[usize], len: usize) -> CoreResult<Vec<usize>> {
    let mut selection = Vec::with_capacity(indices.len());
    for &index in indices {
        if index >= len {
            return Err(CoreError::IndexOutOfRange { index, len });
        }
        if !selection.contains(&index) {
            selection.push(index);
        }
    }
    Ok(selection)
}

fn build_view<'a>(
    file: Option<&'a str>,
    ledger: &'a Ledger,
    selection: &'a [usize],
) -> LedgerView<'a> {
    LedgerView {
        file,
        rows: ledger.display(),
        selection,
        sort: ledger.sort_state(),
        totals: StatisticsService::totals(ledger, selection),
    }
}

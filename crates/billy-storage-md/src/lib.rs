//! billy-storage-md
//!
//! Filesystem persistence for monthly bill files stored as markdown tables.

pub mod table;

use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use billy_core::{CoreError, CoreResult, CreateOutcome, Ledger, LedgerStorage};
use billy_domain::Period;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

pub use table::{parse_table, render_table, ParsedTable, SkippedRow};

const TMP_SUFFIX: &str = "tmp";

static BILL_FILE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{6}\.md$").expect("bill file name pattern compiles"));

/// Reads and writes `YYYYMM.md` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownStorage;

impl MarkdownStorage {
    pub fn new() -> Self {
        Self
    }

    /// `true` when `name` looks like a bill file name.
    pub fn is_bill_file_name(name: &str) -> bool {
        BILL_FILE_NAME.is_match(name)
    }
}

impl LedgerStorage for MarkdownStorage {
    fn load(&self, path: &Path) -> CoreResult<Ledger> {
        let bytes = fs::read(path)?;
        let text = String::from_utf8(bytes).map_err(|err| {
            CoreError::Format(format!("{} is not valid UTF-8: {err}", path.display()))
        })?;
        let parsed = parse_table(&text);
        for row in &parsed.skipped {
            warn!(
                path = %path.display(),
                line = row.line,
                reason = %row.reason,
                "skipping unreadable bill row"
            );
        }
        debug!(path = %path.display(), entries = parsed.entries.len(), "bill table parsed");
        Ok(Ledger::from_entries(parsed.entries))
    }

    fn save(&self, path: &Path, ledger: &Ledger) -> CoreResult<()> {
        let period = Period::from_path(path)?;
        let content = render_table(period, ledger.entries());
        let tmp = tmp_path(path);
        write_atomic(&tmp, &content)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    fn list_available(&self, dir: &Path) -> CoreResult<Vec<String>> {
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if Self::is_bill_file_name(name) {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    fn create(&self, path: &Path, overwrite: bool) -> CoreResult<CreateOutcome> {
        let period = Period::from_path(path)?;
        let existed = path.exists();
        if existed && !overwrite {
            return Err(CoreError::AlreadyExists(path.display().to_string()));
        }
        let tmp = tmp_path(path);
        write_atomic(&tmp, &render_table(period, &[]))?;
        fs::rename(&tmp, path)?;
        Ok(if existed {
            CreateOutcome::Overwritten
        } else {
            CreateOutcome::Created
        })
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    file.sync_all()?;
    Ok(())
}

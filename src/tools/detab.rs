//! Tab expansion for text files that were edited with hard tabs.

use std::{fs, io, path::Path};

pub const TAB_REPLACEMENT: &str = "    ";

/// Replaces every tab with four spaces and returns the new text together
/// with the number of tabs replaced.
pub fn detab_text(text: &str) -> (String, usize) {
    let count = text.matches('\t').count();
    if count == 0 {
        return (text.to_string(), 0);
    }
    (text.replace('\t', TAB_REPLACEMENT), count)
}

/// Rewrites `path` in place. The file is left untouched when it holds no tabs.
pub fn detab_file(path: &Path) -> io::Result<usize> {
    let content = fs::read_to_string(path)?;
    let (expanded, count) = detab_text(&content);
    if count > 0 {
        fs::write(path, expanded)?;
    }
    Ok(count)
}

//! Inbox directory scanning.
//!
//! The mail fetcher (whatever saves confirmations out of the mailbox) is
//! a separate concern; this side just reads every `.html`/`.htm` file it
//! left behind. Files stay in place, the state file does the dedup.

use std::fs;
use std::path::{Path, PathBuf};

use crate::CliError;

/// Read all saved emails, sorted by file name for a stable order.
/// Unreadable files are warned about and skipped.
pub fn read_inbox(dir: &Path) -> Result<Vec<(PathBuf, String)>, CliError> {
    let entries = fs::read_dir(dir)
        .map_err(|e| CliError::io(format!("cannot read inbox {}: {}", dir.display(), e)))?;

    let mut emails = Vec::new();
    for entry in entries {
        let entry = entry
            .map_err(|e| CliError::io(format!("cannot read inbox {}: {}", dir.display(), e)))?;
        let path = entry.path();
        let is_html = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("html") || e.eq_ignore_ascii_case("htm"));
        if !is_html {
            continue;
        }
        match fs::read_to_string(&path) {
            Ok(html) => emails.push((path, html)),
            Err(e) => eprintln!("warning: cannot read {}: {}", path.display(), e),
        }
    }

    emails.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(emails)
}

use std::fmt;

#[derive(Debug)]
pub enum LedgerError {
    /// The sheet does not look like a month ledger (no free row within the
    /// scan window, malformed block). Not repaired, surfaced as fatal.
    Structure(String),
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structure(msg) => write!(f, "ledger structure error: {msg}"),
        }
    }
}

impl std::error::Error for LedgerError {}

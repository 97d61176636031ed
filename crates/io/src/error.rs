//! Errors for ledger unit persistence.

use std::error::Error;
use std::fmt;
use std::path::PathBuf;

use railnota_engine::error::LedgerError;

/// Errors from reading or writing a ledger unit file.
#[derive(Debug)]
pub enum XlsxError {
    /// The file is open in Excel (or otherwise write-locked). The caller
    /// should leave the triggering item unprocessed and retry later.
    Locked(PathBuf),
    /// Filesystem error other than a lock.
    Io(String),
    /// The workbook could not be read or written.
    Workbook(String),
    /// The sheet contents do not match the ledger schema.
    Structure(String),
}

impl XlsxError {
    /// True when the failure means "file open in Excel, try again later".
    pub fn is_locked(&self) -> bool {
        matches!(self, XlsxError::Locked(_))
    }
}

impl fmt::Display for XlsxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XlsxError::Locked(path) => {
                write!(f, "{} is locked (open in Excel?)", path.display())
            }
            XlsxError::Io(msg) => write!(f, "i/o error: {}", msg),
            XlsxError::Workbook(msg) => write!(f, "workbook error: {}", msg),
            XlsxError::Structure(msg) => write!(f, "ledger structure error: {}", msg),
        }
    }
}

impl Error for XlsxError {}

impl From<LedgerError> for XlsxError {
    fn from(e: LedgerError) -> Self {
        XlsxError::Structure(e.to_string())
    }
}

impl From<std::io::Error> for XlsxError {
    fn from(e: std::io::Error) -> Self {
        XlsxError::Io(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locked_display_names_the_file() {
        let err = XlsxError::Locked(PathBuf::from("Onkosten_Februari_2026.xlsx"));
        assert!(err.is_locked());
        assert!(err.to_string().contains("Onkosten_Februari_2026.xlsx"));
        assert!(err.to_string().contains("locked"));
    }

    #[test]
    fn test_ledger_error_maps_to_structure() {
        let err: XlsxError = LedgerError::Structure("no free row".into()).into();
        assert!(matches!(err, XlsxError::Structure(_)));
        assert!(!err.is_locked());
    }
}

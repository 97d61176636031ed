//! CLI exit code registry.
//!
//! Exit codes are part of the shell contract; the daily scheduled run
//! keys its retry behavior on them.
//!
//! | Code | Meaning                                             |
//! |------|-----------------------------------------------------|
//! | 0    | Success                                             |
//! | 1    | General error (parse failure, ledger structure)     |
//! | 2    | Usage error (bad arguments, missing config)         |
//! | 3    | I/O error (unreadable inbox, state file not saved)  |
//! | 4    | Unit file locked (open in Excel) — retry later      |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing or invalid config.
pub const EXIT_USAGE: u8 = 2;

/// I/O error - filesystem failure outside the unit files.
pub const EXIT_IO: u8 = 3;

/// A ledger unit file is locked (open in Excel). Nothing was lost;
/// rerunning the command after closing Excel picks up where it stopped.
pub const EXIT_LOCKED: u8 = 4;

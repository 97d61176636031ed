//! Fixed schema of a month ledger and the locator that names its unit.
//!
//! One ledger unit per calendar month: a single-sheet workbook named
//! `Onkosten_<Maand>_<Jaar>.xlsx` whose sheet carries the localized
//! `"<Maand> <Jaar>"` name. Both names derive from the travel date alone so
//! that insert and removal resolve the same unit.

use chrono::{Datelike, NaiveDate};

/// Dutch month names, index 0 = Januari.
pub const DUTCH_MONTHS: [&str; 12] = [
    "Januari", "Februari", "Maart", "April", "Mei", "Juni",
    "Juli", "Augustus", "September", "Oktober", "November", "December",
];

// Data block (1-based Excel rows, inclusive).
pub const DATA_START_ROW: u32 = 8;
pub const NOMINAL_ROWS: u32 = 8;
pub const DATA_END_ROW: u32 = DATA_START_ROW + NOMINAL_ROWS - 1; // 15

/// How far past the block start the occupancy scans look. Generous: a month
/// with more tickets than this is not a commuting ledger anymore.
pub const ROW_SCAN_WINDOW: u32 = 50;

/// How many rows below the data block the summary rewriter inspects.
pub const SUMMARY_SCAN_ROWS: u32 = 20;

// Columns (1-based).
pub const COL_DATE: u32 = 1; // A
pub const COL_NR: u32 = 2; // B
pub const COL_DESCRIPTION: u32 = 3; // C
pub const COL_CURRENCY: u32 = 4; // D
pub const COL_CATEGORY_FIRST: u32 = 5; // E
pub const COL_TRANSPORT: u32 = 6; // F
pub const COL_CATEGORY_LAST: u32 = 11; // K
pub const COL_TOTAL: u32 = 12; // L

// Header region.
pub const ROW_NAME: u32 = 2;
pub const ROW_MONTH_LABEL: u32 = 5;
pub const COL_LABEL: u32 = 1; // A
pub const COL_VALUE: u32 = 2; // B
pub const ROW_RANGE_FIRST: u32 = 4; // K4 = first day of month
pub const ROW_RANGE_LAST: u32 = 5; // K5 = last day of month
pub const COL_DATE_RANGE: u32 = 11; // K
pub const HEADER_ROW: u32 = 7;

pub const CURRENCY_LABEL: &str = "EUR";

/// Column header labels for row 7, in column order A..L.
pub const COLUMN_HEADERS: [&str; 12] = [
    "Datum", "Nr", "Omschrijving", "Munt",
    "Logies", "Vervoer", "Maaltijden", "Representatie",
    "Parking", "Klein materiaal", "Diversen", "Totaal",
];

/// Sheet name for the month containing `d`, e.g. `"Februari 2026"`.
pub fn sheet_name_for(d: NaiveDate) -> String {
    format!("{} {}", DUTCH_MONTHS[d.month0() as usize], d.year())
}

/// Workbook file name for the month containing `d`,
/// e.g. `"Onkosten_Februari_2026.xlsx"`.
pub fn workbook_file_name(d: NaiveDate) -> String {
    format!("Onkosten_{}_{}.xlsx", DUTCH_MONTHS[d.month0() as usize], d.year())
}

/// First and last calendar day of the month containing `d`.
pub fn month_bounds(d: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = NaiveDate::from_ymd_opt(d.year(), d.month(), 1).unwrap();
    let next_month = if d.month() == 12 {
        NaiveDate::from_ymd_opt(d.year() + 1, 1, 1).unwrap()
    } else {
        NaiveDate::from_ymd_opt(d.year(), d.month() + 1, 1).unwrap()
    };
    (first, next_month.pred_opt().unwrap())
}

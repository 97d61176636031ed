//! Row block manager: slot finding, overflow growth, renumbering.
//!
//! A data row is *occupied* when its date cell holds a concrete date value
//! (a `Date` cell or a bare serial number), never a formula or text. The
//! block is contiguous by construction, so the first non-occupied date cell
//! at or after the block start is always the next insertion slot — whether
//! that is an empty slot inside the nominal block, or the first summary row
//! when the (possibly already overflowed) block is full.

use crate::cell::CellValue;
use crate::error::LedgerError;
use crate::formula::Formula;
use crate::layout::{
    COL_CATEGORY_FIRST, COL_CATEGORY_LAST, COL_DATE, COL_NR, COL_TOTAL, DATA_START_ROW,
    ROW_SCAN_WINDOW,
};
use crate::sheet::Sheet;

fn is_occupied(sheet: &Sheet, row: u32) -> bool {
    sheet.get(row, COL_DATE).as_date_serial().is_some()
}

/// First row index whose date cell is not a concrete date. May exceed the
/// nominal block end (overflow insertion point).
pub fn find_next_free_row(sheet: &Sheet) -> Result<u32, LedgerError> {
    for row in DATA_START_ROW..DATA_START_ROW + ROW_SCAN_WINDOW {
        if !is_occupied(sheet, row) {
            return Ok(row);
        }
    }
    Err(LedgerError::Structure(format!(
        "no free data row within {ROW_SCAN_WINDOW} rows from row {DATA_START_ROW} in '{}'",
        sheet.name
    )))
}

/// Last occupied data row, or `None` for an empty block.
pub fn last_occupied_row(sheet: &Sheet) -> Option<u32> {
    let mut last = None;
    for row in DATA_START_ROW..DATA_START_ROW + ROW_SCAN_WINDOW {
        if is_occupied(sheet, row) {
            last = Some(row);
        }
    }
    last
}

/// Insert one blank physical row before `insert_at`, pushing everything
/// below (summary region included) down, and give the new row its own
/// row-total formula. The caller is responsible for extending the summary
/// ranges afterwards.
pub fn grow_block(sheet: &mut Sheet, insert_at: u32) {
    sheet.insert_rows(insert_at, 1);
    set_row_total_formula(sheet, insert_at);
}

/// The per-row aggregate for `row`: `SUM(E<row>:K<row>)` in the total column.
pub fn set_row_total_formula(sheet: &mut Sheet, row: u32) {
    sheet.set(
        row,
        COL_TOTAL,
        CellValue::Formula(Formula::SumCols {
            row,
            first_col: COL_CATEGORY_FIRST,
            last_col: COL_CATEGORY_LAST,
        }),
    );
}

/// Rewrite the sequence-number column as a dense 1..K run over the occupied
/// rows, in physical order.
pub fn renumber(sheet: &mut Sheet) {
    let mut nr = 1u32;
    for row in DATA_START_ROW..DATA_START_ROW + ROW_SCAN_WINDOW {
        if is_occupied(sheet, row) {
            sheet.set(row, COL_NR, CellValue::Number(nr as f64));
            nr += 1;
        }
    }
}

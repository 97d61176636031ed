//! In-memory insert/remove of ticket rows on a month sheet.
//!
//! These are the mutation halves of the ledger engine; persistence wraps
//! them in `railnota-io`. All mutations happen on the in-memory sheet, so a
//! failed save discards them without touching the file.

use crate::cell::{excel_serial, CellValue};
use crate::error::LedgerError;
use crate::layout::{
    COL_CURRENCY, COL_DATE, COL_DESCRIPTION, COL_NR, COL_TOTAL, COL_TRANSPORT, CURRENCY_LABEL,
    DATA_END_ROW, DATA_START_ROW,
};
use crate::rewrite::rewrite_summary_ranges;
use crate::rows::{
    find_next_free_row, grow_block, last_occupied_row, renumber, set_row_total_formula,
};
use crate::sheet::Sheet;
use crate::ticket::TripRecord;

/// What an insert wrote, echoed back so the caller can reverse it later.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertedRow {
    pub row: u32,
    pub seq: u32,
    pub date_serial: i64,
    pub description: String,
}

/// Outcome of a removal attempt. "Not found" is a result, not an error:
/// the row may have been removed by hand already.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoveOutcome {
    Removed {
        row: u32,
        /// Extra rows that also matched (date, description). The earliest
        /// physical row wins; the caller may want to warn about these.
        ambiguous: usize,
    },
    NotFound,
}

/// Insert one ticket row at the first free slot, growing the block when all
/// current rows are occupied.
pub fn insert_trip(sheet: &mut Sheet, trip: &TripRecord) -> Result<InsertedRow, LedgerError> {
    let row = find_next_free_row(sheet)?;

    if row > DATA_END_ROW {
        // All rows up to here are occupied: overflow. One new physical row,
        // then the summary ranges must cover it.
        grow_block(sheet, row);
        rewrite_summary_ranges(sheet, row);
    }

    let seq = row - DATA_START_ROW + 1;
    let description = trip.row_description();

    sheet.set(row, COL_DATE, CellValue::Date(trip.travel_date));
    sheet.set(row, COL_NR, CellValue::Number(seq as f64));
    sheet.set(row, COL_DESCRIPTION, CellValue::Text(description.clone()));
    sheet.set(row, COL_CURRENCY, CellValue::Text(CURRENCY_LABEL.to_string()));
    sheet.set(row, COL_TRANSPORT, CellValue::Number(trip.price));

    // Fresh factory rows already carry their formula; re-assert in case the
    // cell was cleared by hand.
    if sheet.get(row, COL_TOTAL).as_formula().is_none() {
        set_row_total_formula(sheet, row);
    }

    Ok(InsertedRow {
        row,
        seq,
        date_serial: excel_serial(trip.travel_date),
        description,
    })
}

/// Remove the ticket row identified by (date serial, description), compact
/// the block, renumber, and retract summary ranges if the block had grown.
pub fn remove_trip(
    sheet: &mut Sheet,
    date_serial: i64,
    description: &str,
) -> Result<RemoveOutcome, LedgerError> {
    let Some(last) = last_occupied_row(sheet) else {
        return Ok(RemoveOutcome::NotFound);
    };

    let matches: Vec<u32> = (DATA_START_ROW..=last)
        .filter(|&row| {
            sheet.get(row, COL_DATE).as_date_serial() == Some(date_serial)
                && sheet.get(row, COL_DESCRIPTION).as_text() == Some(description)
        })
        .collect();

    let Some(&target) = matches.first() else {
        return Ok(RemoveOutcome::NotFound);
    };

    let had_overflow = last > DATA_END_ROW;

    sheet.delete_rows(target, 1);
    let new_last = last - 1;

    if !had_overflow {
        // The block never grew, so the template must keep its nominal N
        // physical rows: compaction ate one, append a fresh pre-formatted
        // row at the block end. This also pushes the summary region back to
        // its nominal position.
        sheet.insert_rows(DATA_END_ROW, 1);
        set_row_total_formula(sheet, DATA_END_ROW);
    }

    // Rows below the deleted one slid up; their row-total formulas were
    // remapped structurally, but re-assert them so every occupied row is
    // guaranteed a formula spanning its own columns.
    for row in target..=new_last.max(target) {
        if sheet.get(row, COL_DATE).as_date_serial().is_some() {
            set_row_total_formula(sheet, row);
        }
    }

    renumber(sheet);

    // Realign the summary aggregates with the new block end (the rewriter
    // clamps at the nominal end when the block is at or under nominal size).
    rewrite_summary_ranges(sheet, new_last);

    Ok(RemoveOutcome::Removed { row: target, ambiguous: matches.len() - 1 })
}

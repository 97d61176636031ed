//! Ledger unit factory.
//!
//! Builds a brand-new month sheet from the fixed schema instead of copying
//! whichever sheet happened to be edited last. Header labels, the month
//! label (with the leading space the original template carries), true date
//! values for the month bounds, eight pre-formatted data rows with their
//! row-total formulas, and the summary skeleton below the block.

use chrono::NaiveDate;

use crate::cell::CellValue;
use crate::formula::Formula;
use crate::layout::{
    sheet_name_for, month_bounds, COLUMN_HEADERS, COL_DATE_RANGE, COL_DESCRIPTION, COL_LABEL,
    COL_TOTAL, COL_TRANSPORT, COL_VALUE, DATA_END_ROW, DATA_START_ROW, HEADER_ROW,
    ROW_MONTH_LABEL, ROW_NAME, ROW_RANGE_FIRST, ROW_RANGE_LAST,
};
use crate::rows::set_row_total_formula;
use crate::sheet::Sheet;

// Summary rows relative to the nominal block end.
pub const ROW_TRANSPORT_TOTAL: u32 = DATA_END_ROW + 1; // 16
pub const ROW_SUBTOTAL: u32 = DATA_END_ROW + 2; // 17
pub const ROW_ADVANCE: u32 = DATA_END_ROW + 3; // 18
pub const ROW_NET_TOTAL: u32 = DATA_END_ROW + 4; // 19

/// Create an empty month ledger for the month containing `any_day`.
pub fn new_month_sheet(person: &str, any_day: NaiveDate) -> Sheet {
    let name = sheet_name_for(any_day);
    let mut sheet = Sheet::new(name.clone());

    sheet.set(ROW_NAME, COL_LABEL, CellValue::Text("Naam:".into()));
    sheet.set(ROW_NAME, COL_VALUE, CellValue::Text(person.to_string()));

    // The original template keeps a space before the month label in B5.
    sheet.set(ROW_MONTH_LABEL, COL_VALUE, CellValue::Text(format!(" {name}")));

    let (first_day, last_day) = month_bounds(any_day);
    sheet.set(ROW_RANGE_FIRST, COL_DATE_RANGE, CellValue::Date(first_day));
    sheet.set(ROW_RANGE_LAST, COL_DATE_RANGE, CellValue::Date(last_day));

    for (idx, header) in COLUMN_HEADERS.iter().enumerate() {
        sheet.set(HEADER_ROW, idx as u32 + 1, CellValue::Text(header.to_string()));
    }

    // Pre-formatted data rows: empty fields, row-total formula in place.
    for row in DATA_START_ROW..=DATA_END_ROW {
        set_row_total_formula(&mut sheet, row);
    }

    // Summary skeleton. Aggregates span the nominal block; the rewriter
    // keeps them aligned once the block grows.
    sheet.set(ROW_TRANSPORT_TOTAL, COL_DESCRIPTION, CellValue::Text("Totaal vervoer".into()));
    sheet.set(
        ROW_TRANSPORT_TOTAL,
        COL_TRANSPORT,
        CellValue::Formula(Formula::SumRows {
            col: COL_TRANSPORT,
            first_row: DATA_START_ROW,
            last_row: DATA_END_ROW,
        }),
    );

    sheet.set(ROW_SUBTOTAL, COL_DESCRIPTION, CellValue::Text("Subtotaal".into()));
    sheet.set(
        ROW_SUBTOTAL,
        COL_TOTAL,
        CellValue::Formula(Formula::SumRows {
            col: COL_TOTAL,
            first_row: DATA_START_ROW,
            last_row: DATA_END_ROW,
        }),
    );

    sheet.set(ROW_ADVANCE, COL_DESCRIPTION, CellValue::Text("Voorschot".into()));
    sheet.set(ROW_ADVANCE, COL_TOTAL, CellValue::Number(0.0));

    sheet.set(ROW_NET_TOTAL, COL_DESCRIPTION, CellValue::Text("Te betalen".into()));
    sheet.set(
        ROW_NET_TOTAL,
        COL_TOTAL,
        CellValue::Formula(Formula::Sub {
            col: COL_TOTAL,
            minuend_row: ROW_SUBTOTAL,
            subtrahend_row: ROW_ADVANCE,
        }),
    );

    sheet
}

//! Formula range rewriter for the summary region.
//!
//! After the data block grows or shrinks, every single-column aggregate in
//! the rows below the block must span exactly `DATA_START_ROW..=last`. The
//! rewriter scans a generous window below the block's current end and
//! patches whatever `SUM(X#:X#)` it finds, regardless of which column the
//! formula aggregates or how the summary rows are laid out. Column and
//! lower bound are preserved; only the upper bound is replaced.

use crate::formula::Formula;
use crate::layout::{COL_TOTAL, DATA_END_ROW, SUMMARY_SCAN_ROWS};
use crate::sheet::Sheet;

/// Align all summary-region column aggregates with a data block ending at
/// `last_data_row`. On shrink the upper bound never drops below the nominal
/// block end. Returns how many formulas were rewritten.
pub fn rewrite_summary_ranges(sheet: &mut Sheet, last_data_row: u32) -> usize {
    let upper = last_data_row.max(DATA_END_ROW);
    let mut rewritten = 0;

    for row in last_data_row + 1..=last_data_row + SUMMARY_SCAN_ROWS {
        for col in 1..=COL_TOTAL {
            let cell = sheet.get(row, col).clone();
            let Some(Formula::SumRows { col: sum_col, first_row, last_row }) = cell.as_formula().cloned()
            else {
                continue;
            };
            if last_row != upper {
                sheet.set(
                    row,
                    col,
                    crate::cell::CellValue::Formula(Formula::SumRows {
                        col: sum_col,
                        first_row,
                        last_row: upper,
                    }),
                );
                rewritten += 1;
            }
        }
    }
    rewritten
}

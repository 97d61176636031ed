//! Position-based formats for ledger unit sheets.
//!
//! The ledger template is fixed, so formatting is decided from the cell's
//! position and value type rather than carried through the in-memory model.
//! Formats decorate; they never alter cell content.

use railnota_engine::layout::{
    COL_CATEGORY_FIRST, COL_DATE, COL_DESCRIPTION, COL_TOTAL, DATA_START_ROW, HEADER_ROW, ROW_NAME,
};
use rust_xlsxwriter::{Format, FormatBorder, Worksheet, XlsxError as WriterError};

pub struct SheetStyles {
    pub label: Format,
    pub header: Format,
    pub date: Format,
    pub money: Format,
    pub bordered: Format,
}

impl SheetStyles {
    pub fn new() -> Self {
        SheetStyles {
            label: Format::new().set_bold(),
            header: Format::new().set_bold().set_border(FormatBorder::Thin),
            date: Format::new()
                .set_num_format("dd/mm/yyyy")
                .set_border(FormatBorder::Thin),
            money: Format::new().set_num_format("0.00").set_border(FormatBorder::Thin),
            bordered: Format::new().set_border(FormatBorder::Thin),
        }
    }

    /// Pick the format for a cell by sheet position. `None` means write
    /// without a format.
    pub fn for_position(&self, row: u32, col: u32) -> Option<&Format> {
        if row == ROW_NAME {
            return Some(&self.label);
        }
        if row == HEADER_ROW {
            return Some(&self.header);
        }
        if row >= DATA_START_ROW {
            if col == COL_DATE {
                return Some(&self.date);
            }
            if (COL_CATEGORY_FIRST..=COL_TOTAL).contains(&col) {
                return Some(&self.money);
            }
            return Some(&self.bordered);
        }
        None
    }

    /// Dates above the data block (the month-range cells) still need the
    /// date number format, without the block border.
    pub fn bare_date(&self) -> Format {
        Format::new().set_num_format("dd/mm/yyyy")
    }
}

impl Default for SheetStyles {
    fn default() -> Self {
        Self::new()
    }
}

/// Column widths matching the template: wide description column, compact
/// amount columns.
pub fn apply_column_widths(worksheet: &mut Worksheet) -> Result<(), WriterError> {
    worksheet.set_column_width((COL_DATE - 1) as u16, 12.0)?;
    worksheet.set_column_width((COL_DESCRIPTION - 1) as u16, 42.0)?;
    for col in COL_CATEGORY_FIRST..=COL_TOTAL {
        worksheet.set_column_width((col - 1) as u16, 11.0)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use railnota_engine::layout::COL_NR;

    #[test]
    fn test_header_row_is_bold() {
        let styles = SheetStyles::new();
        assert!(styles.for_position(HEADER_ROW, COL_NR).is_some());
    }

    #[test]
    fn test_rows_above_header_are_plain() {
        let styles = SheetStyles::new();
        assert!(styles.for_position(4, COL_NR).is_none());
    }
}

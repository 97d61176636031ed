//! Ledger unit file import and export (xlsx).
//!
//! Import converts a unit file into the in-memory sheet model; export writes
//! the model back with the template's position-based formatting. Formula
//! cells survive the round trip as formulas, never as cached values.

use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use rust_xlsxwriter::Workbook as XlsxWorkbook;

use railnota_engine::cell::{date_from_serial, excel_serial, CellValue};
use railnota_engine::formula::Formula;
use railnota_engine::sheet::Sheet;

use crate::error::XlsxError;
use crate::styles::{apply_column_widths, SheetStyles};

// Windows sharing/lock violations, what Excel holds on an open workbook.
const OS_SHARING_VIOLATION: i32 = 32;
const OS_LOCK_VIOLATION: i32 = 33;

/// Check that the unit file can be written before any mutation happens.
/// A missing file is fine (it will be created); a file held open by Excel
/// maps to `XlsxError::Locked`.
pub fn probe_writable(path: &Path) -> Result<(), XlsxError> {
    match OpenOptions::new().write(true).open(path) {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            Err(XlsxError::Locked(path.to_path_buf()))
        }
        Err(e)
            if matches!(
                e.raw_os_error(),
                Some(OS_SHARING_VIOLATION) | Some(OS_LOCK_VIOLATION)
            ) =>
        {
            Err(XlsxError::Locked(path.to_path_buf()))
        }
        Err(e) => Err(XlsxError::Io(e.to_string())),
    }
}

/// Load every sheet of a unit file into the in-memory model.
///
/// calamine indexes from zero and the range may not start at A1; both
/// offsets are folded into the sheet's one-based coordinates here. Formula
/// cells come through twice (cached value, then formula text); the formula
/// wins.
pub fn load_unit(path: &Path) -> Result<Vec<Sheet>, XlsxError> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| XlsxError::Workbook(format!("failed to open {}: {}", path.display(), e)))?;

    let names: Vec<String> = workbook.sheet_names().to_vec();
    if names.is_empty() {
        return Err(XlsxError::Structure(format!(
            "{} contains no sheets",
            path.display()
        )));
    }

    let mut sheets = Vec::with_capacity(names.len());

    for name in &names {
        let range = workbook
            .worksheet_range(name)
            .map_err(|e| XlsxError::Workbook(format!("failed to read sheet '{}': {}", name, e)))?;

        let mut sheet = Sheet::new(name.clone());
        let (start_row, start_col) = range.start().unwrap_or((0, 0));

        for (row_idx, row) in range.rows().enumerate() {
            let target_row = start_row + row_idx as u32 + 1;
            for (col_idx, cell) in row.iter().enumerate() {
                let target_col = start_col + col_idx as u32 + 1;
                let value = match cell {
                    Data::Empty => continue,
                    Data::String(s) => {
                        if s.is_empty() {
                            continue;
                        }
                        CellValue::Text(s.clone())
                    }
                    Data::Float(n) => CellValue::Number(*n),
                    Data::Int(n) => CellValue::Number(*n as f64),
                    Data::Bool(b) => {
                        CellValue::Text(if *b { "TRUE" } else { "FALSE" }.to_string())
                    }
                    Data::Error(e) => CellValue::Text(format!("#{:?}", e)),
                    Data::DateTime(dt) => {
                        let serial = dt.as_f64();
                        if serial.fract() == 0.0 && serial >= 0.0 {
                            match date_from_serial(serial as i64) {
                                Some(d) => CellValue::Date(d),
                                None => CellValue::Number(serial),
                            }
                        } else {
                            // Time-of-day component; the ledger never writes
                            // these, keep the raw serial.
                            CellValue::Number(serial)
                        }
                    }
                    Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
                };
                sheet.set(target_row, target_col, value);
            }
        }

        if let Ok(formula_range) = workbook.worksheet_formula(name) {
            let (f_start_row, f_start_col) = formula_range.start().unwrap_or((0, 0));
            for (row_idx, row) in formula_range.rows().enumerate() {
                let target_row = f_start_row + row_idx as u32 + 1;
                for (col_idx, formula) in row.iter().enumerate() {
                    let target_col = f_start_col + col_idx as u32 + 1;
                    if formula.is_empty() {
                        continue;
                    }
                    sheet.set(
                        target_row,
                        target_col,
                        CellValue::Formula(Formula::parse(formula)),
                    );
                }
            }
        }

        sheets.push(sheet);
    }

    Ok(sheets)
}

/// Write the unit back to disk, all sheets, with template formatting.
pub fn save_unit(path: &Path, sheets: &[Sheet]) -> Result<(), XlsxError> {
    let styles = SheetStyles::new();
    let mut workbook = XlsxWorkbook::new();

    for sheet in sheets {
        let worksheet = workbook
            .add_worksheet()
            .set_name(&sheet.name)
            .map_err(|e| {
                XlsxError::Workbook(format!("failed to create sheet '{}': {}", sheet.name, e))
            })?;

        apply_column_widths(worksheet)
            .map_err(|e| XlsxError::Workbook(format!("failed to set column widths: {}", e)))?;

        for ((row, col), value) in sheet.cells_sorted() {
            let row0 = row - 1;
            let col0 = (col - 1) as u16;
            let format = styles.for_position(row, col);

            let write_err =
                |e| XlsxError::Workbook(format!("failed to write cell ({}, {}): {}", row, col, e));

            match value {
                CellValue::Empty => {}
                CellValue::Text(s) => {
                    match format {
                        Some(f) => worksheet.write_string_with_format(row0, col0, s, f),
                        None => worksheet.write_string(row0, col0, s),
                    }
                    .map_err(write_err)?;
                }
                CellValue::Number(n) => {
                    match format {
                        Some(f) => worksheet.write_number_with_format(row0, col0, *n, f),
                        None => worksheet.write_number(row0, col0, *n),
                    }
                    .map_err(write_err)?;
                }
                CellValue::Date(d) => {
                    // Dates go out as serials with a date number format, the
                    // same representation the import path reads back.
                    let serial = excel_serial(*d) as f64;
                    let bare;
                    let f = match format {
                        Some(f) => f,
                        None => {
                            bare = styles.bare_date();
                            &bare
                        }
                    };
                    worksheet
                        .write_number_with_format(row0, col0, serial, f)
                        .map_err(write_err)?;
                }
                CellValue::Formula(formula) => {
                    let text = formula.text();
                    match format {
                        Some(f) => {
                            worksheet.write_formula_with_format(row0, col0, text.as_str(), f)
                        }
                        None => worksheet.write_formula(row0, col0, text.as_str()),
                    }
                    .map_err(write_err)?;
                }
            }
        }
    }

    workbook
        .save(path)
        .map_err(|e| XlsxError::Workbook(format!("failed to save {}: {}", path.display(), e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_missing_file_is_writable() {
        let dir = tempfile::tempdir().unwrap();
        assert!(probe_writable(&dir.path().join("nope.xlsx")).is_ok());
    }

    #[test]
    fn test_probe_existing_file_is_writable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("unit.xlsx");
        std::fs::write(&path, b"stub").unwrap();
        assert!(probe_writable(&path).is_ok());
    }

    #[test]
    fn test_load_missing_file_is_workbook_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_unit(&dir.path().join("nope.xlsx")).unwrap_err();
        assert!(matches!(err, XlsxError::Workbook(_)));
    }
}

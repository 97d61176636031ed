//! Sparse month sheet.
//!
//! Coordinates are 1-based Excel coordinates throughout: `(row, col)` with
//! row 1 = Excel row 1, col 1 = column A. Structured formulas live in the
//! cells themselves; structural row operations remap their row references
//! the way a spreadsheet application would, so the only formula maintenance
//! left to callers is the data-block extent invariant (see `rewrite`).

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::cell::CellValue;

static EMPTY_CELL: CellValue = CellValue::Empty;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    cells: FxHashMap<(u32, u32), CellValue>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), cells: FxHashMap::default() }
    }

    pub fn get(&self, row: u32, col: u32) -> &CellValue {
        self.cells.get(&(row, col)).unwrap_or(&EMPTY_CELL)
    }

    pub fn set(&mut self, row: u32, col: u32, value: CellValue) {
        debug_assert!(row >= 1 && col >= 1, "sheet coordinates are 1-based");
        if value.is_empty() {
            self.cells.remove(&(row, col));
        } else {
            self.cells.insert((row, col), value);
        }
    }

    pub fn clear(&mut self, row: u32, col: u32) {
        self.cells.remove(&(row, col));
    }

    pub fn cells_iter(&self) -> impl Iterator<Item = (&(u32, u32), &CellValue)> {
        self.cells.iter()
    }

    /// Occupied cells in row-major order. Deterministic iteration for
    /// serialization and tests.
    pub fn cells_sorted(&self) -> Vec<((u32, u32), &CellValue)> {
        let mut cells: Vec<_> = self.cells.iter().map(|(k, v)| (*k, v)).collect();
        cells.sort_by_key(|(pos, _)| *pos);
        cells
    }

    /// Highest row index holding any cell, or 0 for an empty sheet.
    pub fn max_row(&self) -> u32 {
        self.cells.keys().map(|(r, _)| *r).max().unwrap_or(0)
    }

    /// Insert `count` blank rows before `at_row`, shifting existing rows
    /// (and the row references of every structured formula) down.
    pub fn insert_rows(&mut self, at_row: u32, count: u32) {
        let cells_to_shift: Vec<_> = self
            .cells
            .iter()
            .filter(|((r, _), _)| *r >= at_row)
            .map(|((r, c), cell)| ((*r, *c), cell.clone()))
            .collect();

        for ((r, c), _) in &cells_to_shift {
            self.cells.remove(&(*r, *c));
        }
        for ((r, c), cell) in cells_to_shift {
            self.cells.insert((r + count, c), cell);
        }

        for cell in self.cells.values_mut() {
            if let Some(formula) = cell.as_formula_mut() {
                formula.shift_rows_inserted(at_row, count);
            }
        }
    }

    /// Delete `count` rows starting at `start_row`, shifting the remaining
    /// rows (and formula row references) up.
    pub fn delete_rows(&mut self, start_row: u32, count: u32) {
        self.cells.retain(|(r, _), _| *r < start_row || *r >= start_row + count);

        let cells_to_shift: Vec<_> = self
            .cells
            .iter()
            .filter(|((r, _), _)| *r >= start_row + count)
            .map(|((r, c), cell)| ((*r, *c), cell.clone()))
            .collect();

        for ((r, c), _) in &cells_to_shift {
            self.cells.remove(&(*r, *c));
        }
        for ((r, c), cell) in cells_to_shift {
            self.cells.insert((r - count, c), cell);
        }

        for cell in self.cells.values_mut() {
            if let Some(formula) = cell.as_formula_mut() {
                formula.shift_rows_deleted(start_row, count);
            }
        }
    }
}

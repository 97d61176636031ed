//! Structured formulas for the ledger schema.
//!
//! The ledger only ever contains three formula shapes: a per-row total
//! summing a span of category columns (`SUM(E9:K9)`), a summary aggregate
//! over one column of the data block (`SUM(F8:F15)`), and the net-total
//! difference of two cells in one column (`L17-L18`). Parsing them into a
//! typed form keeps range rewriting exact instead of regex surgery on
//! formula text; anything else round-trips untouched as `Raw`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Formula {
    /// `SUM(E9:K9)` — one row, a span of columns.
    SumCols { row: u32, first_col: u32, last_col: u32 },
    /// `SUM(F8:F15)` — one column, a span of rows.
    SumRows { col: u32, first_row: u32, last_row: u32 },
    /// `L17-L18` — difference of two cells in the same column.
    Sub { col: u32, minuend_row: u32, subtrahend_row: u32 },
    /// Anything we do not model. Preserved verbatim, never rewritten.
    Raw(String),
}

/// Convert a 1-based column number to its A1 letter (1 = A, 27 = AA).
pub fn col_to_letter(col: u32) -> String {
    let mut result = String::new();
    let mut n = col;
    while n > 0 {
        let rem = (n - 1) % 26;
        result.insert(0, (b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    result
}

/// Convert an A1 column letter back to its 1-based number.
pub fn letter_to_col(letters: &str) -> Option<u32> {
    if letters.is_empty() {
        return None;
    }
    let mut n: u32 = 0;
    for ch in letters.chars() {
        let c = ch.to_ascii_uppercase();
        if !c.is_ascii_uppercase() {
            return None;
        }
        n = n.checked_mul(26)?.checked_add((c as u32) - ('A' as u32) + 1)?;
    }
    Some(n)
}

/// Split an A1 reference like `F15` into (column, row).
fn parse_ref(s: &str) -> Option<(u32, u32)> {
    let split = s.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = s.split_at(split);
    let col = letter_to_col(letters)?;
    let row: u32 = digits.parse().ok()?;
    if row == 0 {
        return None;
    }
    Some((col, row))
}

impl Formula {
    /// Parse formula text (with or without the leading `=`). Unrecognized
    /// shapes fall back to `Raw` with the original text preserved.
    pub fn parse(text: &str) -> Formula {
        let body = text.trim().strip_prefix('=').unwrap_or(text.trim());
        Self::parse_structured(body).unwrap_or_else(|| Formula::Raw(body.to_string()))
    }

    fn parse_structured(body: &str) -> Option<Formula> {
        let upper = body.to_ascii_uppercase();

        if let Some(range) = upper.strip_prefix("SUM(").and_then(|s| s.strip_suffix(')')) {
            let (start, end) = range.split_once(':')?;
            let (c1, r1) = parse_ref(start.trim())?;
            let (c2, r2) = parse_ref(end.trim())?;
            if c1 == c2 && r1 <= r2 {
                return Some(Formula::SumRows { col: c1, first_row: r1, last_row: r2 });
            }
            if r1 == r2 && c1 <= c2 {
                return Some(Formula::SumCols { row: r1, first_col: c1, last_col: c2 });
            }
            return None;
        }

        if let Some((left, right)) = upper.split_once('-') {
            let (c1, r1) = parse_ref(left.trim())?;
            let (c2, r2) = parse_ref(right.trim())?;
            if c1 == c2 {
                return Some(Formula::Sub { col: c1, minuend_row: r1, subtrahend_row: r2 });
            }
        }

        None
    }

    /// Formula text without the leading `=`.
    pub fn text(&self) -> String {
        match self {
            Formula::SumCols { row, first_col, last_col } => format!(
                "SUM({}{row}:{}{row})",
                col_to_letter(*first_col),
                col_to_letter(*last_col)
            ),
            Formula::SumRows { col, first_row, last_row } => {
                let letter = col_to_letter(*col);
                format!("SUM({letter}{first_row}:{letter}{last_row})")
            }
            Formula::Sub { col, minuend_row, subtrahend_row } => {
                let letter = col_to_letter(*col);
                format!("{letter}{minuend_row}-{letter}{subtrahend_row}")
            }
            Formula::Raw(s) => s.clone(),
        }
    }

    /// Remap row references after `count` rows were inserted before `at_row`.
    /// Matches what a spreadsheet application does to references on insert:
    /// anything at or below the insertion point slides down.
    pub fn shift_rows_inserted(&mut self, at_row: u32, count: u32) {
        let shift = |r: &mut u32| {
            if *r >= at_row {
                *r += count;
            }
        };
        match self {
            Formula::SumCols { row, .. } => shift(row),
            Formula::SumRows { first_row, last_row, .. } => {
                shift(first_row);
                shift(last_row);
            }
            Formula::Sub { minuend_row, subtrahend_row, .. } => {
                shift(minuend_row);
                shift(subtrahend_row);
            }
            Formula::Raw(_) => {}
        }
    }

    /// Remap row references after `count` rows starting at `start_row` were
    /// deleted. Range endpoints inside the deleted span clamp to the edge of
    /// the survivor range instead of dangling.
    pub fn shift_rows_deleted(&mut self, start_row: u32, count: u32) {
        let end = start_row + count; // first row below the deleted span
        let shift_point = |r: &mut u32| {
            if *r >= end {
                *r -= count;
            } else if *r >= start_row {
                // The referenced row is gone; the row that slid into its
                // place is the closest meaningful target.
                *r = start_row;
            }
        };
        match self {
            Formula::SumCols { row, .. } => shift_point(row),
            Formula::SumRows { first_row, last_row, .. } => {
                if *first_row >= end {
                    *first_row -= count;
                } else if *first_row >= start_row {
                    *first_row = start_row;
                }
                if *last_row >= end {
                    *last_row -= count;
                } else if *last_row >= start_row {
                    *last_row = start_row.saturating_sub(1).max(*first_row);
                }
            }
            Formula::Sub { minuend_row, subtrahend_row, .. } => {
                shift_point(minuend_row);
                shift_point(subtrahend_row);
            }
            Formula::Raw(_) => {}
        }
    }
}

impl std::fmt::Display for Formula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text())
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::formula::Formula;

/// Excel's day zero. Serial 1 is 1900-01-01; anchoring at 1899-12-30 absorbs
/// Excel's phantom 1900 leap day for every date this ledger can hold.
const EXCEL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(EXCEL_EPOCH.0, EXCEL_EPOCH.1, EXCEL_EPOCH.2).unwrap()
}

/// Convert a calendar date to its Excel serial number.
pub fn excel_serial(d: NaiveDate) -> i64 {
    (d - epoch()).num_days()
}

/// Convert an Excel serial number back to a calendar date.
pub fn date_from_serial(serial: i64) -> Option<NaiveDate> {
    epoch().checked_add_days(chrono::Days::new(u64::try_from(serial).ok()?))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Empty,
    Number(f64),
    Date(NaiveDate),
    Text(String),
    Formula(Formula),
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Empty
    }
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// The Excel date serial of this cell, if it holds a concrete date.
    ///
    /// A ledger that went through a save/load cycle may hand dates back as
    /// plain serial numbers (the original template stored them that way), so
    /// a non-negative integral Number counts too. Formulas and text never do.
    pub fn as_date_serial(&self) -> Option<i64> {
        match self {
            CellValue::Date(d) => Some(excel_serial(*d)),
            CellValue::Number(n) if n.fract() == 0.0 && *n >= 0.0 => Some(*n as i64),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_formula(&self) -> Option<&Formula> {
        match self {
            CellValue::Formula(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_formula_mut(&mut self) -> Option<&mut Formula> {
        match self {
            CellValue::Formula(f) => Some(f),
            _ => None,
        }
    }
}

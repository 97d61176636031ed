//! Trip record consumed by the ledger engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Travel direction as NMBS labels it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Outbound,
    Return,
    RoundTrip,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Outbound => write!(f, "heen"),
            Self::Return => write!(f, "terug"),
            Self::RoundTrip => write!(f, "heen/terug"),
        }
    }
}

/// One validated ticket, produced by the email extractor. The engine trusts
/// the fields as-is: stations already title-cased, price non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRecord {
    pub order_number: String,
    pub from_station: String,
    pub to_station: String,
    pub direction: Direction,
    pub travel_date: NaiveDate,
    pub price: f64,
}

impl TripRecord {
    /// Description written to (and matched against) the description column.
    /// Removal identity is (date serial, this string), so its composition
    /// must stay stable.
    pub fn row_description(&self) -> String {
        format!("Trein {} - {} {}", self.from_station, self.to_station, self.direction)
    }
}

//! Errors for confirmation email parsing.

use std::error::Error;
use std::fmt;

/// The email did not have the expected structure. Every variant after the
/// order number carries it, so a skipped email can be traced back.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    MissingOrderNumber,
    MissingStations { order: String },
    MissingTripType { order: String },
    MissingTravelDate { order: String },
    MissingPrice { order: String },
    BadDate { order: String, text: String },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MissingOrderNumber => {
                write!(f, "no order number (Bestelnummer) found in email")
            }
            ParseError::MissingStations { order } => {
                write!(f, "[{}] Van/Naar stations not found", order)
            }
            ParseError::MissingTripType { order } => {
                write!(f, "[{}] trip type (Enkel / Heen en terug) not found", order)
            }
            ParseError::MissingTravelDate { order } => {
                write!(f, "[{}] no travel date found", order)
            }
            ParseError::MissingPrice { order } => {
                write!(f, "[{}] total amount (Totaalbedrag) not found", order)
            }
            ParseError::BadDate { order, text } => {
                write!(f, "[{}] unparseable travel date '{}'", order, text)
            }
        }
    }
}

impl Error for ParseError {}

//! Processed-order state, persisted as JSON next to the ledger data.
//!
//! The state file is what makes the pipeline idempotent: an order number
//! in `processed` is never inserted again, and its `metadata` entry holds
//! enough to reverse the insertion later. Orders are marked processed only
//! after their unit file saved successfully.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::XlsxError;
use crate::ops::TicketLocation;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct State {
    /// Order numbers whose tickets made it into a unit file.
    #[serde(default)]
    pub processed: Vec<String>,
    /// Order numbers deliberately skipped (weekend/holiday travel).
    #[serde(default)]
    pub skipped_weekend: Vec<String>,
    /// Per-order ledger location, kept for rollback.
    #[serde(default)]
    pub metadata: HashMap<String, TicketLocation>,
}

impl State {
    /// Load state, degrading to empty on a missing or unreadable file. A
    /// corrupt state file costs duplicate-detection, not data, so it is a
    /// warning rather than a failure.
    pub fn load(path: &Path) -> State {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return State::default(),
            Err(e) => {
                eprintln!("warning: could not read {}: {}", path.display(), e);
                return State::default();
            }
        };
        match serde_json::from_str(&text) {
            Ok(state) => state,
            Err(e) => {
                eprintln!(
                    "warning: {} is not valid state, starting empty: {}",
                    path.display(),
                    e
                );
                State::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), XlsxError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| XlsxError::Io(format!("failed to encode state: {}", e)))?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn is_processed(&self, order: &str) -> bool {
        self.processed.iter().any(|o| o == order)
    }

    pub fn is_skipped(&self, order: &str) -> bool {
        self.skipped_weekend.iter().any(|o| o == order)
    }

    pub fn mark_processed(&mut self, order: &str, location: TicketLocation) {
        if !self.is_processed(order) {
            self.processed.push(order.to_string());
        }
        self.metadata.insert(order.to_string(), location);
    }

    pub fn mark_skipped(&mut self, order: &str) {
        if !self.is_skipped(order) {
            self.skipped_weekend.push(order.to_string());
        }
    }

    /// Drop an order from the processed set, returning its location so the
    /// caller can remove the ledger row. Used by rollback.
    pub fn forget(&mut self, order: &str) -> Option<TicketLocation> {
        self.processed.retain(|o| o != order);
        self.metadata.remove(order)
    }
}

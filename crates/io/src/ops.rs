//! Persistent ticket operations on ledger unit files.
//!
//! One unit file per month, one month sheet inside it. Every operation
//! loads the unit, mutates the in-memory model, and saves the whole unit
//! back; nothing touches the file until the mutation succeeded, so a
//! failed save leaves the unit as it was.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use railnota_engine::factory::new_month_sheet;
use railnota_engine::layout::{sheet_name_for, workbook_file_name};
use railnota_engine::mutate::{insert_trip, remove_trip, RemoveOutcome};
use railnota_engine::ticket::TripRecord;

use crate::error::XlsxError;
use crate::xlsx::{load_unit, probe_writable, save_unit};

/// Where a ticket row landed, recorded per order so it can be removed
/// later. The row is informational only; removal matches on date and
/// description because rows shift as neighbours come and go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketLocation {
    pub file: String,
    pub sheet: String,
    pub row: u32,
    pub date_serial: i64,
    pub description: String,
}

/// Insert a ticket into the unit for its travel month, creating the unit
/// file and the month sheet on first use.
pub fn add_ticket(
    data_dir: &Path,
    person: &str,
    trip: &TripRecord,
) -> Result<TicketLocation, XlsxError> {
    fs::create_dir_all(data_dir)?;

    let file_name = workbook_file_name(trip.travel_date);
    let path = data_dir.join(&file_name);
    probe_writable(&path)?;

    let mut sheets = if path.exists() {
        load_unit(&path)?
    } else {
        Vec::new()
    };

    let sheet_name = sheet_name_for(trip.travel_date);
    let idx = match sheets.iter().position(|s| s.name == sheet_name) {
        Some(idx) => idx,
        None => {
            sheets.push(new_month_sheet(person, trip.travel_date));
            sheets.len() - 1
        }
    };

    let inserted = insert_trip(&mut sheets[idx], trip)?;
    save_unit(&path, &sheets)?;

    Ok(TicketLocation {
        file: file_name,
        sheet: sheet_name,
        row: inserted.row,
        date_serial: inserted.date_serial,
        description: inserted.description,
    })
}

/// Remove a previously inserted ticket row.
///
/// A unit, sheet, or row that is already gone (cleaned up by hand) is not
/// an error: the removal is reported as not applied and the caller moves
/// on. A locked unit file is an error, because the caller must stop and
/// retry the whole batch later.
pub fn remove_ticket(data_dir: &Path, loc: &TicketLocation) -> Result<bool, XlsxError> {
    let path = data_dir.join(&loc.file);
    if !path.exists() {
        eprintln!("warning: {} no longer exists, skipping removal", loc.file);
        return Ok(false);
    }
    probe_writable(&path)?;

    let mut sheets = load_unit(&path)?;
    let Some(sheet) = sheets.iter_mut().find(|s| s.name == loc.sheet) else {
        eprintln!(
            "warning: sheet '{}' no longer exists in {}, skipping removal",
            loc.sheet, loc.file
        );
        return Ok(false);
    };

    match remove_trip(sheet, loc.date_serial, &loc.description)? {
        RemoveOutcome::NotFound => {
            eprintln!(
                "warning: no row matching '{}' in {} · {}, skipping removal",
                loc.description, loc.file, loc.sheet
            );
            Ok(false)
        }
        RemoveOutcome::Removed { row, ambiguous } => {
            if ambiguous > 0 {
                eprintln!(
                    "warning: {} other row(s) also matched '{}'; removed row {}",
                    ambiguous, loc.description, row
                );
            }
            save_unit(&path, &sheets)?;
            Ok(true)
        }
    }
}

/// What a batch rollback achieved before it finished or had to stop.
#[derive(Debug, Default)]
pub struct RollbackReport {
    /// Locations whose rows were removed and saved.
    pub completed: Vec<TicketLocation>,
    /// Locations whose unit, sheet, or row was already gone.
    pub missing: Vec<TicketLocation>,
    /// The location that failed and why; everything after it was not tried.
    pub failed: Option<(TicketLocation, XlsxError)>,
}

impl RollbackReport {
    pub fn fully_applied(&self) -> bool {
        self.failed.is_none()
    }
}

/// Remove a batch of ticket rows, stopping at the first hard error (a
/// locked unit file, typically). Completed removals stay removed; the
/// report tells the caller which ones, so state can be updated for
/// exactly those.
pub fn rollback_batch(data_dir: &Path, locations: &[TicketLocation]) -> RollbackReport {
    let mut report = RollbackReport::default();

    for loc in locations {
        match remove_ticket(data_dir, loc) {
            Ok(true) => report.completed.push(loc.clone()),
            Ok(false) => report.missing.push(loc.clone()),
            Err(e) => {
                report.failed = Some((loc.clone(), e));
                break;
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use railnota_engine::ticket::Direction;

    fn trip(day: u32) -> TripRecord {
        TripRecord {
            order_number: format!("ORD{day:02}"),
            from_station: "Zottegem".into(),
            to_station: "Antwerpen-Zuid".into(),
            direction: Direction::RoundTrip,
            travel_date: NaiveDate::from_ymd_opt(2026, 2, day).unwrap(),
            price: 28.0,
        }
    }

    #[test]
    fn test_add_creates_unit_file_lazily() {
        let dir = tempfile::tempdir().unwrap();
        let loc = add_ticket(dir.path(), "J. Peeters", &trip(13)).unwrap();

        assert_eq!(loc.file, "Onkosten_Februari_2026.xlsx");
        assert_eq!(loc.sheet, "Februari 2026");
        assert_eq!(loc.row, 8);
        assert!(dir.path().join(&loc.file).exists());
    }

    #[test]
    fn test_remove_missing_unit_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let loc = TicketLocation {
            file: "Onkosten_Maart_2026.xlsx".into(),
            sheet: "Maart 2026".into(),
            row: 8,
            date_serial: 46066,
            description: "Trein A - B heen".into(),
        };
        assert_eq!(remove_ticket(dir.path(), &loc).unwrap(), false);
    }

    #[test]
    fn test_rollback_reports_missing_and_completed() {
        let dir = tempfile::tempdir().unwrap();
        let real = add_ticket(dir.path(), "J. Peeters", &trip(13)).unwrap();
        let ghost = TicketLocation {
            file: "Onkosten_April_2026.xlsx".into(),
            sheet: "April 2026".into(),
            row: 8,
            date_serial: 46100,
            description: "Trein A - B heen".into(),
        };

        let report = rollback_batch(dir.path(), &[ghost.clone(), real.clone()]);
        assert!(report.fully_applied());
        assert_eq!(report.missing, vec![ghost]);
        assert_eq!(report.completed, vec![real]);
    }
}

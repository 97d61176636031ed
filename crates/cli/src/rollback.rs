//! The `rollback` command: reverse previously booked orders.
//!
//! Removal works from the metadata recorded at insert time, matching on
//! (date, description) because row numbers shift. The batch stops at the
//! first locked unit; orders removed before the stop are forgotten from
//! state, the rest stay processed for the next attempt.

use railnota_io::ops::{rollback_batch, TicketLocation};
use railnota_io::state::State;

use crate::config::Config;
use crate::CliError;

pub fn cmd_rollback(cfg: &Config, orders: &[String]) -> Result<(), CliError> {
    let mut state = State::load(&cfg.state_file);

    let mut batch: Vec<(String, TicketLocation)> = Vec::new();
    for order in orders {
        match state.metadata.get(order) {
            Some(location) => batch.push((order.clone(), location.clone())),
            None => {
                eprintln!("warning: order {} has no recorded ledger entry, skipping", order)
            }
        }
    }

    if batch.is_empty() {
        println!("Nothing to roll back.");
        return Ok(());
    }

    let locations: Vec<TicketLocation> = batch.iter().map(|(_, l)| l.clone()).collect();
    let report = rollback_batch(&cfg.data_dir, &locations);

    for (order, location) in &batch {
        if report.completed.contains(location) {
            state.forget(order);
            println!("rolled back {} ({} row {})", order, location.file, location.row);
        } else if report.missing.contains(location) {
            state.forget(order);
            println!("{}: ledger row already gone, forgotten", order);
        }
    }

    state
        .save(&cfg.state_file)
        .map_err(|e| CliError::io(format!("cannot save {}: {}", cfg.state_file.display(), e)))?;

    if let Some((location, err)) = report.failed {
        return Err(CliError::unit(err).with_hint(format!(
            "orders before {} were rolled back; rerun for the rest",
            location.file
        )));
    }

    println!(
        "Rolled back {} order(s), {} already gone.",
        report.completed.len(),
        report.missing.len()
    );
    Ok(())
}

//! The `status` command: a quick look at the dedup state.

use railnota_io::state::State;

use crate::config::Config;
use crate::CliError;

pub fn cmd_status(cfg: &Config) -> Result<(), CliError> {
    let state = State::load(&cfg.state_file);

    println!("state file: {}", cfg.state_file.display());
    println!("processed:  {} order(s)", state.processed.len());
    println!("skipped:    {} weekend/holiday order(s)", state.skipped_weekend.len());

    for order in &state.processed {
        match state.metadata.get(order) {
            Some(loc) => println!("  {}  {} · {} row {}", order, loc.file, loc.sheet, loc.row),
            None => println!("  {}  (no rollback metadata)", order),
        }
    }
    for order in &state.skipped_weekend {
        println!("  {}  skipped", order);
    }
    Ok(())
}

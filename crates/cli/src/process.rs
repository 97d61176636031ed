//! The `process` command: saved confirmation emails in, ledger rows out.
//!
//! Order of operations per ticket matters: the ledger unit is saved
//! first, and only then is the order marked processed. A crash or a
//! locked workbook can therefore only leave an order unprocessed (it
//! will be retried), never silently dropped or double-booked.

use std::io::{self, BufRead, Write};
use std::path::Path;

use chrono::{Datelike, Local, NaiveDate};

use railnota_extract::calendar::{day_type_label, is_work_day};
use railnota_extract::email::{infer_direction, parse_nmbs_email, ParsedTicket};
use railnota_engine::layout::DUTCH_MONTHS;
use railnota_engine::ticket::TripRecord;
use railnota_io::ops::add_ticket;
use railnota_io::state::State;

use crate::config::Config;
use crate::inbox::read_inbox;
use crate::CliError;

/// Parse a `--month` value like `"februari"` or `"februari 2025"` into a
/// (month, year) pair. Month names are the Dutch sheet names, matched
/// case-insensitively; without a year the current year is assumed.
pub fn parse_month_arg(arg: &str) -> Result<(u32, i32), CliError> {
    let mut parts = arg.split_whitespace();
    let name = parts.next().unwrap_or("");
    let month = DUTCH_MONTHS
        .iter()
        .position(|m| m.eq_ignore_ascii_case(name))
        .map(|i| i as u32 + 1)
        .ok_or_else(|| {
            CliError::args(format!("'{}' is not a Dutch month name", name))
                .with_hint("use for example --month \"februari 2025\" (year optional)")
        })?;
    let year = match parts.next() {
        Some(y) => y
            .parse::<i32>()
            .map_err(|_| CliError::args(format!("'{}' is not a valid year", y)))?,
        None => Local::now().year(),
    };
    if parts.next().is_some() {
        return Err(CliError::args(format!("cannot parse month '{}'", arg)));
    }
    Ok((month, year))
}

fn in_month(d: NaiveDate, month: u32, year: i32) -> bool {
    d.month() == month && d.year() == year
}

pub fn cmd_process(
    cfg: &Config,
    assume_yes: bool,
    inbox: Option<&Path>,
    month: Option<(u32, i32)>,
) -> Result<(), CliError> {
    let inbox_dir = inbox.unwrap_or(&cfg.inbox_dir);
    let mut state = State::load(&cfg.state_file);

    println!("NMBS expense ledger — processing new tickets\n");

    let emails = read_inbox(inbox_dir)?;
    let mut tickets: Vec<ParsedTicket> = Vec::new();
    for (path, html) in &emails {
        match parse_nmbs_email(html) {
            Ok(parsed) => {
                let order = &parsed.trip.order_number;
                if state.is_processed(order)
                    || state.is_skipped(order)
                    || tickets.iter().any(|t| t.trip.order_number == *order)
                {
                    continue;
                }
                tickets.push(parsed);
            }
            Err(e) => eprintln!("warning: {}: {} — skipped", path.display(), e),
        }
    }

    if let Some((m, y)) = month {
        println!("Only considering tickets from {} {}.", DUTCH_MONTHS[(m - 1) as usize], y);
        tickets.retain(|t| in_month(t.trip.travel_date, m, y));
    }

    if tickets.is_empty() {
        println!("No new tickets found.");
        return Ok(());
    }

    tickets.sort_by_key(|t| t.trip.travel_date);
    let total = tickets.len();
    println!("{} new ticket(s) found.", total);

    let mut added = 0usize;
    let mut skipped_weekend = 0usize;

    for (i, ticket) in tickets.iter().enumerate() {
        let trip = &ticket.trip;
        print_ticket(trip, i + 1, total);

        if cfg.has_commute()
            && infer_direction(
                &trip.from_station,
                &trip.to_station,
                &cfg.home_station,
                &cfg.office_station,
            )
            .is_none()
        {
            println!(
                "      note: not the configured {} ↔ {} commute",
                cfg.home_station, cfg.office_station
            );
        }

        if !is_work_day(trip.travel_date) {
            let label = day_type_label(trip.travel_date);
            println!("      this ticket was bought on a {}.", label);
            if assume_yes {
                // Non-interactive runs never book weekend travel; the
                // order stays unprocessed so an interactive run can
                // decide.
                println!("      left unprocessed (--yes does not book weekend tickets)");
                continue;
            }
            if !prompt("Include it in the expense ledger anyway?", false)? {
                state.mark_skipped(&trip.order_number);
                save_state(&state, cfg)?;
                println!("      permanently skipped (will not be shown again)");
                skipped_weekend += 1;
                continue;
            }
        } else if !assume_yes && !prompt("Add to the expense ledger?", true)? {
            println!("      skipped for now (will be shown again next run)");
            continue;
        }

        let location = match add_ticket(&cfg.data_dir, &cfg.person, trip) {
            Ok(location) => location,
            Err(e) if e.is_locked() => {
                eprintln!("warning: {}", e);
                eprintln!("      ticket left unprocessed; close Excel and run again");
                continue;
            }
            Err(e) => return Err(CliError::unit(e)),
        };

        println!("      ✓ added to {} row {}", location.file, location.row);
        state.mark_processed(&trip.order_number, location);
        save_state(&state, cfg)?;
        added += 1;
    }

    print!("\nDone: {} ticket(s) added", added);
    if skipped_weekend > 0 {
        print!(", {} weekend/holiday ticket(s) skipped", skipped_weekend);
    }
    println!(".");
    Ok(())
}

fn save_state(state: &State, cfg: &Config) -> Result<(), CliError> {
    state
        .save(&cfg.state_file)
        .map_err(|e| CliError::io(format!("cannot save {}: {}", cfg.state_file.display(), e)))
}

fn print_ticket(trip: &TripRecord, index: usize, total: usize) {
    println!(
        "\n[{}/{}] {} → {} ({})",
        index, total, trip.from_station, trip.to_station, trip.direction
    );
    println!(
        "      date: {}  |  price: € {:.2}  |  order: {}",
        trip.travel_date.format("%d/%m/%Y"),
        trip.price,
        trip.order_number
    );
}

fn prompt(question: &str, default_yes: bool) -> Result<bool, CliError> {
    let hint = if default_yes { "[J/n]" } else { "[j/N]" };
    print!("      {} {}: ", question, hint);
    io::stdout()
        .flush()
        .map_err(|e| CliError::io(format!("stdout: {}", e)))?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .map_err(|e| CliError::io(format!("stdin: {}", e)))?;

    let answer = answer.trim().to_lowercase();
    if answer.is_empty() {
        return Ok(default_yes);
    }
    Ok(matches!(answer.as_str(), "j" | "y" | "ja" | "yes"))
}

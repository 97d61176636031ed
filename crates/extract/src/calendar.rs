//! Belgian work-day calendar.
//!
//! A commute ticket on a weekend or public holiday is suspicious; the
//! pipeline asks before booking those. Movable feasts derive from Easter
//! (Meeus/Butcher algorithm), the rest are fixed dates.

use chrono::{Datelike, NaiveDate, Weekday};

/// Easter Sunday for a given year (Gregorian).
pub fn easter_sunday(year: i32) -> NaiveDate {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = ((h + l - 7 * m + 114) % 31) + 1;
    // The algorithm always yields a valid March/April date.
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, 4, 1).unwrap_or_default())
}

/// Belgian public holidays that can fall on a weekday.
pub fn holidays_for_year(year: i32) -> Vec<(NaiveDate, &'static str)> {
    let easter = easter_sunday(year);
    let fixed = |month: u32, day: u32| {
        // Fixed-date holidays are always valid calendar dates.
        NaiveDate::from_ymd_opt(year, month, day).unwrap_or(easter)
    };

    vec![
        (fixed(1, 1), "Nieuwjaar"),
        (easter + chrono::Days::new(1), "Paasmaandag"),
        (fixed(5, 1), "Dag van de Arbeid"),
        (easter + chrono::Days::new(39), "O.L.H. Hemelvaart"),
        (easter + chrono::Days::new(50), "Pinkstermaandag"),
        (fixed(7, 21), "Nationale feestdag"),
        (fixed(8, 15), "O.L.V. Hemelvaart"),
        (fixed(11, 1), "Allerheiligen"),
        (fixed(11, 11), "Wapenstilstand"),
        (fixed(12, 25), "Kerstmis"),
    ]
}

fn holiday_name(d: NaiveDate) -> Option<&'static str> {
    holidays_for_year(d.year())
        .into_iter()
        .find(|(h, _)| *h == d)
        .map(|(_, name)| name)
}

/// True when the date is a plain work day: not a weekend, not a holiday.
pub fn is_work_day(d: NaiveDate) -> bool {
    !matches!(d.weekday(), Weekday::Sat | Weekday::Sun) && holiday_name(d).is_none()
}

/// Why the day is not a work day, for the confirmation prompt.
pub fn day_type_label(d: NaiveDate) -> String {
    match d.weekday() {
        Weekday::Sat => return "zaterdag".to_string(),
        Weekday::Sun => return "zondag".to_string(),
        _ => {}
    }
    match holiday_name(d) {
        Some(name) => format!("feestdag ({})", name),
        None => "werkdag".to_string(),
    }
}

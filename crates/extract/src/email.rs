//! Parser for NMBS ticket confirmation emails (HTML).
//!
//! The emails are table-heavy marketing HTML, but every field the ledger
//! needs survives flattening the markup to plain text: order number,
//! stations, trip type, travel date(s), and the total amount. Supported
//! trip types:
//!
//!   "2e klas, Heen en terug"  -> round trip, travel date = Heen date
//!   "2e klas, Enkel"          -> single, direction from whichever date
//!                                is present
//!
//! A few emails carry both dates on an Enkel ticket; those are treated as
//! outbound on the Heen date.

use chrono::NaiveDate;
use regex::Regex;

use railnota_engine::ticket::{Direction, TripRecord};

use crate::error::ParseError;

/// A parsed confirmation email. The original HTML rides along so the
/// caller can archive it next to the ledger entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTicket {
    pub trip: TripRecord,
    pub email_html: String,
}

/// Parse one confirmation email.
pub fn parse_nmbs_email(html: &str) -> Result<ParsedTicket, ParseError> {
    let text = strip_tags(html);

    let order_re = Regex::new(r"Bestelnummer\s*:\s*([A-Z0-9]+)").unwrap();
    let order = order_re
        .captures(&text)
        .map(|c| c[1].to_string())
        .ok_or(ParseError::MissingOrderNumber)?;

    let (from_station, to_station) = parse_stations(&text)
        .ok_or_else(|| ParseError::MissingStations { order: order.clone() })?;

    let round_trip = text.contains("Heen en terug");
    if !round_trip && !text.contains("Enkel") {
        return Err(ParseError::MissingTripType { order });
    }

    let heen_re = Regex::new(r"Heen\s*:\s*(\d{2}/\d{2}/\d{4})").unwrap();
    let terug_re = Regex::new(r"Terug\s*:\s*(\d{2}/\d{2}/\d{4})").unwrap();
    let heen = heen_re.captures(&text).map(|c| c[1].to_string());
    let terug = terug_re.captures(&text).map(|c| c[1].to_string());

    let (direction, date_text) = if round_trip {
        match heen {
            Some(d) => (Direction::RoundTrip, d),
            None => return Err(ParseError::MissingTravelDate { order }),
        }
    } else {
        match (heen, terug) {
            (Some(d), None) => (Direction::Outbound, d),
            (None, Some(d)) => (Direction::Return, d),
            // Both dates on an Enkel ticket: take the outbound leg.
            (Some(d), Some(_)) => (Direction::Outbound, d),
            (None, None) => return Err(ParseError::MissingTravelDate { order }),
        }
    };

    let travel_date = NaiveDate::parse_from_str(&date_text, "%d/%m/%Y").map_err(|_| {
        ParseError::BadDate { order: order.clone(), text: date_text.clone() }
    })?;

    // "Totaalbedrag : € 28,00" — grab the first number after the label,
    // comma or point decimal.
    let price_re = Regex::new(r"Totaalbedrag\s*:?[^\d]*(\d+[,.]\d+)").unwrap();
    let price: f64 = match price_re.captures(&text) {
        Some(c) => c[1].replace(',', ".").parse().map_err(|_| ParseError::MissingPrice {
            order: order.clone(),
        })?,
        None => return Err(ParseError::MissingPrice { order }),
    };

    Ok(ParsedTicket {
        trip: TripRecord {
            order_number: order,
            from_station: title_station(&from_station),
            to_station: title_station(&to_station),
            direction,
            travel_date,
            price,
        },
        email_html: html.to_string(),
    })
}

/// Classify a station pair against the configured commute. `None` means
/// the ticket is not a home/office trip; the caller decides whether that
/// deserves a warning. Comparison is case-insensitive.
pub fn infer_direction(
    from_station: &str,
    to_station: &str,
    home_station: &str,
    office_station: &str,
) -> Option<Direction> {
    let from = from_station.to_lowercase();
    let to = to_station.to_lowercase();
    let home = home_station.to_lowercase();
    let office = office_station.to_lowercase();

    if from == home && to == office {
        Some(Direction::Outbound)
    } else if from == office && to == home {
        Some(Direction::Return)
    } else {
        None
    }
}

fn parse_stations(text: &str) -> Option<(String, String)> {
    // "Van : ZOTTEGEM Naar : ANTWERPEN-ZUID 2e klas, ..." — the Naar value
    // runs until the class marker, a date label, or the amount label.
    let van_re = Regex::new(r"Van\s*:\s*(.+?)\s*Naar\s*:").unwrap();
    let naar_re =
        Regex::new(r"Naar\s*:\s*(.+?)\s*(?:[12]e\s+klas|Heen\s*:|Terug\s*:|Totaalbedrag)").unwrap();

    let from = van_re.captures(text)?[1].trim().to_string();
    let to = naar_re.captures(text)?[1].trim().to_string();
    if from.is_empty() || to.is_empty() {
        return None;
    }
    Some((from, to))
}

/// Title-case a station name: ANTWERPEN-ZUID -> Antwerpen-Zuid. Every
/// letter that follows a non-letter starts a new word, so hyphenated and
/// apostrophed names come out right.
pub fn title_station(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_was_letter = false;
    for c in name.trim().chars() {
        if c.is_alphabetic() {
            if prev_was_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_was_letter = true;
        } else {
            out.push(c);
            prev_was_letter = false;
        }
    }
    out
}

/// Flatten HTML to space-joined text: tags become separators, a handful
/// of entities are decoded, whitespace is collapsed.
pub fn strip_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => {
                in_tag = true;
                text.push(' ');
            }
            '>' => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }

    let text = text
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&euro;", "€");

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_email(trip_type: &str, heen: Option<&str>, terug: Option<&str>) -> String {
        let mut dates = String::new();
        if let Some(d) = heen {
            dates.push_str(&format!("<span>Heen: {d}</span>"));
        }
        if let Some(d) = terug {
            dates.push_str(&format!("<span>Terug: {d}</span>"));
        }
        format!(
            r#"<html><body>
            <p>Bedankt voor je bestelling!</p>
            <p>Bestelnummer: ABC123XYZ</p>
            <table><tr>
              <td><span>Van :</span><span>ZOTTEGEM</span></td>
              <td><span>Naar :</span><span>ANTWERPEN-ZUID</span></td>
            </tr></table>
            <p>2e klas, {trip_type}</p>
            {dates}
            <p>Totaalbedrag : &euro; 28,00</p>
            </body></html>"#
        )
    }

    #[test]
    fn test_round_trip_email() {
        let html = sample_email("Heen en terug", Some("13/02/2026"), Some("13/02/2026"));
        let parsed = parse_nmbs_email(&html).unwrap();

        assert_eq!(parsed.trip.order_number, "ABC123XYZ");
        assert_eq!(parsed.trip.from_station, "Zottegem");
        assert_eq!(parsed.trip.to_station, "Antwerpen-Zuid");
        assert_eq!(parsed.trip.direction, Direction::RoundTrip);
        assert_eq!(parsed.trip.travel_date, NaiveDate::from_ymd_opt(2026, 2, 13).unwrap());
        assert_eq!(parsed.trip.price, 28.0);
        assert_eq!(parsed.email_html, html);
    }

    #[test]
    fn test_single_outbound_email() {
        let html = sample_email("Enkel", Some("03/02/2026"), None);
        let parsed = parse_nmbs_email(&html).unwrap();
        assert_eq!(parsed.trip.direction, Direction::Outbound);
        assert_eq!(parsed.trip.travel_date, NaiveDate::from_ymd_opt(2026, 2, 3).unwrap());
    }

    #[test]
    fn test_single_return_email() {
        let html = sample_email("Enkel", None, Some("03/02/2026"));
        let parsed = parse_nmbs_email(&html).unwrap();
        assert_eq!(parsed.trip.direction, Direction::Return);
    }

    #[test]
    fn test_single_with_both_dates_takes_outbound() {
        let html = sample_email("Enkel", Some("03/02/2026"), Some("05/02/2026"));
        let parsed = parse_nmbs_email(&html).unwrap();
        assert_eq!(parsed.trip.direction, Direction::Outbound);
        assert_eq!(parsed.trip.travel_date, NaiveDate::from_ymd_opt(2026, 2, 3).unwrap());
    }

    #[test]
    fn test_missing_order_number() {
        let err = parse_nmbs_email("<html><body>hallo</body></html>").unwrap_err();
        assert_eq!(err, ParseError::MissingOrderNumber);
    }

    #[test]
    fn test_missing_trip_type_reports_order() {
        let html = r#"<p>Bestelnummer: ABC123</p>
            <span>Van :</span><span>A</span><span>Naar :</span><span>B</span>
            <p>Totaalbedrag : 5,00</p>"#;
        let err = parse_nmbs_email(html).unwrap_err();
        assert_eq!(err, ParseError::MissingTripType { order: "ABC123".into() });
    }

    #[test]
    fn test_round_trip_without_heen_date_fails() {
        let html = sample_email("Heen en terug", None, None);
        let err = parse_nmbs_email(&html).unwrap_err();
        assert!(matches!(err, ParseError::MissingTravelDate { .. }));
    }

    #[test]
    fn test_missing_price() {
        let html = r#"<p>Bestelnummer: ABC123</p>
            <span>Van :</span><span>A</span><span>Naar :</span><span>B</span>
            <p>2e klas, Enkel</p><p>Heen: 03/02/2026</p>"#;
        let err = parse_nmbs_email(html).unwrap_err();
        assert_eq!(err, ParseError::MissingPrice { order: "ABC123".into() });
    }

    #[test]
    fn test_price_with_point_decimal() {
        let html = sample_email("Enkel", Some("03/02/2026"), None).replace("28,00", "14.50");
        let parsed = parse_nmbs_email(&html).unwrap();
        assert_eq!(parsed.trip.price, 14.5);
    }

    #[test]
    fn test_title_station() {
        assert_eq!(title_station("ZOTTEGEM"), "Zottegem");
        assert_eq!(title_station("ANTWERPEN-ZUID"), "Antwerpen-Zuid");
        assert_eq!(title_station("'s-GRAVENBRAKEL"), "'S-Gravenbrakel");
        assert_eq!(title_station("  brussel centraal "), "Brussel Centraal");
    }

    #[test]
    fn test_infer_direction() {
        assert_eq!(
            infer_direction("Zottegem", "Antwerpen-Zuid", "zottegem", "antwerpen-zuid"),
            Some(Direction::Outbound)
        );
        assert_eq!(
            infer_direction("Antwerpen-Zuid", "Zottegem", "Zottegem", "Antwerpen-Zuid"),
            Some(Direction::Return)
        );
        assert_eq!(
            infer_direction("Gent-Sint-Pieters", "Zottegem", "Zottegem", "Antwerpen-Zuid"),
            None
        );
    }

    #[test]
    fn test_strip_tags_decodes_entities() {
        assert_eq!(strip_tags("<p>a &amp; b</p>"), "a & b");
        assert_eq!(strip_tags("<td>x</td><td>y</td>"), "x y");
    }
}

//! End-to-end scenarios on a single month sheet: fill-up, overflow growth,
//! shrink-back, and the insert/remove round trip.

use chrono::NaiveDate;

use railnota_engine::cell::{excel_serial, CellValue};
use railnota_engine::factory::{new_month_sheet, ROW_SUBTOTAL, ROW_TRANSPORT_TOTAL};
use railnota_engine::layout::{
    COL_CURRENCY, COL_DATE, COL_DESCRIPTION, COL_NR, COL_TOTAL, COL_TRANSPORT, DATA_END_ROW,
    DATA_START_ROW,
};
use railnota_engine::mutate::{insert_trip, remove_trip, RemoveOutcome};
use railnota_engine::rows::last_occupied_row;
use railnota_engine::sheet::Sheet;
use railnota_engine::ticket::{Direction, TripRecord};

fn trip(day: u32, price: f64) -> TripRecord {
    TripRecord {
        order_number: format!("NMBS2026{day:02}"),
        from_station: "Zottegem".into(),
        to_station: "Antwerpen-Zuid".into(),
        direction: Direction::RoundTrip,
        travel_date: NaiveDate::from_ymd_opt(2026, 2, day).unwrap(),
        price,
    }
}

fn occupied_count(sheet: &Sheet) -> u32 {
    last_occupied_row(sheet).map_or(0, |last| last - DATA_START_ROW + 1)
}

fn subtotal_text(sheet: &Sheet, last_data: u32) -> String {
    // Subtotal row sits at a fixed offset below the block end.
    let row = ROW_SUBTOTAL + (last_data.max(DATA_END_ROW) - DATA_END_ROW);
    sheet.get(row, COL_TOTAL).as_formula().expect("subtotal formula").text()
}

fn assert_dense_numbering(sheet: &Sheet) {
    let count = occupied_count(sheet);
    for i in 0..count {
        let row = DATA_START_ROW + i;
        assert_eq!(
            sheet.get(row, COL_NR).as_number(),
            Some((i + 1) as f64),
            "row {row} sequence number"
        );
    }
}

// Scenario 1: a first ticket lazily creates and fills the February unit.
#[test]
fn first_ticket_into_fresh_february_unit() {
    let t = TripRecord {
        order_number: "ORD1".into(),
        from_station: "A".into(),
        to_station: "B".into(),
        direction: Direction::RoundTrip,
        travel_date: NaiveDate::from_ymd_opt(2026, 2, 13).unwrap(),
        price: 28.0,
    };

    let mut sheet = new_month_sheet("J. Peeters", t.travel_date);
    assert_eq!(sheet.name, "Februari 2026");

    let inserted = insert_trip(&mut sheet, &t).unwrap();
    assert_eq!(inserted.row, 8);
    assert_eq!(inserted.seq, 1);

    assert_eq!(sheet.get(8, COL_DATE).as_date_serial(), Some(excel_serial(t.travel_date)));
    assert_eq!(sheet.get(8, COL_NR).as_number(), Some(1.0));
    assert_eq!(sheet.get(8, COL_DESCRIPTION).as_text(), Some("Trein A - B heen/terug"));
    assert_eq!(sheet.get(8, COL_CURRENCY).as_text(), Some("EUR"));
    assert_eq!(sheet.get(8, COL_TRANSPORT).as_number(), Some(28.0));
    assert_eq!(sheet.get(8, COL_TOTAL).as_formula().unwrap().text(), "SUM(E8:K8)");
}

// Scenario 2: the ninth ticket grows the block and the subtotal range.
#[test]
fn ninth_ticket_overflows_block() {
    let mut sheet = new_month_sheet("J. Peeters", NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());

    for day in 1..=8 {
        insert_trip(&mut sheet, &trip(day, 10.0)).unwrap();
    }
    assert_eq!(occupied_count(&sheet), 8);
    assert_eq!(subtotal_text(&sheet, 15), "SUM(L8:L15)");

    let ninth = insert_trip(&mut sheet, &trip(9, 10.0)).unwrap();
    assert_eq!(ninth.row, 16);
    assert_eq!(ninth.seq, 9);
    assert_eq!(occupied_count(&sheet), 9);

    // Upper bound advanced by exactly one, for every column aggregate.
    assert_eq!(subtotal_text(&sheet, 16), "SUM(L8:L16)");
    assert_eq!(
        sheet.get(ROW_TRANSPORT_TOTAL + 1, COL_TRANSPORT).as_formula().unwrap().text(),
        "SUM(F8:F16)"
    );
    // The overflow row has its own row total.
    assert_eq!(sheet.get(16, COL_TOTAL).as_formula().unwrap().text(), "SUM(E16:K16)");
}

// Scenario 3: removing the overflow ticket shrinks the ranges back.
#[test]
fn removing_overflow_ticket_shrinks_back() {
    let mut sheet = new_month_sheet("J. Peeters", NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
    for day in 1..=9 {
        insert_trip(&mut sheet, &trip(day, 10.0)).unwrap();
    }

    let ninth = trip(9, 10.0);
    let outcome = remove_trip(
        &mut sheet,
        excel_serial(ninth.travel_date),
        &ninth.row_description(),
    )
    .unwrap();
    assert_eq!(outcome, RemoveOutcome::Removed { row: 16, ambiguous: 0 });

    assert_eq!(occupied_count(&sheet), 8);
    assert_eq!(subtotal_text(&sheet, 15), "SUM(L8:L15)");
    assert_eq!(
        sheet.get(ROW_TRANSPORT_TOTAL, COL_TRANSPORT).as_formula().unwrap().text(),
        "SUM(F8:F15)"
    );
    assert_dense_numbering(&sheet);
}

// Scenario 4: removing the first of three renumbers the survivors.
#[test]
fn removing_first_of_three_renumbers() {
    let mut sheet = new_month_sheet("J. Peeters", NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
    let first = insert_trip(&mut sheet, &trip(1, 11.0)).unwrap();
    insert_trip(&mut sheet, &trip(2, 12.0)).unwrap();
    insert_trip(&mut sheet, &trip(3, 13.0)).unwrap();

    remove_trip(&mut sheet, first.date_serial, &first.description).unwrap();

    assert_eq!(occupied_count(&sheet), 2);
    assert_eq!(sheet.get(8, COL_TRANSPORT).as_number(), Some(12.0));
    assert_eq!(sheet.get(8, COL_NR).as_number(), Some(1.0));
    assert_eq!(sheet.get(9, COL_TRANSPORT).as_number(), Some(13.0));
    assert_eq!(sheet.get(9, COL_NR).as_number(), Some(2.0));
    // The row now in first position sums its own physical row.
    assert_eq!(sheet.get(8, COL_TOTAL).as_formula().unwrap().text(), "SUM(E8:K8)");
}

#[test]
fn insert_then_remove_is_a_round_trip() {
    let mut sheet = new_month_sheet("J. Peeters", NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
    for day in 1..=3 {
        insert_trip(&mut sheet, &trip(day, 15.0)).unwrap();
    }

    let snapshot: Vec<((u32, u32), CellValue)> = sheet
        .cells_sorted()
        .into_iter()
        .map(|(pos, v)| (pos, v.clone()))
        .collect();

    let extra = insert_trip(&mut sheet, &trip(20, 42.0)).unwrap();
    let outcome = remove_trip(&mut sheet, extra.date_serial, &extra.description).unwrap();
    assert!(matches!(outcome, RemoveOutcome::Removed { .. }));

    let after: Vec<((u32, u32), CellValue)> = sheet
        .cells_sorted()
        .into_iter()
        .map(|(pos, v)| (pos, v.clone()))
        .collect();
    assert_eq!(snapshot, after);
}

#[test]
fn round_trip_through_overflow_and_back() {
    let mut sheet = new_month_sheet("J. Peeters", NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
    for day in 1..=8 {
        insert_trip(&mut sheet, &trip(day, 10.0)).unwrap();
    }
    let snapshot: Vec<((u32, u32), CellValue)> = sheet
        .cells_sorted()
        .into_iter()
        .map(|(pos, v)| (pos, v.clone()))
        .collect();

    // Grow to 10 rows, then remove both overflow rows again.
    let nine = insert_trip(&mut sheet, &trip(9, 9.0)).unwrap();
    let ten = insert_trip(&mut sheet, &trip(10, 10.0)).unwrap();
    assert_eq!(subtotal_text(&sheet, 17), "SUM(L8:L17)");

    remove_trip(&mut sheet, ten.date_serial, &ten.description).unwrap();
    remove_trip(&mut sheet, nine.date_serial, &nine.description).unwrap();

    let after: Vec<((u32, u32), CellValue)> = sheet
        .cells_sorted()
        .into_iter()
        .map(|(pos, v)| (pos, v.clone()))
        .collect();
    assert_eq!(snapshot, after);
}

#[test]
fn dense_numbering_holds_across_mixed_sequence() {
    let mut sheet = new_month_sheet("J. Peeters", NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());

    let mut live: Vec<TripRecord> = Vec::new();
    for day in 1..=10 {
        let t = trip(day, day as f64);
        insert_trip(&mut sheet, &t).unwrap();
        live.push(t);
        assert_dense_numbering(&sheet);
    }

    // Remove from the middle, the front, and the back.
    for idx in [4usize, 0, 7] {
        let t = live.remove(idx);
        let outcome =
            remove_trip(&mut sheet, excel_serial(t.travel_date), &t.row_description()).unwrap();
        assert!(matches!(outcome, RemoveOutcome::Removed { .. }));
        assert_dense_numbering(&sheet);
        assert_eq!(occupied_count(&sheet) as usize, live.len());
    }

    // Survivors appear in their original relative order.
    for (i, t) in live.iter().enumerate() {
        let row = DATA_START_ROW + i as u32;
        assert_eq!(
            sheet.get(row, COL_DATE).as_date_serial(),
            Some(excel_serial(t.travel_date)),
            "row {row}"
        );
    }
}

#[test]
fn summary_upper_bound_tracks_block_exactly() {
    let mut sheet = new_month_sheet("J. Peeters", NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
    let mut live: Vec<TripRecord> = Vec::new();

    for day in 1..=12 {
        let t = trip(day, 5.0);
        insert_trip(&mut sheet, &t).unwrap();
        live.push(t);
        let last = last_occupied_row(&sheet).unwrap();
        let expected = last.max(DATA_END_ROW);
        assert_eq!(
            subtotal_text(&sheet, last),
            format!("SUM(L8:L{expected})")
        );
    }

    while let Some(t) = live.pop() {
        remove_trip(&mut sheet, excel_serial(t.travel_date), &t.row_description()).unwrap();
        let last = last_occupied_row(&sheet).unwrap_or(DATA_START_ROW - 1);
        let expected = last.max(DATA_END_ROW);
        assert_eq!(subtotal_text(&sheet, last), format!("SUM(L8:L{expected})"));
    }
}

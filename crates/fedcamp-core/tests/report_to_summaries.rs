use chrono::NaiveDate;

use fedcamp_core::{build_records, check_in_placards, run_pipeline, DurationRole, ScoreWeights};
use fedcamp_parser::parse_reservation_report;

const HEADER: &str = "Loop,Site #,Reservation #,Reservation Status,Arrival Date,Departure Date,Primary Occupant Name,# of Occupants,Equipment,Nights/ Days\n";

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, day).expect("valid test date")
}

fn report(rows: &[&str]) -> String {
    let mut content = String::from("Camping Reservation Detail Report,,,,,,,,,\n");
    content.push_str(HEADER);
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    content
}

#[test]
fn report_flows_through_to_summaries() {
    let content = report(&[
        "A,A1,88211877,RESERVED,07/01/2025,07/04/2025,\"S............, M.....\",3,RV (1),3",
        "B,B2,88214501,CANCELLED,07/01/2025,07/03/2025,\"B......, K...\",2,Tent (1),2",
    ]);

    let parsed = parse_reservation_report(&content).expect("report parses");
    let ingestion = build_records(&parsed.rows);
    assert!(ingestion.skipped.is_empty());

    let output = run_pipeline(&ingestion.records, &ScoreWeights::default());

    // Cancelled reservation contributes nothing; the RV stay expands to
    // exactly its three nights.
    assert_eq!(output.nights.len(), 3);
    assert_eq!(output.nights[0].date, date(1));
    assert_eq!(output.nights[0].duration_role, DurationRole::First);
    assert_eq!(output.nights[1].duration_role, DurationRole::Continuing);
    assert_eq!(output.nights[2].date, date(3));

    let first_day = &output.daily[0];
    assert_eq!(first_day.date, date(1));
    assert_eq!(first_day.total_sites, 1);
    assert_eq!(first_day.total_occupants, 3);
    assert_eq!(first_day.sites_by_footprint.rv, 1);
    assert_eq!(first_day.sites_by_footprint.tent, 0);
    assert_eq!(first_day.occupants_by_role.first, 3);

    assert_eq!(output.weekly.len(), 1);
    assert_eq!(output.busiest.len(), 1);
    assert_eq!(output.busiest[0].date, date(1));
}

#[test]
fn malformed_rows_are_reported_not_fatal() {
    let content = report(&[
        "A,A1,88211877,RESERVED,07/01/2025,07/04/2025,\"S............, M.....\",3,RV (1),3",
        "A,,88220169,RESERVED,07/01/2025,07/02/2025,\"T........, A....\",2,RV (1),1",
        "B,B2,88224710,RESERVED,07/04/2025,07/01/2025,\"L...., J..\",4,Tent (1),3",
    ]);

    let parsed = parse_reservation_report(&content).expect("report parses");
    let ingestion = build_records(&parsed.rows);
    assert_eq!(ingestion.skipped.len(), 1);

    let output = run_pipeline(&ingestion.records, &ScoreWeights::default());
    assert_eq!(output.skipped.len(), 1);
    assert_eq!(output.nights.len(), 3);
}

#[test]
fn placards_select_upcoming_reserved_arrivals() {
    let content = report(&[
        "A,A1,88211877,RESERVED,07/08/2025,07/11/2025,\"S............, M.....\",4,RV (1),3",
        "A,A2,88214501,CHECKED_IN,07/07/2025,07/09/2025,\"B......, K...\",2,RV (1),2",
        "B,B2,88220169,RESERVED,07/09/2025,07/10/2025,\"T........, A....\",3,Tent (1),1",
    ]);

    let parsed = parse_reservation_report(&content).expect("report parses");
    let ingestion = build_records(&parsed.rows);

    let placards = check_in_placards(&ingestion.records, date(8), None, None);
    assert_eq!(placards.len(), 2);
    assert_eq!(placards[0].site_id, "A1");
    assert_eq!(placards[0].masked_reservation_id, "...211877");
    assert_eq!(placards[1].arrival, date(9));
}

use chrono::NaiveDate;
use tracing::warn;

use fedcamp_parser::RawReservationRow;

use crate::error::{SkipReason, SkippedReservation};
use crate::types::{Footprint, ReservationRecord, ReservationStatus};

const DATE_FORMATS: [&str; 2] = ["%m/%d/%Y", "%Y-%m-%d"];

#[derive(Debug)]
pub struct IngestionOutcome {
    pub records: Vec<ReservationRecord>,
    pub skipped: Vec<SkippedReservation>,
}

/// Types the raw report rows into [`ReservationRecord`]s.
///
/// Rows missing a required field or holding unparseable dates are skipped
/// and reported, never fatal. Malformed occupant counts coerce to zero so
/// site occupancy stays countable even when headcounts are unknown.
pub fn build_records(rows: &[RawReservationRow]) -> IngestionOutcome {
    let mut records = Vec::with_capacity(rows.len());
    let mut skipped = Vec::new();

    for row in rows {
        match build_record(row) {
            Ok(record) => records.push(record),
            Err(reason) => skipped.push(SkippedReservation {
                reservation_id: row.reservation_id.clone(),
                site_id: row.site_id.clone(),
                reason,
            }),
        }
    }

    IngestionOutcome { records, skipped }
}

fn build_record(row: &RawReservationRow) -> std::result::Result<ReservationRecord, SkipReason> {
    let reservation_id = require(&row.reservation_id, "Reservation #")?;
    let site_id = require(&row.site_id, "Site #")?;
    let status = ReservationStatus::parse(&require(&row.status, "Reservation Status")?);
    let arrival_date = parse_date(&require(&row.arrival, "Arrival Date")?, "Arrival Date")?;
    let departure_date = parse_date(&require(&row.departure, "Departure Date")?, "Departure Date")?;

    Ok(ReservationRecord {
        occupant_count: parse_occupants(row, &reservation_id),
        footprint: classify_footprint(&row.equipment),
        occupant_name: row.occupant_name.clone().unwrap_or_default(),
        reservation_id,
        site_id,
        status,
        arrival_date,
        departure_date,
    })
}

fn require(field: &Option<String>, name: &'static str) -> std::result::Result<String, SkipReason> {
    field
        .clone()
        .ok_or(SkipReason::MissingField { field: name })
}

fn parse_date(value: &str, field: &'static str) -> std::result::Result<NaiveDate, SkipReason> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .ok_or_else(|| SkipReason::UnparseableDate {
            field,
            value: value.to_string(),
        })
}

fn parse_occupants(row: &RawReservationRow, reservation_id: &str) -> u32 {
    let Some(raw) = row.occupants.as_deref() else {
        warn!(reservation_id, "missing occupant count, coercing to 0");
        return 0;
    };

    // Spreadsheet exports sometimes render integers as floats ("4.0").
    if let Ok(count) = raw.parse::<u32>() {
        return count;
    }
    if let Ok(count) = raw.parse::<f64>() {
        if count.is_finite() && count >= 0.0 {
            return count as u32;
        }
    }

    warn!(reservation_id, raw, "malformed occupant count, coercing to 0");
    0
}

fn classify_footprint(equipment: &[String]) -> Footprint {
    let has_tent = equipment
        .iter()
        .any(|item| item.eq_ignore_ascii_case("tent") || item.eq_ignore_ascii_case("small tent"));
    if has_tent {
        Footprint::Tent
    } else {
        Footprint::Rv
    }
}

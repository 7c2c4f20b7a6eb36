use chrono::NaiveDate;

use crate::types::{PlacardRecord, ReservationRecord, ReservationStatus};

/// Selects the reservations that need a check-in placard: still in RESERVED
/// status with an arrival on or after the reference date.
///
/// `today` is always an explicit parameter so the selection stays
/// deterministic; only the binary edge may consult the wall clock. Optional
/// filters narrow the set to specific arrival dates or campsites.
pub fn check_in_placards(
    records: &[ReservationRecord],
    today: NaiveDate,
    arrival_dates: Option<&[NaiveDate]>,
    campsites: Option<&[String]>,
) -> Vec<PlacardRecord> {
    records
        .iter()
        .filter(|record| record.status == ReservationStatus::Reserved)
        .filter(|record| record.arrival_date >= today)
        .filter(|record| {
            arrival_dates.map_or(true, |dates| dates.contains(&record.arrival_date))
        })
        .filter(|record| campsites.map_or(true, |sites| sites.contains(&record.site_id)))
        .map(|record| PlacardRecord {
            site_id: record.site_id.clone(),
            occupant_name: record.occupant_name.clone(),
            masked_reservation_id: mask_reservation_id(&record.reservation_id),
            arrival: record.arrival_date,
            departure: record.departure_date,
            occupant_count: record.occupant_count,
        })
        .collect()
}

/// Placards are posted in the open, so only the tail of the reservation
/// number is printed.
fn mask_reservation_id(reservation_id: &str) -> String {
    let chars: Vec<char> = reservation_id.chars().collect();
    let tail: String = chars[chars.len().saturating_sub(6)..].iter().collect();
    format!("...{tail}")
}

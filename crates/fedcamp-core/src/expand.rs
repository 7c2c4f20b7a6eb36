use chrono::Duration;

use crate::error::{SkipReason, SkippedReservation};
use crate::types::{DurationRole, OccupiedNight, ReservationRecord};

#[derive(Debug)]
pub struct ExpansionOutcome {
    pub nights: Vec<OccupiedNight>,
    pub skipped: Vec<SkippedReservation>,
}

/// Expands each occupying reservation into one [`OccupiedNight`] per night
/// of stay, one fact per date in `[arrival, departure)`.
///
/// Cancelled and unrecognized statuses contribute zero nights and are
/// dropped outright. Records whose departure is not after their arrival are
/// skipped and reported; the rest of the input still expands.
pub fn expand_reservations(records: &[ReservationRecord]) -> ExpansionOutcome {
    let mut nights = Vec::new();
    let mut skipped = Vec::new();

    for record in records.iter().filter(|record| record.status.is_occupying()) {
        let stay_nights = (record.departure_date - record.arrival_date).num_days();
        if stay_nights <= 0 {
            skipped.push(SkippedReservation {
                reservation_id: Some(record.reservation_id.clone()),
                site_id: Some(record.site_id.clone()),
                reason: SkipReason::InvalidDateRange {
                    arrival: record.arrival_date,
                    departure: record.departure_date,
                },
            });
            continue;
        }

        for offset in 0..stay_nights {
            let duration_role = if stay_nights == 1 {
                DurationRole::Single
            } else if offset == 0 {
                DurationRole::First
            } else {
                DurationRole::Continuing
            };

            nights.push(OccupiedNight {
                date: record.arrival_date + Duration::days(offset),
                reservation_id: record.reservation_id.clone(),
                site_id: record.site_id.clone(),
                footprint: record.footprint,
                occupant_count: record.occupant_count,
                duration_role,
            });
        }
    }

    ExpansionOutcome { nights, skipped }
}

use tracing::{debug, warn};

use crate::busiest::select_busiest_days;
use crate::config::ScoreWeights;
use crate::error::SkippedReservation;
use crate::expand::{expand_reservations, ExpansionOutcome};
use crate::summary::summarize_daily;
use crate::types::{BusiestDayRecord, DailySummary, OccupiedNight, ReservationRecord, WeeklySummary};
use crate::weekly::rollup_weekly;

/// Everything the derivation pipeline produces from one reservation set,
/// alongside the per-record skip report.
#[derive(Debug)]
pub struct PipelineOutput {
    pub nights: Vec<OccupiedNight>,
    pub daily: Vec<DailySummary>,
    pub weekly: Vec<WeeklySummary>,
    pub busiest: Vec<BusiestDayRecord>,
    pub skipped: Vec<SkippedReservation>,
}

/// Runs the four derivation stages in order: expand, daily, weekly, busiest
/// day. Pure in-memory computation; identical input yields identical output.
pub fn run_pipeline(records: &[ReservationRecord], weights: &ScoreWeights) -> PipelineOutput {
    let ExpansionOutcome { nights, skipped } = expand_reservations(records);
    if !skipped.is_empty() {
        warn!(
            skipped = skipped.len(),
            "reservations excluded during expansion"
        );
    }

    let daily = summarize_daily(&nights);
    let weekly = rollup_weekly(&daily);
    let busiest = select_busiest_days(&weekly, weights);
    debug!(
        nights = nights.len(),
        days = daily.len(),
        weeks = weekly.len(),
        "derivation pipeline complete"
    );

    PipelineOutput {
        nights,
        daily,
        weekly,
        busiest,
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::types::{Footprint, ReservationStatus};

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, day).expect("valid test date")
    }

    fn reservation(id: &str, site: &str, arrival: u32, departure: u32) -> ReservationRecord {
        ReservationRecord {
            reservation_id: id.to_string(),
            site_id: site.to_string(),
            footprint: Footprint::Rv,
            arrival_date: date(arrival),
            departure_date: date(departure),
            occupant_count: 3,
            status: ReservationStatus::Reserved,
            occupant_name: "W........, T..".to_string(),
        }
    }

    #[test]
    fn full_pipeline_scenario() {
        let records = vec![reservation("88211877", "A1", 1, 4)];
        let output = run_pipeline(&records, &ScoreWeights::default());

        assert_eq!(output.nights.len(), 3);
        assert_eq!(output.daily.len(), 3);
        assert_eq!(output.weekly.len(), 1);
        assert_eq!(output.busiest.len(), 1);
        // 07-01 is the only arrival night, so it wins at any weight > 1.
        assert_eq!(output.busiest[0].date, date(1));
        assert!(output.skipped.is_empty());
    }

    #[test]
    fn input_order_does_not_change_output() {
        let mut records = vec![
            reservation("1001", "A1", 1, 4),
            reservation("1002", "B2", 2, 3),
            reservation("1003", "C3", 7, 10),
        ];
        let weights = ScoreWeights::default();

        let forward = run_pipeline(&records, &weights);
        records.reverse();
        let backward = run_pipeline(&records, &weights);

        assert_eq!(forward.daily, backward.daily);
        assert_eq!(forward.weekly, backward.weekly);
        assert_eq!(forward.busiest, backward.busiest);
    }

    #[test]
    fn rerunning_identical_input_is_idempotent() {
        let records = vec![
            reservation("1001", "A1", 1, 4),
            reservation("1002", "B2", 2, 3),
        ];
        let weights = ScoreWeights::default();

        let first = run_pipeline(&records, &weights);
        let second = run_pipeline(&records, &weights);

        assert_eq!(first.nights, second.nights);
        assert_eq!(first.daily, second.daily);
        assert_eq!(first.weekly, second.weekly);
        assert_eq!(first.busiest, second.busiest);
    }

    #[test]
    fn cancelling_a_reservation_removes_exactly_its_facts() {
        let kept = reservation("1001", "A1", 1, 4);
        let mut flipped = reservation("1002", "B2", 2, 5);

        let weights = ScoreWeights::default();
        let before = run_pipeline(&[kept.clone(), flipped.clone()], &weights);

        flipped.status = ReservationStatus::Cancelled;
        let after = run_pipeline(&[kept, flipped], &weights);

        assert!(before
            .nights
            .iter()
            .any(|night| night.reservation_id == "1002"));
        assert!(after
            .nights
            .iter()
            .all(|night| night.reservation_id != "1002"));

        let before_1001: Vec<_> = before
            .nights
            .iter()
            .filter(|night| night.reservation_id == "1001")
            .collect();
        let after_1001: Vec<_> = after
            .nights
            .iter()
            .filter(|night| night.reservation_id == "1001")
            .collect();
        assert_eq!(before_1001, after_1001);

        let after_total: u32 = after.daily.iter().map(|day| day.total_occupants).sum();
        let after_facts: u32 = after.nights.iter().map(|night| night.occupant_count).sum();
        assert_eq!(after_total, after_facts);
    }
}

use std::collections::BTreeMap;

use chrono::Datelike;

use crate::types::{DailySummary, WeeklySummary};

/// Buckets daily summaries into ISO weeks (Monday-first), sorted by
/// (iso_year, week).
///
/// Weekday slots with no daily summary stay `None`: the input report may not
/// cover a full calendar week, and an absent day is not the same thing as a
/// day with zero occupancy.
pub fn rollup_weekly(daily: &[DailySummary]) -> Vec<WeeklySummary> {
    let mut weeks: BTreeMap<(i32, u32), [Option<DailySummary>; 7]> = BTreeMap::new();

    for summary in daily {
        let iso = summary.date.iso_week();
        let slot = summary.date.weekday().num_days_from_monday() as usize;
        weeks
            .entry((iso.year(), iso.week()))
            .or_insert_with(|| std::array::from_fn(|_| None))[slot] = Some(summary.clone());
    }

    weeks
        .into_iter()
        .map(|((iso_year, week), days)| WeeklySummary {
            iso_year,
            week,
            days,
        })
        .collect()
}

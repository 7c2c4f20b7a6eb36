use crate::config::ScoreWeights;
use crate::types::{BusiestDayRecord, DailySummary, WeeklySummary};

/// Picks the day with the highest weighted occupancy score in each week.
///
/// Exact ties go to the earliest date; the Monday-first scan with a strict
/// `>` comparison guarantees that. Weeks whose present days are all zero
/// produce no record.
pub fn select_busiest_days(
    weeks: &[WeeklySummary],
    weights: &ScoreWeights,
) -> Vec<BusiestDayRecord> {
    weeks
        .iter()
        .filter_map(|week| busiest_in_week(week, weights))
        .collect()
}

/// Arrival nights (single and first) weigh more than continuing nights
/// because they drive orientation contact and site setup.
pub fn weighted_score(day: &DailySummary, weights: &ScoreWeights) -> f64 {
    let arrivals = day.occupants_by_role.single + day.occupants_by_role.first;
    f64::from(arrivals) * weights.arrival_weight + f64::from(day.occupants_by_role.continuing)
}

fn busiest_in_week(week: &WeeklySummary, weights: &ScoreWeights) -> Option<BusiestDayRecord> {
    let occupied = week
        .days
        .iter()
        .flatten()
        .any(|day| day.total_sites > 0 || day.total_occupants > 0);
    if !occupied {
        return None;
    }

    let mut best: Option<(&DailySummary, f64)> = None;
    for day in week.days.iter().flatten() {
        let score = weighted_score(day, weights);
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((day, score));
        }
    }

    best.map(|(day, weighted_score)| BusiestDayRecord {
        iso_year: week.iso_year,
        week: week.week,
        date: day.date,
        weighted_score,
    })
}

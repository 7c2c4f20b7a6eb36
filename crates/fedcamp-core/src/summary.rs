use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::types::{DailySummary, Footprint, FootprintCounts, OccupiedNight, RoleOccupants};

#[derive(Default)]
struct DayAccumulator {
    tent_sites: BTreeSet<String>,
    rv_sites: BTreeSet<String>,
    occupants: RoleOccupants,
}

/// Folds occupied-night facts into one [`DailySummary`] per distinct date,
/// sorted by date.
///
/// Site counts are distinct per footprint; a site occupied by exactly one
/// reservation per night is assumed, and double-bookings in the source data
/// pass through uncorrected. The fold is commutative, so input order never
/// affects the output.
pub fn summarize_daily(nights: &[OccupiedNight]) -> Vec<DailySummary> {
    let mut days: BTreeMap<NaiveDate, DayAccumulator> = BTreeMap::new();

    for night in nights {
        let day = days.entry(night.date).or_default();
        match night.footprint {
            Footprint::Tent => day.tent_sites.insert(night.site_id.clone()),
            Footprint::Rv => day.rv_sites.insert(night.site_id.clone()),
        };
        day.occupants.add(night.duration_role, night.occupant_count);
    }

    days.into_iter()
        .map(|(date, day)| {
            let sites_by_footprint = FootprintCounts {
                tent: day.tent_sites.len() as u32,
                rv: day.rv_sites.len() as u32,
            };
            DailySummary {
                date,
                total_sites: sites_by_footprint.total(),
                total_occupants: day.occupants.total(),
                sites_by_footprint,
                occupants_by_role: day.occupants,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DurationRole;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, day).expect("valid test date")
    }

    fn night(
        day: u32,
        site: &str,
        footprint: Footprint,
        occupants: u32,
        role: DurationRole,
    ) -> OccupiedNight {
        OccupiedNight {
            date: date(day),
            reservation_id: format!("res-{site}"),
            site_id: site.to_string(),
            footprint,
            occupant_count: occupants,
            duration_role: role,
        }
    }

    #[test]
    fn single_rv_reservation_first_night() {
        let nights = vec![night(1, "A1", Footprint::Rv, 3, DurationRole::First)];
        let daily = summarize_daily(&nights);

        assert_eq!(daily.len(), 1);
        let day = &daily[0];
        assert_eq!(day.date, date(1));
        assert_eq!(day.total_sites, 1);
        assert_eq!(day.total_occupants, 3);
        assert_eq!(day.sites_by_footprint, FootprintCounts { tent: 0, rv: 1 });
        assert_eq!(day.occupants_by_role.first, 3);
        assert_eq!(day.occupants_by_role.single, 0);
        assert_eq!(day.occupants_by_role.continuing, 0);
    }

    #[test]
    fn two_single_night_reservations_same_date() {
        let nights = vec![
            night(5, "A1", Footprint::Tent, 2, DurationRole::Single),
            night(5, "B2", Footprint::Rv, 4, DurationRole::Single),
        ];
        let daily = summarize_daily(&nights);

        assert_eq!(daily.len(), 1);
        let day = &daily[0];
        assert_eq!(day.total_sites, 2);
        assert_eq!(day.total_occupants, 6);
        assert_eq!(day.occupants_by_role.single, 6);
    }

    #[test]
    fn totals_equal_breakdown_sums() {
        let nights = vec![
            night(3, "A1", Footprint::Tent, 2, DurationRole::First),
            night(3, "B2", Footprint::Rv, 4, DurationRole::Continuing),
            night(3, "C3", Footprint::Rv, 1, DurationRole::Single),
            night(4, "A1", Footprint::Tent, 2, DurationRole::Continuing),
        ];

        for day in summarize_daily(&nights) {
            assert_eq!(day.total_sites, day.sites_by_footprint.total());
            assert_eq!(day.total_occupants, day.occupants_by_role.total());
        }
    }

    #[test]
    fn occupants_conserved_across_aggregation() {
        let nights = vec![
            night(1, "A1", Footprint::Rv, 3, DurationRole::First),
            night(2, "A1", Footprint::Rv, 3, DurationRole::Continuing),
            night(1, "B2", Footprint::Tent, 2, DurationRole::Single),
        ];

        let fact_total: u32 = nights.iter().map(|n| n.occupant_count).sum();
        let summary_total: u32 = summarize_daily(&nights)
            .iter()
            .map(|day| day.total_occupants)
            .sum();
        assert_eq!(fact_total, summary_total);
    }

    #[test]
    fn aggregation_is_order_independent() {
        let mut nights = vec![
            night(1, "A1", Footprint::Rv, 3, DurationRole::First),
            night(2, "A1", Footprint::Rv, 3, DurationRole::Continuing),
            night(1, "B2", Footprint::Tent, 2, DurationRole::Single),
            night(3, "C3", Footprint::Rv, 5, DurationRole::Single),
        ];

        let forward = summarize_daily(&nights);
        nights.reverse();
        let backward = summarize_daily(&nights);
        assert_eq!(forward, backward);
    }

    #[test]
    fn same_site_two_roles_counts_one_site() {
        // Back-to-back reservations on one site the same night pass through
        // as a single occupied site but summed occupants.
        let nights = vec![
            night(8, "A1", Footprint::Rv, 2, DurationRole::Single),
            night(8, "A1", Footprint::Rv, 3, DurationRole::First),
        ];
        let daily = summarize_daily(&nights);

        assert_eq!(daily[0].total_sites, 1);
        assert_eq!(daily[0].total_occupants, 5);
    }

    #[test]
    fn zero_occupant_nights_still_count_sites() {
        let nights = vec![night(2, "A1", Footprint::Tent, 0, DurationRole::Single)];
        let daily = summarize_daily(&nights);

        assert_eq!(daily[0].total_sites, 1);
        assert_eq!(daily[0].total_occupants, 0);
    }
}

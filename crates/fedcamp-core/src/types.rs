use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Physical site type, derived from the reservation's equipment list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Footprint {
    #[serde(rename = "tent")]
    Tent,
    #[serde(rename = "RV")]
    Rv,
}

impl Footprint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Footprint::Tent => "tent",
            Footprint::Rv => "RV",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Reserved,
    CheckedIn,
    CheckedOut,
    Cancelled,
    Other,
}

impl ReservationStatus {
    pub fn parse(value: &str) -> Self {
        match value {
            "RESERVED" => ReservationStatus::Reserved,
            "CHECKED_IN" => ReservationStatus::CheckedIn,
            "CHECKED_OUT" => ReservationStatus::CheckedOut,
            "CANCELLED" => ReservationStatus::Cancelled,
            _ => ReservationStatus::Other,
        }
    }

    /// Confirmed or realized stays. Only these represent real occupancy.
    pub fn is_occupying(&self) -> bool {
        matches!(
            self,
            ReservationStatus::Reserved
                | ReservationStatus::CheckedIn
                | ReservationStatus::CheckedOut
        )
    }
}

/// Classification of an occupied night within its stay. First and single
/// nights carry extra operational weight (orientation contact, site setup).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DurationRole {
    #[serde(rename = "single night")]
    Single,
    #[serde(rename = "first night")]
    First,
    #[serde(rename = "continuing night")]
    Continuing,
}

/// One reservation row, already typed and validated by ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationRecord {
    pub reservation_id: String,
    pub site_id: String,
    pub footprint: Footprint,
    pub arrival_date: NaiveDate,
    pub departure_date: NaiveDate,
    pub occupant_count: u32,
    pub status: ReservationStatus,
    /// Obfuscated at the source; carried for placard output only.
    pub occupant_name: String,
}

/// One occupied calendar night of one reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupiedNight {
    pub date: NaiveDate,
    pub reservation_id: String,
    pub site_id: String,
    pub footprint: Footprint,
    pub occupant_count: u32,
    pub duration_role: DurationRole,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FootprintCounts {
    pub tent: u32,
    pub rv: u32,
}

impl FootprintCounts {
    pub fn total(&self) -> u32 {
        self.tent + self.rv
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleOccupants {
    pub single: u32,
    pub first: u32,
    pub continuing: u32,
}

impl RoleOccupants {
    pub fn add(&mut self, role: DurationRole, occupants: u32) {
        match role {
            DurationRole::Single => self.single += occupants,
            DurationRole::First => self.first += occupants,
            DurationRole::Continuing => self.continuing += occupants,
        }
    }

    pub fn total(&self) -> u32 {
        self.single + self.first + self.continuing
    }
}

/// Occupancy totals for one calendar date.
///
/// Invariants: `total_sites == sites_by_footprint.total()` and
/// `total_occupants == occupants_by_role.total()`, both by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub total_sites: u32,
    pub total_occupants: u32,
    pub sites_by_footprint: FootprintCounts,
    pub occupants_by_role: RoleOccupants,
}

/// One ISO week of daily summaries, Monday-first. A `None` slot means the
/// date was absent from the input, which is distinct from a summary whose
/// fields are all zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySummary {
    pub iso_year: i32,
    pub week: u32,
    pub days: [Option<DailySummary>; 7],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusiestDayRecord {
    pub iso_year: i32,
    pub week: u32,
    pub date: NaiveDate,
    pub weighted_score: f64,
}

/// One check-in placard worth of reservation details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacardRecord {
    pub site_id: String,
    pub occupant_name: String,
    pub masked_reservation_id: String,
    pub arrival: NaiveDate,
    pub departure: NaiveDate,
    pub occupant_count: u32,
}

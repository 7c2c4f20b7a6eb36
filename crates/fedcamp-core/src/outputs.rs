use std::io::{Cursor, Write};

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use serde_json::json;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{Result, SkippedReservation};
use crate::pipeline::PipelineOutput;
use crate::types::{
    BusiestDayRecord, DailySummary, OccupiedNight, PlacardRecord, WeeklySummary,
};

const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Flattened [`DailySummary`] for tabular export.
#[derive(Debug, Serialize)]
struct DailyRow {
    date: NaiveDate,
    total_sites: u32,
    total_occupants: u32,
    tent_sites: u32,
    rv_sites: u32,
    single_night_occupants: u32,
    first_night_occupants: u32,
    continuing_night_occupants: u32,
}

impl From<&DailySummary> for DailyRow {
    fn from(summary: &DailySummary) -> Self {
        DailyRow {
            date: summary.date,
            total_sites: summary.total_sites,
            total_occupants: summary.total_occupants,
            tent_sites: summary.sites_by_footprint.tent,
            rv_sites: summary.sites_by_footprint.rv,
            single_night_occupants: summary.occupants_by_role.single,
            first_night_occupants: summary.occupants_by_role.first,
            continuing_night_occupants: summary.occupants_by_role.continuing,
        }
    }
}

/// One weekday slot of a [`WeeklySummary`]. Absent days keep their slot but
/// leave every daily field empty, preserving the absent-versus-zero
/// distinction in the flat export.
#[derive(Debug, Serialize)]
struct WeeklyRow {
    iso_year: i32,
    week: u32,
    weekday: &'static str,
    date: Option<NaiveDate>,
    total_sites: Option<u32>,
    total_occupants: Option<u32>,
    tent_sites: Option<u32>,
    rv_sites: Option<u32>,
    single_night_occupants: Option<u32>,
    first_night_occupants: Option<u32>,
    continuing_night_occupants: Option<u32>,
}

#[derive(Debug, Serialize)]
struct SkippedRow {
    reservation_id: Option<String>,
    site_id: Option<String>,
    reason: String,
}

fn write_csv<T: Serialize>(rows: impl IntoIterator<Item = T>) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buffer);
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
    }
    Ok(buffer)
}

pub fn nights_csv(nights: &[OccupiedNight]) -> Result<Vec<u8>> {
    write_csv(nights)
}

pub fn daily_csv(daily: &[DailySummary]) -> Result<Vec<u8>> {
    write_csv(daily.iter().map(DailyRow::from))
}

pub fn weekly_csv(weekly: &[WeeklySummary]) -> Result<Vec<u8>> {
    let rows = weekly.iter().flat_map(|week| {
        week.days.iter().enumerate().map(|(slot, day)| WeeklyRow {
            iso_year: week.iso_year,
            week: week.week,
            weekday: WEEKDAY_NAMES[slot],
            date: day.as_ref().map(|summary| summary.date),
            total_sites: day.as_ref().map(|summary| summary.total_sites),
            total_occupants: day.as_ref().map(|summary| summary.total_occupants),
            tent_sites: day.as_ref().map(|summary| summary.sites_by_footprint.tent),
            rv_sites: day.as_ref().map(|summary| summary.sites_by_footprint.rv),
            single_night_occupants: day.as_ref().map(|summary| summary.occupants_by_role.single),
            first_night_occupants: day.as_ref().map(|summary| summary.occupants_by_role.first),
            continuing_night_occupants: day
                .as_ref()
                .map(|summary| summary.occupants_by_role.continuing),
        })
    });
    write_csv(rows)
}

pub fn busiest_csv(busiest: &[BusiestDayRecord]) -> Result<Vec<u8>> {
    write_csv(busiest)
}

pub fn placards_csv(placards: &[PlacardRecord]) -> Result<Vec<u8>> {
    write_csv(placards)
}

pub fn skipped_csv(skipped: &[SkippedReservation]) -> Result<Vec<u8>> {
    write_csv(skipped.iter().map(|entry| SkippedRow {
        reservation_id: entry.reservation_id.clone(),
        site_id: entry.site_id.clone(),
        reason: entry.reason.to_string(),
    }))
}

/// Packages every derived table plus a manifest into a zip archive.
///
/// The manifest records when the package was generated, which source file it
/// came from (name and blake3 content hash), and per-table row counts, so a
/// package can be traced back to its input report.
pub fn build_package(
    output: &PipelineOutput,
    skipped: &[SkippedReservation],
    source_name: &str,
    source_bytes: &[u8],
) -> Result<Vec<u8>> {
    let manifest = json!({
        "generated_at": Utc::now().to_rfc3339(),
        "source_file": source_name,
        "source_blake3": blake3::hash(source_bytes).to_hex().to_string(),
        "row_counts": {
            "occupied_nights": output.nights.len(),
            "daily_summaries": output.daily.len(),
            "weekly_summaries": output.weekly.len(),
            "busiest_days": output.busiest.len(),
        },
        "skipped_records": skipped.len(),
    });

    let entries = [
        ("occupied_nights.csv", nights_csv(&output.nights)?),
        ("daily_summary.csv", daily_csv(&output.daily)?),
        ("weekly_summary.csv", weekly_csv(&output.weekly)?),
        ("busiest_days.csv", busiest_csv(&output.busiest)?),
        ("skipped_records.csv", skipped_csv(skipped)?),
        ("manifest.json", serde_json::to_vec_pretty(&manifest)?),
    ];

    let mut buffer = Vec::new();
    {
        let mut cursor = Cursor::new(&mut buffer);
        let mut zip = ZipWriter::new(&mut cursor);
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

        for (name, bytes) in &entries {
            zip.start_file(*name, options)?;
            zip.write_all(bytes)?;
        }
        zip.finish()?;
    }
    Ok(buffer)
}

use std::collections::HashMap;

use csv::{ReaderBuilder, StringRecord};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::ReportError;

/// Columns that must all appear in one row of the report for it to be
/// recognized as the header row. Recreation.gov exports carry several
/// banner/metadata rows above the real header.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "Loop",
    "Site #",
    "Reservation #",
    "Reservation Status",
    "Arrival Date",
    "Departure Date",
    "Primary Occupant Name",
    "# of Occupants",
    "Equipment",
    "Nights/ Days",
];

// Obfuscated occupant names look like "L............, F.....".
static OBFUSCATED_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]+\.*?, [A-Za-z]\.*$").expect("valid name regex"));

// Equipment cells carry quantity suffixes, e.g. "Tent (2)".
static EQUIPMENT_COUNT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\(\d+\)$").expect("valid equipment regex"));

/// One data row of the reservation detail report, untyped. Blank cells are
/// `None`; typing and per-record skip policy live in fedcamp-core.
#[derive(Debug, Clone, Default)]
pub struct RawReservationRow {
    pub loop_name: Option<String>,
    pub site_id: Option<String>,
    pub reservation_id: Option<String>,
    pub status: Option<String>,
    pub arrival: Option<String>,
    pub departure: Option<String>,
    pub occupant_name: Option<String>,
    pub occupants: Option<String>,
    pub equipment: Vec<String>,
    pub nights: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ParsedReport {
    /// Zero-based index of the header row within the raw spreadsheet.
    pub header_row: usize,
    pub rows: Vec<RawReservationRow>,
}

/// Parses a Camping Reservation Detail Report exported as CSV.
///
/// Locates the header row by scanning for the first row that contains every
/// column in [`REQUIRED_COLUMNS`], then reads the remaining rows as data.
/// Every occupant name present must already be PII-obfuscated; reports with
/// raw names are rejected outright.
pub fn parse_reservation_report(content: &str) -> Result<ParsedReport, ReportError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut records = Vec::new();
    for record in reader.records() {
        records.push(record?);
    }

    let header_row = records
        .iter()
        .position(is_header_row)
        .ok_or(ReportError::HeaderNotFound)?;

    let columns = column_indices(&records[header_row]);
    let rows: Vec<RawReservationRow> = records[header_row + 1..]
        .iter()
        .filter(|record| !record_is_blank(record))
        .map(|record| extract_row(record, &columns))
        .collect();

    if rows.is_empty() {
        return Err(ReportError::EmptyReport);
    }

    validate_name_obfuscation(&rows)?;

    Ok(ParsedReport { header_row, rows })
}

fn is_header_row(record: &StringRecord) -> bool {
    REQUIRED_COLUMNS
        .iter()
        .all(|column| record.iter().any(|cell| cell.trim() == *column))
}

fn column_indices(header: &StringRecord) -> HashMap<String, usize> {
    header
        .iter()
        .enumerate()
        .map(|(index, cell)| (cell.trim().to_string(), index))
        .collect()
}

fn record_is_blank(record: &StringRecord) -> bool {
    record.iter().all(|cell| cell.trim().is_empty())
}

fn extract_row(record: &StringRecord, columns: &HashMap<String, usize>) -> RawReservationRow {
    let cell = |name: &str| -> Option<String> {
        columns
            .get(name)
            .and_then(|&index| record.get(index))
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };

    RawReservationRow {
        loop_name: cell("Loop"),
        site_id: cell("Site #"),
        reservation_id: cell("Reservation #"),
        status: cell("Reservation Status"),
        arrival: cell("Arrival Date"),
        departure: cell("Departure Date"),
        occupant_name: cell("Primary Occupant Name"),
        occupants: cell("# of Occupants"),
        equipment: cell("Equipment")
            .map(|value| split_equipment(&value))
            .unwrap_or_default(),
        nights: cell("Nights/ Days"),
    }
}

fn split_equipment(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|item| EQUIPMENT_COUNT_RE.replace(item.trim(), "").into_owned())
        .filter(|item| !item.is_empty())
        .collect()
}

fn validate_name_obfuscation(rows: &[RawReservationRow]) -> Result<(), ReportError> {
    let mut offenders = rows.iter().enumerate().filter_map(|(index, row)| {
        row.occupant_name
            .as_deref()
            .filter(|name| !OBFUSCATED_NAME_RE.is_match(name))
            .map(|_| index)
    });

    if let Some(first_row) = offenders.next() {
        let count = 1 + offenders.count();
        return Err(ReportError::UnobfuscatedNames { count, first_row });
    }

    Ok(())
}

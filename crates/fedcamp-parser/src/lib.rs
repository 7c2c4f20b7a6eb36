pub mod errors;
pub mod report;

pub use errors::ReportError;
pub use report::{parse_reservation_report, ParsedReport, RawReservationRow, REQUIRED_COLUMNS};

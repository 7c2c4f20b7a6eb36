pub mod busiest;
pub mod config;
pub mod error;
pub mod expand;
pub mod ingestion;
pub mod outputs;
pub mod pipeline;
pub mod placards;
pub mod summary;
pub mod types;
pub mod weekly;

pub use busiest::select_busiest_days;
pub use config::ScoreWeights;
pub use error::{PipelineError, Result, SkipReason, SkippedReservation};
pub use expand::{expand_reservations, ExpansionOutcome};
pub use ingestion::{build_records, IngestionOutcome};
pub use pipeline::{run_pipeline, PipelineOutput};
pub use placards::check_in_placards;
pub use summary::summarize_daily;
pub use types::{
    BusiestDayRecord, DailySummary, DurationRole, Footprint, FootprintCounts, OccupiedNight,
    PlacardRecord, ReservationRecord, ReservationStatus, RoleOccupants, WeeklySummary,
};
pub use weekly::rollup_weekly;

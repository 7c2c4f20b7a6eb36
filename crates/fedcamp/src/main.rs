use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use comfy_table::Table;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use fedcamp_core::{
    build_records, check_in_placards, outputs, run_pipeline, IngestionOutcome, ScoreWeights,
    SkippedReservation,
};
use fedcamp_parser::parse_reservation_report;

#[derive(Parser, Debug)]
#[command(author, version, about = "Campground reservation report summarizer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Derive nightly, weekly, and busiest-day summaries from a report
    Summarize(SummarizeArgs),
    /// Produce check-in placard records for upcoming arrivals
    Placards(PlacardArgs),
}

#[derive(Args, Debug)]
struct SummarizeArgs {
    /// Path to the reservation detail report (CSV export)
    input: PathBuf,

    /// Directory for output files
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Also write all tables as a single zip package
    #[arg(long)]
    package: bool,

    /// TOML config with busiest-day score weights
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct PlacardArgs {
    /// Path to the reservation detail report (CSV export)
    input: PathBuf,

    /// Directory for output files
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Only include these arrival dates (YYYY-MM-DD, repeatable)
    #[arg(long = "arrival-date")]
    arrival_dates: Vec<NaiveDate>,

    /// Only include these campsites (repeatable)
    #[arg(long = "campsite")]
    campsites: Vec<String>,

    /// Reference date for "upcoming" arrivals; defaults to today
    #[arg(long)]
    as_of: Option<NaiveDate>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Summarize(args) => run_summarize(args),
        Command::Placards(args) => run_placards(args),
    }
}

fn load_report(path: &Path) -> Result<(String, IngestionOutcome)> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read report file {}", path.display()))?;
    let report = parse_reservation_report(&content)
        .with_context(|| format!("failed to parse report file {}", path.display()))?;
    info!(
        rows = report.rows.len(),
        header_row = report.header_row,
        "report parsed"
    );
    Ok((content, build_records(&report.rows)))
}

fn run_summarize(args: SummarizeArgs) -> Result<()> {
    let (content, ingestion) = load_report(&args.input)?;
    let weights = load_weights(args.config.as_deref())?;

    let output = run_pipeline(&ingestion.records, &weights);
    let mut skipped: Vec<SkippedReservation> = ingestion.skipped;
    skipped.extend(output.skipped.iter().cloned());
    report_skips(&skipped);

    fs::create_dir_all(&args.output_dir).with_context(|| {
        format!(
            "failed to create output directory {}",
            args.output_dir.display()
        )
    })?;

    write_table(
        &args.output_dir,
        "occupied_nights.csv",
        outputs::nights_csv(&output.nights)?,
    )?;
    write_table(
        &args.output_dir,
        "daily_summary.csv",
        outputs::daily_csv(&output.daily)?,
    )?;
    write_table(
        &args.output_dir,
        "weekly_summary.csv",
        outputs::weekly_csv(&output.weekly)?,
    )?;
    write_table(
        &args.output_dir,
        "busiest_days.csv",
        outputs::busiest_csv(&output.busiest)?,
    )?;
    write_table(
        &args.output_dir,
        "skipped_records.csv",
        outputs::skipped_csv(&skipped)?,
    )?;

    if args.package {
        let source_name = args
            .input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| args.input.display().to_string());
        let package = outputs::build_package(&output, &skipped, &source_name, content.as_bytes())?;
        write_table(&args.output_dir, "fedcamp_tables.zip", package)?;
    }

    print_busiest_table(&output);
    Ok(())
}

fn run_placards(args: PlacardArgs) -> Result<()> {
    let (_, ingestion) = load_report(&args.input)?;
    report_skips(&ingestion.skipped);

    // The wall clock stays at the binary edge; the core only ever sees an
    // explicit reference date.
    let as_of = args.as_of.unwrap_or_else(|| Local::now().date_naive());
    let arrival_dates = (!args.arrival_dates.is_empty()).then_some(args.arrival_dates.as_slice());
    let campsites = (!args.campsites.is_empty()).then_some(args.campsites.as_slice());

    let placards = check_in_placards(&ingestion.records, as_of, arrival_dates, campsites);
    info!(placards = placards.len(), %as_of, "placard records selected");

    fs::create_dir_all(&args.output_dir).with_context(|| {
        format!(
            "failed to create output directory {}",
            args.output_dir.display()
        )
    })?;
    write_table(
        &args.output_dir,
        "placards.csv",
        outputs::placards_csv(&placards)?,
    )?;
    Ok(())
}

fn load_weights(path: Option<&Path>) -> Result<ScoreWeights> {
    let Some(path) = path else {
        return Ok(ScoreWeights::default());
    };
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let weights = ScoreWeights::from_toml_str(&content)
        .with_context(|| format!("invalid config file {}", path.display()))?;
    Ok(weights)
}

fn report_skips(skipped: &[SkippedReservation]) {
    for entry in skipped {
        warn!(
            reservation_id = entry.reservation_id.as_deref().unwrap_or("<unknown>"),
            site_id = entry.site_id.as_deref().unwrap_or("<unknown>"),
            reason = %entry.reason,
            "record skipped"
        );
    }
}

fn write_table(output_dir: &Path, name: &str, bytes: Vec<u8>) -> Result<()> {
    let path = output_dir.join(name);
    fs::write(&path, bytes).with_context(|| format!("failed to write {}", path.display()))?;
    info!(file = %path.display(), "output written");
    Ok(())
}

fn print_busiest_table(output: &fedcamp_core::PipelineOutput) {
    if output.busiest.is_empty() {
        println!("No occupied days found in the report.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ISO year", "Week", "Busiest day", "Weighted score"]);
    for record in &output.busiest {
        table.add_row(vec![
            record.iso_year.to_string(),
            record.week.to_string(),
            format!("{} ({})", record.date, record.date.format("%A")),
            format!("{:.1}", record.weighted_score),
        ]);
    }
    println!("{table}");
}

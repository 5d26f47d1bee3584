use std::path::PathBuf;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use savings_planner_backend::domain::DashboardService;
use savings_planner_backend::io::load_snapshot;
use savings_planner_backend::PlannerConfig;

/// Render the savings planner dashboard for a state snapshot as JSON
#[derive(Parser, Debug)]
#[command(name = "savings-planner", version)]
struct Args {
    /// JSON snapshot exported by the app
    snapshot: PathBuf,
    /// YAML planner config; defaults apply when omitted
    config: Option<PathBuf>,
    /// Reference date (YYYY-MM-DD), today's local date by default
    #[arg(long)]
    date: Option<NaiveDate>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = match &args.config {
        Some(path) => PlannerConfig::load(path)?,
        None => PlannerConfig::default(),
    };
    info!(
        "Using currency {} and {:?} labels",
        config.currency.code(),
        config.language
    );

    let snapshot = load_snapshot(&args.snapshot)?;
    let reference = args.date.unwrap_or_else(|| Local::now().date_naive());
    let dashboard = DashboardService::new(config).build(&snapshot, reference);

    println!("{}", serde_json::to_string_pretty(&dashboard)?);
    Ok(())
}

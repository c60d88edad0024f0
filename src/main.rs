use anyhow::Context;
use clap::{Parser, ValueEnum};
use nyc_rental_insights::dashboard::{Dashboard, Dataset, UploadStatus};
use nyc_rental_insights::report;
use nyc_rental_insights::sources::types::MATCH_ALL;
use nyc_rental_insights::sources::{CsvFileSource, SampleSource};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Market analysis for NYC short-term rental listings
#[derive(Parser)]
#[command(name = "rental-insights", version)]
struct Cli {
    /// Listings CSV to load instead of the bundled sample
    #[arg(long)]
    file: Option<PathBuf>,

    /// Borough to analyse, or "All"
    #[arg(long, default_value = "All")]
    borough: String,

    /// Room type to analyse, or "All"
    #[arg(long, default_value = "All")]
    room_type: String,

    /// What to print
    #[arg(long, value_enum, default_value_t = View::Dashboard)]
    view: View,
}

#[derive(Clone, Copy, ValueEnum)]
enum View {
    /// Stat cards, distributions, insights and the listings table
    Dashboard,
    /// Long-form analysis report
    Report,
    /// Summary as JSON
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so JSON output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    info!("🏠 NYC Rental Insights");

    let sample = SampleSource::new();
    let mut dashboard = Dashboard::new(Dataset::new("sample data", sample.parse()));

    if let Some(path) = &cli.file {
        let source = CsvFileSource::new(path);
        info!("Loading listings from {}", source.path().display());
        let status = dashboard.load_from(&source).await.clone();
        match status {
            UploadStatus::Success(message) => info!("✅ {}", message),
            UploadStatus::Error(message) => {
                warn!("{}, showing {}", message, dashboard.dataset().source)
            }
            UploadStatus::Idle => {}
        }
    }

    dashboard.set_borough(&cli.borough);
    dashboard.set_room_type(&cli.room_type);
    let filter = dashboard.filter();
    info!(
        "Borough: {}, room type: {}",
        filter.borough.as_deref().unwrap_or(MATCH_ALL),
        filter.room_type.as_deref().unwrap_or(MATCH_ALL)
    );

    let summary = dashboard.summary();
    info!(
        "Analysing {} of {} listings from {}",
        summary.total_listings,
        dashboard.dataset().listings.len(),
        dashboard.dataset().source
    );

    match cli.view {
        View::Dashboard => {
            println!("{}", report::render_dashboard(&summary));
            println!("{}", report::render_listing_table(&dashboard.recent_listings()));
        }
        View::Report => println!("{}", report::render_report(&summary)),
        View::Json => {
            let json = serde_json::to_string_pretty(&summary)
                .context("Failed to serialize summary")?;
            println!("{json}");
        }
    }

    Ok(())
}

use clap::Parser;
use immo_finder::models::{City, SearchCriteria, Source};
use immo_finder::pipeline;
use immo_finder::report::{format_listing, Summary};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Find apartments for sale in München and Augsburg across several
/// classifieds sites.
#[derive(Debug, Parser)]
#[command(name = "immo-finder", version)]
struct Args {
    /// Cities to search (repeatable; default: all)
    #[arg(long = "city", value_enum)]
    cities: Vec<City>,

    /// Listing sites to scrape (repeatable; default: all)
    #[arg(long = "source", value_enum)]
    sources: Vec<Source>,

    /// Maximum price in EUR
    #[arg(long, default_value_t = 750_000)]
    max_price: i64,

    /// Minimum number of rooms
    #[arg(long, default_value_t = 3.0)]
    min_rooms: f32,

    /// Minimum living area in m²
    #[arg(long, default_value_t = 80)]
    min_area: i32,

    /// Skip the network and run on sample data
    #[arg(long)]
    offline: bool,

    /// Path for the JSON results file
    #[arg(long, default_value = "listings.json")]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let cities = if args.cities.is_empty() {
        City::all()
    } else {
        args.cities.clone()
    };
    let sources = if args.sources.is_empty() {
        Source::all()
    } else {
        args.sources.clone()
    };
    let criteria = SearchCriteria {
        max_price: args.max_price,
        min_rooms: args.min_rooms,
        min_area: args.min_area,
    };

    info!("🏠 Immo Finder");
    info!(
        "Searching {} | max €{}, ≥{} rooms, ≥{} m²",
        cities
            .iter()
            .map(|c| c.name())
            .collect::<Vec<_>>()
            .join(", "),
        criteria.max_price,
        criteria.min_rooms,
        criteria.min_area
    );

    let listings = pipeline::run_search(&cities, &sources, criteria, args.offline).await?;

    for (i, listing) in listings.iter().enumerate() {
        println!("{}", format_listing(i, listing));
        println!();
    }

    let summary = Summary::from_listings(&listings);
    println!("{summary}");

    let json = serde_json::to_string_pretty(&listings)?;
    tokio::fs::write(&args.output, json).await?;
    info!("💾 Saved {} listings to {}", listings.len(), args.output.display());

    Ok(())
}

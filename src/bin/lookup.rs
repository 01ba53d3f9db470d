//! Command-line place photo lookup.
//!
//! Runs one retrieval with the same configuration as the server and prints
//! the result, without starting an HTTP listener.
//!
//! # Usage
//!
//! ```bash
//! # Curated photos and scraped images
//! cargo run --bin lookup -- "Eiffel Tower"
//!
//! # Scraped images only, up to 5
//! cargo run --bin lookup -- "Louvre" --images-only --max 5
//!
//! # Raw JSON, same shape as GET /api/search
//! cargo run --bin lookup -- "Colosseum" --json
//!
//! # Drop scraped images that do not look like the rest
//! cargo run --bin lookup -- "Colosseum" --consensus
//! ```
//!
//! # Environment Variables
//!
//! Same as the server (see `place_photos::config`). `RUST_LOG` defaults to
//! `warn` here so source logs do not drown the output.

use place_photos::application::services::RetrievalService;
use place_photos::config;
use place_photos::domain::entities::{CuratedPhoto, ImageDescriptor, PlaceQuery, SourceKind};
use place_photos::server::build_retrieval_service;
use place_photos::telemetry;

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;

/// Look up representative photos for a place.
#[derive(Parser)]
#[command(name = "lookup")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Place name, e.g. "Eiffel Tower"
    query: String,

    /// Maximum number of scraped images
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=50))]
    max: Option<u64>,

    /// Skip the curated photo API
    #[arg(long)]
    images_only: bool,

    /// Print JSON instead of formatted text
    #[arg(long)]
    json: bool,

    /// Download scraped images and drop visual outliers
    #[arg(long)]
    consensus: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = config::load_from_env()?;
    config.consensus_filter |= cli.consensus;
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string());
    telemetry::init(&log_level, &config.log_format);

    let service = build_retrieval_service(&config)?;
    let query = PlaceQuery::parse(&cli.query)?;
    let max = cli
        .max
        .map(|m| m as usize)
        .unwrap_or_else(|| service.default_max());

    if cli.images_only {
        images_only(&service, &query, max, cli.json).await
    } else {
        full(&service, &query, max, cli.json).await
    }
}

async fn images_only(
    service: &RetrievalService,
    query: &PlaceQuery,
    max: usize,
    json: bool,
) -> Result<()> {
    let (images, source) = service.scraped_images(query, max).await;

    if json {
        let body = serde_json::json!({
            "query": query.as_str(),
            "source": source,
            "count": images.len(),
            "images": images,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        print_images(&images, source);
    }
    Ok(())
}

async fn full(
    service: &RetrievalService,
    query: &PlaceQuery,
    max: usize,
    json: bool,
) -> Result<()> {
    let result = service
        .resolve(query, max)
        .await
        .context("Retrieval failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("{}", format!("Photos for \"{}\"", result.query).bold());
    print_photos(&result.curated);
    println!();
    print_images(&result.scraped, result.scraped_source);
    Ok(())
}

fn print_photos(photos: &[CuratedPhoto]) {
    println!("{} ({})", "Curated".cyan().bold(), photos.len());
    if photos.is_empty() {
        println!("  {}", "no photos".dimmed());
        return;
    }

    for (i, photo) in photos.iter().enumerate() {
        let size = format!("{}x{}", photo.width, photo.height);
        let size = if photo.is_large() {
            size.green()
        } else {
            size.yellow()
        };
        println!("  {}. {} {}", i + 1, size, photo.display_src());
        if !photo.photographer.is_empty() {
            println!("     {} {}", "by".dimmed(), photo.photographer);
        }
    }
}

fn print_images(images: &[ImageDescriptor], source: SourceKind) {
    let label = match source {
        SourceKind::Scrape => source.as_str().green(),
        SourceKind::Encyclopedia => source.as_str().yellow(),
        SourceKind::None => source.as_str().red(),
    };
    println!("{} ({}, {})", "Scraped".cyan().bold(), images.len(), label);

    if images.is_empty() {
        println!("  {}", "no images".dimmed());
        return;
    }

    for (i, image) in images.iter().enumerate() {
        if image.alt.is_empty() {
            println!("  {}. {}", i + 1, image.src);
        } else {
            let alt = format!("({})", image.alt);
            println!("  {}. {} {}", i + 1, image.src, alt.dimmed());
        }
    }
}

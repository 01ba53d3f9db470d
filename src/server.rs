//! HTTP server initialization and runtime setup.
//!
//! Builds the upstream HTTP clients and sources, wires them into the
//! retrieval service and runs the Axum server until Ctrl+C.

use crate::application::services::RetrievalService;
use crate::config::Config;
use crate::api::middleware::rate_limit;
use crate::domain::sources::ImageSource;
use crate::infrastructure::consensus::ConsensusFilter;
use crate::infrastructure::curated::PexelsClient;
use crate::infrastructure::encyclopedia::EncyclopediaSource;
use crate::infrastructure::http::{api_client, browser_client};
use crate::infrastructure::scrape::ScrapeSource;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use url::Url;

/// Builds the retrieval service from configuration.
///
/// The fallback chain is `[scrape, encyclopedia]`. Each source gets its own
/// client so that timeouts and header sets stay independent. The consensus
/// filter is always attached so requests can opt in; `CONSENSUS_FILTER` makes
/// it the default.
///
/// # Errors
///
/// Returns an error if a base URL does not parse or an HTTP client cannot be built.
pub fn build_retrieval_service(config: &Config) -> Result<RetrievalService> {
    let scrape_http = browser_client(config.scrape_timeout(), &config.scrape_user_agent)
        .context("Failed to build scrape HTTP client")?;
    let encyclopedia_http = api_client(config.encyclopedia_timeout())
        .context("Failed to build Wikipedia HTTP client")?;
    let curated_http =
        api_client(config.curated_timeout()).context("Failed to build curated HTTP client")?;

    let scrape_base = Url::parse(&config.scrape_base_url).context("Invalid SCRAPE_BASE_URL")?;
    let wikipedia_api =
        Url::parse(&config.wikipedia_api_url).context("Invalid WIKIPEDIA_API_URL")?;
    let consensus_http = browser_client(config.consensus_timeout(), &config.scrape_user_agent)
        .context("Failed to build consensus HTTP client")?;

    let chain: Vec<Arc<dyn ImageSource>> = vec![
        Arc::new(ScrapeSource::new(scrape_http, scrape_base)),
        Arc::new(EncyclopediaSource::new(encyclopedia_http, wikipedia_api)),
    ];

    let curated = Arc::new(PexelsClient::new(
        curated_http,
        config.pexels_api_url.clone(),
        config.pexels_api_key.clone(),
    ));

    let service = RetrievalService::new(curated, chain, config.default_max_images)
        .with_image_filter(
            Arc::new(ConsensusFilter::new(consensus_http)),
            config.consensus_filter,
        );
    Ok(service)
}

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - The retrieval service cannot be built
/// - The rate limit values are rejected
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let retrieval = Arc::new(build_retrieval_service(&config)?);
    tracing::info!(
        chain = ?retrieval.chain_kinds(),
        consensus_by_default = config.consensus_filter,
        "Retrieval service ready"
    );

    let limiter = if config.rate_limit_enabled {
        Some(rate_limit::layer(config.rate_limit_per_second, config.rate_limit_burst)?)
    } else {
        None
    };

    let state = AppState::new(retrieval, config.is_curated_enabled());
    let app = app_router(state, limiter);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

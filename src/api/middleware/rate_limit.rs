//! Per-IP request budget for the retrieval endpoints.

use std::sync::Arc;

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use thiserror::Error;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

/// Governor layer keyed by the socket peer address.
pub type RateLimitLayer =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("rate limit needs a positive refill rate and burst, got {per_second}/s burst {burst}")]
pub struct InvalidRateLimit {
    pub per_second: u64,
    pub burst: u32,
}

/// Builds the limiter from `RATE_LIMIT_PER_SECOND` / `RATE_LIMIT_BURST`.
///
/// Each client IP owns a bucket of `burst` tokens refilled at `per_second`
/// tokens per second. One retrieval costs one token even though it fans out
/// to up to five upstream calls, so the defaults (2/s, burst 30) are lower
/// than a plain read endpoint would use. Exhausted buckets get
/// `429 Too Many Requests`.
///
/// The server must be started with
/// `into_make_service_with_connect_info::<SocketAddr>()` for the peer
/// address to be available.
///
/// # Errors
///
/// Returns [`InvalidRateLimit`] when either value is zero.
pub fn layer(per_second: u64, burst: u32) -> Result<RateLimitLayer, InvalidRateLimit> {
    let config = GovernorConfigBuilder::default()
        .per_second(per_second)
        .burst_size(burst)
        .finish()
        .ok_or(InvalidRateLimit { per_second, burst })?;

    Ok(GovernorLayer::new(Arc::new(config)))
}

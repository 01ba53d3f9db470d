//! Shared HTTP client construction.
//!
//! Clients are built once at startup and cloned into each source;
//! `reqwest::Client` shares its connection pool between clones.

use std::time::Duration;

use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue};

/// Desktop browser identity sent to the scraped site, which rejects
/// unidentified clients.
pub const DEFAULT_BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

const BROWSER_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";
const BROWSER_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

const API_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Builds the client used for HTML scraping.
///
/// Every request carries the browser header set (`User-Agent`, `Accept`,
/// `Accept-Language`); callers only add per-request headers such as `Referer`.
///
/// # Errors
///
/// Returns an error if `user_agent` is not a valid header value or the TLS
/// backend cannot be initialized.
pub fn browser_client(timeout: Duration, user_agent: &str) -> reqwest::Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static(BROWSER_ACCEPT_LANGUAGE),
    );

    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .default_headers(headers)
        .build()
}

/// Builds a client for JSON APIs, identified by the crate name and version.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialized.
pub fn api_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(API_USER_AGENT)
        .build()
}

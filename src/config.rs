//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ```bash
//! export PEXELS_API_KEY="563492ad6f91700001000001..."
//! export LISTEN="0.0.0.0:3000"
//! ```
//!
//! ## Required Variables
//!
//! None. Without `PEXELS_API_KEY` the service starts, `/health` reports
//! `degraded` and every curated photo lookup fails with a configuration error.
//!
//! ## Optional Variables
//!
//! - `PEXELS_API_KEY` - Curated photo API key
//! - `PEXELS_API_URL` - Curated photo API base (default: `https://api.pexels.com/v1`)
//! - `SCRAPE_BASE_URL` - Scraped site origin (default: `https://www.tripadvisor.com`)
//! - `WIKIPEDIA_API_URL` - MediaWiki API endpoint (default: `https://en.wikipedia.org/w/api.php`)
//! - `CURATED_TIMEOUT_SECS` - Curated API timeout (default: 15)
//! - `SCRAPE_TIMEOUT_SECS` - Per-request scrape timeout (default: 15)
//! - `ENCYCLOPEDIA_TIMEOUT_SECS` - Per-request Wikipedia timeout (default: 10)
//! - `SCRAPE_USER_AGENT` - Browser identity sent to the scraped site
//! - `DEFAULT_MAX_IMAGES` - Scraped image cap when `max` is not given (default: 10, 1..=50)
//! - `RATE_LIMIT_ENABLED` - Per-IP rate limiting on `/api/*` (default: true)
//! - `RATE_LIMIT_PER_SECOND` - Token refill rate per client IP (default: 2)
//! - `RATE_LIMIT_BURST` - Token bucket size per client IP (default: 30)
//! - `CONSENSUS_FILTER` - Drop visual outliers from scraped images (default: false)
//! - `CONSENSUS_TIMEOUT_SECS` - Per-image download timeout for the filter (default: 12)
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;
use url::Url;

use crate::api::dto::images::MAX_IMAGES_LIMIT;
use crate::infrastructure::http::DEFAULT_BROWSER_USER_AGENT;

const DEFAULT_PEXELS_API_URL: &str = "https://api.pexels.com/v1";
const DEFAULT_SCRAPE_BASE_URL: &str = "https://www.tripadvisor.com";
const DEFAULT_WIKIPEDIA_API_URL: &str = "https://en.wikipedia.org/w/api.php";

/// Longest upstream timeout accepted, in seconds.
const MAX_TIMEOUT_SECS: u64 = 120;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// Curated photo API key. `None` is allowed at load time; lookups then
    /// fail immediately without a network call.
    pub pexels_api_key: Option<String>,
    pub pexels_api_url: String,
    pub scrape_base_url: String,
    pub wikipedia_api_url: String,
    pub curated_timeout_secs: u64,
    pub scrape_timeout_secs: u64,
    pub encyclopedia_timeout_secs: u64,
    pub scrape_user_agent: String,
    pub default_max_images: usize,
    pub rate_limit_enabled: bool,
    pub rate_limit_per_second: u64,
    pub rate_limit_burst: u32,
    /// Applies the visual consensus filter to every scraped image list.
    /// Callers can still ask for it per request with `consensus=true`.
    pub consensus_filter: bool,
    pub consensus_timeout_secs: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let pexels_api_key = env::var("PEXELS_API_KEY")
            .ok()
            .filter(|v| !v.trim().is_empty());

        let pexels_api_url =
            env::var("PEXELS_API_URL").unwrap_or_else(|_| DEFAULT_PEXELS_API_URL.to_string());
        let scrape_base_url =
            env::var("SCRAPE_BASE_URL").unwrap_or_else(|_| DEFAULT_SCRAPE_BASE_URL.to_string());
        let wikipedia_api_url = env::var("WIKIPEDIA_API_URL")
            .unwrap_or_else(|_| DEFAULT_WIKIPEDIA_API_URL.to_string());

        let curated_timeout_secs = parse_var("CURATED_TIMEOUT_SECS", 15)?;
        let scrape_timeout_secs = parse_var("SCRAPE_TIMEOUT_SECS", 15)?;
        let encyclopedia_timeout_secs = parse_var("ENCYCLOPEDIA_TIMEOUT_SECS", 10)?;

        let scrape_user_agent = env::var("SCRAPE_USER_AGENT")
            .unwrap_or_else(|_| DEFAULT_BROWSER_USER_AGENT.to_string());

        let default_max_images = parse_var("DEFAULT_MAX_IMAGES", 10)?;

        let rate_limit_enabled = parse_flag("RATE_LIMIT_ENABLED", true);
        let rate_limit_per_second = parse_var("RATE_LIMIT_PER_SECOND", 2)?;
        let rate_limit_burst = parse_var("RATE_LIMIT_BURST", 30)?;

        let consensus_filter = parse_flag("CONSENSUS_FILTER", false);
        let consensus_timeout_secs = parse_var("CONSENSUS_TIMEOUT_SECS", 12)?;

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            pexels_api_key,
            pexels_api_url,
            scrape_base_url,
            wikipedia_api_url,
            curated_timeout_secs,
            scrape_timeout_secs,
            encyclopedia_timeout_secs,
            scrape_user_agent,
            default_max_images,
            rate_limit_enabled,
            rate_limit_per_second,
            rate_limit_burst,
            consensus_filter,
            consensus_timeout_secs,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` has no port
    /// - an upstream URL is not an absolute HTTP(S) URL
    /// - a timeout is zero or longer than two minutes
    /// - `default_max_images` is outside 1..=50
    /// - rate limiting is enabled with a zero rate or burst
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        validate_http_url("PEXELS_API_URL", &self.pexels_api_url)?;
        validate_http_url("SCRAPE_BASE_URL", &self.scrape_base_url)?;
        validate_http_url("WIKIPEDIA_API_URL", &self.wikipedia_api_url)?;

        for (name, secs) in [
            ("CURATED_TIMEOUT_SECS", self.curated_timeout_secs),
            ("SCRAPE_TIMEOUT_SECS", self.scrape_timeout_secs),
            ("ENCYCLOPEDIA_TIMEOUT_SECS", self.encyclopedia_timeout_secs),
            ("CONSENSUS_TIMEOUT_SECS", self.consensus_timeout_secs),
        ] {
            if secs == 0 || secs > MAX_TIMEOUT_SECS {
                anyhow::bail!("{name} must be between 1 and {MAX_TIMEOUT_SECS}, got {secs}");
            }
        }

        if self.scrape_user_agent.trim().is_empty() {
            anyhow::bail!("SCRAPE_USER_AGENT must not be empty");
        }

        if self.default_max_images == 0 || self.default_max_images > MAX_IMAGES_LIMIT {
            anyhow::bail!(
                "DEFAULT_MAX_IMAGES must be between 1 and {MAX_IMAGES_LIMIT}, got {}",
                self.default_max_images
            );
        }

        if self.rate_limit_enabled && (self.rate_limit_per_second == 0 || self.rate_limit_burst == 0)
        {
            anyhow::bail!(
                "RATE_LIMIT_PER_SECOND and RATE_LIMIT_BURST must be at least 1, got {} and {}",
                self.rate_limit_per_second,
                self.rate_limit_burst
            );
        }

        Ok(())
    }

    pub fn curated_timeout(&self) -> Duration {
        Duration::from_secs(self.curated_timeout_secs)
    }

    pub fn scrape_timeout(&self) -> Duration {
        Duration::from_secs(self.scrape_timeout_secs)
    }

    pub fn encyclopedia_timeout(&self) -> Duration {
        Duration::from_secs(self.encyclopedia_timeout_secs)
    }

    pub fn consensus_timeout(&self) -> Duration {
        Duration::from_secs(self.consensus_timeout_secs)
    }

    /// Returns whether the curated photo API can be called.
    pub fn is_curated_enabled(&self) -> bool {
        self.pexels_api_key.is_some()
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);

        match self.pexels_api_key.as_deref() {
            Some(key) => tracing::info!(
                "  Curated API: {} (key {})",
                self.pexels_api_url,
                mask_secret(key)
            ),
            None => tracing::warn!("  Curated API: disabled (PEXELS_API_KEY not set)"),
        }

        tracing::info!("  Scrape site: {}", self.scrape_base_url);
        tracing::info!("  Wikipedia API: {}", self.wikipedia_api_url);
        tracing::info!(
            "  Timeouts: curated {}s, scrape {}s, wikipedia {}s",
            self.curated_timeout_secs,
            self.scrape_timeout_secs,
            self.encyclopedia_timeout_secs
        );
        tracing::info!("  Default max images: {}", self.default_max_images);
        if self.rate_limit_enabled {
            tracing::info!(
                "  Rate limiting: {}/s per IP, burst {}",
                self.rate_limit_per_second,
                self.rate_limit_burst
            );
        } else {
            tracing::info!("  Rate limiting: disabled");
        }
        tracing::info!(
            "  Consensus filter: {} (download timeout {}s)",
            if self.consensus_filter { "always" } else { "on request" },
            self.consensus_timeout_secs
        );
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{name} must be a number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

/// Reads a boolean switch. `true`/`1` (any case) turn it on, anything else off.
fn parse_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .map(|v| v.eq_ignore_ascii_case("true") || v.trim() == "1")
        .unwrap_or(default)
}

fn validate_http_url(name: &str, value: &str) -> Result<()> {
    let url = Url::parse(value).with_context(|| format!("{name} is not a valid URL: '{value}'"))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        anyhow::bail!("{name} must start with 'http://' or 'https://', got '{value}'");
    }
    Ok(())
}

/// Masks an API key for logging, keeping only the first four characters.
///
/// - `563492ad6f917000` → `5634***`
/// - `abc` → `***`
fn mask_secret(secret: &str) -> String {
    match secret.char_indices().nth(4) {
        Some((idx, _)) => format!("{}***", &secret[..idx]),
        None => "***".to_string(),
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable cannot be parsed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

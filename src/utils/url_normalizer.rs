//! URL resolution and normalization utilities.
//!
//! Links and image sources scraped from HTML come in every shape: absolute,
//! root-relative, protocol-relative, with fragments and explicit default
//! ports. Everything is brought to one canonical absolute form before it is
//! compared, stored in a set or fetched.

use url::Url;

/// Errors that can occur during URL normalization.
#[derive(Debug, thiserror::Error)]
pub enum UrlNormalizationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("Failed to normalize URL: {0}")]
    NormalizationFailed(String),
}

/// Resolves `href` against `base` and normalizes the result.
///
/// # Normalization Rules
///
/// 1. **Resolution**: relative and protocol-relative references are joined to `base`
/// 2. **Protocol**: only HTTP and HTTPS are allowed
/// 3. **Hostname**: lowercased
/// 4. **Default ports**: removed (80 for HTTP, 443 for HTTPS)
/// 5. **Fragments**: removed
/// 6. **Path and query**: preserved
///
/// # Errors
///
/// Returns [`UrlNormalizationError::InvalidFormat`] when the reference cannot be joined.
/// Returns [`UrlNormalizationError::UnsupportedProtocol`] for `javascript:`, `mailto:`,
/// `data:` and other non-HTTP schemes.
///
/// # Examples
///
/// ```ignore
/// let base = Url::parse("https://www.tripadvisor.com").unwrap();
/// assert_eq!(
///     resolve_url(&base, "/Attraction_Review-g1-d2.html#photos").unwrap().as_str(),
///     "https://www.tripadvisor.com/Attraction_Review-g1-d2.html"
/// );
/// ```
pub fn resolve_url(base: &Url, href: &str) -> Result<Url, UrlNormalizationError> {
    let url = base
        .join(href.trim())
        .map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;
    normalize(url)
}

/// Parses an absolute URL and normalizes it.
///
/// Protocol-relative input (`//host/path`) is treated as HTTPS.
///
/// # Errors
///
/// Same as [`resolve_url`].
pub fn normalize_url(input: &str) -> Result<Url, UrlNormalizationError> {
    let input = input.trim();
    let parsed = if let Some(rest) = input.strip_prefix("//") {
        Url::parse(&format!("https://{rest}"))
    } else {
        Url::parse(input)
    };
    let url = parsed.map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;
    normalize(url)
}

fn normalize(mut url: Url) -> Result<Url, UrlNormalizationError> {
    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlNormalizationError::UnsupportedProtocol),
    }

    if let Some(host) = url.host_str() {
        let host_lowercase = host.to_ascii_lowercase();
        url.set_host(Some(&host_lowercase)).map_err(|_| {
            UrlNormalizationError::NormalizationFailed("Failed to set normalized host".to_string())
        })?;
    }

    url.set_fragment(None);

    let is_default_port = matches!(
        (url.scheme(), url.port()),
        ("http", Some(80)) | ("https", Some(443))
    );
    if is_default_port {
        url.set_port(None).map_err(|_| {
            UrlNormalizationError::NormalizationFailed("Failed to remove default port".to_string())
        })?;
    }

    Ok(url)
}

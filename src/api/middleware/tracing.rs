//! HTTP request/response tracing middleware.

use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Creates a tracing middleware for HTTP requests.
///
/// Spans are opened at `INFO` with method, URI and version; responses are
/// logged at `INFO` with status and latency in milliseconds. Source-level
/// events (scrape fallbacks, upstream failures) are emitted inside the
/// request span, so they carry the query URI.
///
/// # Example Logs
///
/// ```text
/// INFO request{method=GET uri=/api/images?q=Louvre version=HTTP/1.1}: place_photos::infrastructure::scrape::source: Scrape complete query=Louvre count=10
/// INFO request{method=GET uri=/api/images?q=Louvre version=HTTP/1.1}: tower_http::trace::on_response: finished processing request latency=912 ms status=200
/// ```
pub fn layer()
-> TraceLayer<tower_http::classify::SharedClassifier<tower_http::classify::ServerErrorsAsFailures>>
{
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
}

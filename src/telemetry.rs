//! Tracing subscriber setup shared by the server and the CLI.

use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber.
///
/// `log_level` is an `EnvFilter` directive (`info`, `place_photos=debug,warn`, ...);
/// an unparsable directive falls back to `info`. `log_format` selects `json`
/// output, anything else gives human-readable text.
pub fn init(log_level: &str, log_format: &str) {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = if log_format == "json" {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if let Err(e) = result {
        eprintln!("tracing subscriber already installed: {e}");
    }
}

//! HTTP middleware for request processing and protection.
//!
//! Provides panic recovery, rate limiting and observability middleware.

pub mod catch_panic;
pub mod rate_limit;
pub mod tracing;

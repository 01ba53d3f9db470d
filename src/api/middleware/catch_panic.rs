//! Converts handler panics into `500 internal_error` responses.

use std::any::Any;

use axum::response::{IntoResponse, Response};
use serde_json::Value;
use tower_http::catch_panic::CatchPanicLayer;

use crate::error::AppError;

pub type PanicHandler = fn(Box<dyn Any + Send + 'static>) -> Response;

/// Layer that answers a panicking request with the standard JSON error body.
///
/// The panic payload is logged but never sent to the client. The connection
/// and the process both survive.
pub fn layer() -> CatchPanicLayer<PanicHandler> {
    CatchPanicLayer::custom(panic_response as PanicHandler)
}

fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else {
        "non-string panic payload"
    };

    tracing::error!(panic = detail, "Request handler panicked");
    AppError::internal("Internal server error", Value::Null).into_response()
}

//! Application layer services implementing the retrieval workflow.
//!
//! Services depend only on the source traits from [`crate::domain::sources`];
//! concrete HTTP-backed sources are injected at startup.
//!
//! # Available Services
//!
//! - [`services::retrieval_service::RetrievalService`] - Curated leg, fallback chain and
//!   their combination
pub mod services;

//! Axum HTTP API server.
//!
//! This crate provides:
//! - `POST /api/subtitles` caption lookup for YouTube links
//! - Language list and health endpoints
//! - Static hosting of the single-page UI
//! - Prometheus metrics

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;

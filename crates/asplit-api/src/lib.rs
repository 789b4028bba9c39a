//! Axum HTTP API server.
//!
//! This crate provides:
//! - `POST /scan` - list audio files in a folder
//! - `POST /split` - split one file at silence boundaries
//! - `/health`, `/healthz`, `/ready` probes

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;

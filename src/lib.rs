//! Backend - a small JSON service reporting liveness, host identity and time.
//!
//! Serves `GET /`, `GET /api/data` and `GET /health`. The binary in `main.rs`
//! wires configuration, logging and the server; everything a test needs to
//! drive the router lives here.

pub mod config;
pub mod error;
pub mod http;
pub mod identity;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::AppConfig;
pub use error::AppError;
pub use routes::create_router;
pub use state::AppState;

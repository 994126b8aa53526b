//! HTTP server module.
//!
//! Binds the configured address, serves the router over plain HTTP, and
//! drains connections on SIGTERM/SIGINT before exiting.

mod server;
mod shutdown;

pub use server::{start_server, ServerError};

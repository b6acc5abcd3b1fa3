#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod infra;
pub mod middleware;
pub mod rng;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod ws;

// Re-exports for public API
pub use config::ServerConfig;
pub use domain::{Cell, DrawSequencer, Sheet, WildcardPolicy, WinnerAudit};
pub use error::AppError;
pub use errors::DomainError;
pub use infra::state::build_state;
pub use middleware::structured_logger::StructuredLogger;
pub use rng::{RandomPool, RandomPoolError, RandomSource, RngSource};
pub use services::registry::SessionRegistry;
pub use state::app_state::AppState;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    bingo_test_support::logging::init();
}

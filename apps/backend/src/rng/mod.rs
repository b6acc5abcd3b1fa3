//! Random number sources.
//!
//! Sheet generation and draws only ever see the [`RandomSource`] trait. The
//! server wires in a [`RandomPool`] of tokio workers; tests and the simulator
//! use a seeded [`RngSource`] or a seeded pool for reproducible runs.

pub mod pool;
pub mod source;

pub use pool::{RandomPool, DEFAULT_WORKERS};
pub use source::{RandomPoolError, RandomSource, RngSource};

//! Helpers shared by the bingo crates' test suites.

pub mod logging;

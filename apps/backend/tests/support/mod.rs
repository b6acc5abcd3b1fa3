#![allow(dead_code)]

pub mod collector;
pub mod state_helpers;
pub mod websocket_client;

pub use state_helpers::{build_test_state, single_number_sheet};

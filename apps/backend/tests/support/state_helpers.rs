use std::path::PathBuf;
use std::sync::Arc;

use bingo_backend::config::ServerConfig;
use bingo_backend::domain::{Cell, Sheet, WildcardPolicy};
use bingo_backend::infra::state::build_state;
use bingo_backend::rng::RngSource;
use bingo_backend::{AppError, AppState};

/// State backed by a seeded in-process source so runs are reproducible.
pub async fn build_test_state(seed: u64) -> Result<AppState, AppError> {
    build_test_state_with(seed, ServerConfig::default()).await
}

pub async fn build_test_state_with(seed: u64, config: ServerConfig) -> Result<AppState, AppError> {
    build_state()
        .with_config(config)
        .with_random_source(Arc::new(RngSource::seeded(seed)))
        .build()
        .await
}

pub fn config_with_html_dir(dir: PathBuf) -> ServerConfig {
    ServerConfig {
        html_dir: dir,
        public_url: "http://bingo.test".to_string(),
        ..ServerConfig::default()
    }
}

pub fn center_only_config() -> ServerConfig {
    ServerConfig {
        wildcard_policy: WildcardPolicy::CenterOnly,
        ..ServerConfig::default()
    }
}

/// A sheet whose only numbered cell holds `n`; everything else is free.
pub fn single_number_sheet(n: u8) -> Sheet {
    let mut columns = [[Cell::Wildcard; 5]; 5];
    columns[(n as usize) / 15][0] = Cell::Number(n);
    Sheet::from_columns(columns).expect("valid single-number sheet")
}

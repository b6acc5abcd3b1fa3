use std::sync::Arc;

use crate::config::ServerConfig;
use crate::error::AppError;
use crate::rng::{RandomPool, RandomSource};
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    config: ServerConfig,
    random: Option<Arc<dyn RandomSource>>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            config: ServerConfig::default(),
            random: None,
        }
    }

    pub fn with_config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a caller-supplied source instead of spawning a pool.
    pub fn with_random_source(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.random = Some(random);
        self
    }

    /// Must be called inside a tokio runtime when no source was supplied,
    /// since the pool spawns its workers immediately.
    pub async fn build(self) -> Result<AppState, AppError> {
        if self.config.rng_workers == 0 {
            return Err(AppError::config(
                "rng_workers must be at least 1".to_string(),
            ));
        }

        match self.random {
            Some(random) => Ok(AppState::new(self.config, random, None)),
            None => {
                let pool = RandomPool::spawn(self.config.rng_workers);
                let random: Arc<dyn RandomSource> = pool.clone();
                Ok(AppState::new(self.config, random, Some(pool)))
            }
        }
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}

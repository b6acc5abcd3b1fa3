use std::sync::Arc;

use crate::config::ServerConfig;
use crate::rng::{RandomPool, RandomSource};
use crate::services::registry::SessionRegistry;

/// Application state shared by every HTTP worker and connection actor.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub registry: Arc<SessionRegistry>,
    /// Source used for sheets and draws.
    pub random: Arc<dyn RandomSource>,
    /// Present when `random` is a pool this state owns and must shut down.
    pub pool: Option<Arc<RandomPool>>,
}

impl AppState {
    pub fn new(
        config: ServerConfig,
        random: Arc<dyn RandomSource>,
        pool: Option<Arc<RandomPool>>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            registry: Arc::new(SessionRegistry::new()),
            random,
            pool,
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn registry(&self) -> Arc<SessionRegistry> {
        self.registry.clone()
    }

    pub fn random(&self) -> &dyn RandomSource {
        self.random.as_ref()
    }

    /// Stop the owned random pool, if any.
    pub async fn shutdown(&self) {
        if let Some(pool) = &self.pool {
            pool.shutdown().await;
        }
    }
}

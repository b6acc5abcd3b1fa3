//! Background sweep of abandoned sessions.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use super::registry::SessionRegistry;

/// Every `every`, drop sessions idle for longer than `max_idle`. Abort the
/// returned handle to stop it.
pub fn spawn_reaper(
    registry: Arc<SessionRegistry>,
    max_idle: Duration,
    every: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // first tick fires immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let reaped = registry.reap_idle(max_idle);
            debug!(reaped, sessions = registry.len(), "Reaper sweep");
        }
    })
}

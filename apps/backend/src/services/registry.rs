//! Session id → session map. The only way in or out of a session.

use std::sync::Arc;
use std::time::Duration;

use actix::WeakRecipient;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::session::Session;
use crate::domain::Sheet;
use crate::errors::DomainError;
use crate::ws::events::{AdminEvent, PlayerEvent};

pub type SharedSession = Arc<Mutex<Session>>;

#[derive(Default)]
pub struct SessionRegistry {
    sessions: DashMap<String, SharedSession>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Return the session for `id`, creating it when absent. The flag is
    /// `true` only for the call that created it.
    pub fn create_if_absent(&self, id: &str, join_link: &str) -> (SharedSession, bool) {
        match self.sessions.entry(id.to_string()) {
            Entry::Occupied(entry) => (entry.get().clone(), false),
            Entry::Vacant(entry) => {
                let session = Arc::new(Mutex::new(Session::new(id, join_link)));
                entry.insert(session.clone());
                info!(session_id = id, "Session created");
                (session, true)
            }
        }
    }

    pub fn find(&self, id: &str) -> Result<SharedSession, DomainError> {
        self.sessions
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| DomainError::session_not_found(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sessions.contains_key(id)
    }

    pub fn delete(&self, id: &str) -> bool {
        let removed = self.sessions.remove(id).is_some();
        if removed {
            info!(session_id = id, "Session removed");
        }
        removed
    }

    /// Remove `id` only if it still maps to `session`, so a stale holder
    /// never deletes a newer session created under the same id.
    pub fn delete_if_same(&self, id: &str, session: &SharedSession) -> bool {
        let removed = self
            .sessions
            .remove_if(id, |_, current| Arc::ptr_eq(current, session))
            .is_some();
        if removed {
            info!(session_id = id, "Session removed");
        }
        removed
    }

    /// Join or refresh `name` in session `id` and tell the session's admins
    /// once the sheet is committed. Returns the committed sheet.
    ///
    /// A sheet that is already complete after catching up with the history
    /// wins on the spot and the session is removed.
    pub async fn upsert_player(
        &self,
        id: &str,
        name: &str,
        sheet: Sheet,
        connection: Option<WeakRecipient<PlayerEvent>>,
    ) -> Result<Sheet, DomainError> {
        let shared = self.find(id)?;
        let mut session = shared.lock().await;
        if session.is_over() {
            return Err(DomainError::session_not_found(id));
        }

        let committed = session.upsert_player(name, sheet, connection).clone();
        session.notify_admins(
            AdminEvent::NewPlayer {
                session_id: id.to_string(),
                name: name.to_string(),
            },
            None,
        );
        if let Some(audit) = session.settle_full_house(name) {
            self.delete_if_same(id, &shared);
            info!(session_id = id, winner = %audit.declared, "Session won at join");
        }
        Ok(committed)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn ids(&self) -> Vec<String> {
        self.sessions.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Drop sessions idle for longer than `max_idle`. Sessions whose lock is
    /// held right now are busy and skipped. Returns the number removed.
    pub fn reap_idle(&self, max_idle: Duration) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|id, shared| match shared.try_lock() {
            Ok(mut session) => {
                if session.last_activity().elapsed() > max_idle {
                    session.mark_over();
                    debug!(session_id = %id, "Reaping idle session");
                    false
                } else {
                    true
                }
            }
            Err(_) => true,
        });
        let reaped = before.saturating_sub(self.sessions.len());
        if reaped > 0 {
            info!(reaped, remaining = self.sessions.len(), "Idle sessions reaped");
        }
        reaped
    }
}

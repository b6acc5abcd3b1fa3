//! Session lifecycle and draws, driven by the admin and player actors.

use actix::WeakRecipient;
use tracing::{info, warn};
use uuid::Uuid;

use super::session::DrawResult;
use crate::domain::{Sheet, WinnerAudit};
use crate::errors::DomainError;
use crate::state::app_state::AppState;
use crate::ws::events::{AdminEvent, PlayerEvent};

/// What one admin draw request produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOutcome {
    Drawn {
        number: u8,
        winner: Option<WinnerAudit>,
    },
    /// Every number was drawn without a winner; the session is gone.
    Exhausted,
}

/// Create the session if needed and register `admin` as a watcher.
pub async fn open_session(
    state: &AppState,
    session_id: &str,
    token: Uuid,
    admin: WeakRecipient<AdminEvent>,
) -> Result<(), DomainError> {
    validate_id(session_id)?;
    let join_link = state.config.join_link(session_id);
    let (shared, created) = state.registry.create_if_absent(session_id, &join_link);
    shared.lock().await.watch(token, admin);
    if !created {
        info!(session_id, admin = %token, "Admin watching existing session");
    }
    Ok(())
}

/// Join link of an existing session.
pub fn game_link(state: &AppState, session_id: &str) -> Result<String, DomainError> {
    state.registry.find(session_id)?;
    Ok(state.config.join_link(session_id))
}

/// Generate a sheet and commit it for `name`. The sheet is built before the
/// session lock is taken; catch-up and the admin notice happen under it.
pub async fn join_player(
    state: &AppState,
    session_id: &str,
    name: &str,
    connection: Option<WeakRecipient<PlayerEvent>>,
) -> Result<Sheet, DomainError> {
    validate_id(session_id)?;
    if name.trim().is_empty() {
        return Err(DomainError::validation("player name must not be empty"));
    }
    state.registry.find(session_id)?;

    let sheet = Sheet::generate(state.random(), state.config.wildcard_policy).await?;
    state
        .registry
        .upsert_player(session_id, name, sheet, connection)
        .await
}

/// Draw exactly one number for `session_id`. A win or exhaustion removes the
/// session before this returns. `requested_by` is left out of the winner
/// notice because it gets the outcome directly.
pub async fn draw_next(
    state: &AppState,
    session_id: &str,
    requested_by: Option<Uuid>,
) -> Result<DrawOutcome, DomainError> {
    let shared = state.registry.find(session_id)?;
    let mut session = shared.lock().await;
    if session.is_over() {
        return Err(DomainError::session_not_found(session_id));
    }

    match session.draw(state.random()).await? {
        DrawResult::Exhausted => {
            session.mark_over();
            state.registry.delete_if_same(session_id, &shared);
            warn!(session_id, "All numbers drawn without a winner; session closed");
            Ok(DrawOutcome::Exhausted)
        }
        DrawResult::Drawn { number, winner } => {
            if let Some(audit) = &winner {
                session.notify_admins(
                    AdminEvent::Winner {
                        session_id: session_id.to_string(),
                        name: audit.declared.clone(),
                        all_winners: audit.qualifying.clone(),
                    },
                    requested_by,
                );
                state.registry.delete_if_same(session_id, &shared);
                info!(
                    session_id,
                    winner = %audit.declared,
                    draws = session.draws().len(),
                    "Session won"
                );
            }
            Ok(DrawOutcome::Drawn { number, winner })
        }
    }
}

fn validate_id(session_id: &str) -> Result<(), DomainError> {
    if session_id.trim().is_empty() {
        return Err(DomainError::validation("session id must not be empty"));
    }
    Ok(())
}

//! One live game: players in join order, draw history and admin watchers.

use std::time::Instant;

use actix::WeakRecipient;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::{audit_winners, DrawSequencer, Sheet, WinnerAudit};
use crate::rng::{RandomPoolError, RandomSource};
use crate::ws::events::{AdminEvent, PlayerEvent};

pub struct PlayerSlot {
    pub name: String,
    pub sheet: Sheet,
    /// Delivery only; a dropped connection simply stops upgrading.
    pub connection: Option<WeakRecipient<PlayerEvent>>,
}

/// Result of applying one draw to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawResult {
    Drawn {
        number: u8,
        winner: Option<WinnerAudit>,
    },
    Exhausted,
}

pub struct Session {
    id: String,
    join_link: String,
    players: Vec<PlayerSlot>,
    draws: DrawSequencer,
    admins: Vec<(Uuid, WeakRecipient<AdminEvent>)>,
    last_activity: Instant,
    is_over: bool,
}

impl Session {
    pub fn new(id: impl Into<String>, join_link: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            join_link: join_link.into(),
            players: Vec::new(),
            draws: DrawSequencer::new(),
            admins: Vec::new(),
            last_activity: Instant::now(),
            is_over: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn join_link(&self) -> &str {
        &self.join_link
    }

    pub fn draws(&self) -> &[u8] {
        self.draws.history()
    }

    pub fn is_over(&self) -> bool {
        self.is_over
    }

    pub fn last_activity(&self) -> Instant {
        self.last_activity
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn player_names(&self) -> Vec<String> {
        self.players.iter().map(|p| p.name.clone()).collect()
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.players.iter().find(|p| p.name == name).map(|p| &p.sheet)
    }

    pub fn touch(&mut self) {
        self.last_activity = Instant::now();
    }

    pub(crate) fn mark_over(&mut self) {
        self.is_over = true;
    }

    /// Register an admin connection for new-player and winner notices.
    /// Re-watching with the same token replaces the old recipient.
    pub fn watch(&mut self, token: Uuid, admin: WeakRecipient<AdminEvent>) {
        self.admins.retain(|(t, _)| *t != token);
        self.admins.push((token, admin));
        self.touch();
    }

    /// Add a player or replace an existing player's sheet in place.
    ///
    /// The incoming sheet is caught up with the draw history before it is
    /// stored. Returns the committed sheet.
    pub fn upsert_player(
        &mut self,
        name: &str,
        mut sheet: Sheet,
        connection: Option<WeakRecipient<PlayerEvent>>,
    ) -> &Sheet {
        for &drawn in self.draws.history() {
            sheet.find_match(drawn);
        }
        self.touch();

        let idx = match self.players.iter().position(|p| p.name == name) {
            Some(idx) => {
                let slot = &mut self.players[idx];
                sheet.set_id(slot.sheet.id() + 1);
                slot.sheet = sheet;
                slot.connection = connection;
                debug!(session_id = %self.id, player = name, sheet_id = slot.sheet.id(), "Player sheet replaced");
                idx
            }
            None => {
                self.players.push(PlayerSlot {
                    name: name.to_string(),
                    sheet,
                    connection,
                });
                info!(session_id = %self.id, player = name, players = self.players.len(), "Player joined");
                self.players.len() - 1
            }
        };
        &self.players[idx].sheet
    }

    /// Draw one number, evaluate every sheet and fan the result out to
    /// connected players. The first full house in join order wins.
    pub async fn draw<S>(&mut self, source: &S) -> Result<DrawResult, RandomPoolError>
    where
        S: RandomSource + ?Sized,
    {
        let Some(number) = self.draws.next(source).await? else {
            return Ok(DrawResult::Exhausted);
        };
        self.touch();

        // Only a sheet holding `number` can have been completed by it.
        let mut first: Option<usize> = None;
        for (idx, slot) in self.players.iter_mut().enumerate() {
            let full_house = slot.sheet.find_match(number);
            if full_house && first.is_none() && slot.sheet.locate(number).is_some() {
                first = Some(idx);
            }
        }

        let audit = first.map(|idx| {
            let declared = self.players[idx].name.clone();
            audit_winners(
                &declared,
                self.players
                    .iter()
                    .map(|slot| (slot.name.as_str(), &slot.sheet)),
                self.draws.history(),
            )
        });
        if audit.is_some() {
            self.is_over = true;
        }

        self.broadcast_draw(number, audit.as_ref().map(|a| a.declared.clone()));

        Ok(DrawResult::Drawn {
            number,
            winner: audit,
        })
    }

    /// Close the game if `name`'s committed sheet is already a full house,
    /// which happens when a late sheet is caught up with the history.
    ///
    /// Players get the last draw again, now carrying the winner, and every
    /// admin gets the winner notice.
    pub fn settle_full_house(&mut self, name: &str) -> Option<WinnerAudit> {
        if self.is_over {
            return None;
        }
        let complete = self.sheet(name).is_some_and(Sheet::is_full_house);
        let last = self.draws.last()?;
        if !complete {
            return None;
        }

        let audit = audit_winners(
            name,
            self.players
                .iter()
                .map(|slot| (slot.name.as_str(), &slot.sheet)),
            self.draws.history(),
        );
        self.is_over = true;
        info!(
            session_id = %self.id,
            player = name,
            draws = self.draws.len(),
            "Caught-up sheet is a full house"
        );

        self.broadcast_draw(last, Some(audit.declared.clone()));
        self.notify_admins(
            AdminEvent::Winner {
                session_id: self.id.clone(),
                name: audit.declared.clone(),
                all_winners: audit.qualifying.clone(),
            },
            None,
        );
        Some(audit)
    }

    fn broadcast_draw(&self, number: u8, winner: Option<String>) {
        let mut delivered = 0usize;
        for slot in &self.players {
            let Some(recipient) = slot.connection.as_ref().and_then(|c| c.upgrade()) else {
                continue;
            };
            recipient.do_send(PlayerEvent {
                session_id: self.id.clone(),
                number,
                matched: slot.sheet.locate(number),
                winner: winner.clone(),
            });
            delivered += 1;
        }
        debug!(session_id = %self.id, draw = number, delivered, "Draw fanned out");
    }

    /// Push an event to every watching admin except `exclude`.
    pub fn notify_admins(&mut self, event: AdminEvent, exclude: Option<Uuid>) {
        self.admins.retain(|(_, admin)| admin.upgrade().is_some());
        for (token, admin) in &self.admins {
            if Some(*token) == exclude {
                continue;
            }
            if let Some(recipient) = admin.upgrade() {
                recipient.do_send(event.clone());
            }
        }
    }

    pub fn admin_count(&self) -> usize {
        self.admins.len()
    }
}

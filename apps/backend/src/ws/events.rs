//! Messages pushed from the game engine into connection actors.

use actix::prelude::*;

/// One draw as seen by a single player.
#[derive(Message, Clone, Debug, PartialEq, Eq)]
#[rtype(result = "()")]
pub struct PlayerEvent {
    pub session_id: String,
    pub number: u8,
    /// `(col, row)` of the number on this player's sheet.
    pub matched: Option<(usize, usize)>,
    pub winner: Option<String>,
}

#[derive(Message, Clone, Debug, PartialEq, Eq)]
#[rtype(result = "()")]
pub enum AdminEvent {
    NewPlayer {
        session_id: String,
        name: String,
    },
    Winner {
        session_id: String,
        name: String,
        all_winners: Vec<String>,
    },
}

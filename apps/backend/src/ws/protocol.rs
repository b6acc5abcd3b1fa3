//! Text-frame command grammar and outbound JSON messages.

use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::domain::Grid;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("command '{0}' has no '/' delimiter")]
    MissingDelimiter(String),
    #[error("command '{0}' has an empty session id")]
    EmptySessionId(String),
    #[error("command '{0}' has an empty player name")]
    EmptyPlayerName(String),
    #[error("unknown command '{0}'")]
    Unknown(String),
}

/// Admin channel: `ping`, `status/<id>`, `gamelink/<id>`, `<token>/<id>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminCommand {
    Ping,
    Status { session_id: String },
    GameLink { session_id: String },
    /// Any other token triggers one draw.
    Draw { token: String, session_id: String },
}

impl FromStr for AdminCommand {
    type Err = CommandError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let text = raw.trim();
        if text == "ping" {
            return Ok(AdminCommand::Ping);
        }

        let (token, session_id) = text
            .split_once('/')
            .ok_or_else(|| CommandError::MissingDelimiter(text.to_string()))?;
        if session_id.is_empty() {
            return Err(CommandError::EmptySessionId(text.to_string()));
        }
        let session_id = session_id.to_string();

        Ok(match token {
            "status" => AdminCommand::Status { session_id },
            "gamelink" => AdminCommand::GameLink { session_id },
            other => AdminCommand::Draw {
                token: other.to_string(),
                session_id,
            },
        })
    }
}

/// Player channel: `ping`, `add/<id>/<name>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerCommand {
    Ping,
    Add { session_id: String, name: String },
}

impl FromStr for PlayerCommand {
    type Err = CommandError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let text = raw.trim();
        if text == "ping" {
            return Ok(PlayerCommand::Ping);
        }

        let rest = text
            .strip_prefix("add/")
            .ok_or_else(|| {
                if text.contains('/') {
                    CommandError::Unknown(text.to_string())
                } else {
                    CommandError::MissingDelimiter(text.to_string())
                }
            })?;
        let (session_id, name) = rest
            .split_once('/')
            .ok_or_else(|| CommandError::MissingDelimiter(text.to_string()))?;
        if session_id.is_empty() {
            return Err(CommandError::EmptySessionId(text.to_string()));
        }
        if name.trim().is_empty() {
            return Err(CommandError::EmptyPlayerName(text.to_string()));
        }

        Ok(PlayerCommand::Add {
            session_id: session_id.to_string(),
            name: name.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "msg_type", rename_all = "snake_case")]
pub enum AdminMsg {
    Pong,
    DrawNumber {
        draw_number: u8,
    },
    NewPlayer {
        new_player: String,
        winner: bool,
    },
    Winner {
        new_player: String,
        winner: bool,
        all_winners: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "msg_type", rename_all = "snake_case")]
pub enum PlayerMsg {
    Pong,
    PlayerSheet {
        player_sheet: Grid,
    },
    DrawNumber {
        draw_number: u8,
        #[serde(rename = "match")]
        matched: bool,
        col: usize,
        row: usize,
        winner: bool,
        /// Winner's name, empty while nobody has won.
        new_player: String,
    },
}

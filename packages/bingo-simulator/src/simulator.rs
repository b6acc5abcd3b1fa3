//! Scripted game runner.

use std::time::Instant;

use bingo_backend::domain::{play_out, Sheet, WildcardPolicy};
use bingo_backend::rng::{RandomPoolError, RandomSource};
use serde::Serialize;
use tracing::debug;

/// One finished game, written as a JSON line.
#[derive(Debug, Clone, Serialize)]
pub struct GameRecord {
    pub game: u32,
    pub players: usize,
    pub policy: String,
    pub draws: usize,
    pub winner: Option<String>,
    pub qualifying: Vec<String>,
    pub tie: bool,
    /// Numbered cells per player, in join order.
    pub required_matches: Vec<usize>,
    pub duration_ms: f64,
}

pub struct Simulator {
    players: usize,
    policy: WildcardPolicy,
}

impl Simulator {
    pub fn new(players: usize, policy: WildcardPolicy) -> Self {
        Self { players, policy }
    }

    pub fn policy(&self) -> WildcardPolicy {
        self.policy
    }

    pub async fn run_game<S>(&self, source: &S, game: u32) -> Result<GameRecord, RandomPoolError>
    where
        S: RandomSource + ?Sized,
    {
        let start = Instant::now();

        let mut sheets = Vec::with_capacity(self.players);
        for idx in 0..self.players {
            let sheet = Sheet::generate(source, self.policy).await?;
            sheets.push((format!("player-{idx}"), sheet));
        }
        let required_matches = sheets.iter().map(|(_, s)| s.required_matches()).collect();

        let outcome = play_out(source, &mut sheets).await?;
        let qualifying = outcome
            .audit
            .as_ref()
            .map(|a| a.qualifying.clone())
            .unwrap_or_default();

        debug!(game, draws = outcome.draws.len(), winner = ?outcome.winner, "Game finished");

        Ok(GameRecord {
            game,
            players: self.players,
            policy: self.policy.to_string(),
            draws: outcome.draws.len(),
            winner: outcome.winner,
            tie: qualifying.len() > 1,
            qualifying,
            required_matches,
            duration_ms: start.elapsed().as_secs_f64() * 1000.0,
        })
    }
}

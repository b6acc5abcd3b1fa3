//! Session-less fast path: draw until somebody wins or the pool runs dry.

use serde::Serialize;
use tracing::info;

use super::draw::DrawSequencer;
use super::sheet::Sheet;
use super::winner::{audit_winners, WinnerAudit};
use crate::rng::{RandomPoolError, RandomSource};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptedOutcome {
    pub draws: Vec<u8>,
    pub winner: Option<String>,
    pub audit: Option<WinnerAudit>,
}

/// Play a whole game against `players` (in join order). Every sheet is
/// checked after every draw; the first full house in join order wins.
pub async fn play_out<S>(
    source: &S,
    players: &mut [(String, Sheet)],
) -> Result<ScriptedOutcome, RandomPoolError>
where
    S: RandomSource + ?Sized,
{
    let mut sequencer = DrawSequencer::new();

    while let Some(drawn) = sequencer.next(source).await? {
        let mut first: Option<usize> = None;
        for (idx, (_, sheet)) in players.iter_mut().enumerate() {
            if sheet.find_match(drawn) && first.is_none() {
                first = Some(idx);
            }
        }

        if let Some(idx) = first {
            let winner = players[idx].0.clone();
            let audit = audit_winners(
                &winner,
                players.iter().map(|(name, sheet)| (name.as_str(), sheet)),
                sequencer.history(),
            );
            info!(winner = %winner, draws = sequencer.len(), "Scripted game won");
            return Ok(ScriptedOutcome {
                draws: sequencer.history().to_vec(),
                winner: Some(winner),
                audit: Some(audit),
            });
        }
    }

    info!(draws = sequencer.len(), "Scripted game exhausted without a winner");
    Ok(ScriptedOutcome {
        draws: sequencer.history().to_vec(),
        winner: None,
        audit: None,
    })
}

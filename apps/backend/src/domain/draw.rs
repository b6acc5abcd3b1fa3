//! Unique draws over `1..=75`.

use super::MAX_NUMBER;
use crate::rng::{RandomPoolError, RandomSource};

/// Pick uniformly among the numbers not yet in `already_drawn`.
///
/// Returns `Ok(None)` only once every number has been drawn; a pick outside
/// the requested bound is an error.
pub async fn draw_unique<S>(
    source: &S,
    already_drawn: &[u8],
) -> Result<Option<u8>, RandomPoolError>
where
    S: RandomSource + ?Sized,
{
    let remaining: Vec<u8> = (1..=MAX_NUMBER)
        .filter(|n| !already_drawn.contains(n))
        .collect();
    if remaining.is_empty() {
        return Ok(None);
    }
    let idx = source.pick_below(remaining.len() as u32).await? as usize;
    Ok(Some(remaining[idx]))
}

/// Ordered draw history for one game.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawSequencer {
    drawn: Vec<u8>,
}

impl DrawSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw and record the next number, or `None` when exhausted.
    pub async fn next<S>(&mut self, source: &S) -> Result<Option<u8>, RandomPoolError>
    where
        S: RandomSource + ?Sized,
    {
        let next = draw_unique(source, &self.drawn).await?;
        if let Some(n) = next {
            self.drawn.push(n);
        }
        Ok(next)
    }

    pub fn history(&self) -> &[u8] {
        &self.drawn
    }

    pub fn len(&self) -> usize {
        self.drawn.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drawn.is_empty()
    }

    pub fn is_exhausted(&self) -> bool {
        self.drawn.len() >= MAX_NUMBER as usize
    }

    pub fn last(&self) -> Option<u8> {
        self.drawn.last().copied()
    }
}

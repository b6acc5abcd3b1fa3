use async_trait::async_trait;
use parking_lot::Mutex;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RandomPoolError {
    #[error("random pool has been shut down")]
    ShutDown,
    #[error("bound must be greater than zero")]
    InvalidBound,
    #[error("source answered {pick} for bound {bound}")]
    OutOfRange { pick: u32, bound: u32 },
}

/// Anything that can answer "give me a uniform value in `[0, bound)`".
#[async_trait]
pub trait RandomSource: Send + Sync {
    async fn pick(&self, bound: u32) -> Result<u32, RandomPoolError>;

    /// [`pick`](Self::pick) with the answer checked against `bound`, so a
    /// faulty source surfaces as an error instead of a bad index.
    async fn pick_below(&self, bound: u32) -> Result<u32, RandomPoolError> {
        let pick = self.pick(bound).await?;
        if pick >= bound {
            return Err(RandomPoolError::OutOfRange { pick, bound });
        }
        Ok(pick)
    }
}

/// In-process source backed by a single ChaCha8 generator.
pub struct RngSource {
    rng: Mutex<ChaCha8Rng>,
}

impl RngSource {
    pub fn from_os_rng() -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::from_os_rng()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }
}

#[async_trait]
impl RandomSource for RngSource {
    async fn pick(&self, bound: u32) -> Result<u32, RandomPoolError> {
        if bound == 0 {
            return Err(RandomPoolError::InvalidBound);
        }
        Ok(self.rng.lock().random_range(0..bound))
    }
}

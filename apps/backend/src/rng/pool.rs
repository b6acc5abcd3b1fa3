//! Fixed-size pool of random workers answering `(bound, reply)` requests.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::source::{RandomPoolError, RandomSource};

pub const DEFAULT_WORKERS: usize = 3;

const REQUEST_BUFFER: usize = 64;

struct DrawRequest {
    bound: u32,
    reply: oneshot::Sender<u32>,
}

type SharedReceiver = Arc<tokio::sync::Mutex<mpsc::Receiver<DrawRequest>>>;

pub struct RandomPool {
    requests: Mutex<Option<mpsc::Sender<DrawRequest>>>,
    workers: Mutex<Vec<JoinHandle<()>>>,
    size: usize,
}

impl RandomPool {
    /// Spawn `workers` tasks, each seeded from the OS. A size of zero is
    /// raised to one so there is always somebody reading the queue.
    pub fn spawn(workers: usize) -> Arc<Self> {
        Self::spawn_with(workers, |_| ChaCha8Rng::from_os_rng())
    }

    /// Spawn workers seeded with `base_seed + worker_index`.
    pub fn spawn_seeded(workers: usize, base_seed: u64) -> Arc<Self> {
        Self::spawn_with(workers, |idx| {
            ChaCha8Rng::seed_from_u64(base_seed.wrapping_add(idx as u64))
        })
    }

    fn spawn_with(workers: usize, mut seed: impl FnMut(usize) -> ChaCha8Rng) -> Arc<Self> {
        let size = workers.max(1);
        let (tx, rx) = mpsc::channel(REQUEST_BUFFER);
        let rx: SharedReceiver = Arc::new(tokio::sync::Mutex::new(rx));

        let handles = (0..size)
            .map(|idx| tokio::spawn(run_worker(idx, seed(idx), rx.clone())))
            .collect();

        info!(workers = size, "Random pool started");

        Arc::new(Self {
            requests: Mutex::new(Some(tx)),
            workers: Mutex::new(handles),
            size,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_running(&self) -> bool {
        self.requests.lock().is_some()
    }

    /// Uniform value in `[0, bound)`.
    pub async fn draw(&self, bound: u32) -> Result<u32, RandomPoolError> {
        if bound == 0 {
            return Err(RandomPoolError::InvalidBound);
        }

        let sender = self
            .requests
            .lock()
            .clone()
            .ok_or(RandomPoolError::ShutDown)?;

        let (reply, answer) = oneshot::channel();
        sender
            .send(DrawRequest { bound, reply })
            .await
            .map_err(|_| RandomPoolError::ShutDown)?;

        answer.await.map_err(|_| RandomPoolError::ShutDown)
    }

    /// Close the request queue and wait for every worker to drain and exit.
    /// Calling it again is a no-op.
    pub async fn shutdown(&self) {
        let sender = self.requests.lock().take();
        if sender.is_none() {
            return;
        }
        drop(sender);

        let handles: Vec<JoinHandle<()>> = std::mem::take(&mut *self.workers.lock());
        for handle in handles {
            if let Err(err) = handle.await {
                warn!(error = %err, "Random worker did not exit cleanly");
            }
        }
        info!("Random pool shut down");
    }
}

async fn run_worker(idx: usize, mut rng: ChaCha8Rng, requests: SharedReceiver) {
    loop {
        let next = requests.lock().await.recv().await;
        let Some(DrawRequest { bound, reply }) = next else {
            break;
        };
        // Caller may have gone away; nothing to do then.
        let _ = reply.send(rng.random_range(0..bound));
    }
    debug!(worker = idx, "Random worker exiting");
}

#[async_trait]
impl RandomSource for RandomPool {
    async fn pick(&self, bound: u32) -> Result<u32, RandomPoolError> {
        self.draw(bound).await
    }
}

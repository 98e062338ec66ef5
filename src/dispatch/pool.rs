//! Worker pool for chunked URL classification.
//!
//! Chunks are submitted fire-and-forget onto a shared job queue consumed
//! by a fixed set of worker tasks; each submission hands back a pending
//! handle that is resolved in a later collection pass. This is the only
//! place in the pipeline where work runs in parallel.

use crate::classify::classify;
use crate::dispatch::chunk::chunk_locations;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, Mutex};

/// Classification failures that abort a crawl run.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A worker dropped the reply channel before answering.
    #[error("classification result lost for chunk {0}")]
    ChunkLost(usize),
}

/// Classification outcome for a single chunk: the domain it belongs to and
/// the locations that matched.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkResult {
    pub domain: String,
    pub matches: Vec<String>,
}

/// One unit of classification work.
struct Job {
    domain: String,
    urls: Vec<String>,
    reply: oneshot::Sender<ChunkResult>,
}

/// Handle to a submitted chunk, resolved once its worker answers.
pub struct PendingChunk {
    result: oneshot::Receiver<ChunkResult>,
}

impl PendingChunk {
    /// Wait for the chunk's classification result.
    ///
    /// Returns `None` if the worker dropped the reply channel.
    pub async fn wait(self) -> Option<ChunkResult> {
        self.result.await.ok()
    }
}

/// Fixed-size pool of classification workers behind a job queue.
pub struct WorkerPool {
    queue: mpsc::UnboundedSender<Job>,
}

impl WorkerPool {
    /// Spawn `workers` tasks consuming a shared job queue.
    ///
    /// Workers exit when the pool (and with it the queue sender) is dropped.
    pub fn new(workers: usize) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let rx = Arc::new(Mutex::new(rx));
        for _ in 0..workers.max(1) {
            let rx = Arc::clone(&rx);
            tokio::spawn(worker_loop(rx));
        }
        Self { queue: tx }
    }

    /// Submit a chunk for classification. Never blocks.
    ///
    /// A send onto a closed queue leaves the reply sender dropped, which
    /// surfaces as a lost chunk when the handle is awaited.
    pub fn submit(&self, domain: &str, urls: Vec<String>) -> PendingChunk {
        let (reply, result) = oneshot::channel();
        let _ = self.queue.send(Job {
            domain: domain.to_string(),
            urls,
            reply,
        });
        PendingChunk { result }
    }
}

async fn worker_loop(rx: Arc<Mutex<mpsc::UnboundedReceiver<Job>>>) {
    loop {
        let job = rx.lock().await.recv().await;
        let Some(job) = job else { break };
        let matches = classify(&job.urls);
        let _ = job.reply.send(ChunkResult {
            domain: job.domain,
            matches,
        });
    }
}

/// Partitions a domain's locations into chunks and distributes them across
/// the worker pool, collecting results in submission order.
pub struct Dispatcher {
    pool: WorkerPool,
    chunk_size: usize,
}

impl Dispatcher {
    pub fn new(pool: WorkerPool, chunk_size: usize) -> Self {
        Self { pool, chunk_size }
    }

    /// Classify `locations` for `domain` across the worker pool.
    ///
    /// Every chunk is submitted before any result is awaited; results are
    /// then collected in submission order, so concatenation preserves chunk
    /// order and order within each chunk. A chunk that never answers fails
    /// the whole call; there is no per-chunk retry.
    pub async fn dispatch(
        &self,
        domain: &str,
        locations: Vec<String>,
    ) -> Result<Vec<String>, DispatchError> {
        let mut pending = Vec::new();
        for chunk in chunk_locations(locations, self.chunk_size) {
            pending.push(self.pool.submit(domain, chunk));
        }

        let mut matched = Vec::new();
        for (index, handle) in pending.into_iter().enumerate() {
            let result = handle
                .wait()
                .await
                .ok_or(DispatchError::ChunkLost(index))?;
            matched.extend(result.matches);
        }
        Ok(matched)
    }
}

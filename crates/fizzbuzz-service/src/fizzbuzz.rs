use std::sync::Arc;
use std::time::Duration;

use fizzbuzz_core::{sequence, SequenceParams, StatsRepository};
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Bounds applied to detached statistics recordings.
#[derive(Debug, Clone)]
pub struct RecordingPolicy {
    /// Upper bound on concurrently outstanding recordings. Recordings
    /// dispatched past the bound are shed instead of queued.
    pub max_in_flight: usize,
    /// Deadline for a single recording before it is abandoned.
    pub timeout: Duration,
}

impl Default for RecordingPolicy {
    fn default() -> Self {
        Self {
            max_in_flight: 256,
            timeout: Duration::from_secs(5),
        }
    }
}

/// Outcome of a generate call: the sequence itself plus the handle of the
/// detached recording dispatched for it.
#[derive(Debug)]
pub struct Generated {
    pub sequence: Vec<String>,
    /// Resolves once the recording has finished (or was shed). The
    /// response path ignores it; tests await it to observe counts.
    pub recording: JoinHandle<()>,
}

/// Generates sequences and records request statistics without ever
/// blocking the response path on storage.
///
/// Recording failures are logged and otherwise invisible to the caller:
/// the request that triggered them still receives its sequence. A hung
/// backend cannot accumulate unbounded background work because each
/// recording is bounded by [`RecordingPolicy::timeout`] and the number in
/// flight by [`RecordingPolicy::max_in_flight`].
#[derive(Debug)]
pub struct FizzBuzzService<R> {
    repository: Arc<R>,
    recordings: Arc<Semaphore>,
    policy: RecordingPolicy,
}

impl<R> Clone for FizzBuzzService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            recordings: Arc::clone(&self.recordings),
            policy: self.policy.clone(),
        }
    }
}

impl<R: StatsRepository> FizzBuzzService<R> {
    /// Creates a service with the default recording policy.
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_policy(repository, RecordingPolicy::default())
    }

    pub fn with_policy(repository: Arc<R>, policy: RecordingPolicy) -> Self {
        Self {
            repository,
            recordings: Arc::new(Semaphore::new(policy.max_in_flight)),
            policy,
        }
    }

    /// Builds the sequence for `params` and dispatches a detached
    /// recording of the request.
    ///
    /// Generation is pure CPU work and completes before this returns; the
    /// recording runs on its own task and never delays the caller.
    /// Cancelling the originating request does not cancel a recording
    /// already dispatched here.
    pub fn generate(&self, params: &SequenceParams) -> Generated {
        let sequence = sequence::generate(params);
        let recording = self.record_detached(params.clone());

        Generated {
            sequence,
            recording,
        }
    }

    fn record_detached(&self, params: SequenceParams) -> JoinHandle<()> {
        let repository = Arc::clone(&self.repository);
        let recordings = Arc::clone(&self.recordings);
        let timeout = self.policy.timeout;

        tokio::spawn(async move {
            let _permit = match recordings.try_acquire() {
                Ok(permit) => permit,
                Err(_) => {
                    warn!("recording capacity exhausted, shedding statistics update");
                    return;
                }
            };

            match tokio::time::timeout(timeout, repository.record(&params)).await {
                Ok(Ok(())) => debug!("recorded request statistics"),
                Ok(Err(err)) => warn!(error = %err, "failed to record request statistics"),
                Err(_) => warn!(?timeout, "statistics recording timed out, abandoning it"),
            }
        })
    }
}

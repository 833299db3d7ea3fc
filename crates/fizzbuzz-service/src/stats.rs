use std::sync::Arc;

use fizzbuzz_core::repository::Result;
use fizzbuzz_core::{StatsEntry, StatsRepository};
use tracing::trace;

/// Read path for request statistics.
///
/// Unlike recording, queries are synchronous: a storage failure here has
/// no degraded success to fall back on and propagates to the caller.
#[derive(Debug)]
pub struct StatsService<R> {
    repository: Arc<R>,
}

impl<R> Clone for StatsService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: StatsRepository> StatsService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Returns the most frequently requested parameter combination, or
    /// `None` when nothing has been recorded yet.
    pub async fn most_frequent(&self) -> Result<Option<StatsEntry>> {
        trace!("querying most frequent parameters");
        self.repository.most_frequent().await
    }
}

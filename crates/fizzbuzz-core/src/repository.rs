use crate::error::StorageError;
use crate::params::SequenceParams;
use crate::stats::StatsEntry;
use async_trait::async_trait;

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage contract for request-frequency statistics.
///
/// Implementations must be safe under arbitrary concurrent callers:
/// `record` increments never lose updates, and `most_frequent` may observe
/// a slightly stale maximum while writes are in flight.
#[async_trait]
pub trait StatsRepository: Send + Sync + 'static {
    /// Increments the hit count for the exact parameter combination,
    /// creating the entry with count 1 if absent and refreshing its
    /// last-updated timestamp if present.
    async fn record(&self, params: &SequenceParams) -> Result<()>;

    /// Returns the entry with the highest hit count, or `None` when no
    /// statistics have been recorded yet. Ordering among entries that tie
    /// on the maximum is implementation-defined.
    async fn most_frequent(&self) -> Result<Option<StatsEntry>>;
}

use std::sync::{Arc, Weak};
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use fizzbuzz_core::repository::{Result, StatsRepository};
use fizzbuzz_core::{SequenceParams, StatsEntry};
use jiff::{SignedDuration, Timestamp};
use tokio::task::JoinHandle;
use tracing::debug;

/// Per-key counter state.
#[derive(Debug, Clone)]
struct Counter {
    hit_count: u64,
    first_seen: Timestamp,
    last_updated: Timestamp,
}

/// Growth bounds for the in-memory statistics map.
#[derive(Debug, Clone)]
pub struct MemoryStatsConfig {
    /// Maximum number of distinct keys. Inserting a new key past the cap
    /// evicts the least-recently-updated entry. `None` means unbounded.
    pub max_entries: Option<usize>,
    /// Entries not updated within this duration are removed by the sweep
    /// task. `None` disables the sweep entirely.
    pub ttl: Option<Duration>,
    /// How often the sweep task runs when a TTL is configured.
    pub sweep_interval: Duration,
}

impl Default for MemoryStatsConfig {
    fn default() -> Self {
        Self {
            max_entries: None,
            ttl: None,
            sweep_interval: Duration::from_secs(60),
        }
    }
}

/// In-memory implementation of the statistics repository using DashMap.
///
/// DashMap shards the map across reader/writer locks, so concurrent
/// queries never block each other and increments of distinct keys rarely
/// contend. The entry API makes each increment atomic, which keeps
/// concurrent `record` calls for the same key from losing updates.
///
/// `most_frequent` does a full linear scan. The entry count is bounded by
/// the cardinality of distinct parameter combinations (and by the eviction
/// policy when configured), not by request volume.
#[derive(Debug)]
pub struct MemoryStatsRepository {
    entries: Arc<DashMap<SequenceParams, Counter>>,
    config: MemoryStatsConfig,
    sweeper: Option<JoinHandle<()>>,
}

impl MemoryStatsRepository {
    /// Creates an unbounded in-memory repository.
    pub fn new() -> Self {
        Self::with_config(MemoryStatsConfig::default())
    }

    /// Creates a repository with the given growth bounds.
    ///
    /// When a TTL is configured, the sweep task starts immediately and is
    /// aborted when the repository is dropped; this constructor must then
    /// be called from within a tokio runtime.
    pub fn with_config(config: MemoryStatsConfig) -> Self {
        let entries = Arc::new(DashMap::new());

        let sweeper = config.ttl.map(|ttl| {
            Self::spawn_sweeper(Arc::downgrade(&entries), ttl, config.sweep_interval)
        });

        Self {
            entries,
            config,
            sweeper,
        }
    }

    fn spawn_sweeper(
        entries: Weak<DashMap<SequenceParams, Counter>>,
        ttl: Duration,
        sweep_interval: Duration,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let Ok(ttl) = SignedDuration::try_from(ttl) else {
                return;
            };
            let mut ticker = tokio::time::interval(sweep_interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                // The weak reference keeps the task from pinning the map
                // alive after the repository is gone.
                let Some(entries) = entries.upgrade() else {
                    break;
                };

                let cutoff = Timestamp::now() - ttl;
                let before = entries.len();
                entries.retain(|_, counter| counter.last_updated >= cutoff);
                let swept = before.saturating_sub(entries.len());

                if swept > 0 {
                    debug!(swept, "expired stale statistics entries");
                }
            }
        })
    }

    fn enforce_capacity(&self) {
        let Some(max_entries) = self.config.max_entries else {
            return;
        };

        while self.entries.len() > max_entries {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|entry| entry.value().last_updated)
                .map(|entry| entry.key().clone());

            let Some(key) = oldest else {
                break;
            };

            self.entries.remove(&key);
            debug!("evicted least-recently-updated statistics entry");
        }
    }
}

impl Default for MemoryStatsRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for MemoryStatsRepository {
    fn drop(&mut self) {
        if let Some(sweeper) = &self.sweeper {
            sweeper.abort();
        }
    }
}

#[async_trait]
impl StatsRepository for MemoryStatsRepository {
    async fn record(&self, params: &SequenceParams) -> Result<()> {
        let now = Timestamp::now();
        let mut inserted = false;

        self.entries
            .entry(params.clone())
            .and_modify(|counter| {
                counter.hit_count += 1;
                counter.last_updated = now;
            })
            .or_insert_with(|| {
                inserted = true;
                Counter {
                    hit_count: 1,
                    first_seen: now,
                    last_updated: now,
                }
            });

        if inserted {
            self.enforce_capacity();
        }

        Ok(())
    }

    async fn most_frequent(&self) -> Result<Option<StatsEntry>> {
        let mut best: Option<StatsEntry> = None;

        for entry in self.entries.iter() {
            let counter = entry.value();
            let is_better = best
                .as_ref()
                .map_or(true, |current| counter.hit_count > current.hit_count);

            if is_better {
                best = Some(StatsEntry {
                    params: entry.key().clone(),
                    hit_count: counter.hit_count,
                    first_seen: counter.first_seen,
                    last_updated: counter.last_updated,
                });
            }
        }

        Ok(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(a: i64, b: i64, limit: i64, ta: &str, tb: &str) -> SequenceParams {
        SequenceParams::new(a, b, limit, ta, tb).unwrap()
    }

    #[tokio::test]
    async fn record_creates_then_increments() {
        let repo = MemoryStatsRepository::new();
        let key = params(3, 5, 15, "fizz", "buzz");

        for _ in 0..7 {
            repo.record(&key).await.unwrap();
        }

        let entry = repo.most_frequent().await.unwrap().unwrap();
        assert_eq!(entry.hit_count, 7);
        assert_eq!(entry.params, key);
    }

    #[tokio::test]
    async fn most_frequent_picks_highest_regardless_of_order() {
        let repo = MemoryStatsRepository::new();
        let winner = params(2, 4, 8, "foo", "bar");
        let loser = params(3, 5, 15, "fizz", "buzz");

        for _ in 0..5 {
            repo.record(&winner).await.unwrap();
        }
        for _ in 0..3 {
            repo.record(&loser).await.unwrap();
        }

        let entry = repo.most_frequent().await.unwrap().unwrap();
        assert_eq!(entry.params, winner);
        assert_eq!(entry.hit_count, 5);
    }

    #[tokio::test]
    async fn empty_repository_returns_none() {
        let repo = MemoryStatsRepository::new();

        assert!(repo.most_frequent().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn swapped_divisors_are_separate_keys() {
        let repo = MemoryStatsRepository::new();
        let first = params(3, 5, 15, "fizz", "buzz");
        let second = params(5, 3, 15, "fizz", "buzz");

        repo.record(&first).await.unwrap();
        repo.record(&first).await.unwrap();
        repo.record(&second).await.unwrap();

        let entry = repo.most_frequent().await.unwrap().unwrap();
        assert_eq!(entry.params, first);
        assert_eq!(entry.hit_count, 2);
    }

    #[tokio::test]
    async fn ties_return_some_maximal_entry() {
        let repo = MemoryStatsRepository::new();
        let first = params(3, 5, 15, "fizz", "buzz");
        let second = params(7, 11, 20, "ping", "pong");

        repo.record(&first).await.unwrap();
        repo.record(&second).await.unwrap();

        let entry = repo.most_frequent().await.unwrap().unwrap();
        assert_eq!(entry.hit_count, 1);
        assert!(entry.params == first || entry.params == second);
    }

    #[tokio::test]
    async fn concurrent_records_lose_no_updates() {
        let repo = Arc::new(MemoryStatsRepository::new());
        let key = params(3, 5, 15, "fizz", "buzz");
        let mut handles = vec![];

        for _ in 0..10 {
            let repo = Arc::clone(&repo);
            let key = key.clone();
            handles.push(tokio::spawn(async move {
                for _ in 0..5 {
                    repo.record(&key).await.unwrap();
                }
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }

        let entry = repo.most_frequent().await.unwrap().unwrap();
        assert_eq!(entry.hit_count, 50);
    }

    #[tokio::test]
    async fn capacity_evicts_least_recently_updated() {
        let repo = MemoryStatsRepository::with_config(MemoryStatsConfig {
            max_entries: Some(2),
            ..MemoryStatsConfig::default()
        });

        let oldest = params(1, 2, 3, "a", "b");
        let middle = params(4, 5, 6, "c", "d");
        let newest = params(7, 8, 9, "e", "f");

        repo.record(&oldest).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        repo.record(&middle).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        repo.record(&newest).await.unwrap();

        assert_eq!(repo.entries.len(), 2);
        assert!(!repo.entries.contains_key(&oldest));
        assert!(repo.entries.contains_key(&middle));
        assert!(repo.entries.contains_key(&newest));
    }

    #[tokio::test]
    async fn refreshing_a_key_protects_it_from_eviction() {
        let repo = MemoryStatsRepository::with_config(MemoryStatsConfig {
            max_entries: Some(2),
            ..MemoryStatsConfig::default()
        });

        let first = params(1, 2, 3, "a", "b");
        let second = params(4, 5, 6, "c", "d");
        let third = params(7, 8, 9, "e", "f");

        repo.record(&first).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        repo.record(&second).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        // Refreshing `first` makes `second` the eviction candidate.
        repo.record(&first).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        repo.record(&third).await.unwrap();

        assert!(repo.entries.contains_key(&first));
        assert!(!repo.entries.contains_key(&second));
        assert!(repo.entries.contains_key(&third));
    }

    #[tokio::test]
    async fn sweep_expires_stale_entries() {
        let repo = MemoryStatsRepository::with_config(MemoryStatsConfig {
            ttl: Some(Duration::from_millis(100)),
            sweep_interval: Duration::from_millis(25),
            ..MemoryStatsConfig::default()
        });

        repo.record(&params(3, 5, 15, "fizz", "buzz")).await.unwrap();
        assert!(repo.most_frequent().await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(400)).await;

        assert!(repo.most_frequent().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn sweep_keeps_fresh_entries() {
        let repo = MemoryStatsRepository::with_config(MemoryStatsConfig {
            ttl: Some(Duration::from_secs(3600)),
            sweep_interval: Duration::from_millis(25),
            ..MemoryStatsConfig::default()
        });

        repo.record(&params(3, 5, 15, "fizz", "buzz")).await.unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(repo.most_frequent().await.unwrap().is_some());
    }
}

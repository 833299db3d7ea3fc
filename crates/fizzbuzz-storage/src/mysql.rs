use async_trait::async_trait;
use fizzbuzz_core::error::StorageError;
use fizzbuzz_core::repository::{Result, StatsRepository};
use fizzbuzz_core::{SequenceParams, StatsEntry};
use jiff::Timestamp;
use sqlx::{MySqlPool, Row};

/// MySQL implementation of the statistics repository.
///
/// `record` is a single upsert against a unique index over the five
/// parameter columns. The statement's implicit transaction plus the
/// index's row locking serializes concurrent increments of the same key,
/// so no updates are lost between near-simultaneous recordings.
#[derive(Debug, Clone)]
pub struct MySqlStatsRepository {
    pool: MySqlPool,
}

impl MySqlStatsRepository {
    /// Creates a repository from an existing MySQL connection pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Creates a repository by opening a new MySQL connection pool.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = MySqlPool::connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

fn now_unix_seconds() -> i64 {
    Timestamp::now().as_second()
}

fn parse_timestamp(column: &str, seconds: i64) -> Result<Timestamp> {
    Timestamp::from_second(seconds).map_err(|e| {
        StorageError::InvalidData(format!("invalid {} timestamp '{}': {e}", column, seconds))
    })
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

#[async_trait]
impl StatsRepository for MySqlStatsRepository {
    async fn record(&self, params: &SequenceParams) -> Result<()> {
        let now = now_unix_seconds();

        sqlx::query(
            r#"
            INSERT INTO fizzbuzz_stats
                (divisor_a, divisor_b, sequence_limit, token_a, token_b,
                 hit_count, first_seen, last_updated)
            VALUES (?, ?, ?, ?, ?, 1, ?, ?)
            ON DUPLICATE KEY UPDATE
                hit_count = hit_count + 1,
                last_updated = ?
            "#,
        )
        .bind(params.divisor_a())
        .bind(params.divisor_b())
        .bind(params.limit())
        .bind(params.token_a())
        .bind(params.token_b())
        .bind(now)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn most_frequent(&self) -> Result<Option<StatsEntry>> {
        let row = sqlx::query(
            r#"
            SELECT divisor_a, divisor_b, sequence_limit, token_a, token_b,
                   hit_count, first_seen, last_updated
            FROM fizzbuzz_stats
            ORDER BY hit_count DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let divisor_a: i64 = row.try_get("divisor_a").map_err(map_sqlx_error)?;
        let divisor_b: i64 = row.try_get("divisor_b").map_err(map_sqlx_error)?;
        let limit: i64 = row.try_get("sequence_limit").map_err(map_sqlx_error)?;
        let token_a: String = row.try_get("token_a").map_err(map_sqlx_error)?;
        let token_b: String = row.try_get("token_b").map_err(map_sqlx_error)?;
        let hit_count: u64 = row.try_get("hit_count").map_err(map_sqlx_error)?;
        let first_seen_raw: i64 = row.try_get("first_seen").map_err(map_sqlx_error)?;
        let last_updated_raw: i64 = row.try_get("last_updated").map_err(map_sqlx_error)?;

        let params = SequenceParams::new(divisor_a, divisor_b, limit, token_a, token_b)
            .map_err(|e| StorageError::InvalidData(e.to_string()))?;

        Ok(Some(StatsEntry {
            params,
            hit_count,
            first_seen: parse_timestamp("first_seen", first_seen_raw)?,
            last_updated: parse_timestamp("last_updated", last_updated_raw)?,
        }))
    }
}

use clap::{Parser, ValueEnum};
use fizzbuzz_service::RecordingPolicy;
use fizzbuzz_storage::MemoryStatsConfig;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::time::Duration;

pub const LISTEN_ADDR_ENV: &str = "FIZZBUZZ_GATEWAY_LISTEN_ADDR";
pub const STORAGE_BACKEND_ENV: &str = "FIZZBUZZ_STORAGE_BACKEND";
pub const MYSQL_DSN_ENV: &str = "FIZZBUZZ_MYSQL_DSN";
pub const STATS_MAX_ENTRIES_ENV: &str = "FIZZBUZZ_STATS_MAX_ENTRIES";
pub const STATS_TTL_SECONDS_ENV: &str = "FIZZBUZZ_STATS_TTL_SECONDS";
pub const STATS_SWEEP_INTERVAL_SECONDS_ENV: &str = "FIZZBUZZ_STATS_SWEEP_INTERVAL_SECONDS";
pub const RECORD_TIMEOUT_SECONDS_ENV: &str = "FIZZBUZZ_RECORD_TIMEOUT_SECONDS";
pub const RECORD_MAX_IN_FLIGHT_ENV: &str = "FIZZBUZZ_RECORD_MAX_IN_FLIGHT";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "mysql")]
    Mysql,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Mysql => write!(f, "mysql"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "fizzbuzz-gateway")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::InMemory
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = MYSQL_DSN_ENV, required_if_eq("storage", "mysql"))]
    pub mysql_dsn: Option<String>,

    /// Cap on distinct parameter combinations kept by the in-memory backend.
    #[arg(long, env = STATS_MAX_ENTRIES_ENV)]
    pub stats_max_entries: Option<usize>,

    /// Expire in-memory entries not updated for this many seconds.
    #[arg(long, env = STATS_TTL_SECONDS_ENV)]
    pub stats_ttl_seconds: Option<u64>,

    #[arg(long, env = STATS_SWEEP_INTERVAL_SECONDS_ENV, default_value_t = 60)]
    pub stats_sweep_interval_seconds: u64,

    /// Deadline for a single detached statistics recording.
    #[arg(long, env = RECORD_TIMEOUT_SECONDS_ENV, default_value_t = 5)]
    pub record_timeout_seconds: u64,

    /// Cap on concurrently outstanding statistics recordings.
    #[arg(long, env = RECORD_MAX_IN_FLIGHT_ENV, default_value_t = 256)]
    pub record_max_in_flight: usize,
}

impl CLI {
    pub fn memory_config(&self) -> MemoryStatsConfig {
        MemoryStatsConfig {
            max_entries: self.stats_max_entries,
            ttl: self.stats_ttl_seconds.map(Duration::from_secs),
            sweep_interval: Duration::from_secs(self.stats_sweep_interval_seconds),
        }
    }

    pub fn recording_policy(&self) -> RecordingPolicy {
        RecordingPolicy {
            max_in_flight: self.record_max_in_flight,
            timeout: Duration::from_secs(self.record_timeout_seconds),
        }
    }
}

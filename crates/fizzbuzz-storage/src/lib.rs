pub mod memory;
pub mod mysql;

pub use memory::{MemoryStatsConfig, MemoryStatsRepository};
pub use mysql::MySqlStatsRepository;

use fizzbuzz_core::{SequenceParams, StatsEntry};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub request: SequenceParams,
    pub hit_count: u64,
}

impl From<StatsEntry> for StatsResponse {
    fn from(entry: StatsEntry) -> Self {
        Self {
            request: entry.params,
            hit_count: entry.hit_count,
        }
    }
}

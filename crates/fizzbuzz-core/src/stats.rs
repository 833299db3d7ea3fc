use crate::params::SequenceParams;
use jiff::Timestamp;
use serde::Serialize;

/// A request-frequency record for one parameter combination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsEntry {
    /// The exact parameter combination the entry counts.
    pub params: SequenceParams,
    /// How often the combination has been requested.
    pub hit_count: u64,
    /// When the combination was first recorded.
    pub first_seen: Timestamp,
    /// When the combination was last recorded.
    pub last_updated: Timestamp,
}

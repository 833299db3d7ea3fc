//! Core types and traits for the FizzBuzz API.
//!
//! This crate provides the validated request parameters, the sequence
//! generation algorithm, and the statistics storage contract shared by
//! the service and gateway crates.

pub mod error;
pub mod params;
pub mod repository;
pub mod sequence;
pub mod stats;

pub use error::{InvalidParameter, ParamField, StorageError};
pub use params::SequenceParams;
pub use repository::StatsRepository;
pub use stats::StatsEntry;

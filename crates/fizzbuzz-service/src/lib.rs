//! FizzBuzz service implementations.
//!
//! This crate provides the request-handling services: sequence generation
//! with detached statistics recording, and the synchronous statistics
//! query path. Core types are re-exported from `fizzbuzz_core`.

pub mod fizzbuzz;
pub mod stats;

pub use fizzbuzz::{FizzBuzzService, Generated, RecordingPolicy};
pub use stats::StatsService;

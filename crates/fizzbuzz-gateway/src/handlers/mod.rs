mod fizzbuzz;
mod health;
mod stats;

pub use fizzbuzz::fizzbuzz_handler;
pub use health::health_handler;
pub use stats::stats_handler;

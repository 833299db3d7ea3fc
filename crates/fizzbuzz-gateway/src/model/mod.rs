mod fizzbuzz;
mod health;
mod stats;

pub use fizzbuzz::{FizzBuzzRequest, FizzBuzzResponse};
pub use health::HealthResponse;
pub use stats::StatsResponse;

use std::sync::Arc;

use fizzbuzz_core::StatsRepository;
use fizzbuzz_service::{FizzBuzzService, RecordingPolicy, StatsService};

/// Shared handler state: both services over one repository.
pub struct AppState<R> {
    fizzbuzz: FizzBuzzService<R>,
    stats: StatsService<R>,
}

impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            fizzbuzz: self.fizzbuzz.clone(),
            stats: self.stats.clone(),
        }
    }
}

impl<R: StatsRepository> AppState<R> {
    pub fn new(repository: Arc<R>, policy: RecordingPolicy) -> Self {
        Self {
            fizzbuzz: FizzBuzzService::with_policy(Arc::clone(&repository), policy),
            stats: StatsService::new(repository),
        }
    }

    pub fn fizzbuzz(&self) -> &FizzBuzzService<R> {
        &self.fizzbuzz
    }

    pub fn stats(&self) -> &StatsService<R> {
        &self.stats
    }
}

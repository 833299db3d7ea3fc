use fizzbuzz_core::{InvalidParameter, SequenceParams};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct FizzBuzzRequest {
    pub divisor_a: i64,
    pub divisor_b: i64,
    pub limit: i64,
    pub token_a: String,
    pub token_b: String,
}

impl FizzBuzzRequest {
    /// Validates the raw body into core parameters.
    pub fn into_params(self) -> Result<SequenceParams, InvalidParameter> {
        SequenceParams::new(
            self.divisor_a,
            self.divisor_b,
            self.limit,
            self.token_a,
            self.token_b,
        )
    }
}

#[derive(Debug, Serialize)]
pub struct FizzBuzzResponse {
    pub result: Vec<String>,
    pub count: usize,
}

use crate::error::{InvalidParameter, ParamField};
use serde::{Deserialize, Serialize};

const MAX_LIMIT: i64 = 10_000;
const MAX_TOKEN_LENGTH: usize = 100;

/// The validated 5-tuple of request parameters.
///
/// Construction is the single validation point: a `SequenceParams` value
/// always satisfies its bounds, so downstream code never re-checks them.
/// The struct is also the statistics key — order-sensitive, so swapping
/// the two divisors yields a distinct key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSequenceParams")]
pub struct SequenceParams {
    divisor_a: i64,
    divisor_b: i64,
    limit: i64,
    token_a: String,
    token_b: String,
}

impl SequenceParams {
    /// Creates validated parameters.
    ///
    /// Divisors must be positive, `limit` must be in `1..=10000`, and both
    /// tokens must be 1-100 bytes long. Violations return an
    /// [`InvalidParameter`] naming the offending field; no clamping or
    /// silent correction is performed.
    pub fn new(
        divisor_a: i64,
        divisor_b: i64,
        limit: i64,
        token_a: impl Into<String>,
        token_b: impl Into<String>,
    ) -> Result<Self, InvalidParameter> {
        let token_a = token_a.into();
        let token_b = token_b.into();

        Self::validate_divisor(ParamField::DivisorA, divisor_a)?;
        Self::validate_divisor(ParamField::DivisorB, divisor_b)?;
        Self::validate_limit(limit)?;
        Self::validate_token(ParamField::TokenA, &token_a)?;
        Self::validate_token(ParamField::TokenB, &token_b)?;

        Ok(Self {
            divisor_a,
            divisor_b,
            limit,
            token_a,
            token_b,
        })
    }

    pub fn divisor_a(&self) -> i64 {
        self.divisor_a
    }

    pub fn divisor_b(&self) -> i64 {
        self.divisor_b
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn token_a(&self) -> &str {
        &self.token_a
    }

    pub fn token_b(&self) -> &str {
        &self.token_b
    }

    fn validate_divisor(field: ParamField, value: i64) -> Result<(), InvalidParameter> {
        if value < 1 {
            return Err(InvalidParameter::new(
                field,
                format!("must be greater than 0, got {}", value),
            ));
        }
        Ok(())
    }

    fn validate_limit(value: i64) -> Result<(), InvalidParameter> {
        if !(1..=MAX_LIMIT).contains(&value) {
            return Err(InvalidParameter::new(
                ParamField::Limit,
                format!("must be between 1 and {}, got {}", MAX_LIMIT, value),
            ));
        }
        Ok(())
    }

    fn validate_token(field: ParamField, value: &str) -> Result<(), InvalidParameter> {
        if value.is_empty() || value.len() > MAX_TOKEN_LENGTH {
            return Err(InvalidParameter::new(
                field,
                format!(
                    "must be between 1 and {} characters, got {}",
                    MAX_TOKEN_LENGTH,
                    value.len()
                ),
            ));
        }
        Ok(())
    }
}

/// Unvalidated wire form, only used as the deserialization input.
#[derive(Deserialize)]
struct RawSequenceParams {
    divisor_a: i64,
    divisor_b: i64,
    limit: i64,
    token_a: String,
    token_b: String,
}

impl TryFrom<RawSequenceParams> for SequenceParams {
    type Error = InvalidParameter;

    fn try_from(raw: RawSequenceParams) -> Result<Self, Self::Error> {
        SequenceParams::new(
            raw.divisor_a,
            raw.divisor_b,
            raw.limit,
            raw.token_a,
            raw.token_b,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_params() {
        assert!(SequenceParams::new(3, 5, 15, "fizz", "buzz").is_ok());
        assert!(SequenceParams::new(1, 1, 1, "a", "b").is_ok());
        assert!(SequenceParams::new(7, 11, 10_000, "x".repeat(100), "y").is_ok());
    }

    #[test]
    fn rejects_non_positive_divisors() {
        let err = SequenceParams::new(0, 5, 15, "fizz", "buzz").unwrap_err();
        assert_eq!(err.field, ParamField::DivisorA);

        let err = SequenceParams::new(3, -2, 15, "fizz", "buzz").unwrap_err();
        assert_eq!(err.field, ParamField::DivisorB);
    }

    #[test]
    fn rejects_limit_out_of_bounds() {
        let err = SequenceParams::new(3, 5, 0, "fizz", "buzz").unwrap_err();
        assert_eq!(err.field, ParamField::Limit);

        let err = SequenceParams::new(3, 5, 10_001, "fizz", "buzz").unwrap_err();
        assert_eq!(err.field, ParamField::Limit);
    }

    #[test]
    fn rejects_bad_tokens() {
        let err = SequenceParams::new(3, 5, 15, "", "buzz").unwrap_err();
        assert_eq!(err.field, ParamField::TokenA);

        let err = SequenceParams::new(3, 5, 15, "fizz", "b".repeat(101)).unwrap_err();
        assert_eq!(err.field, ParamField::TokenB);
    }

    #[test]
    fn swapped_divisors_are_distinct_keys() {
        let a = SequenceParams::new(3, 5, 15, "fizz", "buzz").unwrap();
        let b = SequenceParams::new(5, 3, 15, "fizz", "buzz").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn deserialization_validates() {
        let ok: Result<SequenceParams, _> = serde_json::from_str(
            r#"{"divisor_a":3,"divisor_b":5,"limit":15,"token_a":"fizz","token_b":"buzz"}"#,
        );
        assert!(ok.is_ok());

        let err: Result<SequenceParams, _> = serde_json::from_str(
            r#"{"divisor_a":0,"divisor_b":5,"limit":15,"token_a":"fizz","token_b":"buzz"}"#,
        );
        assert!(err.is_err());
    }
}

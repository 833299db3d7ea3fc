use crate::params::SequenceParams;

/// Generates the substitution sequence for validated parameters.
///
/// Element `i` (1-based, up to `limit` inclusive) renders as both tokens
/// concatenated when both divisors divide `i`, a single token when only
/// one does, and the decimal form of `i` otherwise. `divisor_a` is always
/// evaluated before `divisor_b`.
///
/// Pure CPU work: deterministic, no I/O, no shared state, safe to call
/// from any number of tasks without synchronization.
pub fn generate(params: &SequenceParams) -> Vec<String> {
    let mut result = Vec::with_capacity(params.limit() as usize);

    for i in 1..=params.limit() {
        let multiple_of_a = i % params.divisor_a() == 0;
        let multiple_of_b = i % params.divisor_b() == 0;

        let value = match (multiple_of_a, multiple_of_b) {
            (true, true) => format!("{}{}", params.token_a(), params.token_b()),
            (true, false) => params.token_a().to_owned(),
            (false, true) => params.token_b().to_owned(),
            (false, false) => i.to_string(),
        };

        result.push(value);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(a: i64, b: i64, limit: i64, ta: &str, tb: &str) -> SequenceParams {
        SequenceParams::new(a, b, limit, ta, tb).unwrap()
    }

    #[test]
    fn classic_fizzbuzz() {
        let sequence = generate(&params(3, 5, 15, "fizz", "buzz"));

        assert_eq!(
            sequence,
            vec![
                "1", "2", "fizz", "4", "buzz", "fizz", "7", "8", "fizz", "buzz", "11", "fizz",
                "13", "14", "fizzbuzz"
            ]
        );
        assert_eq!(sequence.len(), 15);
    }

    #[test]
    fn custom_tokens_and_divisors() {
        let sequence = generate(&params(2, 4, 8, "foo", "bar"));

        assert_eq!(
            sequence,
            vec!["1", "foo", "3", "foobar", "5", "foo", "7", "foobar"]
        );
    }

    #[test]
    fn four_way_rule_holds_for_every_index() {
        let p = params(3, 7, 100, "a", "b");
        let sequence = generate(&p);

        for (idx, value) in sequence.iter().enumerate() {
            let i = idx as i64 + 1;
            let expected = match (i % 3 == 0, i % 7 == 0) {
                (true, true) => "ab".to_string(),
                (true, false) => "a".to_string(),
                (false, true) => "b".to_string(),
                (false, false) => i.to_string(),
            };
            assert_eq!(*value, expected, "mismatch at index {}", i);
        }
    }

    #[test]
    fn is_deterministic() {
        let p = params(3, 5, 1000, "fizz", "buzz");

        let first = generate(&p);
        let second = generate(&p);

        assert_eq!(first, second);
    }

    #[test]
    fn equal_divisors_always_emit_both_tokens() {
        let sequence = generate(&params(4, 4, 8, "fizz", "buzz"));

        assert_eq!(
            sequence,
            vec!["1", "2", "3", "fizzbuzz", "5", "6", "7", "fizzbuzz"]
        );
    }

    #[test]
    fn equal_tokens_double_up_on_dual_multiples() {
        let sequence = generate(&params(2, 3, 6, "ha", "ha"));

        assert_eq!(sequence, vec!["1", "ha", "ha", "ha", "5", "haha"]);
    }

    #[test]
    fn limit_of_one() {
        assert_eq!(generate(&params(3, 5, 1, "fizz", "buzz")), vec!["1"]);
    }

    #[test]
    fn divisor_of_one_substitutes_everywhere() {
        let sequence = generate(&params(1, 5, 5, "x", "y"));

        assert_eq!(sequence, vec!["x", "x", "x", "x", "xy"]);
    }
}

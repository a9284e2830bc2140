//! `HasTriple`: does the array contain three equal values in a row?

use rand::Rng;
use rand::rngs::StdRng;

use crate::core::case_result::CaseResult;
use crate::core::value::Value;
use crate::error::Result;
use crate::loader::{Implementation, ParamKind, ReturnKind, Signature};
use crate::runners::Runner;

/// Cases per evaluation.
pub const CASES: usize = 10;
/// Length of every generated array.
pub const LENGTH: usize = 7;
/// Elements are drawn from `0..VALUE_BOUND`.
pub const VALUE_BOUND: i32 = 10;
/// Run lengths are drawn from `0..RUN_BOUND`. A run of 0 appends nothing.
const RUN_BOUND: usize = 3;

const SIGNATURE: Signature = Signature {
    name: "has_triple",
    param: ParamKind::IntArray,
    returns: ReturnKind::Bool,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct HasTriple;

impl Runner for HasTriple {
    fn id(&self) -> &'static str {
        "HasTriple"
    }

    fn signature(&self) -> Signature {
        SIGNATURE
    }

    fn try_results(
        &self,
        implementation: &dyn Implementation,
        rng: &mut StdRng,
    ) -> Result<Vec<CaseResult>> {
        let mut results = Vec::with_capacity(CASES);
        for _ in 0..CASES {
            let nums = generate(rng);
            let input = Value::int_array(&nums);
            let actual = implementation.invoke(&SIGNATURE, &input)?;
            results.push(CaseResult::new(actual, has_triple(&nums), input.to_string()));
        }
        Ok(results)
    }
}

/// Build a `LENGTH` array out of short runs of equal values, so that a
/// triple only shows up when two runs of the same value happen to touch.
pub fn generate(rng: &mut StdRng) -> Vec<i32> {
    let mut nums = Vec::with_capacity(LENGTH);
    while nums.len() < LENGTH {
        let value = rng.gen_range(0..VALUE_BOUND);
        let run = rng.gen_range(0..RUN_BOUND).min(LENGTH - nums.len());
        nums.extend(std::iter::repeat_n(value, run));
    }
    nums
}

/// Reference answer.
pub fn has_triple(nums: &[i32]) -> bool {
    nums.windows(3)
        .any(|window| window[0] == window[1] && window[1] == window[2])
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;
    use crate::error::HarnessError;
    use crate::test_support::NativeImplementation;

    fn seeded() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn reference_detects_triples() {
        assert!(has_triple(&[3, 3, 3, 1, 2, 2, 5]));
        assert!(!has_triple(&[1, 2, 3, 4, 5, 6, 7]));
        assert!(has_triple(&[5, 5, 1, 1, 2, 2, 2]));
        assert!(!has_triple(&[1, 1]));
        assert!(!has_triple(&[]));
    }

    #[test]
    fn reference_is_pure() {
        let mut rng = seeded();
        for _ in 0..200 {
            let nums = generate(&mut rng);
            assert_eq!(has_triple(&nums), has_triple(&nums));
        }
    }

    #[test]
    fn generated_arrays_stay_in_bounds() {
        let mut rng = StdRng::from_entropy();
        for _ in 0..1_000 {
            let nums = generate(&mut rng);
            assert_eq!(nums.len(), LENGTH);
            assert!(nums.iter().all(|value| (0..VALUE_BOUND).contains(value)));
        }
    }

    #[test]
    fn correct_implementation_passes_every_case() {
        let implementation = NativeImplementation::int_array_to_bool(has_triple);
        let results = HasTriple.results(&implementation, &mut seeded());
        assert_eq!(results.len(), CASES);
        assert!(results.iter().all(CaseResult::passed));
    }

    #[test]
    fn wrong_implementation_is_reported_per_case() {
        let implementation = NativeImplementation::int_array_to_bool(|_| false);
        let mut rng = seeded();
        let results = HasTriple.results(&implementation, &mut rng);
        assert_eq!(results.len(), CASES);
        for result in &results {
            assert_eq!(result.actual(), &Value::Bool(false));
        }
    }

    #[test]
    fn failure_yields_empty_results() {
        let implementation = NativeImplementation::failing("boom");
        let results = HasTriple.results(&implementation, &mut seeded());
        assert!(results.is_empty());

        let err = HasTriple
            .try_results(&implementation, &mut seeded())
            .expect_err("failure");
        assert!(matches!(err, HarnessError::Invocation(_)));
    }

    #[test]
    fn same_seed_same_inputs() {
        let implementation = NativeImplementation::int_array_to_bool(has_triple);
        let first = HasTriple.results(&implementation, &mut seeded());
        let second = HasTriple.results(&implementation, &mut seeded());
        assert_eq!(first, second);
    }
}

use serde::Serialize;

use crate::core::case_result::CaseResult;

/// Classification of a finished evaluation.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Every case passed.
    Complete,
    /// At least one case failed.
    Failed,
    /// No results were produced; the implementation could not be evaluated.
    Unevaluated,
}

/// Pass/fail counts over a result sequence.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Tally {
    pub total: usize,
    pub passed: usize,
}

impl Tally {
    pub fn of(results: &[CaseResult]) -> Self {
        Self {
            total: results.len(),
            passed: results.iter().filter(|result| result.passed()).count(),
        }
    }

    pub fn verdict(&self) -> Verdict {
        if self.total == 0 {
            Verdict::Unevaluated
        } else if self.passed == self.total {
            Verdict::Complete
        } else {
            Verdict::Failed
        }
    }
}

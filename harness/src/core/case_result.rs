//! Outcome of a single generated test case.

use serde::Serialize;

use crate::core::value::Value;

/// One case: what the user code returned, what the reference computed, and
/// the rendered input. Fields are fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseResult {
    actual: Value,
    expected: Value,
    input: String,
}

impl CaseResult {
    pub fn new(actual: impl Into<Value>, expected: impl Into<Value>, input: String) -> Self {
        Self {
            actual: actual.into(),
            expected: expected.into(),
            input,
        }
    }

    pub fn actual(&self) -> &Value {
        &self.actual
    }

    pub fn expected(&self) -> &Value {
        &self.expected
    }

    /// Human-readable rendering of the input that produced this case.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// A case passes when the actual value deep-equals the expected value.
    pub fn passed(&self) -> bool {
        self.actual == self.expected
    }
}

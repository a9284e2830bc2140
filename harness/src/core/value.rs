//! Values exchanged between runners and user implementations.

use std::fmt;

use serde::Serialize;

/// A value passed to or returned from an exercise operation.
///
/// Equality is structural: arrays compare element-wise, never by identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i32),
    Array(Vec<Value>),
}

impl Value {
    /// Build an array of ints.
    pub fn int_array(items: &[i32]) -> Self {
        Value::Array(items.iter().copied().map(Value::Int).collect())
    }

    /// Returns the elements if this value is an array made only of ints.
    pub fn as_int_array(&self) -> Option<Vec<i32>> {
        match self {
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::Int(value) => Some(*value),
                    _ => None,
                })
                .collect(),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(value) => write!(f, "{value}"),
            Value::Int(value) => write!(f, "{value}"),
            Value::Array(items) => {
                write!(f, "[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrays_compare_element_wise() {
        assert_eq!(Value::int_array(&[1, 2, 3]), Value::int_array(&[1, 2, 3]));
        assert_ne!(Value::int_array(&[1, 2, 3]), Value::int_array(&[1, 2, 4]));
        assert_ne!(Value::int_array(&[1, 2]), Value::int_array(&[1, 2, 3]));
    }

    #[test]
    fn scalars_of_different_kinds_differ() {
        assert_ne!(Value::Bool(true), Value::Int(1));
    }

    #[test]
    fn renders_arrays_with_brackets() {
        let rendered = Value::int_array(&[3, 3, 3, 1, 2, 2, 5]).to_string();
        assert_eq!(rendered, "[3, 3, 3, 1, 2, 2, 5]");
        assert_eq!(Value::Array(Vec::new()).to_string(), "[]");
    }

    #[test]
    fn as_int_array_rejects_mixed_arrays() {
        let mixed = Value::Array(vec![Value::Int(1), Value::Bool(false)]);
        assert_eq!(mixed.as_int_array(), None);
        assert_eq!(Value::Int(1).as_int_array(), None);
        assert_eq!(Value::int_array(&[4, 5]).as_int_array(), Some(vec![4, 5]));
    }
}

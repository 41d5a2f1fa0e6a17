//! Property parameters (RFC 5545 §3.2).

use serde::Serialize;

/// A property parameter. Parameters may carry multiple values
/// (e.g. `MEMBER`, `DELEGATED-TO`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    /// Parameter name (normalized to uppercase).
    pub name: String,
    /// Values in order of appearance.
    pub values: Vec<String>,
}

impl Parameter {
    /// Creates a single-valued parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            values: vec![value.into()],
        }
    }

    /// Creates a parameter with multiple values.
    #[must_use]
    pub fn with_values(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            values,
        }
    }

    /// Creates a `TZID` parameter.
    #[must_use]
    pub fn tzid(value: impl Into<String>) -> Self {
        Self::new("TZID", value)
    }

    /// Creates a `VALUE` type parameter.
    #[must_use]
    pub fn value_type(value: impl Into<String>) -> Self {
        Self::new("VALUE", value)
    }

    /// Returns the first value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    /// ## Summary
    /// Compares this parameter's values to another's, ignoring order.
    /// Parameter values are compared case-insensitively except for quoted
    /// values, which the model does not distinguish; the diff treats
    /// parameter values as case-insensitive tokens per RFC 5545 §2.
    #[must_use]
    pub fn same_values(&self, other: &Self) -> bool {
        if self.values.len() != other.values.len() {
            return false;
        }
        let mut used = vec![false; other.values.len()];
        for value in &self.values {
            let found = other.values.iter().enumerate().find(|(i, candidate)| {
                !used[*i] && candidate.eq_ignore_ascii_case(value)
            });
            match found {
                Some((i, _)) => used[i] = true,
                None => return false,
            }
        }
        true
    }
}

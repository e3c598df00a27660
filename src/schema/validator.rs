//! # Request Validation
//!
//! Checks the request invariants that deserialization alone cannot express:
//! - Identifiers are non-empty
//! - Column lists are non-empty
//! - Row columns and values line up one-to-one
//! - Row values are JSON scalars

use serde_json::Value;

/// A request invariant that did not hold
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {violation}")]
pub struct ValidationError {
    /// Path of the offending field, e.g. `columns[2].name`
    pub field: String,
    pub violation: ViolationType,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, violation: ViolationType) -> Self {
        ValidationError {
            field: field.into(),
            violation,
        }
    }
}

/// Types of validation violations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationType {
    /// Required string was empty or whitespace
    Empty,
    /// Required list had no items
    NoItems,
    /// `columns` and `values` differ in length
    LengthMismatch { columns: usize, values: usize },
    /// Value was an array or object
    NotScalar,
}

impl std::fmt::Display for ViolationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViolationType::Empty => write!(f, "must not be empty"),
            ViolationType::NoItems => write!(f, "must contain at least one item"),
            ViolationType::LengthMismatch { columns, values } => write!(
                f,
                "expected {columns} value(s) to match columns, got {values}"
            ),
            ViolationType::NotScalar => {
                write!(f, "must be null, a boolean, a number or a string")
            }
        }
    }
}

/// Implemented by every request shape.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

pub(crate) fn non_empty(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, ViolationType::Empty));
    }
    Ok(())
}

pub(crate) fn has_items<T>(field: &str, items: &[T]) -> Result<(), ValidationError> {
    if items.is_empty() {
        return Err(ValidationError::new(field, ViolationType::NoItems));
    }
    Ok(())
}

pub(crate) fn same_length(columns: usize, values: usize) -> Result<(), ValidationError> {
    if columns != values {
        return Err(ValidationError::new(
            "values",
            ViolationType::LengthMismatch { columns, values },
        ));
    }
    Ok(())
}

pub(crate) fn scalars(field: &str, values: &[Value]) -> Result<(), ValidationError> {
    match values
        .iter()
        .position(|v| matches!(v, Value::Array(_) | Value::Object(_)))
    {
        Some(i) => Err(ValidationError::new(
            format!("{field}[{i}]"),
            ViolationType::NotScalar,
        )),
        None => Ok(()),
    }
}

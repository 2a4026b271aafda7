//! Structured field-level errors.

use caja_core::Violation;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field-level error map for one record: field name → messages.
///
/// An empty map means the record was accepted; batch responses carry
/// one map per submitted record so the slots line up with the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Creates an empty error map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message under the given field.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Returns true if no field has errors.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the messages recorded for a field, if any.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Builds the map from core validation violations.
    pub fn from_violations(violations: &[Violation]) -> Self {
        let mut errors = Self::new();
        for violation in violations {
            errors.push(violation.field.clone(), violation.message.clone());
        }
        errors
    }
}

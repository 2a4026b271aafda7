//! Field-level validation failures.
//!
//! Validation never aborts on the first failure: every broken field of
//! a record is collected so the client can fix them all in one retry.

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Name of the offending field as it appears on the wire.
    pub field: String,
    /// Human-readable description of the failure.
    pub message: String,
}

impl Violation {
    /// Creates a violation for the given field.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// All failures collected for one record.
pub type Violations = Vec<Violation>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn violation_fields() {
        let v = Violation::new("price", "must be greater than 0");
        assert_eq!(v.field, "price");
        assert_eq!(v.message, "must be greater than 0");
    }
}

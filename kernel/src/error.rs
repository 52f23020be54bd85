//! Typed kernel errors.

use thiserror::Error;

/// Construction-time failures for kernel value types.
///
/// Comparison and set operations never fail; only building a state from a
/// schema or resolving names can.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KernelError {
    /// A state field name is not declared in the schema.
    #[error("unknown state field `{name}`")]
    UnknownField { name: String },

    /// A state field was declared twice in one schema.
    #[error("duplicate state field `{name}`")]
    DuplicateField { name: String },

    /// A field was written with a value of the wrong kind.
    #[error("state field `{name}` is a {expected} field")]
    FieldKindMismatch { name: String, expected: &'static str },

    /// An integer field was written outside its declared bounds.
    #[error("value {value} for state field `{name}` is outside [{min}, {max}]")]
    FieldOutOfRange {
        name: String,
        value: i32,
        min: i32,
        max: i32,
    },

    /// An integer field was declared with `min > max`.
    #[error("state field `{name}` has empty range [{min}, {max}]")]
    EmptyRange { name: String, min: i32, max: i32 },

    /// A higher-is-better integer field whose minimum cannot be negated.
    #[error("state field `{name}` prefers higher values but its minimum {min} cannot be negated")]
    UnorientableRange { name: String, min: i32 },

    /// A position name was registered twice.
    #[error("duplicate position `{name}`")]
    DuplicatePosition { name: String },

    /// A position name is not registered.
    #[error("unknown position `{name}`")]
    UnknownPosition { name: String },
}

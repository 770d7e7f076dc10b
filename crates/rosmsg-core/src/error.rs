//! Error types for message type modelling and hashing

use thiserror::Error;

/// Result type alias for type model operations
pub type TypeResult<T> = Result<T, TypeError>;

/// Error type for message type modelling, resolution and hashing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// A type reference could not be parsed
    #[error("invalid type reference: {0}")]
    InvalidTypeReference(String),

    /// Constants may only use built-in types
    #[error("constant {constant} must have a built-in type, got {type_ref}")]
    InvalidConstant { constant: String, type_ref: String },

    /// A field references a type missing from the resolved dependency list
    #[error("{type_name}: field {field} references {dependency} which is not a resolved dependency")]
    UnresolvedDependency {
        type_name: String,
        field: String,
        dependency: String,
    },

    /// Hash input contains characters that cannot be encoded as ASCII
    #[error("{type_name}: non-ASCII text in hash input: {text}")]
    NonAsciiInput { type_name: String, text: String },

    /// Message types reference each other in a cycle
    #[error("circular type dependency: {chain}")]
    CircularTypeDependency { chain: String },

    /// A referenced type has no known definition
    #[error("unknown type {type_name} referenced by {referenced_by}")]
    UnknownType {
        type_name: String,
        referenced_by: String,
    },

    /// The same type was defined twice
    #[error("duplicate type definition: {0}")]
    DuplicateType(String),
}

impl TypeError {
    /// Returns a stable numeric code for this error kind
    pub fn error_code(&self) -> u32 {
        match self {
            TypeError::InvalidTypeReference(_) => 1,
            TypeError::InvalidConstant { .. } => 2,
            TypeError::UnresolvedDependency { .. } => 3,
            TypeError::NonAsciiInput { .. } => 4,
            TypeError::CircularTypeDependency { .. } => 5,
            TypeError::UnknownType { .. } => 6,
            TypeError::DuplicateType(_) => 7,
        }
    }
}

//! Error types for the code generation pipeline

use crate::lifecycle::ContextState;
use rosmsg_core::TypeError;
use rosmsg_package::PackageError;
use thiserror::Error;

/// Result type alias for code generation operations
pub type CodegenResult<T> = Result<T, CodegenError>;

/// Error type for parsing, ordering and generating message packages
#[derive(Error, Debug)]
pub enum CodegenError {
    /// No build sequence exists because build-set packages depend on each other in a cycle
    #[error(
        "can not identify build sequence, packages have a circular dependency: {}",
        remaining.join(", ")
    )]
    CircularPackageDependency { remaining: Vec<String> },

    /// Two packages with the same name in one context
    #[error("package with the same name already exists: {0}")]
    DuplicatePackage(String),

    /// A requested package was not discovered
    #[error("package {0} was not found")]
    MissingPackage(String),

    /// An operation was called in the wrong context state
    #[error("invalid state: expected {expected}, actual {actual}")]
    InvalidState {
        expected: ContextState,
        actual: ContextState,
    },

    /// A message file could not be parsed
    #[error("{package}: {file}:{line}: {message}")]
    Parse {
        package: String,
        file: String,
        line: usize,
        message: String,
    },

    /// Message type modelling or hashing failed
    #[error(transparent)]
    Type(#[from] TypeError),

    /// Package discovery or manifest reading failed
    #[error(transparent)]
    Package(#[from] PackageError),

    /// The generator failed for one package
    #[error("could not generate package {package} {version}: {message}")]
    Generator {
        package: String,
        version: String,
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CodegenError {
    /// Returns a stable numeric code for this error kind
    pub fn error_code(&self) -> u32 {
        match self {
            CodegenError::CircularPackageDependency { .. } => 1,
            CodegenError::DuplicatePackage(_) => 2,
            CodegenError::MissingPackage(_) => 3,
            CodegenError::InvalidState { .. } => 4,
            CodegenError::Parse { .. } => 5,
            CodegenError::Type(_) => 6,
            CodegenError::Package(_) => 7,
            CodegenError::Generator { .. } => 8,
            CodegenError::Io(_) => 9,
            CodegenError::Json(_) => 10,
        }
    }
}

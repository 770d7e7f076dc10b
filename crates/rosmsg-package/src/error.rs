//! Error types for package discovery and manifest reading.

use thiserror::Error;

/// Errors that can occur while locating or reading ROS packages.
#[derive(Debug, Error)]
pub enum PackageError {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `package.xml` is not well-formed XML.
    #[error("Malformed package.xml at {path}: {source}")]
    Xml {
        path: String,
        #[source]
        source: roxmltree::Error,
    },

    /// Directory has no `package.xml`.
    #[error("package.xml not found in {0}")]
    ManifestNotFound(String),

    /// `package.xml` is missing required content.
    #[error("Invalid package.xml at {path}: {message}")]
    InvalidManifest { path: String, message: String },

    /// Directory exists but is not a package folder.
    #[error("Directory {0} is not a ROS package folder (package.xml file is missing)")]
    NotAPackageFolder(String),

    /// Directory does not exist.
    #[error("Directory {0} does not exist")]
    DirectoryNotFound(String),
}

impl PackageError {
    /// Returns a stable numeric code for this error kind
    pub fn error_code(&self) -> u32 {
        match self {
            PackageError::Io(_) => 1,
            PackageError::Xml { .. } => 2,
            PackageError::ManifestNotFound(_) => 3,
            PackageError::InvalidManifest { .. } => 4,
            PackageError::NotAPackageFolder(_) => 5,
            PackageError::DirectoryNotFound(_) => 6,
        }
    }

    /// Check if the error means the requested location does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            PackageError::DirectoryNotFound(_) | PackageError::ManifestNotFound(_)
        )
    }
}

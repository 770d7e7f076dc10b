//! Process exit codes
//!
//! Codes are distinct small integers so they survive the 8-bit process
//! status.

use rosmsg_codegen::CodegenError;
use rosmsg_package::PackageError;

pub const SUCCESS: u8 = 0;
pub const INVALID_CONFIGURATION: u8 = 1;
pub const UNEXPECTED_ERROR: u8 = 2;
pub const PACKAGE_NOT_FOUND: u8 = 3;
pub const COULD_NOT_PROCESS_PACKAGE: u8 = 4;
pub const COULD_NOT_DETERMINE_BUILD_SEQUENCE: u8 = 5;

/// Exit code of a failed command
pub fn for_error(error: &anyhow::Error) -> u8 {
    if let Some(e) = error.downcast_ref::<CodegenError>() {
        return for_codegen_error(e);
    }

    if let Some(e) = error.downcast_ref::<PackageError>() {
        return for_package_error(e);
    }

    UNEXPECTED_ERROR
}

fn for_codegen_error(error: &CodegenError) -> u8 {
    match error {
        CodegenError::CircularPackageDependency { .. } => COULD_NOT_DETERMINE_BUILD_SEQUENCE,
        CodegenError::MissingPackage(_) => PACKAGE_NOT_FOUND,
        CodegenError::Package(e) => for_package_error(e),
        CodegenError::DuplicatePackage(_)
        | CodegenError::Parse { .. }
        | CodegenError::Type(_)
        | CodegenError::Generator { .. } => COULD_NOT_PROCESS_PACKAGE,
        CodegenError::InvalidState { .. } | CodegenError::Io(_) | CodegenError::Json(_) => {
            UNEXPECTED_ERROR
        }
    }
}

fn for_package_error(error: &PackageError) -> u8 {
    if error.is_not_found() {
        PACKAGE_NOT_FOUND
    } else {
        COULD_NOT_PROCESS_PACKAGE
    }
}

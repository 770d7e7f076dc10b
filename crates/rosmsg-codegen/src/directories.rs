//! Output and staging directories of a generation run
//!
//! Each package is generated into its own staging directory below a hidden
//! run directory in the output path. Finished artifacts are copied to the
//! output directory. The run directory is removed when the
//! [`CodeGenerationDirectories`] value drops, unless preservation was
//! requested.

use crate::error::CodegenResult;
use rosmsg_package::PackageInfo;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, info};

const STAGING_PREFIX: &str = ".rosmsg-";

/// Directories used while generating one package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDirectories {
    /// Final location of generated artifacts
    pub output_dir: PathBuf,
    /// Scratch space for intermediate files
    pub temp_dir: PathBuf,
}

/// Root directories of a generation run.
#[derive(Debug)]
pub struct CodeGenerationDirectories {
    output_dir: PathBuf,
    staging: Option<TempDir>,
    staging_path: PathBuf,
    preserve: bool,
}

impl CodeGenerationDirectories {
    /// Create the output directory if needed and a fresh staging directory in it.
    pub fn new(output_dir: impl Into<PathBuf>, preserve: bool) -> CodegenResult<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;

        let staging = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempdir_in(&output_dir)?;
        let staging_path = staging.path().to_path_buf();

        debug!(path = %staging_path.display(), preserve, "Created staging directory");

        Ok(Self {
            output_dir,
            staging: Some(staging),
            staging_path,
            preserve,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn staging_dir(&self) -> &Path {
        &self.staging_path
    }

    pub fn preserve(&self) -> bool {
        self.preserve
    }

    /// Create the staging directory of `package`.
    ///
    /// Names are `<name>-<version>` so repeated runs in a preserved
    /// directory never collide across versions.
    pub fn package_dirs(&self, package: &PackageInfo) -> CodegenResult<PackageDirectories> {
        let temp_dir = self
            .staging_path
            .join(format!("{}-{}", package.name, package.version));
        fs::create_dir_all(&temp_dir)?;

        Ok(PackageDirectories {
            output_dir: self.output_dir.clone(),
            temp_dir,
        })
    }
}

impl Drop for CodeGenerationDirectories {
    fn drop(&mut self) {
        let Some(staging) = self.staging.take() else {
            return;
        };

        if self.preserve {
            let path = staging.keep();
            info!(path = %path.display(), "Preserved generated sources");
        }
    }
}

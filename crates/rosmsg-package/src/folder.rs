//! Package folder discovery.
//!
//! A package folder is any directory containing a `package.xml`. Discovery
//! walks a search root depth-first and stops descending at the first package
//! folder on each branch.

use crate::PackageResult;
use crate::error::PackageError;
use crate::manifest::MANIFEST_FILE;
use crate::package::PackageInfo;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Whether a package must be built or is only available as a dependency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildStrategy {
    #[default]
    Mandatory,
    Optional,
}

/// A directory holding a `package.xml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageFolder {
    pub path: PathBuf,
    pub build_strategy: BuildStrategy,
}

impl PackageFolder {
    /// Validate that `path` is an existing package folder.
    pub fn new<P: AsRef<Path>>(path: P, build_strategy: BuildStrategy) -> PackageResult<Self> {
        let path = absolute_dir(path.as_ref())?;

        if !is_package_folder(&path) {
            return Err(PackageError::NotAPackageFolder(path.display().to_string()));
        }

        Ok(Self {
            path,
            build_strategy,
        })
    }

    /// Find every package folder below `base_path`.
    pub fn find<P: AsRef<Path>>(base_path: P, build_strategy: BuildStrategy) -> PackageResult<Vec<Self>> {
        let base_path = absolute_dir(base_path.as_ref())?;

        let mut folders = Vec::new();
        find_internal(&base_path, build_strategy, &mut folders)?;

        debug!(
            path = %base_path.display(),
            packages = folders.len(),
            strategy = ?build_strategy,
            "Discovered package folders"
        );

        Ok(folders)
    }

    /// Read the package metadata of this folder.
    pub fn package_info(&self) -> PackageResult<PackageInfo> {
        PackageInfo::from_folder(self)
    }
}

/// Check if a directory contains a `package.xml`.
pub fn is_package_folder(path: &Path) -> bool {
    path.join(MANIFEST_FILE).is_file()
}

/// Read every folder's package, dropping later folders whose package name
/// was already seen.
///
/// Folders that cannot be read are skipped with a warning when optional and
/// returned as an error when mandatory.
pub fn read_packages(folders: &[PackageFolder]) -> PackageResult<Vec<PackageInfo>> {
    let mut names = HashSet::new();
    let mut packages = Vec::new();

    for folder in folders {
        let package = match folder.package_info() {
            Ok(package) => package,
            Err(e) if folder.build_strategy == BuildStrategy::Optional => {
                warn!(path = %folder.path.display(), error = %e, "Skipping unreadable optional package");
                continue;
            }
            Err(e) => return Err(e),
        };

        if !names.insert(package.name.clone()) {
            debug!(
                package = %package.name,
                path = %folder.path.display(),
                "Ignoring duplicate package"
            );
            continue;
        }

        packages.push(package);
    }

    Ok(packages)
}

/// Split a `ROS_PACKAGE_PATH`-style list on `:` and drop empty entries.
pub fn split_search_path(value: &str) -> Vec<PathBuf> {
    value
        .split(':')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}

fn absolute_dir(path: &Path) -> PackageResult<PathBuf> {
    if !path.is_dir() {
        return Err(PackageError::DirectoryNotFound(path.display().to_string()));
    }

    Ok(fs::canonicalize(path)?)
}

fn find_internal(
    path: &Path,
    build_strategy: BuildStrategy,
    folders: &mut Vec<PackageFolder>,
) -> PackageResult<()> {
    if is_package_folder(path) {
        folders.push(PackageFolder {
            path: path.to_path_buf(),
            build_strategy,
        });
        return Ok(());
    }

    let mut directories = Vec::new();
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            directories.push(entry.path());
        }
    }
    directories.sort();

    for directory in directories {
        find_internal(&directory, build_strategy, folders)?;
    }

    Ok(())
}

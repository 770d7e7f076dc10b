//! Package folder assembly for `build` and `order`

use anyhow::Result;
use rosmsg_codegen::CodeGenerationContext;
use rosmsg_package::{BuildStrategy, PackageFilter, PackageFolder};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Where packages are searched
#[derive(Debug, Clone, Default)]
pub struct SearchPaths {
    /// Root of the packages to build
    pub package_path: PathBuf,
    /// Roots of packages available as dependencies
    pub dependency_paths: Vec<PathBuf>,
    /// Entries of `ROS_PACKAGE_PATH`, already split
    pub ros_package_path: Vec<PathBuf>,
    pub ignore_ros_package_path: bool,
}

impl SearchPaths {
    /// Every package folder, main path first.
    ///
    /// The main path must exist. Missing dependency roots are skipped with a
    /// warning.
    pub fn folders(&self) -> Result<Vec<PackageFolder>> {
        let mut folders = PackageFolder::find(&self.package_path, BuildStrategy::Mandatory)?;

        let optional_roots = self.dependency_paths.iter().chain(
            self.ros_package_path
                .iter()
                .filter(|_| !self.ignore_ros_package_path),
        );

        for root in optional_roots {
            folders.extend(find_optional(root));
        }

        Ok(folders)
    }
}

fn find_optional(root: &Path) -> Vec<PackageFolder> {
    match PackageFolder::find(root, BuildStrategy::Optional) {
        Ok(folders) => folders,
        Err(e) => {
            warn!(path = %root.display(), error = %e, "Skipping dependency path");
            Vec::new()
        }
    }
}

/// Discover, parse and filter the packages of a run.
pub fn load_context(paths: &SearchPaths, filter: &PackageFilter) -> Result<CodeGenerationContext> {
    let folders = paths.folders()?;
    let mut context = CodeGenerationContext::from_folders(&folders)?;

    context.parse_messages()?;
    context.apply_filter(filter)?;

    if filter.is_empty() {
        info!(packages = context.packages().len(), "Selected packages");
    } else {
        info!(
            packages = context.packages().len(),
            filter = %filter,
            "Selected packages matching filter"
        );
    }

    Ok(context)
}

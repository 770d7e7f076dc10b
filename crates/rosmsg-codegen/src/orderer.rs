//! Dependency-ordered build sequence
//!
//! Packages are ordered in rounds. Each round scans the packages not yet
//! queued, in input order, and queues every package whose build-set
//! dependencies are already queued. Dependencies outside the build set and
//! self references never block. A round that queues nothing means the
//! remaining packages form a cycle.

use crate::context::CodeGenerationPackageContext;
use crate::error::{CodegenError, CodegenResult};
use std::collections::HashSet;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use tracing::{debug, trace};

/// Computes and caches the build order of a package set.
///
/// The cached order is reused until the package set changes, detected by a
/// structural hash over package names, versions and dependencies.
#[derive(Debug, Default)]
pub struct BuildOrderer {
    packages_hash: Option<u64>,
    order: Vec<usize>,
}

impl BuildOrderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Packages in build order.
    pub fn packages<'a>(
        &mut self,
        packages: &'a [CodeGenerationPackageContext],
    ) -> CodegenResult<Vec<&'a CodeGenerationPackageContext>> {
        if self.has_changed(packages) {
            self.sort(packages)?;
        }

        Ok(self
            .order
            .iter()
            .filter_map(|&index| packages.get(index))
            .collect())
    }

    /// Check if the cached order is stale for `packages`.
    pub fn has_changed(&self, packages: &[CodeGenerationPackageContext]) -> bool {
        self.packages_hash != Some(calculate_hash(packages))
    }

    /// Recompute the order for `packages` and cache it.
    pub fn sort(&mut self, packages: &[CodeGenerationPackageContext]) -> CodegenResult<()> {
        let hash = calculate_hash(packages);
        let order = build_sequence(packages)?;

        debug!(
            order = ?order.iter().filter_map(|&i| packages.get(i)).map(|p| p.name()).collect::<Vec<_>>(),
            "Determined build sequence"
        );

        self.order = order;
        self.packages_hash = Some(hash);
        Ok(())
    }
}

/// Indices of `packages` in build order.
pub fn build_sequence(packages: &[CodeGenerationPackageContext]) -> CodegenResult<Vec<usize>> {
    let build_set: HashSet<&str> = packages.iter().map(|p| p.name()).collect();

    let mut queued = vec![false; packages.len()];
    let mut queued_names: HashSet<&str> = HashSet::with_capacity(packages.len());
    let mut order = Vec::with_capacity(packages.len());
    let mut round = 0;

    while order.len() < packages.len() {
        round += 1;
        let mut package_enqueued = false;

        for (index, package) in packages.iter().enumerate() {
            if queued[index] {
                continue;
            }

            let name = package.name();
            let ready = package.package_dependencies().iter().all(|dependency| {
                dependency == name
                    || !build_set.contains(dependency.as_str())
                    || queued_names.contains(dependency.as_str())
            });

            if ready {
                trace!(package = %name, round, "Queued package");
                queued[index] = true;
                queued_names.insert(name);
                order.push(index);
                package_enqueued = true;
            }
        }

        if !package_enqueued {
            let remaining = packages
                .iter()
                .zip(&queued)
                .filter(|(_, queued)| !**queued)
                .map(|(package, _)| package.name().to_string())
                .collect();

            return Err(CodegenError::CircularPackageDependency { remaining });
        }
    }

    Ok(order)
}

fn calculate_hash(packages: &[CodeGenerationPackageContext]) -> u64 {
    let mut hasher = DefaultHasher::new();

    packages.len().hash(&mut hasher);
    for package in packages {
        package.name().hash(&mut hasher);
        package.version().hash(&mut hasher);
        package.package_dependencies().hash(&mut hasher);
    }

    hasher.finish()
}

#[cfg(test)]
#[path = "orderer/orderer_tests.rs"]
mod orderer_tests;

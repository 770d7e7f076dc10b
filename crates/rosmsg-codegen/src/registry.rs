//! Registry of package names referenced by parsed messages

use serde::Serialize;
use std::collections::BTreeMap;

/// A package name referenced by at least one parsed message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageRegistryItem {
    pub package_name: String,
    /// Whether the package is part of the current build set
    pub is_in_build_pipeline: bool,
}

/// Tracks every referenced package and whether it is built in this run.
///
/// Items are created on first reference and never removed.
#[derive(Debug, Clone, Default)]
pub struct PackageRegistry {
    items: BTreeMap<String, PackageRegistryItem>,
}

impl PackageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a reference to `package_name`, returning its item.
    pub fn add_dependency(&mut self, package_name: &str) -> &PackageRegistryItem {
        self.items
            .entry(package_name.to_string())
            .or_insert_with(|| PackageRegistryItem {
                package_name: package_name.to_string(),
                is_in_build_pipeline: false,
            })
    }

    /// Flag a package as part of the build set. Unreferenced names are ignored.
    pub fn mark_in_build_pipeline(&mut self, package_name: &str) {
        if let Some(item) = self.items.get_mut(package_name) {
            item.is_in_build_pipeline = true;
        }
    }

    pub fn get(&self, package_name: &str) -> Option<&PackageRegistryItem> {
        self.items.get(package_name)
    }

    pub fn items(&self) -> impl Iterator<Item = &PackageRegistryItem> {
        self.items.values()
    }

    /// Referenced packages that are not built in this run
    pub fn external(&self) -> impl Iterator<Item = &str> {
        self.items
            .values()
            .filter(|item| !item.is_in_build_pipeline)
            .map(|item| item.package_name.as_str())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn PackageRegistry___add_dependency___creates_item_once() {
        let mut registry = PackageRegistry::new();

        registry.add_dependency("std_msgs");
        registry.add_dependency("std_msgs");

        assert_eq!(registry.len(), 1);
        assert!(!registry.get("std_msgs").unwrap().is_in_build_pipeline);
    }

    #[test]
    fn PackageRegistry___mark_in_build_pipeline___sticks_after_re_reference() {
        let mut registry = PackageRegistry::new();
        registry.add_dependency("std_msgs");

        registry.mark_in_build_pipeline("std_msgs");
        let item = registry.add_dependency("std_msgs");

        assert!(item.is_in_build_pipeline);
    }

    #[test]
    fn PackageRegistry___mark_unreferenced___is_ignored() {
        let mut registry = PackageRegistry::new();

        registry.mark_in_build_pipeline("nav_msgs");

        assert!(registry.is_empty());
    }

    #[test]
    fn PackageRegistry___external___lists_packages_outside_pipeline() {
        let mut registry = PackageRegistry::new();
        registry.add_dependency("std_msgs");
        registry.add_dependency("actionlib_msgs");
        registry.add_dependency("geometry_msgs");
        registry.mark_in_build_pipeline("geometry_msgs");

        let external: Vec<&str> = registry.external().collect();

        assert_eq!(external, ["actionlib_msgs", "std_msgs"]);
    }
}

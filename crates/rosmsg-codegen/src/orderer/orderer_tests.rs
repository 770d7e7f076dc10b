#![allow(non_snake_case)]

use super::*;
use crate::parser::ParsedPackage;
use rosmsg_package::PackageInfo;

fn package(name: &str, dependencies: &[&str]) -> CodeGenerationPackageContext {
    let parsed = dependencies
        .iter()
        .fold(ParsedPackage::new(name), |parsed, d| parsed.with_dependency(*d));

    CodeGenerationPackageContext::new(
        PackageInfo::new(name, "1.0.0", format!("/ws/{name}")),
        parsed,
    )
}

fn ordered_names(packages: &[CodeGenerationPackageContext]) -> Vec<&str> {
    build_sequence(packages)
        .unwrap()
        .into_iter()
        .map(|i| packages[i].name())
        .collect()
}

// build_sequence

#[test]
fn build_sequence___empty_set___is_empty() {
    assert!(build_sequence(&[]).unwrap().is_empty());
}

#[test]
fn build_sequence___single_package___is_queued() {
    let packages = [package("std_msgs", &[])];

    assert_eq!(ordered_names(&packages), ["std_msgs"]);
}

#[test]
fn build_sequence___reverse_chain___needs_one_round_per_link() {
    let packages = [
        package("nav_msgs", &["geometry_msgs"]),
        package("geometry_msgs", &["std_msgs"]),
        package("std_msgs", &[]),
    ];

    assert_eq!(
        ordered_names(&packages),
        ["std_msgs", "geometry_msgs", "nav_msgs"]
    );
}

#[test]
fn build_sequence___dependency_queued_earlier_in_round___unblocks_later_package() {
    let packages = [
        package("std_msgs", &[]),
        package("geometry_msgs", &["std_msgs"]),
        package("nav_msgs", &["geometry_msgs", "std_msgs"]),
    ];

    assert_eq!(
        ordered_names(&packages),
        ["std_msgs", "geometry_msgs", "nav_msgs"]
    );
}

#[test]
fn build_sequence___independent_packages___keep_input_order() {
    let packages = [
        package("visualization_msgs", &[]),
        package("actionlib_msgs", &[]),
        package("diagnostic_msgs", &[]),
    ];

    assert_eq!(
        ordered_names(&packages),
        ["visualization_msgs", "actionlib_msgs", "diagnostic_msgs"]
    );
}

#[test]
fn build_sequence___external_dependency___does_not_block() {
    let packages = [package("my_msgs", &["roscpp", "std_msgs"])];

    assert_eq!(ordered_names(&packages), ["my_msgs"]);
}

#[test]
fn build_sequence___self_dependency___does_not_block() {
    let packages = [package("tree_msgs", &["tree_msgs"])];

    assert_eq!(ordered_names(&packages), ["tree_msgs"]);
}

#[test]
fn build_sequence___meta_package___follows_its_members() {
    let mut common = package("common_msgs", &["geometry_msgs", "nav_msgs"]);
    common.package.is_meta_package = true;
    let packages = [
        common,
        package("geometry_msgs", &[]),
        package("nav_msgs", &["geometry_msgs"]),
    ];

    assert_eq!(
        ordered_names(&packages),
        ["geometry_msgs", "nav_msgs", "common_msgs"]
    );
}

#[test]
fn build_sequence___cycle___reports_remaining_packages_in_input_order() {
    let packages = [
        package("y_msgs", &["x_msgs"]),
        package("base_msgs", &[]),
        package("x_msgs", &["y_msgs", "base_msgs"]),
        package("z_msgs", &["y_msgs"]),
    ];

    let result = build_sequence(&packages);

    match result {
        Err(CodegenError::CircularPackageDependency { remaining }) => {
            assert_eq!(remaining, ["y_msgs", "x_msgs", "z_msgs"]);
        }
        other => panic!("expected circular dependency error, got {other:?}"),
    }
}

#[test]
fn build_sequence___same_input___gives_same_order() {
    let packages = [
        package("c", &["a"]),
        package("b", &["a"]),
        package("a", &[]),
        package("d", &["b", "c"]),
    ];

    let first = build_sequence(&packages).unwrap();
    let second = build_sequence(&packages).unwrap();

    assert_eq!(first, second);
    assert_eq!(ordered_names(&packages), ["a", "c", "b", "d"]);
}

// BuildOrderer

#[test]
fn BuildOrderer___new___has_changed_for_any_set() {
    let orderer = BuildOrderer::new();

    assert!(orderer.has_changed(&[]));
    assert!(orderer.has_changed(&[package("a", &[])]));
}

#[test]
fn BuildOrderer___packages___caches_until_set_changes() {
    let mut orderer = BuildOrderer::new();
    let packages = vec![package("b", &["a"]), package("a", &[])];

    let names: Vec<&str> = orderer
        .packages(&packages)
        .unwrap()
        .into_iter()
        .map(|p| p.name())
        .collect();
    assert_eq!(names, ["a", "b"]);
    assert!(!orderer.has_changed(&packages));

    let mut updated = packages.clone();
    updated[1].package.version = "1.1.0".into();
    assert!(orderer.has_changed(&updated));

    let mut rewired = packages.clone();
    rewired[0].parsed = ParsedPackage::new("b");
    assert!(orderer.has_changed(&rewired));
}

#[test]
fn BuildOrderer___failed_sort___keeps_previous_cache_state() {
    let mut orderer = BuildOrderer::new();
    let cyclic = vec![package("a", &["b"]), package("b", &["a"])];

    assert!(orderer.packages(&cyclic).is_err());
    assert!(orderer.has_changed(&cyclic));
}

//! Check command implementation

use anyhow::Result;
use rosmsg_codegen::parser_for;
use rosmsg_package::{BuildStrategy, PackageFolder, PackageInfo};
use std::path::Path;

/// Validate every package below `package_path`.
///
/// Each `package.xml` must be readable and each message file must parse.
pub fn check(package_path: &Path) -> Result<()> {
    println!("Checking packages in: {}", package_path.display());

    let folders = PackageFolder::find(package_path, BuildStrategy::Mandatory)?;
    let mut failures = 0;

    for folder in &folders {
        match check_folder(folder) {
            Ok(package) => println!(
                "✓ {} {} ({} message files{})",
                package.name,
                package.version,
                package.messages.len(),
                if package.is_meta_package { ", meta" } else { "" }
            ),
            Err(e) => {
                failures += 1;
                println!("✗ {}: {e:#}", folder.path.display());
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} of {} packages are invalid", folders.len());
    }

    println!("\n✓ {} packages are valid", folders.len());
    Ok(())
}

fn check_folder(folder: &PackageFolder) -> Result<PackageInfo> {
    let package = folder.package_info()?;
    parser_for(&package).parse(&package)?;
    Ok(package)
}

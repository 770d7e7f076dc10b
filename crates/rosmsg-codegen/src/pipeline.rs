//! Sequential generation of the filtered package set
//!
//! Packages are generated one at a time in build order. The first failing
//! package stops the run.

use crate::context::{CodeGenerationContext, CodeGenerationPackageContext};
use crate::directories::CodeGenerationDirectories;
use crate::error::{CodegenError, CodegenResult};
use crate::generator::{PackageDocument, PackageGenerator};
use crate::template_data::{MessageTemplateData, PackageTemplateData};
use rosmsg_core::MessageTypeResolver;
use serde::Serialize;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{error, info};

/// Options of a generation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    pub output_dir: PathBuf,
    /// Prefix of generated namespaces, may be empty
    pub root_namespace: String,
    /// Keep the staging directory after the run
    pub preserve_generated: bool,
}

/// Outcome of one generated package
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedPackage {
    pub name: String,
    pub version: String,
    pub artifact: PathBuf,
    pub messages: usize,
    pub elapsed: Duration,
}

/// Outcome of a whole run, packages in build order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PipelineReport {
    pub packages: Vec<GeneratedPackage>,
    pub elapsed: Duration,
}

impl PipelineReport {
    pub fn package_names(&self) -> Vec<&str> {
        self.packages.iter().map(|p| p.name.as_str()).collect()
    }
}

/// Generate every selected package of `context` in build order.
///
/// The context must be filtered. Failures of a single package are reported
/// as [`CodegenError::Generator`] carrying its name and version; ordering
/// failures are returned unchanged.
pub fn run_pipeline(
    context: &mut CodeGenerationContext,
    options: &PipelineOptions,
    generator: &dyn PackageGenerator,
) -> CodegenResult<PipelineReport> {
    let started = Instant::now();

    let mut resolver = context.type_resolver()?;
    let order = context.build_order()?;

    if order.is_empty() {
        info!("No packages to generate");
        return Ok(PipelineReport::default());
    }

    info!(
        packages = order.len(),
        generator = generator.name(),
        "Generating packages"
    );

    let directories =
        CodeGenerationDirectories::new(&options.output_dir, options.preserve_generated)?;
    let mut report = PipelineReport::default();

    for package in order {
        let package_started = Instant::now();

        let result = document(package, &mut resolver, &options.root_namespace).and_then(|doc| {
            let dirs = directories.package_dirs(&package.package)?;
            let artifact = generator.generate(&doc, &dirs)?;
            Ok((artifact, doc.messages.len()))
        });

        let elapsed = package_started.elapsed();
        info!(
            package = %package.name(),
            version = %package.version(),
            elapsed_ms = millis(elapsed),
            "Package finished"
        );

        let (artifact, messages) = result.map_err(|e| {
            error!(
                package = %package.name(),
                version = %package.version(),
                error = %e,
                "Could not process message package"
            );
            CodegenError::Generator {
                package: package.name().to_string(),
                version: package.version().to_string(),
                message: e.to_string(),
            }
        })?;

        report.packages.push(GeneratedPackage {
            name: package.name().to_string(),
            version: package.version().to_string(),
            artifact,
            messages,
            elapsed,
        });
    }

    report.elapsed = started.elapsed();
    info!(
        packages = report.packages.len(),
        elapsed_ms = millis(report.elapsed),
        "Total time elapsed"
    );

    Ok(report)
}

/// Whole milliseconds of `duration`, saturating at `u64::MAX`
fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Assemble the document of one package.
///
/// Meta-packages carry their manifest dependencies and no messages.
pub fn document(
    package: &CodeGenerationPackageContext,
    resolver: &mut MessageTypeResolver,
    root_namespace: &str,
) -> CodegenResult<PackageDocument> {
    let mut messages = Vec::with_capacity(package.parsed.messages.len());

    if !package.package.is_meta_package {
        for message in &package.parsed.messages {
            let type_info = resolver.resolve(&message.identity())?;
            messages.push(MessageTemplateData::new(message, &type_info)?);
        }
    }

    Ok(PackageDocument {
        package: PackageTemplateData::new(&package.package, root_namespace),
        dependencies: package.published_dependencies(),
        messages,
    })
}

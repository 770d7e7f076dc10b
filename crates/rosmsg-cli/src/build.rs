//! Build and order command implementation

use crate::config::{CliConfig, OutputFormat};
use crate::discovery::{SearchPaths, load_context};
use anyhow::Result;
use rosmsg_codegen::{JsonPackageGenerator, PackageGenerator, PipelineOptions, run_pipeline};
use rosmsg_package::PackageFilter;
use std::path::PathBuf;
use tracing::info;

/// Arguments of `rosmsg build`
#[derive(Debug, Clone, Default)]
pub struct BuildArgs {
    pub paths: SearchPaths,
    pub output_path: PathBuf,
    pub filter: Vec<String>,
    /// Overrides the configured root namespace
    pub namespace: Option<String>,
    pub preserve: bool,
}

/// Run the build command
pub fn run(args: BuildArgs, config: &CliConfig) -> Result<()> {
    let filter = PackageFilter::new(&args.filter);
    let mut context = load_context(&args.paths, &filter)?;

    if context.packages().is_empty() {
        info!("Package directory does not contain any packages");
        return Ok(());
    }

    let root_namespace = match &args.namespace {
        Some(namespace) => namespace.trim().trim_end_matches('.').to_string(),
        None => config.root_namespace().to_string(),
    };

    let options = PipelineOptions {
        output_dir: args.output_path,
        root_namespace,
        preserve_generated: args.preserve || config.build.preserve_generated,
    };

    let generator = generator_for(config.build.output_format);
    let report = run_pipeline(&mut context, &options, generator.as_ref())?;

    for package in &report.packages {
        println!(
            "✓ {} {} ({} messages) -> {}",
            package.name,
            package.version,
            package.messages,
            package.artifact.display()
        );
    }
    println!(
        "\nGenerated {} packages in {:.2?}",
        report.packages.len(),
        report.elapsed
    );

    Ok(())
}

/// Run the order command
pub fn order(paths: &SearchPaths, filter: &[String]) -> Result<()> {
    let filter = PackageFilter::new(filter);
    let mut context = load_context(paths, &filter)?;

    for (position, package) in context.build_order()?.into_iter().enumerate() {
        let kind = if package.package.is_meta_package {
            " (meta)"
        } else {
            ""
        };
        println!(
            "{:>3}. {} {}{}",
            position + 1,
            package.name(),
            package.version(),
            kind
        );
    }

    Ok(())
}

fn generator_for(format: OutputFormat) -> Box<dyn PackageGenerator> {
    match format {
        OutputFormat::Json => Box::new(JsonPackageGenerator::new()),
    }
}

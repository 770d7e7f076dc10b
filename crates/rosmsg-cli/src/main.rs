//! rosmsg CLI - Code generator for ROS message packages
//!
//! Commands:
//! - `rosmsg build` - Generate all packages below a path in dependency order
//! - `rosmsg order` - Print the build order without generating
//! - `rosmsg check` - Validate package manifests and message files

use clap::{Parser, Subcommand};
use rosmsg_package::{ROS_PACKAGE_PATH_VAR, split_search_path};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

mod build;
mod check;
mod config;
mod discovery;
mod exit_code;

use config::CliConfig;
use discovery::SearchPaths;

#[derive(Parser)]
#[command(name = "rosmsg")]
#[command(author, version, about = "Code generator for ROS message packages", long_about = None)]
struct Cli {
    /// Path to rosmsg.toml (default: ./rosmsg.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate message packages
    Build {
        /// Root of the packages to build
        package_path: PathBuf,

        /// Output directory for generated packages
        output_path: PathBuf,

        #[command(flatten)]
        selection: Selection,

        /// Root namespace (overrides configuration)
        #[arg(long)]
        namespace: Option<String>,

        /// Keep the staging directory with intermediate files
        #[arg(long)]
        preserve: bool,
    },

    /// Print the build order of the selected packages
    Order {
        /// Root of the packages to build
        package_path: PathBuf,

        #[command(flatten)]
        selection: Selection,
    },

    /// Validate every package below a path
    Check {
        /// Root of the packages to check
        package_path: PathBuf,
    },
}

#[derive(clap::Args)]
struct Selection {
    /// Only build packages matching the filter (e.g. '*_msgs' or 'geometry_msgs nav_msgs')
    #[arg(short, long, num_args = 1..)]
    filter: Vec<String>,

    /// Additional package roots, built only when required
    #[arg(long = "dependency-path")]
    dependency_paths: Vec<PathBuf>,

    /// Do not search packages in ROS_PACKAGE_PATH
    #[arg(long)]
    ignore_ros_package_path: bool,
}

impl Selection {
    fn search_paths(&self, package_path: PathBuf, config: &CliConfig) -> SearchPaths {
        let ros_package_path = std::env::var(ROS_PACKAGE_PATH_VAR)
            .map(|value| split_search_path(&value))
            .unwrap_or_default();

        SearchPaths {
            package_path,
            dependency_paths: self
                .dependency_paths
                .iter()
                .chain(&config.build.dependency_paths)
                .cloned()
                .collect(),
            ros_package_path,
            ignore_ros_package_path: self.ignore_ros_package_path
                || config.build.ignore_ros_package_path,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match CliConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e:#}");
            return ExitCode::from(exit_code::INVALID_CONFIGURATION);
        }
    };

    init_tracing(&config.logging.level, cli.verbose);

    let result = match cli.command {
        Commands::Build {
            package_path,
            output_path,
            selection,
            namespace,
            preserve,
        } => build::run(
            build::BuildArgs {
                paths: selection.search_paths(package_path, &config),
                output_path,
                filter: selection.filter,
                namespace,
                preserve,
            },
            &config,
        ),
        Commands::Order {
            package_path,
            selection,
        } => build::order(
            &selection.search_paths(package_path, &config),
            &selection.filter,
        ),
        Commands::Check { package_path } => check::check(&package_path),
    };

    match result {
        Ok(()) => ExitCode::from(exit_code::SUCCESS),
        Err(e) => {
            error!("{e:#}");
            ExitCode::from(exit_code::for_error(&e))
        }
    }
}

/// Install the fmt subscriber. `RUST_LOG` wins over the configured level.
fn init_tracing(level: &str, verbose: bool) {
    let default_level = if verbose { "debug" } else { level };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

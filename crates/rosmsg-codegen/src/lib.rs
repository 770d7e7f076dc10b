//! rosmsg-codegen - Dependency-ordered code generation for ROS message packages
//!
//! This crate drives a generation run over a set of discovered packages:
//! - [`MessagePackageParser`] implementations read `.msg`/`.srv`/`.action` files
//! - [`CodeGenerationContext`] selects the packages to build
//! - [`BuildOrderer`] orders them so dependencies are built first
//! - [`run_pipeline`] hands each package to a [`PackageGenerator`]
//!
//! # Example
//!
//! ```no_run
//! use rosmsg_codegen::prelude::*;
//! use rosmsg_package::{BuildStrategy, PackageFilter, PackageFolder};
//!
//! let folders = PackageFolder::find("./src", BuildStrategy::Mandatory)?;
//! let mut context = CodeGenerationContext::from_folders(&folders)?;
//! context.parse_messages()?;
//! context.apply_filter(&PackageFilter::new(["*_msgs"]))?;
//!
//! let options = PipelineOptions {
//!     output_dir: "./out".into(),
//!     root_namespace: "Robotics".into(),
//!     preserve_generated: false,
//! };
//! let report = run_pipeline(&mut context, &options, &JsonPackageGenerator::new())?;
//! println!("generated {:?}", report.package_names());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod context;
mod directories;
mod error;
mod generator;
mod lifecycle;
pub mod naming;
mod orderer;
mod parser;
mod pipeline;
mod registry;
mod template_data;

pub use context::{CodeGenerationContext, CodeGenerationPackageContext};
pub use directories::{CodeGenerationDirectories, PackageDirectories};
pub use error::{CodegenError, CodegenResult};
pub use generator::{JsonPackageGenerator, PackageDocument, PackageGenerator};
pub use lifecycle::ContextState;
pub use naming::MessagePart;
pub use orderer::{BuildOrderer, build_sequence};
pub use parser::{
    FileMessageParser, MessagePackageParser, MetaPackageParser, ParsedMessage, ParsedPackage,
    SECTION_SEPARATOR, Section, parse_definition, parse_message_file, parser_for, split_sections,
};
pub use pipeline::{GeneratedPackage, PipelineOptions, PipelineReport, document, run_pipeline};
pub use registry::{PackageRegistry, PackageRegistryItem};
pub use template_data::{
    ConstantTemplateData, FieldTemplateData, MessageTemplateData, PackageTemplateData,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        BuildOrderer, CodeGenerationContext, CodegenError, CodegenResult, JsonPackageGenerator,
        PackageGenerator, PipelineOptions, run_pipeline,
    };
}

//! Package generators
//!
//! A [`PackageGenerator`] turns the template data of one package into
//! artifacts below the output directory. [`JsonPackageGenerator`] writes a
//! JSON descriptor per package:
//!
//! ```text
//! <output>/
//! └── Robotics.GeometryMsgs/
//!     └── geometry_msgs.json
//! ```

use crate::directories::PackageDirectories;
use crate::error::CodegenResult;
use crate::template_data::{MessageTemplateData, PackageTemplateData};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Everything a generator needs to emit one package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDocument {
    pub package: PackageTemplateData,
    /// Package names the generated package depends on
    pub dependencies: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<MessageTemplateData>,
}

/// Emits the artifacts of one package.
pub trait PackageGenerator {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Generate `document`, returning the path of the main artifact.
    fn generate(
        &self,
        document: &PackageDocument,
        directories: &PackageDirectories,
    ) -> CodegenResult<PathBuf>;
}

/// Writes `<namespace>/<package>.json` descriptors.
///
/// The flattened definition of every message is also staged as
/// `<Type>.msgdef` next to the staged descriptor.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPackageGenerator {
    pub pretty: bool,
}

impl JsonPackageGenerator {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    fn render(&self, document: &PackageDocument) -> CodegenResult<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(document)?
        } else {
            serde_json::to_string(document)?
        };
        Ok(json)
    }
}

impl PackageGenerator for JsonPackageGenerator {
    fn name(&self) -> &str {
        "json"
    }

    fn generate(
        &self,
        document: &PackageDocument,
        directories: &PackageDirectories,
    ) -> CodegenResult<PathBuf> {
        let file_name = format!("{}.json", document.package.ros_name);

        for message in &document.messages {
            let path = directories
                .temp_dir
                .join(format!("{}.msgdef", message.ros_type_name));
            fs::write(path, &message.message_definition)?;
        }

        let staged = directories.temp_dir.join(&file_name);
        fs::write(&staged, self.render(document)?)?;

        let target_dir = directories.output_dir.join(&document.package.namespace);
        fs::create_dir_all(&target_dir)?;
        let target = target_dir.join(file_name);
        fs::copy(&staged, &target)?;

        debug!(
            package = %document.package.ros_name,
            path = %target.display(),
            messages = document.messages.len(),
            "Wrote package descriptor"
        );

        Ok(target)
    }
}

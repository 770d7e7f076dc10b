//! Package metadata and message file inventory.

use crate::PackageResult;
use crate::folder::{BuildStrategy, PackageFolder};
use crate::manifest::PackageManifest;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Sub-directories of a package that hold message files.
const MESSAGE_DIRECTORIES: &[&str] = &["msg", "srv", "action"];

/// Kind of a message definition file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Message,
    Service,
    Action,
}

impl MessageKind {
    /// Classify a file by its extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "msg" => Some(MessageKind::Message),
            "srv" => Some(MessageKind::Service),
            "action" => Some(MessageKind::Action),
            _ => None,
        }
    }

    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            MessageKind::Message => "msg",
            MessageKind::Service => "srv",
            MessageKind::Action => "action",
        }
    }
}

/// A `.msg`, `.srv` or `.action` file inside a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageFile {
    pub path: PathBuf,
    pub kind: MessageKind,
}

impl MessageFile {
    /// Type name derived from the file stem (`Pose.msg` → `Pose`).
    pub fn type_name(&self) -> String {
        self.path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// A package's identity, metadata and message files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageInfo {
    pub name: String,
    pub version: String,
    pub is_meta_package: bool,
    pub description: Option<String>,
    pub project_url: Option<String>,
    pub repository_url: Option<String>,
    pub authors: Vec<String>,

    /// Dependencies declared in `package.xml`.
    pub package_dependencies: Vec<String>,

    pub directory: PathBuf,
    pub messages: Vec<MessageFile>,
    pub is_optional: bool,
}

impl PackageInfo {
    /// Create a package with no metadata beyond its identity.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        directory: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            is_meta_package: false,
            description: None,
            project_url: None,
            repository_url: None,
            authors: Vec::new(),
            package_dependencies: Vec::new(),
            directory: directory.into(),
            messages: Vec::new(),
            is_optional: false,
        }
    }

    /// Read `package.xml` and list the message files of a package folder.
    pub fn from_folder(folder: &PackageFolder) -> PackageResult<Self> {
        let manifest = PackageManifest::read_from_folder(&folder.path)?;
        let messages = find_message_files(&folder.path)?;

        debug!(
            package = %manifest.name,
            version = %manifest.version,
            messages = messages.len(),
            "Read package"
        );

        Ok(Self {
            authors: manifest.contributors(),
            name: manifest.name,
            version: manifest.version,
            is_meta_package: manifest.is_meta_package,
            description: manifest.description,
            project_url: manifest.website_url,
            repository_url: manifest.repository_url,
            package_dependencies: manifest.dependencies,
            directory: folder.path.clone(),
            messages,
            is_optional: folder.build_strategy == BuildStrategy::Optional,
        })
    }

    pub fn has_messages(&self) -> bool {
        !self.messages.is_empty()
    }

    /// Builder form for marking the package optional.
    #[must_use]
    pub fn with_optional(mut self, is_optional: bool) -> Self {
        self.is_optional = is_optional;
        self
    }
}

/// Message files in the `msg`, `srv` and `action` directories, sorted by path.
pub fn find_message_files(package_directory: &Path) -> PackageResult<Vec<MessageFile>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(package_directory)? {
        let entry = entry?;
        let path = entry.path();

        let is_message_dir = path.is_dir()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| MESSAGE_DIRECTORIES.contains(&name.to_ascii_lowercase().as_str()));

        if !is_message_dir {
            continue;
        }

        for file in fs::read_dir(&path)? {
            let file = file?.path();
            if !file.is_file() {
                continue;
            }
            if let Some(kind) = MessageKind::from_path(&file) {
                files.push(MessageFile { path: file, kind });
            }
        }
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use test_case::test_case;

    #[test_case("Pose.msg", Some(MessageKind::Message))]
    #[test_case("AddTwoInts.srv", Some(MessageKind::Service))]
    #[test_case("Fibonacci.action", Some(MessageKind::Action))]
    #[test_case("CMakeLists.txt", None)]
    #[test_case("README", None)]
    fn MessageKind___from_path___classifies_by_extension(file: &str, expected: Option<MessageKind>) {
        assert_eq!(MessageKind::from_path(Path::new(file)), expected);
    }

    #[test]
    fn MessageFile___type_name___is_file_stem() {
        let file = MessageFile {
            path: PathBuf::from("/ws/geometry_msgs/msg/PoseStamped.msg"),
            kind: MessageKind::Message,
        };

        assert_eq!(file.type_name(), "PoseStamped");
    }

    #[test]
    fn find_message_files___collects_known_directories_case_insensitively() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("msg")).unwrap();
        fs::create_dir_all(root.join("SRV")).unwrap();
        fs::create_dir_all(root.join("scripts")).unwrap();
        fs::write(root.join("msg/Pose.msg"), "").unwrap();
        fs::write(root.join("msg/Point.msg"), "").unwrap();
        fs::write(root.join("msg/notes.txt"), "").unwrap();
        fs::write(root.join("SRV/GetPlan.srv"), "").unwrap();
        fs::write(root.join("scripts/Other.msg"), "").unwrap();

        let files = find_message_files(root).unwrap();

        let names: Vec<String> = files.iter().map(MessageFile::type_name).collect();
        assert_eq!(names, ["GetPlan", "Point", "Pose"]);
        assert_eq!(files[0].kind, MessageKind::Service);
    }

    #[test]
    fn PackageInfo___new___is_concrete_and_mandatory() {
        let package = PackageInfo::new("std_msgs", "0.5.13", "/ws/std_msgs");

        assert!(!package.is_meta_package);
        assert!(!package.is_optional);
        assert!(!package.has_messages());
    }
}

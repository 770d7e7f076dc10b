//! `package.xml` manifest reading.

use crate::error::PackageError;
use crate::PackageResult;
use roxmltree::{Document, Node};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Manifest file name inside a package folder.
pub const MANIFEST_FILE: &str = "package.xml";

/// Element names that declare a package dependency.
const DEPENDENCY_TAGS: &[&str] = &[
    "depend",
    "build_depend",
    "run_depend",
    "exec_depend",
    "build_export_depend",
];

/// A maintainer or author entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub email: Option<String>,
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.email {
            Some(email) => write!(f, "{} <{}>", self.name, email),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Contents of a `package.xml` file relevant to code generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageManifest {
    pub name: String,
    pub version: String,
    pub description: Option<String>,
    pub maintainers: Vec<Person>,
    pub authors: Vec<Person>,
    pub website_url: Option<String>,
    pub repository_url: Option<String>,

    /// Declared dependencies, deduplicated, in document order.
    pub dependencies: Vec<String>,

    /// `<export><metapackage/></export>` is present.
    pub is_meta_package: bool,
}

impl PackageManifest {
    /// Read `package.xml` from a package folder.
    pub fn read_from_folder<P: AsRef<Path>>(folder: P) -> PackageResult<Self> {
        let path = folder.as_ref().join(MANIFEST_FILE);

        if !path.is_file() {
            return Err(PackageError::ManifestNotFound(
                folder.as_ref().display().to_string(),
            ));
        }

        let content = fs::read_to_string(&path)?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Parse manifest XML. `origin` is used in error messages only.
    pub fn parse(xml: &str, origin: &str) -> PackageResult<Self> {
        let doc = Document::parse(xml).map_err(|source| PackageError::Xml {
            path: origin.to_string(),
            source,
        })?;

        let root = doc.root_element();
        let invalid = |message: &str| PackageError::InvalidManifest {
            path: origin.to_string(),
            message: message.to_string(),
        };

        if root.tag_name().name() != "package" {
            return Err(invalid("root element must be <package>"));
        }

        let name = child_text(root, "name").ok_or_else(|| invalid("missing <name>"))?;
        let version = child_text(root, "version").ok_or_else(|| invalid("missing <version>"))?;

        let mut website_url = None;
        let mut repository_url = None;
        for url in children(root, "url") {
            let Some(text) = element_text(url) else {
                continue;
            };
            match url.attribute("type").unwrap_or("website") {
                "website" if website_url.is_none() => website_url = Some(text),
                "repository" if repository_url.is_none() => repository_url = Some(text),
                _ => {}
            }
        }

        let mut dependencies: Vec<String> = Vec::new();
        for node in root.children().filter(|n| n.is_element()) {
            if !DEPENDENCY_TAGS.contains(&node.tag_name().name()) {
                continue;
            }
            if let Some(dependency) = element_text(node)
                && !dependencies.contains(&dependency)
            {
                dependencies.push(dependency);
            }
        }

        let is_meta_package = children(root, "export")
            .any(|export| children(export, "metapackage").next().is_some());

        Ok(Self {
            name,
            version,
            description: child_text(root, "description"),
            maintainers: people(root, "maintainer"),
            authors: people(root, "author"),
            website_url,
            repository_url,
            dependencies,
            is_meta_package,
        })
    }

    /// Maintainers followed by authors, deduplicated, rendered `Name <email>`.
    pub fn contributors(&self) -> Vec<String> {
        let mut result: Vec<String> = Vec::new();

        for person in self.maintainers.iter().chain(&self.authors) {
            let rendered = person.to_string();
            if !result.contains(&rendered) {
                result.push(rendered);
            }
        }

        result
    }
}

fn children<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |n| n.is_element() && n.tag_name().name() == tag)
}

fn child_text(node: Node<'_, '_>, tag: &'static str) -> Option<String> {
    children(node, tag).next().and_then(element_text)
}

/// Trimmed text content of an element with whitespace runs collapsed
fn element_text(node: Node<'_, '_>) -> Option<String> {
    let text: String = node
        .descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect();
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");

    if text.is_empty() { None } else { Some(text) }
}

fn people(node: Node<'_, '_>, tag: &'static str) -> Vec<Person> {
    children(node, tag)
        .filter_map(|n| {
            element_text(n).map(|name| Person {
                name,
                email: n.attribute("email").map(str::to_string),
            })
        })
        .collect()
}

//! Message package parsing
//!
//! Turns the `.msg`, `.srv` and `.action` files of a package into message
//! descriptors and extracts the package dependencies implied by the field
//! types they reference.
//!
//! Grammar, one declaration per line:
//!
//! ```text
//! # comment
//! <type> <name>              field
//! <type> <NAME>=<value>      constant
//! ---                        section separator (.srv, .action)
//! ```

use crate::error::{CodegenError, CodegenResult};
use crate::naming::{self, MessagePart};
use rosmsg_core::{MessageDescriptor, TypeIdentity, TypeReference};
use rosmsg_package::{MessageFile, MessageKind, PackageInfo};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fs;
use tracing::debug;

/// Line separating the sections of a service or action file
pub const SECTION_SEPARATOR: &str = "---";

/// One message type produced by parsing a file.
///
/// A `.srv` file yields two of these and an `.action` file three.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedMessage {
    /// Package-qualified type, including any part suffix
    pub type_ref: TypeReference,
    pub kind: MessageKind,
    pub part: Option<MessagePart>,
    /// Type name of the file the message was declared in
    pub file_type_name: String,
    pub descriptor: MessageDescriptor,
}

impl ParsedMessage {
    pub fn identity(&self) -> TypeIdentity {
        self.type_ref.identity()
    }
}

/// Parse result for one package.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedPackage {
    pub package_name: String,

    /// Names of other packages this package needs to be built
    pub package_dependencies: BTreeSet<String>,

    /// Types referenced from other packages
    pub external_types: BTreeSet<TypeIdentity>,

    pub messages: Vec<ParsedMessage>,
}

impl ParsedPackage {
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            ..Self::default()
        }
    }

    /// Builder form for adding a package dependency.
    #[must_use]
    pub fn with_dependency(mut self, package_name: impl Into<String>) -> Self {
        self.package_dependencies.insert(package_name.into());
        self
    }

    /// Add a message and record the packages and types it references.
    pub fn add_message(&mut self, message: ParsedMessage) {
        for field in message.descriptor.fields() {
            let Some(package) = field.type_ref.package_name.as_deref() else {
                continue;
            };
            if package == self.package_name {
                continue;
            }

            self.package_dependencies.insert(package.to_string());
            self.external_types.insert(field.type_ref.identity());
        }

        self.messages.push(message);
    }
}

/// Extracts messages and dependencies from a package.
pub trait MessagePackageParser {
    fn parse(&self, package: &PackageInfo) -> CodegenResult<ParsedPackage>;
}

/// Parser for concrete packages that reads every message file from disk
#[derive(Debug, Default, Clone, Copy)]
pub struct FileMessageParser;

impl MessagePackageParser for FileMessageParser {
    fn parse(&self, package: &PackageInfo) -> CodegenResult<ParsedPackage> {
        let mut parsed = ParsedPackage::new(&package.name);

        for file in &package.messages {
            let text = fs::read_to_string(&file.path)?;
            for message in parse_message_file(&package.name, file, &text)? {
                parsed.add_message(message);
            }
        }

        debug!(
            package = %package.name,
            messages = parsed.messages.len(),
            dependencies = ?parsed.package_dependencies,
            "Parsed package"
        );

        Ok(parsed)
    }
}

/// Parser for meta-packages; dependencies come from the manifest
#[derive(Debug, Default, Clone, Copy)]
pub struct MetaPackageParser;

impl MessagePackageParser for MetaPackageParser {
    fn parse(&self, package: &PackageInfo) -> CodegenResult<ParsedPackage> {
        let mut parsed = ParsedPackage::new(&package.name);
        parsed
            .package_dependencies
            .extend(package.package_dependencies.iter().cloned());
        parsed.package_dependencies.remove(&package.name);

        Ok(parsed)
    }
}

/// Select the parser for a package.
pub fn parser_for(package: &PackageInfo) -> Box<dyn MessagePackageParser> {
    if package.is_meta_package {
        Box::new(MetaPackageParser)
    } else {
        Box::new(FileMessageParser)
    }
}

/// Parse the text of one message file into its message types.
pub fn parse_message_file(
    package_name: &str,
    file: &MessageFile,
    text: &str,
) -> CodegenResult<Vec<ParsedMessage>> {
    let file_type_name = file.type_name();
    let file_label = file.path.display().to_string();

    let parts: &[MessagePart] = match file.kind {
        MessageKind::Message => &[],
        MessageKind::Service => &MessagePart::SERVICE,
        MessageKind::Action => &MessagePart::ACTION,
    };

    let sections = split_sections(text);
    let expected = parts.len().max(1);
    if sections.len() != expected {
        return Err(CodegenError::Parse {
            package: package_name.to_string(),
            file: file_label,
            line: 0,
            message: format!(
                "expected {} section(s), found {}",
                expected,
                sections.len()
            ),
        });
    }

    let mut messages = Vec::new();
    for (index, section) in sections.iter().enumerate() {
        let part = parts.get(index).copied();
        let descriptor = parse_definition(package_name, &file_label, section)?;

        messages.push(ParsedMessage {
            type_ref: TypeReference::message(
                package_name,
                naming::ros_type_name(&file_type_name, part),
            ),
            kind: file.kind,
            part,
            file_type_name: file_type_name.clone(),
            descriptor,
        });
    }

    Ok(messages)
}

/// A run of lines between section separators
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<'a> {
    /// 1-based line number of the first line
    pub first_line: usize,
    pub lines: Vec<&'a str>,
}

impl Section<'_> {
    /// Raw text of the section without trailing whitespace
    pub fn text(&self) -> String {
        self.lines.join("\n").trim_end().to_string()
    }
}

/// Split a file at `---` lines.
pub fn split_sections(text: &str) -> Vec<Section<'_>> {
    let mut sections = vec![Section {
        first_line: 1,
        lines: Vec::new(),
    }];

    for (index, line) in text.lines().enumerate() {
        if line.trim() == SECTION_SEPARATOR {
            sections.push(Section {
                first_line: index + 2,
                lines: Vec::new(),
            });
        } else if let Some(current) = sections.last_mut() {
            current.lines.push(line);
        }
    }

    sections
}

/// Parse the declarations of one section.
pub fn parse_definition(
    package_name: &str,
    file: &str,
    section: &Section<'_>,
) -> CodegenResult<MessageDescriptor> {
    let mut descriptor = MessageDescriptor::new(section.text());

    for (offset, line) in section.lines.iter().enumerate() {
        let error = |message: String| CodegenError::Parse {
            package: package_name.to_string(),
            file: file.to_string(),
            line: section.first_line + offset,
            message,
        };

        let Some(declaration) = parse_line(line, package_name).map_err(error)? else {
            continue;
        };

        match declaration {
            Declaration::Field {
                type_ref,
                identifier,
            } => descriptor.add_field(type_ref, identifier),
            Declaration::Constant {
                type_ref,
                identifier,
                value,
            } => descriptor
                .add_constant(type_ref, identifier, value)
                .map_err(|e| error(e.to_string()))?,
        }
    }

    Ok(descriptor)
}

enum Declaration {
    Field {
        type_ref: TypeReference,
        identifier: String,
    },
    Constant {
        type_ref: TypeReference,
        identifier: String,
        value: String,
    },
}

fn parse_line(line: &str, package_name: &str) -> Result<Option<Declaration>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (type_text, rest) = line
        .split_once(char::is_whitespace)
        .ok_or_else(|| format!("expected a name after type {line}"))?;
    let type_ref = TypeReference::parse(type_text, package_name).map_err(|e| e.to_string())?;
    let rest = rest.trim_start();

    // String constants keep everything after `=`, including `#`
    if type_ref.is_built_in
        && !type_ref.is_array
        && type_ref.type_name == "string"
        && let Some((name, value)) = rest.split_once('=')
        && is_identifier(name.trim())
    {
        return Ok(Some(Declaration::Constant {
            type_ref,
            identifier: name.trim().to_string(),
            value: value.trim().to_string(),
        }));
    }

    let rest = match rest.split_once('#') {
        Some((declaration, _comment)) => declaration.trim(),
        None => rest.trim(),
    };

    if let Some((name, value)) = rest.split_once('=') {
        let name = name.trim();
        if !is_identifier(name) {
            return Err(format!("invalid constant name {name:?}"));
        }
        return Ok(Some(Declaration::Constant {
            type_ref,
            identifier: name.to_string(),
            value: value.trim().to_string(),
        }));
    }

    if !is_identifier(rest) {
        return Err(format!("invalid field name {rest:?}"));
    }

    Ok(Some(Declaration::Field {
        type_ref,
        identifier: rest.to_string(),
    }))
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

//! Message type signatures: structural MD5 sum and flattened definition
//!
//! Both values follow the hashing convention of the ROS wire protocol so that
//! generated code interoperates with existing tooling:
//!
//! ```text
//! md5("<type> <NAME>=<value>\n...\n<field type or dependency md5> <name>\n...")
//!
//! <own definition>
//! ================================================================================
//! MSG: <package>/<type>
//! <dependency definition>
//! ...
//! ```
//!
//! Values are computed on first access and memoized; a [`MessageTypeInfo`] is
//! immutable once constructed.

use crate::descriptor::MessageDescriptor;
use crate::error::{TypeError, TypeResult};
use crate::types::{TypeIdentity, TypeReference};
use md5::{Digest, Md5};
use once_cell::sync::OnceCell;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Separator line between definitions in a flattened message definition
pub const DEFINITION_SEPARATOR: &str =
    "================================================================================";

/// A message type with its resolved dependencies and memoized signatures
pub struct MessageTypeInfo {
    type_ref: TypeReference,
    descriptor: MessageDescriptor,
    dependencies: Vec<Arc<MessageTypeInfo>>,
    md5_sum: OnceCell<String>,
    message_definition: OnceCell<String>,
}

impl MessageTypeInfo {
    /// Create type info for `type_ref`.
    ///
    /// `dependencies` must contain an entry for every non built-in field type.
    pub fn new(
        type_ref: TypeReference,
        descriptor: MessageDescriptor,
        dependencies: Vec<Arc<MessageTypeInfo>>,
    ) -> Self {
        Self {
            type_ref,
            descriptor,
            dependencies,
            md5_sum: OnceCell::new(),
            message_definition: OnceCell::new(),
        }
    }

    pub fn type_ref(&self) -> &TypeReference {
        &self.type_ref
    }

    pub fn identity(&self) -> TypeIdentity {
        self.type_ref.identity()
    }

    pub fn descriptor(&self) -> &MessageDescriptor {
        &self.descriptor
    }

    pub fn dependencies(&self) -> &[Arc<MessageTypeInfo>] {
        &self.dependencies
    }

    /// Structural MD5 sum as lowercase hex
    pub fn md5_sum(&self) -> TypeResult<&str> {
        self.md5_sum
            .get_or_try_init(|| self.calculate_md5_sum())
            .map(String::as_str)
    }

    /// Own definition followed by every transitive dependency definition
    pub fn message_definition(&self) -> &str {
        self.message_definition
            .get_or_init(|| self.create_message_definition())
    }

    fn calculate_md5_sum(&self) -> TypeResult<String> {
        let mut lines = Vec::new();

        for constant in self.descriptor.constants() {
            lines.push(format!(
                "{} {}={}",
                constant.type_ref, constant.identifier, constant.value
            ));
        }

        for field in self.descriptor.fields() {
            if field.type_ref.is_built_in {
                lines.push(format!("{} {}", field.type_ref, field.identifier));
                continue;
            }

            let dependency = self
                .dependencies
                .iter()
                .find(|d| d.type_ref.same_type(&field.type_ref))
                .ok_or_else(|| TypeError::UnresolvedDependency {
                    type_name: self.type_ref.base_name(),
                    field: field.identifier.clone(),
                    dependency: field.type_ref.base_name(),
                })?;

            lines.push(format!("{} {}", dependency.md5_sum()?, field.identifier));
        }

        let text = lines.join("\n");

        if let Some(line) = lines.iter().find(|line| !line.is_ascii()) {
            return Err(TypeError::NonAsciiInput {
                type_name: self.type_ref.base_name(),
                text: line.clone(),
            });
        }

        Ok(hex::encode(Md5::digest(text.as_bytes())))
    }

    fn create_message_definition(&self) -> String {
        let mut seen = HashSet::new();
        let mut ordered = Vec::new();
        collect_dependencies(self, &mut seen, &mut ordered);

        let mut definition = self.descriptor.message_definition().to_string();

        for dependency in ordered {
            definition.push('\n');
            definition.push_str(DEFINITION_SEPARATOR);
            definition.push('\n');
            definition.push_str("MSG: ");
            definition.push_str(&dependency.type_ref.base_name());
            definition.push('\n');
            definition.push_str(dependency.descriptor.message_definition());
        }

        definition
    }
}

/// Pre-order, duplicate-free walk of transitive dependencies
fn collect_dependencies<'a>(
    type_info: &'a MessageTypeInfo,
    seen: &mut HashSet<TypeIdentity>,
    ordered: &mut Vec<&'a MessageTypeInfo>,
) {
    for candidate in &type_info.dependencies {
        if !seen.insert(candidate.identity()) {
            continue;
        }

        ordered.push(candidate);
        collect_dependencies(candidate, seen, ordered);
    }
}

/// Types are equal when they share an identity and a signature. Types whose
/// sum cannot be computed are equal only when their descriptors and
/// dependency identities match.
impl PartialEq for MessageTypeInfo {
    fn eq(&self, other: &Self) -> bool {
        if !self.type_ref.same_type(&other.type_ref) {
            return false;
        }

        match (self.md5_sum(), other.md5_sum()) {
            (Ok(sum), Ok(other_sum)) => {
                sum == other_sum && self.message_definition() == other.message_definition()
            }
            (Err(_), Err(_)) => {
                self.descriptor == other.descriptor
                    && self.dependencies.len() == other.dependencies.len()
                    && self
                        .dependencies
                        .iter()
                        .zip(&other.dependencies)
                        .all(|(a, b)| a.identity() == b.identity())
            }
            _ => false,
        }
    }
}

impl Eq for MessageTypeInfo {}

impl Hash for MessageTypeInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
        self.md5_sum().ok().hash(state);
    }
}

impl fmt::Debug for MessageTypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageTypeInfo")
            .field("type", &self.type_ref.base_name())
            .field(
                "dependencies",
                &self
                    .dependencies
                    .iter()
                    .map(|d| d.type_ref.base_name())
                    .collect::<Vec<_>>(),
            )
            .field("md5_sum", &self.md5_sum.get())
            .finish()
    }
}

impl fmt::Display for MessageTypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_ref.base_name())
    }
}

#[cfg(test)]
#[path = "type_info/type_info_tests.rs"]
mod type_info_tests;

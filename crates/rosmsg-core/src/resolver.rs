//! Resolution of message descriptors into linked type information

use crate::descriptor::MessageDescriptor;
use crate::error::{TypeError, TypeResult};
use crate::type_info::MessageTypeInfo;
use crate::types::{TypeIdentity, TypeReference};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Collects message descriptors and links them into [`MessageTypeInfo`] graphs.
///
/// Types are registered first with [`add`](Self::add); resolution happens in a
/// second phase so declaration order does not matter.
#[derive(Debug, Default)]
pub struct MessageTypeResolver {
    descriptors: BTreeMap<TypeIdentity, (TypeReference, MessageDescriptor)>,
    resolved: BTreeMap<TypeIdentity, Arc<MessageTypeInfo>>,
}

impl MessageTypeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a message type
    pub fn add(&mut self, type_ref: TypeReference, descriptor: MessageDescriptor) -> TypeResult<()> {
        let identity = type_ref.identity();

        if self.descriptors.contains_key(&identity) {
            return Err(TypeError::DuplicateType(identity.to_string()));
        }

        self.descriptors.insert(identity, (type_ref, descriptor));
        Ok(())
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Resolve a single registered type and everything it depends on
    pub fn resolve(&mut self, identity: &TypeIdentity) -> TypeResult<Arc<MessageTypeInfo>> {
        let mut in_progress = Vec::new();
        self.resolve_inner(identity, "<root>", &mut in_progress)
    }

    /// Resolve every registered type, in identity order
    pub fn resolve_all(&mut self) -> TypeResult<Vec<Arc<MessageTypeInfo>>> {
        let identities: Vec<TypeIdentity> = self.descriptors.keys().cloned().collect();

        identities
            .iter()
            .map(|identity| self.resolve(identity))
            .collect()
    }

    fn resolve_inner(
        &mut self,
        identity: &TypeIdentity,
        referenced_by: &str,
        in_progress: &mut Vec<TypeIdentity>,
    ) -> TypeResult<Arc<MessageTypeInfo>> {
        if let Some(resolved) = self.resolved.get(identity) {
            return Ok(Arc::clone(resolved));
        }

        if let Some(start) = in_progress.iter().position(|i| i == identity) {
            let chain = in_progress[start..]
                .iter()
                .chain(std::iter::once(identity))
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" -> ");
            return Err(TypeError::CircularTypeDependency { chain });
        }

        let (type_ref, descriptor) =
            self.descriptors
                .get(identity)
                .cloned()
                .ok_or_else(|| TypeError::UnknownType {
                    type_name: identity.to_string(),
                    referenced_by: referenced_by.to_string(),
                })?;

        in_progress.push(identity.clone());
        let owner = identity.to_string();

        let mut dependencies = Vec::new();
        for dependency in descriptor.dependency_types() {
            dependencies.push(self.resolve_inner(&dependency, &owner, in_progress)?);
        }

        in_progress.pop();

        let info = Arc::new(MessageTypeInfo::new(type_ref, descriptor, dependencies));
        let md5_sum = info.md5_sum()?;
        debug!(message_type = %owner, md5_sum, "Resolved message type");

        self.resolved.insert(identity.clone(), Arc::clone(&info));
        Ok(info)
    }
}

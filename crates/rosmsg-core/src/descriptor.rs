//! Parsed message, service and action definitions

use crate::error::{TypeError, TypeResult};
use crate::types::{TypeIdentity, TypeReference};
use serde::{Deserialize, Serialize};

/// A field declaration (`geometry_msgs/Pose pose`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub type_ref: TypeReference,
    pub identifier: String,
}

/// A constant declaration (`uint8 DEBUG=1`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constant {
    pub type_ref: TypeReference,
    pub identifier: String,
    pub value: String,
}

/// One declaration inside a message definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MessageItem {
    Field(Field),
    Constant(Constant),
}

/// Ordered fields and constants of a single message type.
///
/// Item order is significant: the 1-based position of an item is its index
/// in the serialized field list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDescriptor {
    items: Vec<MessageItem>,
    message_definition: String,
}

impl MessageDescriptor {
    /// Create an empty descriptor with the raw source text of the definition
    pub fn new(message_definition: impl Into<String>) -> Self {
        Self {
            items: Vec::new(),
            message_definition: message_definition.into(),
        }
    }

    /// Append a field
    pub fn add_field(&mut self, type_ref: TypeReference, identifier: impl Into<String>) {
        self.items.push(MessageItem::Field(Field {
            type_ref,
            identifier: identifier.into(),
        }));
    }

    /// Append a constant; only built-in, non-array types are accepted
    pub fn add_constant(
        &mut self,
        type_ref: TypeReference,
        identifier: impl Into<String>,
        value: impl Into<String>,
    ) -> TypeResult<()> {
        let identifier = identifier.into();

        if !type_ref.is_built_in || type_ref.is_array {
            return Err(TypeError::InvalidConstant {
                constant: identifier,
                type_ref: type_ref.to_string(),
            });
        }

        self.items.push(MessageItem::Constant(Constant {
            type_ref,
            identifier,
            value: value.into(),
        }));
        Ok(())
    }

    /// Builder form of [`add_field`](Self::add_field)
    #[must_use]
    pub fn with_field(mut self, type_ref: TypeReference, identifier: impl Into<String>) -> Self {
        self.add_field(type_ref, identifier);
        self
    }

    /// Raw source text of the definition
    pub fn message_definition(&self) -> &str {
        &self.message_definition
    }

    /// All items in declaration order
    pub fn items(&self) -> &[MessageItem] {
        &self.items
    }

    /// Fields in declaration order
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.items.iter().filter_map(|item| match item {
            MessageItem::Field(field) => Some(field),
            MessageItem::Constant(_) => None,
        })
    }

    /// Constants in declaration order
    pub fn constants(&self) -> impl Iterator<Item = &Constant> {
        self.items.iter().filter_map(|item| match item {
            MessageItem::Constant(constant) => Some(constant),
            MessageItem::Field(_) => None,
        })
    }

    /// Fields paired with their 1-based item position
    pub fn indexed_fields(&self) -> impl Iterator<Item = (usize, &Field)> {
        self.items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| match item {
                MessageItem::Field(field) => Some((index + 1, field)),
                MessageItem::Constant(_) => None,
            })
    }

    /// Constants paired with their 1-based item position
    pub fn indexed_constants(&self) -> impl Iterator<Item = (usize, &Constant)> {
        self.items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| match item {
                MessageItem::Constant(constant) => Some((index + 1, constant)),
                MessageItem::Field(_) => None,
            })
    }

    /// Distinct non built-in field types, in first-use order
    pub fn dependency_types(&self) -> Vec<TypeIdentity> {
        let mut dependencies: Vec<TypeIdentity> = Vec::new();

        for field in self.fields() {
            if field.type_ref.is_built_in {
                continue;
            }

            let identity = field.type_ref.identity();
            if !dependencies.contains(&identity) {
                dependencies.push(identity);
            }
        }

        dependencies
    }

    /// Check if the first field is a `std_msgs/Header` named `header`
    pub fn has_header(&self) -> bool {
        self.fields().next().is_some_and(|field| {
            field.identifier == "header"
                && !field.type_ref.is_array
                && field.type_ref.package_name.as_deref() == Some(crate::types::HEADER_PACKAGE)
                && field.type_ref.type_name == crate::types::HEADER_TYPE
        })
    }
}

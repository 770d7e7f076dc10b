//! Data records handed to package generators
//!
//! Every generator receives the same explicit records, so templates never
//! reach into the parser or type model directly.

use crate::error::CodegenResult;
use crate::naming::{self, MessagePart};
use crate::parser::ParsedMessage;
use rosmsg_core::MessageTypeInfo;
use rosmsg_package::{MessageKind, PackageInfo};
use serde::{Deserialize, Serialize};

/// Package-level template data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageTemplateData {
    pub ros_name: String,
    pub version: String,
    pub name: String,
    pub namespace: String,
    pub description: Option<String>,
    pub project_url: Option<String>,
    pub repository_url: Option<String>,
    pub authors: Vec<String>,
    /// Authors joined with `, `
    pub author_list: String,
    pub is_meta_package: bool,
}

impl PackageTemplateData {
    pub fn new(package: &PackageInfo, root_namespace: &str) -> Self {
        Self {
            ros_name: package.name.clone(),
            version: package.version.clone(),
            name: naming::to_pascal_case(&package.name),
            namespace: naming::namespace(root_namespace, &package.name),
            description: package.description.clone(),
            project_url: package.project_url.clone(),
            repository_url: package.repository_url.clone(),
            authors: package.authors.clone(),
            author_list: package.authors.join(", "),
            is_meta_package: package.is_meta_package,
        }
    }
}

/// A field of a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldTemplateData {
    /// 1-based position among all items of the message
    pub index: usize,
    pub ros_type: String,
    pub ros_identifier: String,
    pub identifier: String,
    /// Package of a non built-in type
    pub package: Option<String>,
    pub is_built_in: bool,
    pub is_array: bool,
    /// 0 for variable length arrays
    pub array_size: usize,
}

/// A constant of a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantTemplateData {
    /// 1-based position among all items of the message
    pub index: usize,
    pub ros_type: String,
    pub ros_identifier: String,
    pub value: String,
}

/// Message-level template data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageTemplateData {
    pub package: String,
    pub ros_type_name: String,
    pub type_name: String,
    pub kind: MessageKind,
    pub part: Option<MessagePart>,
    pub md5_sum: String,
    pub message_definition: String,
    pub has_header: bool,
    pub is_service_part: bool,
    pub is_action_part: bool,
    pub fields: Vec<FieldTemplateData>,
    pub constants: Vec<ConstantTemplateData>,
}

impl MessageTemplateData {
    /// Build template data for a parsed message and its resolved type.
    pub fn new(message: &ParsedMessage, type_info: &MessageTypeInfo) -> CodegenResult<Self> {
        let descriptor = &message.descriptor;

        let fields = descriptor
            .indexed_fields()
            .map(|(index, field)| FieldTemplateData {
                index,
                ros_type: field.type_ref.base_name(),
                ros_identifier: field.identifier.clone(),
                identifier: naming::to_camel_case(&field.identifier),
                package: field.type_ref.package_name.clone(),
                is_built_in: field.type_ref.is_built_in,
                is_array: field.type_ref.is_array,
                array_size: field.type_ref.array_size,
            })
            .collect();

        let constants = descriptor
            .indexed_constants()
            .map(|(index, constant)| ConstantTemplateData {
                index,
                ros_type: constant.type_ref.base_name(),
                ros_identifier: constant.identifier.clone(),
                value: constant.value.clone(),
            })
            .collect();

        Ok(Self {
            package: message.type_ref.package_name.clone().unwrap_or_default(),
            ros_type_name: naming::ros_type_name(&message.file_type_name, message.part),
            type_name: naming::type_name(&message.file_type_name, message.part),
            kind: message.kind,
            part: message.part,
            md5_sum: type_info.md5_sum()?.to_string(),
            message_definition: type_info.message_definition().to_string(),
            has_header: descriptor.has_header(),
            is_service_part: message.kind == MessageKind::Service,
            is_action_part: message.kind == MessageKind::Action,
            fields,
            constants,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use rosmsg_core::{MessageDescriptor, TypeReference};

    fn log_message() -> ParsedMessage {
        let mut descriptor = MessageDescriptor::new("byte DEBUG=1\nHeader header\nbyte log_level");
        descriptor
            .add_constant(TypeReference::built_in("byte"), "DEBUG", "1")
            .unwrap();
        descriptor.add_field(TypeReference::message("std_msgs", "Header"), "header");
        descriptor.add_field(TypeReference::built_in("byte"), "log_level");

        ParsedMessage {
            type_ref: TypeReference::message("rosgraph_msgs", "Log"),
            kind: MessageKind::Message,
            part: None,
            file_type_name: "Log".into(),
            descriptor,
        }
    }

    fn header_info() -> std::sync::Arc<MessageTypeInfo> {
        std::sync::Arc::new(MessageTypeInfo::new(
            TypeReference::message("std_msgs", "Header"),
            MessageDescriptor::new("uint32 seq\ntime stamp\nstring frame_id")
                .with_field(TypeReference::built_in("uint32"), "seq")
                .with_field(TypeReference::built_in("time"), "stamp")
                .with_field(TypeReference::built_in("string"), "frame_id"),
            Vec::new(),
        ))
    }

    #[test]
    fn PackageTemplateData___new___derives_names_and_author_list() {
        let mut package = PackageInfo::new("nav_msgs", "1.12.7", "/ws/nav_msgs");
        package.authors = vec!["A <a@example.com>".into(), "B".into()];

        let data = PackageTemplateData::new(&package, "Robotics");

        assert_eq!(data.name, "NavMsgs");
        assert_eq!(data.namespace, "Robotics.NavMsgs");
        assert_eq!(data.author_list, "A <a@example.com>, B");
    }

    #[test]
    fn MessageTemplateData___new___indexes_items_by_position() {
        let message = log_message();
        let info = MessageTypeInfo::new(
            message.type_ref.clone(),
            message.descriptor.clone(),
            vec![header_info()],
        );

        let data = MessageTemplateData::new(&message, &info).unwrap();

        assert_eq!(data.constants[0].index, 1);
        assert_eq!(
            data.fields.iter().map(|f| f.index).collect::<Vec<_>>(),
            [2, 3]
        );
        assert_eq!(data.fields[1].identifier, "logLevel");
        assert_eq!(data.fields[0].ros_type, "std_msgs/Header");
        assert!(data.has_header);
        assert_eq!(data.md5_sum.len(), 32);
        assert!(data.message_definition.contains("MSG: std_msgs/Header"));
    }

    #[test]
    fn MessageTemplateData___unresolved_dependency___is_an_error() {
        let message = log_message();
        let info = MessageTypeInfo::new(
            message.type_ref.clone(),
            message.descriptor.clone(),
            Vec::new(),
        );

        assert!(MessageTemplateData::new(&message, &info).is_err());
    }

    #[test]
    fn MessageTemplateData___service_part___uses_suffixed_names() {
        let message = ParsedMessage {
            type_ref: TypeReference::message("test_msgs", "AddTwoIntsRequest"),
            kind: MessageKind::Service,
            part: Some(MessagePart::Request),
            file_type_name: "AddTwoInts".into(),
            descriptor: MessageDescriptor::new(""),
        };
        let info = MessageTypeInfo::new(message.type_ref.clone(), MessageDescriptor::new(""), Vec::new());

        let data = MessageTemplateData::new(&message, &info).unwrap();

        assert_eq!(data.ros_type_name, "AddTwoIntsRequest");
        assert!(data.is_service_part);
        assert!(!data.is_action_part);
    }
}

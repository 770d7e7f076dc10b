//! Naming convention utilities for code generation.
//!
//! # Supported Conversions
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `snake_case` | [`to_camel_case`] | `camelCase` |
//! | `snake_case` | [`to_pascal_case`] | `PascalCase` |
//! | `word` | [`capitalize`] | `Word` |
//! | `AddTwoInts` + request | [`type_name`] | `AddTwoIntsRequest` |
//! | `Root` + `nav_msgs` | [`namespace`] | `Root.NavMsgs` |

use serde::{Deserialize, Serialize};

/// Part of a service or action file that becomes its own message type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessagePart {
    Request,
    Response,
    Goal,
    Result,
    Feedback,
}

impl MessagePart {
    /// Parts of a `.srv` file in section order.
    pub const SERVICE: [MessagePart; 2] = [MessagePart::Request, MessagePart::Response];

    /// Parts of an `.action` file in section order.
    pub const ACTION: [MessagePart; 3] =
        [MessagePart::Goal, MessagePart::Result, MessagePart::Feedback];

    /// Suffix appended to the file's type name.
    pub fn suffix(&self) -> &'static str {
        match self {
            MessagePart::Request => "Request",
            MessagePart::Response => "Response",
            MessagePart::Goal => "Goal",
            MessagePart::Result => "Result",
            MessagePart::Feedback => "Feedback",
        }
    }
}

/// Convert snake_case to camelCase.
///
/// # Examples
///
/// ```
/// use rosmsg_codegen::naming::to_camel_case;
///
/// assert_eq!(to_camel_case("frame_id"), "frameId");
/// assert_eq!(to_camel_case("already"), "already");
/// ```
pub fn to_camel_case(s: &str) -> String {
    let mut result = String::new();
    let mut capitalize_next = false;

    for c in s.chars() {
        if c == '_' {
            capitalize_next = !result.is_empty();
        } else if capitalize_next {
            result.extend(c.to_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }

    result
}

/// Convert a string to PascalCase.
///
/// # Examples
///
/// ```
/// use rosmsg_codegen::naming::to_pascal_case;
///
/// assert_eq!(to_pascal_case("geometry_msgs"), "GeometryMsgs");
/// assert_eq!(to_pascal_case("my-plugin"), "MyPlugin");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    s.split(['-', '_']).map(capitalize).collect()
}

/// Capitalize the first letter of a string.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Message type name as used in the ROS graph (`AddTwoIntsRequest`).
pub fn ros_type_name(name: &str, part: Option<MessagePart>) -> String {
    let name = name.trim();

    match part {
        Some(part) => format!("{}{}", name, part.suffix()),
        None => name.to_string(),
    }
}

/// Generated type name: the ROS type name with its first letter capitalized.
pub fn type_name(name: &str, part: Option<MessagePart>) -> String {
    capitalize(&ros_type_name(name, part))
}

/// Namespace for a package's generated code.
///
/// ```
/// use rosmsg_codegen::naming::namespace;
///
/// assert_eq!(namespace("Robotics.Messages", "nav_msgs"), "Robotics.Messages.NavMsgs");
/// assert_eq!(namespace("", "nav_msgs"), "NavMsgs");
/// ```
pub fn namespace(root_namespace: &str, package_name: &str) -> String {
    let root_namespace = root_namespace.trim().trim_end_matches('.');
    let package = to_pascal_case(package_name);

    if root_namespace.is_empty() {
        package
    } else {
        format!("{root_namespace}.{package}")
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn to_camel_case___converts_snake_case() {
        assert_eq!(to_camel_case("frame_id"), "frameId");
        assert_eq!(to_camel_case("child_frame_id"), "childFrameId");
    }

    #[test]
    fn to_camel_case___handles_consecutive_and_edge_underscores() {
        assert_eq!(to_camel_case("foo__bar"), "fooBar");
        assert_eq!(to_camel_case("_leading"), "leading");
        assert_eq!(to_camel_case("trailing_"), "trailing");
        assert_eq!(to_camel_case(""), "");
    }

    #[test]
    fn to_pascal_case___converts_package_names() {
        assert_eq!(to_pascal_case("std_msgs"), "StdMsgs");
        assert_eq!(to_pascal_case("x"), "X");
        assert_eq!(to_pascal_case(""), "");
    }

    #[test]
    fn capitalize___preserves_rest_of_string() {
        assert_eq!(capitalize("pose"), "Pose");
        assert_eq!(capitalize("ALLCAPS"), "ALLCAPS");
    }

    #[test]
    fn ros_type_name___appends_part_suffix() {
        assert_eq!(ros_type_name("AddTwoInts", Some(MessagePart::Request)), "AddTwoIntsRequest");
        assert_eq!(ros_type_name("Fibonacci", Some(MessagePart::Feedback)), "FibonacciFeedback");
        assert_eq!(ros_type_name("Pose", None), "Pose");
    }

    #[test]
    fn type_name___capitalizes_first_letter() {
        assert_eq!(type_name("lowerCase", None), "LowerCase");
        assert_eq!(type_name("getMap", Some(MessagePart::Goal)), "GetMapGoal");
    }

    #[test]
    fn namespace___ignores_trailing_dot_in_root() {
        assert_eq!(namespace("Root.", "std_msgs"), "Root.StdMsgs");
    }

    #[test]
    fn MessagePart___section_orders() {
        assert_eq!(MessagePart::SERVICE.map(|p| p.suffix()), ["Request", "Response"]);
        assert_eq!(
            MessagePart::ACTION.map(|p| p.suffix()),
            ["Goal", "Result", "Feedback"]
        );
    }
}

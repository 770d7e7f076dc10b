//! Type references and the built-in type table
//!
//! A [`TypeReference`] names the type of a field or constant. Two references
//! denote the same message type when their package and type names match
//! exactly; array arity is a property of the field, not of the type, and is
//! ignored by [`TypeReference::identity`].

use crate::error::{TypeError, TypeResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Primitive types understood natively by the message protocol
pub const BUILT_IN_TYPES: &[&str] = &[
    "bool", "int8", "uint8", "int16", "uint16", "int32", "uint32", "int64", "uint64", "float32",
    "float64", "string", "time", "duration", "byte", "char",
];

/// Package that owns the implicit `Header` type
pub const HEADER_PACKAGE: &str = "std_msgs";

/// Name of the implicitly qualified header type
pub const HEADER_TYPE: &str = "Header";

/// Check if a bare type name is one of the protocol built-ins
pub fn is_built_in(type_name: &str) -> bool {
    BUILT_IN_TYPES.contains(&type_name)
}

/// Package-qualified identity of a message type
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeIdentity {
    pub package_name: Option<String>,
    pub type_name: String,
}

impl TypeIdentity {
    pub fn new(package_name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            package_name: Some(package_name.into()),
            type_name: type_name.into(),
        }
    }
}

impl fmt::Display for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.package_name {
            Some(package) => write!(f, "{}/{}", package, self.type_name),
            None => write!(f, "{}", self.type_name),
        }
    }
}

/// Reference to a message type as written in a field or constant declaration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeReference {
    /// Owning package; always `None` for built-in types
    pub package_name: Option<String>,

    /// Bare type name (`uint8`, `Pose`, ...)
    pub type_name: String,

    /// Whether the declaration is an array
    pub is_array: bool,

    /// Fixed array length, 0 for variable length arrays
    pub array_size: usize,

    /// Whether this is a protocol built-in type
    pub is_built_in: bool,
}

impl TypeReference {
    /// Create a reference to a built-in type
    pub fn built_in(type_name: impl Into<String>) -> Self {
        Self {
            package_name: None,
            type_name: type_name.into(),
            is_array: false,
            array_size: 0,
            is_built_in: true,
        }
    }

    /// Create a reference to a user-defined message type
    pub fn message(package_name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            package_name: Some(package_name.into()),
            type_name: type_name.into(),
            is_array: false,
            array_size: 0,
            is_built_in: false,
        }
    }

    /// Turn this reference into an array; `None` means variable length
    #[must_use]
    pub fn into_array(mut self, size: Option<usize>) -> Self {
        self.is_array = true;
        self.array_size = size.unwrap_or(0);
        self
    }

    /// Parse a type as written in a message file.
    ///
    /// Bare user-defined names resolve against `current_package`, except
    /// `Header` which always resolves to `std_msgs/Header`.
    ///
    /// ```
    /// use rosmsg_core::TypeReference;
    ///
    /// let t = TypeReference::parse("geometry_msgs/Point[]", "nav_msgs").unwrap();
    /// assert_eq!(t.package_name.as_deref(), Some("geometry_msgs"));
    /// assert!(t.is_array);
    /// assert_eq!(t.to_string(), "geometry_msgs/Point[]");
    /// ```
    pub fn parse(text: &str, current_package: &str) -> TypeResult<Self> {
        let text = text.trim();
        let invalid = || TypeError::InvalidTypeReference(text.to_string());

        let (base, array) = match text.find('[') {
            Some(open) => {
                let size = text[open + 1..].strip_suffix(']').ok_or_else(invalid)?;
                let size = if size.is_empty() {
                    None
                } else {
                    Some(size.parse::<usize>().map_err(|_| invalid())?)
                };
                (&text[..open], Some(size))
            }
            None => (text, None),
        };

        let reference = match base.split_once('/') {
            Some((package, name)) => {
                if !is_identifier(package) || !is_identifier(name) {
                    return Err(invalid());
                }
                Self::message(package, name)
            }
            None if !is_identifier(base) => return Err(invalid()),
            None if is_built_in(base) => Self::built_in(base),
            None if base == HEADER_TYPE => Self::message(HEADER_PACKAGE, HEADER_TYPE),
            None => Self::message(current_package, base),
        };

        Ok(match array {
            Some(size) => reference.into_array(size),
            None => reference,
        })
    }

    /// Type identity with array arity stripped
    pub fn identity(&self) -> TypeIdentity {
        TypeIdentity {
            package_name: self.package_name.clone(),
            type_name: self.type_name.clone(),
        }
    }

    /// Check if two references denote the same type, ignoring array arity
    pub fn same_type(&self, other: &TypeReference) -> bool {
        self.package_name == other.package_name && self.type_name == other.type_name
    }

    /// Type name without array suffix (`pkg/Type` or `uint8`)
    pub fn base_name(&self) -> String {
        self.identity().to_string()
    }
}

impl fmt::Display for TypeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.package_name {
            Some(package) => write!(f, "{}/{}", package, self.type_name)?,
            None => write!(f, "{}", self.type_name)?,
        }

        if self.is_array {
            if self.array_size > 0 {
                write!(f, "[{}]", self.array_size)?;
            } else {
                write!(f, "[]")?;
            }
        }

        Ok(())
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

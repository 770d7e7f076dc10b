//! rosmsg-core - Message type model, MD5 signatures and flattened definitions
//!
//! This crate provides the type model shared by the package tooling and the
//! code generation pipeline:
//! - [`TypeReference`] for field and constant types
//! - [`MessageDescriptor`] for the ordered contents of a message
//! - [`MessageTypeInfo`] for the structural MD5 sum and flattened definition
//! - [`MessageTypeResolver`] for linking descriptors into type graphs
//!
//! # Example
//!
//! ```
//! use rosmsg_core::{MessageDescriptor, MessageTypeResolver, TypeIdentity, TypeReference};
//!
//! let mut resolver = MessageTypeResolver::new();
//! resolver.add(
//!     TypeReference::message("std_msgs", "String"),
//!     MessageDescriptor::new("string data")
//!         .with_field(TypeReference::built_in("string"), "data"),
//! )?;
//!
//! let info = resolver.resolve(&TypeIdentity::new("std_msgs", "String"))?;
//! assert_eq!(info.md5_sum()?, "992ce8a1687cec8c8bd883ec73ca41d1");
//! # Ok::<(), rosmsg_core::TypeError>(())
//! ```

mod descriptor;
mod error;
mod resolver;
mod type_info;
mod types;

pub use descriptor::{Constant, Field, MessageDescriptor, MessageItem};
pub use error::{TypeError, TypeResult};
pub use resolver::MessageTypeResolver;
pub use type_info::{DEFINITION_SEPARATOR, MessageTypeInfo};
pub use types::{
    BUILT_IN_TYPES, HEADER_PACKAGE, HEADER_TYPE, TypeIdentity, TypeReference, is_built_in,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        MessageDescriptor, MessageTypeInfo, MessageTypeResolver, TypeError, TypeIdentity,
        TypeReference, TypeResult,
    };
}

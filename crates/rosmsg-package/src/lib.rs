//! ROS package discovery for rosmsg
//!
//! This crate locates ROS packages on disk and reads their metadata:
//! - [`PackageFolder`] for finding `package.xml`-bearing directories
//! - [`PackageManifest`] for reading `package.xml`
//! - [`PackageInfo`] for package identity, metadata and message files
//! - [`PackageFilter`] for selecting the mandatory packages of a build
//!
//! # Package Layout
//!
//! ```text
//! geometry_msgs/
//! ├── package.xml
//! ├── msg/
//! │   ├── Point.msg
//! │   └── Pose.msg
//! ├── srv/
//! │   └── GetPose.srv
//! └── action/
//!     └── Move.action
//! ```
//!
//! # Example
//!
//! ```no_run
//! use rosmsg_package::{BuildStrategy, PackageFilter, PackageFolder, read_packages};
//!
//! let folders = PackageFolder::find("/opt/ros/noetic/share", BuildStrategy::Mandatory)?;
//! let packages = read_packages(&folders)?;
//! let packages = PackageFilter::new(["*_msgs"]).reclassify(&packages);
//! # Ok::<(), rosmsg_package::PackageError>(())
//! ```

mod error;
mod filter;
mod folder;
mod manifest;
mod package;

pub use error::PackageError;
pub use filter::{FilterTerm, PackageFilter};
pub use folder::{BuildStrategy, PackageFolder, is_package_folder, read_packages, split_search_path};
pub use manifest::{MANIFEST_FILE, PackageManifest, Person};
pub use package::{MessageFile, MessageKind, PackageInfo, find_message_files};

/// Result type for package operations.
pub type PackageResult<T> = Result<T, PackageError>;

/// Environment variable listing additional package search roots.
pub const ROS_PACKAGE_PATH_VAR: &str = "ROS_PACKAGE_PATH";

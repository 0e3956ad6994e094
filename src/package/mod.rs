//! Package metadata collaborator.
//!
//! The minimal document model the index consumes when registering packages:
//!
//! - [`PackageMeta`] - fields read from a package's `datapackage.json`
//! - [`open_package`] - load a metadata document from a file or directory
//! - [`discover_packages`] - walk a tree for packages to register

pub mod discovery;
pub mod metadata;

pub use discovery::discover_packages;
pub use metadata::{METADATA_FILENAME, PackageMeta, open_package};

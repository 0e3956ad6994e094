//! pkgindex - Index and search locally built data packages
//!
//! This library maintains a local, file-persisted search index for a
//! data-packaging workflow. Built packages are registered under three kinds
//! of key — opaque identifier, human name, and versioned name — and later
//! resolved from a search term to ranked package locations. It supports:
//!
//! - Registering packages from their metadata documents
//! - Exact and substring search with format filtering
//! - Deterministic ranking by name, version, and format preference
//! - Crash-safe persistence with atomic, backup-preserving writes
//!
//! # Example
//!
//! ```no_run
//! use pkgindex::{FormatFilter, SearchIndex, index_file_path};
//!
//! let mut index = SearchIndex::new(index_file_path()?);
//! index.add_entry("id-1", "acme-survey-1", "acme-survey", "1", None, "file:///data/acme")?;
//! index.write()?;
//!
//! let hits = index.search("acme-survey", FormatFilter::default())?;
//! println!("Found {} packages", hits.len());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod index;
pub mod package;
pub mod utils;

// Re-export commonly used types
pub use index::{FormatFilter, IndexError, PackageFormat, PackageRecord, SearchIndex, Version};
pub use package::{PackageMeta, discover_packages, open_package};
pub use utils::{index_file_path, path_to_file_url, search_key};

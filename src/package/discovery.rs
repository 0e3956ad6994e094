//! Package discovery: walking a directory tree for metadata documents.

use std::collections::HashSet;
use std::path::Path;

use anyhow::Result;
use walkdir::WalkDir;

use super::metadata::{METADATA_FILENAME, PackageMeta, open_package};

/// Find every package at or under `root`.
///
/// A non-directory `root` is opened as a single package. During a tree walk,
/// a package that fails to open is warned about on stderr and skipped, so
/// one damaged metadata file does not abort an indexing run.
pub fn discover_packages(root: &Path) -> Result<Vec<PackageMeta>> {
    if !root.is_dir() {
        return Ok(vec![open_package(root)?]);
    }

    let mut packages = Vec::new();
    let mut seen = HashSet::new();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                eprintln!("Warning: skipping unreadable entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() || entry.file_name() != METADATA_FILENAME {
            continue;
        }

        match open_package(entry.path()) {
            Ok(meta) => {
                if seen.insert(meta.metadata_path.clone()) {
                    packages.push(meta);
                }
            }
            Err(e) => {
                eprintln!("Warning: failed to open package {}: {}", entry.path().display(), e);
            }
        }
    }

    Ok(packages)
}

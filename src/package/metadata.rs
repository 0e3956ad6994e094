use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Name of the metadata document that marks a package directory.
pub const METADATA_FILENAME: &str = "datapackage.json";

/// Metadata of one package, as read from its `datapackage.json`.
///
/// The index trusts these fields as supplied; it performs no validation of
/// the package itself.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PackageMeta {
    /// Canonical, version-qualified name, e.g. `acme.com-survey-2019-1`
    pub name: String,
    /// Opaque, globally unique identifier
    pub identifier: String,
    pub version: String,
    /// Present once the package has been built and released
    #[serde(default)]
    pub issued: Option<DateTime<Utc>>,
    /// Built artifacts shipped with the package, relative to its root
    #[serde(default)]
    pub distributions: Vec<String>,

    /// Package root directory, resolved at open time
    #[serde(skip)]
    pub root: PathBuf,
    /// Absolute location of the metadata document
    #[serde(skip)]
    pub metadata_path: PathBuf,
}

impl PackageMeta {
    /// Canonical name without its version qualifier.
    pub fn nonver_name(&self) -> String {
        let suffix = format!("-{}", self.version);
        self.name.strip_suffix(&suffix).unwrap_or(&self.name).to_string()
    }

    /// Absolute paths of the declared distributions.
    pub fn distribution_paths(&self) -> Vec<PathBuf> {
        self.distributions.iter().map(|d| self.root.join(d)).collect()
    }
}

/// Open a package from a metadata file or a directory containing one.
pub fn open_package(path: &Path) -> Result<PackageMeta> {
    let metadata_path =
        if path.is_dir() { path.join(METADATA_FILENAME) } else { path.to_path_buf() };
    if !metadata_path.exists() {
        bail!("no {} found at {}", METADATA_FILENAME, path.display());
    }

    let contents = fs::read_to_string(&metadata_path)
        .with_context(|| format!("Failed to read package metadata {}", metadata_path.display()))?;
    let mut meta: PackageMeta = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse package metadata {}", metadata_path.display()))?;

    let metadata_path = metadata_path
        .canonicalize()
        .with_context(|| format!("Failed to resolve package path {}", metadata_path.display()))?;
    meta.root = metadata_path.parent().map(Path::to_path_buf).unwrap_or_else(|| "/".into());
    meta.metadata_path = metadata_path;

    Ok(meta)
}

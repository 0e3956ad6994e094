//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Builder for creating package directory trees with metadata documents
pub struct PackageTreeBuilder {
    temp_dir: TempDir,
}

impl PackageTreeBuilder {
    /// Create a new builder with an empty root directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    /// Get the path to the root directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Add a package directory with the given metadata and stub artifacts
    /// for each declared distribution
    pub fn with_package(self, dir_name: &str, meta: &PackageMetaBuilder) -> Self {
        let dir = self.temp_dir.path().join(dir_name);
        fs::create_dir_all(&dir).expect("Failed to create package dir");
        fs::write(dir.join("datapackage.json"), meta.to_json())
            .expect("Failed to write metadata");
        for dist in &meta.distributions {
            fs::write(dir.join(dist), b"artifact").expect("Failed to write distribution");
        }
        self
    }

    /// Add a file with arbitrary content at a path relative to the root
    pub fn with_file(self, rel_path: &str, content: &str) -> Self {
        let path = self.temp_dir.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(path, content).expect("Failed to write file");
        self
    }

    /// Build and return the temp directory (consumes self)
    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for PackageTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `datapackage.json` documents
pub struct PackageMetaBuilder {
    name: String,
    identifier: String,
    version: String,
    issued: Option<String>,
    pub distributions: Vec<String>,
}

impl PackageMetaBuilder {
    /// Create a new metadata document with default values
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            identifier: format!("id-{name}"),
            version: "1".to_string(),
            issued: None,
            distributions: Vec::new(),
        }
    }

    /// Set the identifier
    pub fn identifier(mut self, identifier: &str) -> Self {
        self.identifier = identifier.to_string();
        self
    }

    /// Set the version
    pub fn version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    /// Mark the package as issued (built and released)
    pub fn issued(mut self) -> Self {
        self.issued = Some("2019-01-22T10:24:00Z".to_string());
        self
    }

    /// Add a built artifact relative to the package root
    pub fn distribution(mut self, rel_path: &str) -> Self {
        self.distributions.push(rel_path.to_string());
        self
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> String {
        let issued_field =
            self.issued.as_ref().map(|i| format!(r#","issued":"{i}""#)).unwrap_or_default();
        let distributions_field = if self.distributions.is_empty() {
            String::new()
        } else {
            let items: Vec<String> =
                self.distributions.iter().map(|d| format!(r#""{d}""#)).collect();
            format!(r#","distributions":[{}]"#, items.join(","))
        };

        format!(
            r#"{{"name":"{}","identifier":"{}","version":"{}"{}{}}}"#,
            self.name, self.identifier, self.version, issued_field, distributions_field
        )
    }
}

/// Helper to create a tree with one issued and one source-only package
pub fn realistic_package_tree() -> TempDir {
    PackageTreeBuilder::new()
        .with_package(
            "survey",
            &PackageMetaBuilder::new("acme-survey-1")
                .identifier("8bd1ff3a-0001-4ad5-9cba-bd4b1d5674c9")
                .issued()
                .distribution("acme-survey-1.zip")
                .distribution("acme-survey-1.csv"),
        )
        .with_package(
            "census",
            &PackageMetaBuilder::new("acme-census-2")
                .identifier("8bd1ff3a-0002-4ad5-9cba-bd4b1d5674c9")
                .version("2"),
        )
        .build()
}

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Artifact format of an indexed package.
///
/// The set is closed: a format string outside it fails to decode, so an
/// unknown format can never reach ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageFormat {
    /// Filesystem (directory) package
    Fs,
    Zip,
    Xlsx,
    Csv,
    /// Unbuilt source-only reference
    Source,
}

impl PackageFormat {
    /// Fixed ranking used to pick the best artifact among ties on name and
    /// version. Higher wins.
    pub fn priority(self) -> u8 {
        match self {
            PackageFormat::Fs => 5,
            PackageFormat::Zip => 4,
            PackageFormat::Xlsx => 3,
            PackageFormat::Csv => 2,
            PackageFormat::Source => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PackageFormat::Fs => "fs",
            PackageFormat::Zip => "zip",
            PackageFormat::Xlsx => "xlsx",
            PackageFormat::Csv => "csv",
            PackageFormat::Source => "source",
        }
    }

    /// Map a built artifact's file extension to its format, if it has one.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "zip" => Some(PackageFormat::Zip),
            "xlsx" => Some(PackageFormat::Xlsx),
            "csv" => Some(PackageFormat::Csv),
            _ => None,
        }
    }
}

impl fmt::Display for PackageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fs" => Ok(PackageFormat::Fs),
            "zip" => Ok(PackageFormat::Zip),
            "xlsx" => Ok(PackageFormat::Xlsx),
            "csv" => Ok(PackageFormat::Csv),
            "source" => Ok(PackageFormat::Source),
            other => Err(format!(
                "unknown package format `{other}` (expected fs, zip, xlsx, csv or source)"
            )),
        }
    }
}

/// Package version, held in its normalized storage form.
///
/// Integer-coercible versions are stored as `V` plus a 10-digit zero-padded
/// integer, matching the index files the original packaging tool wrote.
/// Comparison does not rely on the padding: two numeric versions compare as
/// integers, anything else falls back to lexical order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Version(String);

impl Version {
    pub fn new(raw: &str) -> Self {
        match raw.trim().parse::<u64>() {
            Ok(n) => Version(format!("V{n:010}")),
            Err(_) => Version(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn numeric(&self) -> Option<u64> {
        self.0.strip_prefix('V').unwrap_or(&self.0).parse().ok()
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.numeric(), other.numeric()) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.0.cmp(&other.0)),
            _ => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier alias: an opaque package identifier pointing at its
/// versioned-name record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentAlias {
    #[serde(rename = "ref")]
    pub nvname: String,
}

/// Name alias: a human package name pointing at its versioned-name record.
///
/// Carries a denormalized version and identifier so a name hit can be
/// displayed without a second lookup. At most one current alias per name;
/// later registrations overwrite it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameAlias {
    #[serde(rename = "ref")]
    pub nvname: String,
    pub version: Version,
    pub ident: String,
}

/// Canonical container for every built artifact of one logical package.
///
/// `packages` is keyed by `<name>-<format>`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VersionedName {
    pub packages: BTreeMap<String, PackageRecord>,
}

/// One value of the top-level index mapping, discriminated on the wire by
/// the `t` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "lowercase")]
pub enum IndexRecord {
    Ident(IdentAlias),
    Name(NameAlias),
    Nvname(VersionedName),
}

/// A single indexed artifact of a package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageRecord {
    pub name: String,
    pub nvname: String,
    pub version: Version,
    pub format: PackageFormat,
    pub ident: String,
    pub url: String,
}

impl PackageRecord {
    /// Composite key for this record inside its versioned-name container.
    pub fn key(&self) -> String {
        format!("{}-{}", self.name, self.format)
    }
}

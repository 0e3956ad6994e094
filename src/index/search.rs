//! Query side: ranking, term resolution, and format filtering.

use std::collections::{BTreeMap, HashSet};
use std::str::FromStr;

use crate::index::error::IndexError;
use crate::index::record::{IndexRecord, PackageFormat, PackageRecord, VersionedName};
use crate::index::store::SearchIndex;
use crate::utils::search_key;

/// Format filter applied to query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatFilter {
    /// Built artifacts only: fs, zip, xlsx, csv. The default for searches.
    #[default]
    Issued,
    /// No filtering; source references included.
    All,
    /// One specific format.
    Only(PackageFormat),
}

impl FormatFilter {
    pub fn accepts(self, format: PackageFormat) -> bool {
        match self {
            FormatFilter::All => true,
            FormatFilter::Issued => format != PackageFormat::Source,
            FormatFilter::Only(f) => format == f,
        }
    }
}

impl FromStr for FormatFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(FormatFilter::All),
            "issued" => Ok(FormatFilter::Issued),
            other => other.parse().map(FormatFilter::Only),
        }
    }
}

/// How a candidate record was matched.
#[derive(Clone, Copy)]
enum MatchKind {
    /// The term is itself an index key.
    Exact,
    /// The term is a substring of one or more keys.
    Subset,
}

/// Which record field a hit must agree on.
#[derive(Clone, Copy)]
enum MatchField {
    Name,
    Nvname,
}

impl SearchIndex {
    /// Every indexed package record, best first.
    ///
    /// Sorted descending by name, then version, then format priority, so the
    /// newest, most preferred artifact of each package leads.
    pub fn list(&mut self) -> Result<Vec<PackageRecord>, IndexError> {
        let db = self.db()?;

        let mut packages: Vec<PackageRecord> = db
            .values()
            .filter_map(|record| match record {
                IndexRecord::Nvname(versioned) => Some(versioned.packages.values().cloned()),
                _ => None,
            })
            .flatten()
            .collect();

        packages.sort_by(|a, b| {
            (b.name.as_str(), &b.version, b.format.priority())
                .cmp(&(a.name.as_str(), &a.version, a.format.priority()))
        });

        Ok(packages)
    }

    /// Resolve a search term to ranked package records.
    ///
    /// A term that is itself an index key matches exactly; otherwise every
    /// key containing the term as a substring becomes a candidate. Locator
    /// terms (`scheme:...`) contribute their path component as the key.
    /// Candidates are redirected through their alias target, filtered by
    /// format, deduplicated by `(format, name)` with the first occurrence
    /// winning, and sorted descending by version and format priority.
    ///
    /// A term matching nothing yields `Ok(vec![])`. An alias whose target
    /// record is missing is a data-integrity violation and surfaces as
    /// [`IndexError::DanglingRef`].
    pub fn search(
        &mut self,
        term: &str,
        filter: FormatFilter,
    ) -> Result<Vec<PackageRecord>, IndexError> {
        let key = search_key(term);
        let db = self.db()?;

        let (candidates, match_kind): (Vec<(&String, &IndexRecord)>, MatchKind) =
            match db.get_key_value(&key) {
                Some(hit) => (vec![hit], MatchKind::Exact),
                None => (
                    db.iter().filter(|(k, _)| k.contains(key.as_str())).collect(),
                    MatchKind::Subset,
                ),
            };

        let mut packages = Vec::new();
        let mut seen: HashSet<(PackageFormat, String)> = HashSet::new();

        for (alias_key, record) in candidates {
            // An ident key matches against the target nvname; name and
            // nvname keys match their own field.
            let (versioned, field, value): (&VersionedName, MatchField, &str) = match record {
                IndexRecord::Ident(alias) => (
                    resolve_ref(db, alias_key, &alias.nvname)?,
                    MatchField::Nvname,
                    alias.nvname.as_str(),
                ),
                IndexRecord::Name(alias) => {
                    (resolve_ref(db, alias_key, &alias.nvname)?, MatchField::Name, key.as_str())
                }
                IndexRecord::Nvname(versioned) => (versioned, MatchField::Nvname, key.as_str()),
            };

            for package in versioned.packages.values() {
                let field_value = match field {
                    MatchField::Name => package.name.as_str(),
                    MatchField::Nvname => package.nvname.as_str(),
                };
                let hit = match match_kind {
                    MatchKind::Exact => field_value == value,
                    MatchKind::Subset => field_value.contains(key.as_str()),
                };
                if hit
                    && filter.accepts(package.format)
                    && seen.insert((package.format, package.name.clone()))
                {
                    packages.push(package.clone());
                }
            }
        }

        packages.sort_by(|a, b| {
            (&b.version, b.format.priority()).cmp(&(&a.version, a.format.priority()))
        });

        Ok(packages)
    }

    /// Single best match for a term: an exact key hit, else the top-ranked
    /// substring hit. The same two-phase resolution the build pipeline uses.
    pub fn resolve_one(
        &mut self,
        term: &str,
        filter: FormatFilter,
    ) -> Result<Option<PackageRecord>, IndexError> {
        Ok(self.search(term, filter)?.into_iter().next())
    }
}

fn resolve_ref<'db>(
    db: &'db BTreeMap<String, IndexRecord>,
    alias_key: &str,
    target: &str,
) -> Result<&'db VersionedName, IndexError> {
    match db.get(target) {
        Some(IndexRecord::Nvname(versioned)) => Ok(versioned),
        _ => Err(IndexError::DanglingRef {
            key: alias_key.to_string(),
            target: target.to_string(),
        }),
    }
}

//! Entry construction: turning package metadata into index records.

use crate::index::error::IndexError;
use crate::index::record::{
    IdentAlias, IndexRecord, NameAlias, PackageFormat, PackageRecord, Version, VersionedName,
};
use crate::index::store::SearchIndex;
use crate::package::PackageMeta;
use crate::utils::path_to_file_url;

impl SearchIndex {
    /// Register one artifact of a package under all three key kinds.
    ///
    /// Upserts the identifier alias, the name alias (with its denormalized
    /// version and identifier), the versioned-name record (created empty if
    /// new), and the `<name>-<format>` slot inside it. Re-registering the
    /// same name and format overwrites in place. A missing `format` defaults
    /// to `fs`.
    ///
    /// Mutates memory only; call [`write`](Self::write) to persist.
    pub fn add_entry(
        &mut self,
        ident: &str,
        name: &str,
        nvname: &str,
        version: &str,
        format: Option<PackageFormat>,
        url: &str,
    ) -> Result<(), IndexError> {
        let version = Version::new(version);
        let format = format.unwrap_or(PackageFormat::Fs);

        let db = self.db_mut()?;

        db.insert(
            ident.to_string(),
            IndexRecord::Ident(IdentAlias { nvname: nvname.to_string() }),
        );
        // A name with no version qualifier coincides with its nvname key; the
        // versioned-name record wins and the redundant alias is skipped.
        if name != nvname {
            db.insert(
                name.to_string(),
                IndexRecord::Name(NameAlias {
                    nvname: nvname.to_string(),
                    version: version.clone(),
                    ident: ident.to_string(),
                }),
            );
        }

        let record = PackageRecord {
            name: name.to_string(),
            nvname: nvname.to_string(),
            version,
            format,
            ident: ident.to_string(),
            url: url.to_string(),
        };

        let entry = db
            .entry(nvname.to_string())
            .or_insert_with(|| IndexRecord::Nvname(VersionedName::default()));
        // Keys are unique across kinds; an alias squatting on the nvname key
        // is a caller contract breach, so reclaim the slot.
        if !matches!(entry, IndexRecord::Nvname(_)) {
            *entry = IndexRecord::Nvname(VersionedName::default());
        }
        if let IndexRecord::Nvname(versioned) = entry {
            versioned.packages.insert(record.key(), record);
        }

        Ok(())
    }

    /// Register a package described by its metadata document.
    ///
    /// An unissued package has no built artifact and is indexed as a single
    /// `source` reference to its metadata file. An issued package
    /// contributes one entry per declared distribution with a recognized
    /// built format, or an `fs` entry for its root directory when it
    /// declares none.
    pub fn add_package(&mut self, pkg: &PackageMeta) -> Result<(), IndexError> {
        let nvname = pkg.nonver_name();

        if pkg.issued.is_none() {
            let url = path_to_file_url(&pkg.metadata_path);
            return self.add_entry(
                &pkg.identifier,
                &pkg.name,
                &nvname,
                &pkg.version,
                Some(PackageFormat::Source),
                &url,
            );
        }

        let mut indexed_artifact = false;
        for dist in pkg.distribution_paths() {
            let format = dist
                .extension()
                .and_then(|e| e.to_str())
                .and_then(PackageFormat::from_extension);
            if let Some(format) = format {
                let url = path_to_file_url(&dist);
                self.add_entry(
                    &pkg.identifier,
                    &pkg.name,
                    &nvname,
                    &pkg.version,
                    Some(format),
                    &url,
                )?;
                indexed_artifact = true;
            }
        }

        if !indexed_artifact {
            let url = path_to_file_url(&pkg.root);
            self.add_entry(
                &pkg.identifier,
                &pkg.name,
                &nvname,
                &pkg.version,
                Some(PackageFormat::Fs),
                &url,
            )?;
        }

        Ok(())
    }
}

//! RF2 file-set discovery for a Snapshot distribution directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::types::{Rf2Error, Rf2FileSet, Rf2Result};

const CONCEPT_PREFIX: &str = "sct2_Concept_Snapshot";
const DESCRIPTION_PREFIX: &str = "sct2_Description_Snapshot";
const RELATIONSHIP_PREFIX: &str = "sct2_Relationship_Snapshot";
const LANGUAGE_REFSET_PREFIX: &str = "der2_cRefset_LanguageSnapshot";

/// Discovers the RF2 file set under a Snapshot directory.
///
/// Searches `snapshot_dir/Terminology` for the three required
/// terminology files and `snapshot_dir/Refset/Language` for the
/// optional language refset file. Returns the first matching file per
/// family; does not recurse or search any other location.
pub fn discover_rf2_files<P: AsRef<Path>>(snapshot_dir: P) -> Rf2Result<Rf2FileSet> {
    let snapshot_dir = snapshot_dir.as_ref();

    let terminology_dir = snapshot_dir.join("Terminology");
    if !terminology_dir.exists() {
        return Err(Rf2Error::DirectoryNotFound {
            path: terminology_dir.display().to_string(),
        });
    }

    let concept_file = find_prefixed(&terminology_dir, CONCEPT_PREFIX)?;
    let description_file = find_prefixed(&terminology_dir, DESCRIPTION_PREFIX)?;
    let relationship_file = find_prefixed(&terminology_dir, RELATIONSHIP_PREFIX)?;

    let concept_file = concept_file.ok_or_else(|| Rf2Error::MissingInput {
        file_type: CONCEPT_PREFIX.to_string(),
        directory: terminology_dir.display().to_string(),
    })?;
    let description_file = description_file.ok_or_else(|| Rf2Error::MissingInput {
        file_type: DESCRIPTION_PREFIX.to_string(),
        directory: terminology_dir.display().to_string(),
    })?;
    let relationship_file = relationship_file.ok_or_else(|| Rf2Error::MissingInput {
        file_type: RELATIONSHIP_PREFIX.to_string(),
        directory: terminology_dir.display().to_string(),
    })?;

    let language_refset_dir = snapshot_dir.join("Refset").join("Language");
    let language_refset_file = if language_refset_dir.exists() {
        find_prefixed(&language_refset_dir, LANGUAGE_REFSET_PREFIX)?
    } else {
        None
    };

    Ok(Rf2FileSet {
        concept_file,
        description_file,
        relationship_file,
        language_refset_file,
    })
}

/// Returns the first `.txt` file in `dir` whose basename starts with `prefix`.
fn find_prefixed(dir: &Path, prefix: &str) -> Rf2Result<Option<PathBuf>> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension().and_then(|e| e.to_str()) == Some("txt")
                && path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .map(|n| n.starts_with(prefix))
                    .unwrap_or(false)
        })
        .collect();
    entries.sort();
    Ok(entries.into_iter().next())
}

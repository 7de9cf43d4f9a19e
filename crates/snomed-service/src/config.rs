//! `Snomed` configuration section: import directory, dialect, and the
//! knobs `SnomedSeedOptions` is seeded from at process start.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use snomed_checkpoint::SnomedSeedOptions;

/// Failures loading the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file exists but is not valid TOML for this shape.
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        /// Path that failed to parse.
        path: PathBuf,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },
}

/// The `Snomed` configuration section.
///
/// Field names are `PascalCase` on the wire to match the TOML/JSON a
/// real deployment's larger configuration file would carry this
/// section under.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SnomedConfig {
    /// Root import directory. `Snapshot/` is expected directly beneath it.
    pub import_directory: PathBuf,
    /// Informational terminology release label; not consumed by the core.
    pub terminology_version: Option<String>,
    /// Dialect refset consulted to resolve preferred terms.
    pub dialect_refset_id: u64,
    /// Skip rows/edges whose `active` field is false.
    pub active_only: bool,
    /// Number of concept upserts per bounded-parallel flush.
    pub batch_size: usize,
    /// Reserved for a downstream consumer; the core never reads it.
    pub enable_semantic_normalization: bool,
    /// How many processed rows/edges between progress checkpoint writes.
    pub progress_log_interval: u64,
}

impl Default for SnomedConfig {
    fn default() -> Self {
        SnomedConfig {
            import_directory: PathBuf::from("snomed-data/import"),
            terminology_version: None,
            dialect_refset_id: snomed_types::well_known::US_ENGLISH_LANGUAGE_REFSET,
            active_only: true,
            batch_size: 1000,
            enable_semantic_normalization: false,
            progress_log_interval: 10_000,
        }
    }
}

impl SnomedConfig {
    /// Loads from a TOML file at `path`. A missing file is not an
    /// error: callers are expected to check existence first if they
    /// want to distinguish "absent" from "malformed".
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads from `path` if it exists, otherwise returns the documented
    /// defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(SnomedConfig::default())
        }
    }

    /// The directory the RF2 parser and file-set locator search:
    /// `{import_directory}/Snapshot`.
    pub fn snapshot_directory(&self) -> PathBuf {
        self.import_directory.join("Snapshot")
    }
}

impl From<&SnomedConfig> for SnomedSeedOptions {
    fn from(config: &SnomedConfig) -> Self {
        SnomedSeedOptions {
            active_only: config.active_only,
            batch_size: config.batch_size,
            dialect_refset_id: config.dialect_refset_id,
            verify_after_seed: true,
            progress_log_interval: config.progress_log_interval,
        }
    }
}

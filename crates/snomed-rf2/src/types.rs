//! Parser-specific types for RF2 file processing.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during RF2 file parsing and discovery.
#[derive(Error, Debug)]
pub enum Rf2Error {
    /// I/O error reading an RF2 file.
    #[error("IO error reading RF2 file: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error.
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid SCTID format.
    #[error("Invalid SCTID format: {value}")]
    InvalidSctId {
        /// The invalid value that was encountered.
        value: String,
    },

    /// Invalid boolean value.
    #[error("Invalid boolean value: {value} (expected 0 or 1)")]
    InvalidBoolean {
        /// The invalid boolean value.
        value: String,
    },

    /// Invalid effective time (expected YYYYMMDD).
    #[error("Invalid effective time: {value} (expected YYYYMMDD)")]
    InvalidDate {
        /// The invalid date value.
        value: String,
    },

    /// Invalid integer value.
    #[error("Invalid integer value: {value}")]
    InvalidInteger {
        /// The invalid integer value.
        value: String,
    },

    /// RF2 row has fewer columns than its family requires.
    #[error("row has {found} columns, expected at least {expected}")]
    TooFewColumns {
        /// Expected minimum column count.
        expected: usize,
        /// Columns actually present.
        found: usize,
    },

    /// Directory not found.
    #[error("Directory not found: {path}")]
    DirectoryNotFound {
        /// The path that was not found.
        path: String,
    },

    /// A required RF2 terminology file is missing from the Snapshot directory.
    #[error("required RF2 file not found: {file_type} under {directory}")]
    MissingInput {
        /// The type of file that was missing (Concept, Description, Relationship).
        file_type: String,
        /// The directory that was searched.
        directory: String,
    },

    /// Invalid header - column count mismatch.
    #[error("invalid header: expected {expected} columns, found {found}")]
    InvalidHeader {
        /// Expected column count.
        expected: usize,
        /// Found column count.
        found: usize,
    },

    /// Unexpected column name.
    #[error("unexpected column '{found}' at position {position}, expected '{expected}'")]
    UnexpectedColumn {
        /// The column position.
        position: usize,
        /// Expected column name.
        expected: String,
        /// Found column name.
        found: String,
    },
}

/// Result type for RF2 operations.
pub type Rf2Result<T> = Result<T, Rf2Error>;

/// Statistics from streaming one RF2 file, for progress logging.
///
/// Purely observational: it never feeds back into seeding counts or
/// checkpoint state.
#[derive(Debug, Clone, Default)]
pub struct ParseStats {
    /// Total lines read from the file, header excluded.
    pub lines_read: usize,
    /// Rows that parsed successfully and were yielded.
    pub yielded: usize,
}

impl ParseStats {
    /// Rows silently dropped for being malformed (too few columns, bad
    /// SCTID, bad boolean, ...).
    pub fn malformed(&self) -> usize {
        self.lines_read.saturating_sub(self.yielded)
    }
}

/// The four RF2 files a Snapshot seed run depends on.
///
/// The language refset is optional; its absence disables preferred-term
/// resolution in the Descriptions phase but never fails the run.
#[derive(Debug, Clone, Default)]
pub struct Rf2FileSet {
    /// `sct2_Concept_Snapshot*.txt`.
    pub concept_file: PathBuf,
    /// `sct2_Description_Snapshot*.txt`.
    pub description_file: PathBuf,
    /// `sct2_Relationship_Snapshot*.txt`.
    pub relationship_file: PathBuf,
    /// `der2_cRefset_LanguageSnapshot*.txt`, if present.
    pub language_refset_file: Option<PathBuf>,
}

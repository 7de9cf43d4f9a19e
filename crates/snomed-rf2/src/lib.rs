//! # snomed-rf2
//!
//! Async streaming parser and file-set locator for SNOMED CT RF2
//! Snapshot distributions.
//!
//! Four record families (Concept, Description, Relationship, Language
//! Refset) are each streamed through an [`Rf2Stream`], which runs the
//! synchronous `csv` reader on a blocking task and hands rows to the
//! caller over a bounded channel. Malformed rows are dropped silently;
//! only genuine I/O or header errors are surfaced.
//!
//! ## Usage
//!
//! ```ignore
//! use snomed_rf2::{discover_rf2_files, Rf2Stream};
//! use snomed_types::Rf2Concept;
//! use tokio_util::sync::CancellationToken;
//!
//! let files = discover_rf2_files("/path/to/Snapshot")?;
//! let mut stream = Rf2Stream::<Rf2Concept>::open(&files.concept_file, CancellationToken::new());
//! while let Some(row) = stream.next().await {
//!     let row = row?;
//!     println!("concept {} at line {}", row.record.id, row.line_number);
//! }
//! ```

#![warn(missing_docs)]

mod async_stream;
mod concept;
mod description;
mod loader;
mod parser;
mod refset;
mod relationship;
mod types;

pub use async_stream::{Rf2Row, Rf2Stream};
pub use loader::discover_rf2_files;
pub use parser::{parse, Rf2Record};
pub use types::{ParseStats, Rf2Error, Rf2FileSet, Rf2Result};

// Re-export snomed-types for convenience.
pub use snomed_types;

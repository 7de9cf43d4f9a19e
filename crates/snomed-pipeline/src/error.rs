//! Errors produced by the seeding pipeline.

use thiserror::Error;

/// Failures that can abort a seeding run.
///
/// Cooperative pause and cancellation are *not* represented here: a
/// paused or cancelled phase is a normal, non-error outcome.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The configured snapshot directory or one of its required RF2
    /// files is absent.
    #[error(transparent)]
    MissingInput(#[from] snomed_rf2::Rf2Error),

    /// The graph repository rejected or failed a call during a flush.
    #[error("graph call failed: {0}")]
    GraphCall(#[from] snomed_graph::GraphError),
}

/// Result type for pipeline phase runs.
pub type PipelineResult<T> = Result<T, PipelineError>;

//! The checkpoint document, its totally-ordered phase, and derived status.

use serde::{Deserialize, Serialize};

/// A seeding run's position in the pipeline.
///
/// Totally ordered: `NotStarted < Concepts < Descriptions <
/// Relationships < Verification < Completed`, plus the sink states
/// `Paused` and `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    /// No work has started yet.
    NotStarted = 0,
    /// Streaming and upserting concept vertices.
    Concepts = 1,
    /// Joining descriptions against the language refset.
    Descriptions = 2,
    /// Streaming and materializing inferred relationships as edges.
    Relationships = 3,
    /// Verifying the seeded graph against expected invariants.
    Verification = 4,
    /// Seeding finished; the checkpoint file has been deleted.
    Completed = 5,
    /// Seeding was paused at a safe point; resumable.
    Paused = 6,
    /// Seeding failed; resumable from the last persisted progress.
    Failed = 7,
}

impl Phase {
    /// Whether this phase represents an active, in-progress run.
    pub fn is_running(self) -> bool {
        matches!(
            self,
            Phase::Concepts | Phase::Descriptions | Phase::Relationships | Phase::Verification
        )
    }
}

impl Default for Phase {
    fn default() -> Self {
        Phase::NotStarted
    }
}

/// Per-run options, persisted inside the checkpoint so a resumed run
/// reuses the same configuration it was started with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnomedSeedOptions {
    /// Skip rows/edges whose `active` field is false.
    pub active_only: bool,
    /// Number of concept upserts per bounded-parallel flush.
    pub batch_size: usize,
    /// Dialect refset consulted to resolve preferred terms.
    pub dialect_refset_id: u64,
    /// Run the Verification phase after Relationships completes.
    pub verify_after_seed: bool,
    /// How many processed rows/edges between progress checkpoint writes.
    pub progress_log_interval: u64,
}

impl Default for SnomedSeedOptions {
    fn default() -> Self {
        SnomedSeedOptions {
            active_only: true,
            batch_size: 1000,
            dialect_refset_id: snomed_types::well_known::US_ENGLISH_LANGUAGE_REFSET,
            verify_after_seed: true,
            progress_log_interval: 10_000,
        }
    }
}

/// The persisted checkpoint document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnomedSeedCheckpoint {
    /// 128-bit random job id, rendered as 32 lowercase hex characters.
    pub job_id: String,
    /// Current phase.
    pub phase: Phase,
    /// Snapshot directory this checkpoint belongs to.
    pub rf2_directory: String,
    /// Last successfully-processed 1-based row number within the
    /// current line-resumable phase.
    pub last_processed_line: u64,
    /// Concept id most recently seeded, for diagnostics.
    pub last_concept_id: Option<String>,
    /// Cumulative concept vertices upserted.
    pub concepts_seeded: u64,
    /// Cumulative description rows processed (Phase 2 is not
    /// line-resumable, so this is reset to 0 on every re-run).
    pub descriptions_processed: u64,
    /// Cumulative edges created.
    pub relationships_seeded: u64,
    /// When this job was first started.
    pub started_at: chrono::DateTime<chrono::Utc>,
    /// When this checkpoint was last written.
    pub last_updated_at: chrono::DateTime<chrono::Utc>,
    /// Cumulative wall-clock time spent actively seeding, in milliseconds.
    pub elapsed_time_ms: u64,
    /// Present only when `phase == Failed`.
    pub error_message: Option<String>,
    /// Set by `RequestPause`; observed cooperatively by the running task.
    pub pause_requested: bool,
    /// The options this run was started or resumed with.
    pub options: SnomedSeedOptions,
}

/// A read-only snapshot of job status, derived from the checkpoint.
///
/// Returned by `GET /job` and used to compute `GET /status`. Has no
/// on-disk representation of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnomedSeedStatus {
    /// Job id of the checkpoint this status was derived from.
    pub job_id: String,
    /// Current phase.
    pub phase: Phase,
    /// `phase ∈ {Concepts, Descriptions, Relationships, Verification}`.
    pub is_running: bool,
    /// `phase == Paused`.
    pub is_paused: bool,
    /// `phase == Completed`.
    pub is_completed: bool,
    /// `phase == Failed`.
    pub is_failed: bool,
    /// Snapshot directory this job ingests from.
    pub rf2_directory: String,
    /// Last successfully-processed row number in the current phase.
    pub last_processed_line: u64,
    /// Cumulative concept vertices upserted.
    pub concepts_seeded: u64,
    /// Cumulative description rows processed.
    pub descriptions_processed: u64,
    /// Cumulative edges created.
    pub relationships_seeded: u64,
    /// Present only when `phase == Failed`.
    pub error_message: Option<String>,
    /// When this job was first started.
    pub started_at: chrono::DateTime<chrono::Utc>,
    /// When this status was last updated.
    pub last_updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<&SnomedSeedCheckpoint> for SnomedSeedStatus {
    fn from(checkpoint: &SnomedSeedCheckpoint) -> Self {
        SnomedSeedStatus {
            job_id: checkpoint.job_id.clone(),
            phase: checkpoint.phase,
            is_running: checkpoint.phase.is_running(),
            is_paused: checkpoint.phase == Phase::Paused,
            is_completed: checkpoint.phase == Phase::Completed,
            is_failed: checkpoint.phase == Phase::Failed,
            rf2_directory: checkpoint.rf2_directory.clone(),
            last_processed_line: checkpoint.last_processed_line,
            concepts_seeded: checkpoint.concepts_seeded,
            descriptions_processed: checkpoint.descriptions_processed,
            relationships_seeded: checkpoint.relationships_seeded,
            error_message: checkpoint.error_message.clone(),
            started_at: checkpoint.started_at,
            last_updated_at: checkpoint.last_updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_total_order() {
        assert!(Phase::NotStarted < Phase::Concepts);
        assert!(Phase::Concepts < Phase::Descriptions);
        assert!(Phase::Descriptions < Phase::Relationships);
        assert!(Phase::Relationships < Phase::Verification);
        assert!(Phase::Verification < Phase::Completed);
    }

    #[test]
    fn test_phase_is_running() {
        assert!(Phase::Concepts.is_running());
        assert!(Phase::Verification.is_running());
        assert!(!Phase::NotStarted.is_running());
        assert!(!Phase::Paused.is_running());
        assert!(!Phase::Completed.is_running());
        assert!(!Phase::Failed.is_running());
    }

    #[test]
    fn test_default_options_match_documented_defaults() {
        let options = SnomedSeedOptions::default();
        assert!(options.active_only);
        assert_eq!(options.batch_size, 1000);
        assert_eq!(options.dialect_refset_id, 900000000000509007);
        assert_eq!(options.progress_log_interval, 10_000);
    }

    #[test]
    fn test_status_derivation_flags() {
        let checkpoint = SnomedSeedCheckpoint {
            job_id: "abc123".to_string(),
            phase: Phase::Paused,
            rf2_directory: "/data/Snapshot".to_string(),
            last_processed_line: 42,
            last_concept_id: None,
            concepts_seeded: 10,
            descriptions_processed: 0,
            relationships_seeded: 0,
            started_at: chrono::Utc::now(),
            last_updated_at: chrono::Utc::now(),
            elapsed_time_ms: 500,
            error_message: None,
            pause_requested: false,
            options: SnomedSeedOptions::default(),
        };

        let status = SnomedSeedStatus::from(&checkpoint);
        assert!(status.is_paused);
        assert!(!status.is_running);
        assert!(!status.is_completed);
        assert!(!status.is_failed);
    }
}

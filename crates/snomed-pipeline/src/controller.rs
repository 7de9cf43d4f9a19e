//! Single-writer job lifecycle on top of [`CheckpointStore`] and
//! [`crate::seed::run_seed`].
//!
//! The seeding service is a singleton: at most one job may be in the
//! running state at a time, enforced here by inspecting
//! `CheckpointStore::get_status` before launching a background task.
//! The launched task is detached from the caller's lifetime via
//! `tokio::spawn` and carries its own `CancellationToken`, never the
//! caller's.

use std::sync::Arc;

use thiserror::Error;
use tokio_util::sync::CancellationToken;

use snomed_checkpoint::{CheckpointStore, Phase, SnomedSeedOptions, SnomedSeedStatus};
use snomed_graph::GraphRepository;

use crate::model::SnomedSeedVerification;
use crate::seed;

/// Why a job-control request was rejected. Maps 1:1 onto the HTTP
/// status codes in the control surface's endpoint table.
#[derive(Error, Debug)]
pub enum JobControlError {
    /// A seed is already running; `/seed` and `/reseed` reject with 409.
    #[error("a seeding job is already running")]
    AlreadyRunning,
    /// No checkpoint exists for this snapshot directory.
    #[error("no checkpoint exists")]
    NoCheckpoint,
    /// `/pause` was called with no job in the running state.
    #[error("no job is currently running")]
    NotRunning,
    /// `/resume` was called against a checkpoint that isn't paused or failed.
    #[error("checkpoint phase is not Paused or Failed")]
    NotPausedOrFailed,
    /// The configured snapshot directory does not exist.
    #[error("snapshot directory not found")]
    SnapshotDirectoryMissing,
}

/// Query-parameter overrides accepted by `/seed` and `/reseed`.
#[derive(Debug, Clone, Default)]
pub struct SeedRequest {
    /// Overrides `SnomedSeedOptions::active_only` for a fresh checkpoint.
    pub active_only: Option<bool>,
    /// Overrides `SnomedSeedOptions::batch_size` for a fresh checkpoint.
    pub batch_size: Option<usize>,
    /// Clears any existing checkpoint before starting.
    pub force_restart: bool,
}

/// Returned on `202 Accepted` from `/seed`, `/resume`, and `/reseed`.
#[derive(Debug, Clone)]
pub struct SeedStarted {
    /// The job id the caller can poll via `GET /job`.
    pub job_id: String,
}

/// Owns the graph repository handle, the checkpoint store, and the
/// server-configured snapshot directory and default options. One
/// instance per process; shared behind an `Arc` by the HTTP layer.
pub struct JobController {
    graph: Arc<dyn GraphRepository>,
    checkpoint_store: Arc<CheckpointStore>,
    snapshot_directory: String,
    default_options: SnomedSeedOptions,
    /// Serializes the "not already running" check with the task spawn
    /// that follows it, so two concurrent `/seed` calls can't both
    /// observe `is_running=false` and both launch a job. Field-level
    /// mutation during a run stays `CheckpointStore`'s own mutex.
    run_lock: tokio::sync::Mutex<()>,
}

impl JobController {
    /// Builds a controller bound to one snapshot directory and one
    /// graph repository for the life of the process.
    pub fn new(
        graph: Arc<dyn GraphRepository>,
        checkpoint_store: Arc<CheckpointStore>,
        snapshot_directory: String,
        default_options: SnomedSeedOptions,
    ) -> Self {
        JobController {
            graph,
            checkpoint_store,
            snapshot_directory,
            default_options,
            run_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Launches a seed (or resumes one in progress), decoupled from the
    /// HTTP request that triggered it.
    pub async fn start_seed(&self, request: SeedRequest) -> Result<SeedStarted, JobControlError> {
        if !tokio::fs::try_exists(&self.snapshot_directory).await.unwrap_or(false) {
            return Err(JobControlError::SnapshotDirectoryMissing);
        }

        let _guard = self.run_lock.lock().await;

        if let Some(status) = self.checkpoint_store.get_status(&self.snapshot_directory).await {
            if status.is_running {
                return Err(JobControlError::AlreadyRunning);
            }
        }

        if request.force_restart {
            self.checkpoint_store.clear_checkpoint(&self.snapshot_directory).await;
        }

        let mut options = self.default_options.clone();
        if let Some(active_only) = request.active_only {
            options.active_only = active_only;
        }
        if let Some(batch_size) = request.batch_size {
            options.batch_size = batch_size;
        }

        let checkpoint = self.checkpoint_store.get_or_create(&self.snapshot_directory, options).await;
        let job_id = checkpoint.job_id.clone();

        let graph = self.graph.clone();
        let checkpoint_store = self.checkpoint_store.clone();
        let snapshot_directory = self.snapshot_directory.clone();
        let run_options = checkpoint.options.clone();
        tokio::spawn(async move {
            let directory_for_log = snapshot_directory.clone();
            let result = seed::run_seed(
                graph,
                checkpoint_store,
                snapshot_directory,
                run_options,
                false,
                CancellationToken::new(),
            )
            .await;
            if !result.ok {
                tracing::warn!(
                    snapshot_directory = %directory_for_log,
                    error = ?result.error,
                    "seed run ended with failure"
                );
            }
        });

        Ok(SeedStarted { job_id })
    }

    /// Resumes a paused or failed job from its persisted checkpoint.
    pub async fn resume(&self) -> Result<SeedStarted, JobControlError> {
        let status = self
            .checkpoint_store
            .get_status(&self.snapshot_directory)
            .await
            .ok_or(JobControlError::NoCheckpoint)?;

        if status.phase != Phase::Paused && status.phase != Phase::Failed {
            return Err(JobControlError::NotPausedOrFailed);
        }

        self.start_seed(SeedRequest::default()).await
    }

    /// Requests a cooperative pause of the running job.
    pub async fn pause(&self) -> Result<(), JobControlError> {
        let status = self
            .checkpoint_store
            .get_status(&self.snapshot_directory)
            .await
            .ok_or(JobControlError::NotRunning)?;

        if !status.is_running {
            return Err(JobControlError::NotRunning);
        }

        self.checkpoint_store.request_pause().await;
        Ok(())
    }

    /// Returns the current job status, if any checkpoint exists.
    pub async fn status(&self) -> Option<SnomedSeedStatus> {
        self.checkpoint_store.get_status(&self.snapshot_directory).await
    }

    /// Deletes the checkpoint unconditionally.
    pub async fn clear_checkpoint(&self) {
        self.checkpoint_store.clear_checkpoint(&self.snapshot_directory).await;
    }

    /// Runs the Verification checks against the current graph state,
    /// independent of any seeding job's own lifecycle.
    pub async fn verify(&self) -> SnomedSeedVerification {
        seed::run_verification(&self.graph).await
    }

    /// The snapshot directory this controller ingests from.
    pub fn snapshot_directory(&self) -> &str {
        &self.snapshot_directory
    }
}

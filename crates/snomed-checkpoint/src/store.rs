//! The single-mutex checkpoint store.
//!
//! Every externally visible method acquires one [`tokio::sync::Mutex`]
//! guarding the in-memory checkpoint and an `active` flag. Read/write
//! failures against the on-disk file are logged and swallowed: a
//! corrupt or missing file is treated as "no checkpoint" on load, and
//! the in-memory view stays authoritative for a running job when a
//! write fails.

use std::path::{Path, PathBuf};

use tokio::sync::Mutex;

use crate::error::CheckpointError;
use crate::model::{Phase, SnomedSeedCheckpoint, SnomedSeedOptions, SnomedSeedStatus};

const CHECKPOINT_FILE_NAME: &str = ".snomed-seed-checkpoint.json";

struct Inner {
    checkpoint: Option<SnomedSeedCheckpoint>,
    active: bool,
}

/// Persists, loads, and mutates the single job checkpoint.
pub struct CheckpointStore {
    inner: Mutex<Inner>,
}

impl Default for CheckpointStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckpointStore {
    /// Creates an empty store with no in-memory checkpoint.
    pub fn new() -> Self {
        CheckpointStore {
            inner: Mutex::new(Inner {
                checkpoint: None,
                active: false,
            }),
        }
    }

    /// The on-disk checkpoint path for a given Snapshot directory:
    /// `{parent of rf2_directory}/.snomed-seed-checkpoint.json`.
    pub fn checkpoint_path(rf2_directory: &str) -> PathBuf {
        let dir = Path::new(rf2_directory);
        dir.parent()
            .unwrap_or(dir)
            .join(CHECKPOINT_FILE_NAME)
    }

    /// Loads or creates the checkpoint for `rf2_directory`, marking the
    /// store active.
    ///
    /// Reuses an on-disk checkpoint whose phase is not `Completed` and
    /// whose stored directory matches; otherwise starts a fresh one.
    pub async fn get_or_create(
        &self,
        rf2_directory: &str,
        options: SnomedSeedOptions,
    ) -> SnomedSeedCheckpoint {
        let mut inner = self.inner.lock().await;

        let path = Self::checkpoint_path(rf2_directory);
        if let Some(existing) = load_from_disk(&path).await {
            if existing.phase != Phase::Completed && existing.rf2_directory == rf2_directory {
                inner.checkpoint = Some(existing.clone());
                inner.active = true;
                return existing;
            }
        }

        let now = chrono::Utc::now();
        let fresh = SnomedSeedCheckpoint {
            job_id: uuid::Uuid::new_v4().simple().to_string(),
            phase: Phase::NotStarted,
            rf2_directory: rf2_directory.to_string(),
            last_processed_line: 0,
            last_concept_id: None,
            concepts_seeded: 0,
            descriptions_processed: 0,
            relationships_seeded: 0,
            started_at: now,
            last_updated_at: now,
            elapsed_time_ms: 0,
            error_message: None,
            pause_requested: false,
            options,
        };

        save_to_disk(&path, &fresh).await;
        inner.checkpoint = Some(fresh.clone());
        inner.active = true;
        fresh
    }

    /// Applies `mutator` to the in-memory checkpoint and persists it.
    /// No-op while the store is inactive.
    pub async fn update<F>(&self, mutator: F)
    where
        F: FnOnce(&mut SnomedSeedCheckpoint),
    {
        let mut inner = self.inner.lock().await;
        if !inner.active {
            return;
        }
        let Some(checkpoint) = inner.checkpoint.as_mut() else {
            return;
        };
        mutator(checkpoint);
        checkpoint.last_updated_at = chrono::Utc::now();

        let path = Self::checkpoint_path(&checkpoint.rf2_directory);
        let snapshot = checkpoint.clone();
        save_to_disk(&path, &snapshot).await;
    }

    /// Sets the phase and resets `last_processed_line` for the new phase.
    pub async fn advance_phase(&self, next_phase: Phase) {
        self.update(|checkpoint| {
            checkpoint.phase = next_phase;
            checkpoint.last_processed_line = 0;
        })
        .await;
    }

    /// Persists the latest progress counters.
    pub async fn update_progress(
        &self,
        line_number: u64,
        concepts_seeded: u64,
        descriptions_processed: u64,
        relationships_seeded: u64,
    ) {
        self.update(|checkpoint| {
            checkpoint.last_processed_line = line_number;
            checkpoint.concepts_seeded = concepts_seeded;
            checkpoint.descriptions_processed = descriptions_processed;
            checkpoint.relationships_seeded = relationships_seeded;
        })
        .await;
    }

    /// Deletes the checkpoint file, clears in-memory state, and marks
    /// the store inactive.
    pub async fn mark_completed(&self, _elapsed_ms: u64) {
        let mut inner = self.inner.lock().await;
        if let Some(checkpoint) = inner.checkpoint.as_ref() {
            let path = Self::checkpoint_path(&checkpoint.rf2_directory);
            delete_from_disk(&path).await;
        }
        inner.checkpoint = None;
        inner.active = false;
    }

    /// Marks the checkpoint paused, clears `pause_requested`, persists
    /// it, and marks the store inactive.
    pub async fn mark_paused(&self, elapsed_ms: u64) {
        let mut inner = self.inner.lock().await;
        if let Some(checkpoint) = inner.checkpoint.as_mut() {
            checkpoint.phase = Phase::Paused;
            checkpoint.pause_requested = false;
            checkpoint.elapsed_time_ms = elapsed_ms;
            checkpoint.last_updated_at = chrono::Utc::now();
            let path = Self::checkpoint_path(&checkpoint.rf2_directory);
            let snapshot = checkpoint.clone();
            save_to_disk(&path, &snapshot).await;
        }
        inner.active = false;
    }

    /// Marks the checkpoint failed with `error`, persists it, and
    /// leaves the store inactive.
    pub async fn mark_failed(&self, error: String, elapsed_ms: u64) {
        let mut inner = self.inner.lock().await;
        if let Some(checkpoint) = inner.checkpoint.as_mut() {
            checkpoint.phase = Phase::Failed;
            checkpoint.error_message = Some(error);
            checkpoint.elapsed_time_ms = elapsed_ms;
            checkpoint.last_updated_at = chrono::Utc::now();
            let path = Self::checkpoint_path(&checkpoint.rf2_directory);
            let snapshot = checkpoint.clone();
            save_to_disk(&path, &snapshot).await;
        }
        inner.active = false;
    }

    /// Sets `pause_requested` in memory only; never touches disk.
    pub async fn request_pause(&self) {
        let mut inner = self.inner.lock().await;
        if let Some(checkpoint) = inner.checkpoint.as_mut() {
            checkpoint.pause_requested = true;
        }
    }

    /// Returns `false` while the store is inactive.
    pub async fn is_pause_requested(&self) -> bool {
        let inner = self.inner.lock().await;
        inner
            .checkpoint
            .as_ref()
            .map(|c| c.pause_requested)
            .unwrap_or(false)
    }

    /// Derives status from the live in-memory checkpoint when active
    /// and its directory matches, otherwise falls back to the on-disk
    /// checkpoint for `rf2_directory`. Returns `None` if neither exists.
    pub async fn get_status(&self, rf2_directory: &str) -> Option<SnomedSeedStatus> {
        let inner = self.inner.lock().await;
        if inner.active {
            if let Some(checkpoint) = &inner.checkpoint {
                if checkpoint.rf2_directory == rf2_directory {
                    return Some(SnomedSeedStatus::from(checkpoint));
                }
            }
        }
        drop(inner);

        let path = Self::checkpoint_path(rf2_directory);
        load_from_disk(&path)
            .await
            .map(|checkpoint| SnomedSeedStatus::from(&checkpoint))
    }

    /// Deletes the checkpoint file for `rf2_directory` and clears any
    /// matching in-memory state.
    pub async fn clear_checkpoint(&self, rf2_directory: &str) {
        let mut inner = self.inner.lock().await;
        let path = Self::checkpoint_path(rf2_directory);
        delete_from_disk(&path).await;

        let matches_loaded = inner
            .checkpoint
            .as_ref()
            .map(|c| c.rf2_directory == rf2_directory)
            .unwrap_or(false);
        if matches_loaded {
            inner.checkpoint = None;
            inner.active = false;
        }
    }
}

async fn load_from_disk(path: &Path) -> Option<SnomedSeedCheckpoint> {
    match tokio::fs::read_to_string(path).await {
        Ok(contents) => match serde_json::from_str(&contents).map_err(CheckpointError::from) {
            Ok(checkpoint) => Some(checkpoint),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "corrupt checkpoint file, treating as absent");
                None
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %CheckpointError::from(e), "failed to read checkpoint file");
            None
        }
    }
}

async fn save_to_disk(path: &Path, checkpoint: &SnomedSeedCheckpoint) {
    let json = match serde_json::to_string_pretty(checkpoint).map_err(CheckpointError::from) {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!(error = %e, "failed to serialize checkpoint");
            return;
        }
    };
    if let Err(e) = tokio::fs::write(path, json).await {
        tracing::warn!(path = %path.display(), error = %CheckpointError::from(e), "failed to write checkpoint file");
    }
}

async fn delete_from_disk(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to delete checkpoint file");
        }
    }
}

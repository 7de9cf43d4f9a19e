//! Response bodies for the HTTP control surface.

use serde::Serialize;

use snomed_checkpoint::SnomedSeedStatus;
use snomed_pipeline::SeedStarted;

/// `GET /status` — the snapshot directory this process ingests from,
/// plus the current job status if a checkpoint exists.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnomedFullStatusResponse {
    /// Snapshot directory configured for this process.
    pub snapshot_directory: String,
    /// `true` if a checkpoint file currently exists.
    pub has_checkpoint: bool,
    /// The job's status, if a checkpoint exists.
    pub job: Option<SnomedSeedStatus>,
}

/// `202 Accepted` body for `/seed`, `/resume`, and `/reseed`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnomedSeedStartedResponse {
    /// The job id the caller can poll via `GET /job`.
    pub job_id: String,
}

impl From<SeedStarted> for SnomedSeedStartedResponse {
    fn from(started: SeedStarted) -> Self {
        SnomedSeedStartedResponse { job_id: started.job_id }
    }
}

/// `200 OK` body for `/pause`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PauseAcceptedResponse {
    /// Human-readable confirmation message.
    pub message: String,
    /// Job id of the job being paused.
    pub job_id: String,
}

//! Result and verification types the pipeline hands back to its caller.

use serde::{Deserialize, Serialize};

/// The outcome of a `Seed` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnomedSeedResult {
    /// `true` unless the run hit an unrecoverable error.
    ///
    /// A cooperative pause still reports `ok=true` with `error="Paused"`.
    pub ok: bool,
    /// Present on pause or failure; `None` on a clean completion.
    pub error: Option<String>,
    /// Cumulative concept vertices upserted this run.
    pub concepts: u64,
    /// Cumulative description rows applied to vertices this run.
    pub descriptions: u64,
    /// Cumulative edges created this run.
    pub relationships: u64,
    /// Wall-clock duration of this call, in milliseconds.
    pub duration_ms: u64,
}

/// Non-fatal post-seed invariant checks against the graph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnomedSeedVerification {
    /// Total `SnomedConcept` vertices.
    pub total_concepts: u64,
    /// `SnomedConcept` vertices with `active=true`.
    pub active_concepts: u64,
    /// Whether the SNOMED root concept (138875005) is present.
    pub has_root_concept: bool,
    /// Whether Clinical finding (404684003) is present.
    pub has_clinical_finding: bool,
    /// Reported as 0: the consumed graph interface exposes no
    /// per-label edge count.
    pub total_relationships: u64,
    /// Reported as 0, same limitation as `total_relationships`.
    pub active_relationships: u64,
    /// Accumulated invariant failures; never fails the run.
    pub errors: Vec<String>,
}

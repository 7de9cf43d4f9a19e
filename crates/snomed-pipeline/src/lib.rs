//! # snomed-pipeline
//!
//! The resumable, checkpoint-driven pipeline that imports a SNOMED CT
//! RF2 Snapshot distribution into a property graph: three streaming
//! phases (Concepts, Descriptions, Relationships) plus a non-fatal
//! Verification pass, and the single-writer job controller that drives
//! them over pause/resume/restart.

#![warn(missing_docs)]

mod controller;
mod error;
mod model;
mod seed;

pub use controller::{JobController, JobControlError, SeedRequest, SeedStarted};
pub use error::{PipelineError, PipelineResult};
pub use model::{SnomedSeedResult, SnomedSeedVerification};
pub use seed::run_seed;

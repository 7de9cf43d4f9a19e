//! # snomed-service
//!
//! The HTTP control surface that drives a [`snomed_pipeline::JobController`]:
//! idempotent REST endpoints under `/api/snomed` for starting, pausing,
//! resuming, and restarting a seed, plus status and verification
//! queries. Owns process wiring (configuration loading, tracing
//! init) that the pipeline itself stays independent of.

#![warn(missing_docs)]

mod config;
mod error;
mod models;
mod routes;

pub use config::{ConfigError, SnomedConfig};
pub use error::ApiError;
pub use models::{PauseAcceptedResponse, SnomedFullStatusResponse, SnomedSeedStartedResponse};
pub use routes::router;

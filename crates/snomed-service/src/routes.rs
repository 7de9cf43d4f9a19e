//! The REST control surface: `GET/POST/DELETE` handlers wired under
//! `/api/snomed`, each a thin translation between HTTP and
//! [`JobController`].

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use tower_http::trace::TraceLayer;

use snomed_pipeline::{JobController, SeedRequest};

use crate::error::ApiError;
use crate::models::{PauseAcceptedResponse, SnomedFullStatusResponse, SnomedSeedStartedResponse};

/// Builds the `/api/snomed` router bound to one [`JobController`].
pub fn router(controller: Arc<JobController>) -> Router {
    Router::new()
        .route("/status", get(get_status))
        .route("/job", get(get_job))
        .route("/seed", post(post_seed))
        .route("/pause", post(post_pause))
        .route("/resume", post(post_resume))
        .route("/reseed", post(post_reseed))
        .route("/checkpoint", delete(delete_checkpoint))
        .route("/verify", get(get_verify))
        .layer(TraceLayer::new_for_http())
        .with_state(controller)
}

fn seed_request_from_query(params: &HashMap<String, String>, force_restart: bool) -> SeedRequest {
    SeedRequest {
        active_only: params.get("activeOnly").and_then(|v| v.parse().ok()),
        batch_size: params.get("batchSize").and_then(|v| v.parse().ok()),
        force_restart,
    }
}

async fn get_status(State(controller): State<Arc<JobController>>) -> impl IntoResponse {
    let job = controller.status().await;
    Json(SnomedFullStatusResponse {
        snapshot_directory: controller.snapshot_directory().to_string(),
        has_checkpoint: job.is_some(),
        job,
    })
}

async fn get_job(
    State(controller): State<Arc<JobController>>,
) -> Result<impl IntoResponse, ApiError> {
    let status = controller
        .status()
        .await
        .ok_or(snomed_pipeline::JobControlError::NoCheckpoint)?;
    Ok(Json(status))
}

async fn post_seed(
    State(controller): State<Arc<JobController>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, ApiError> {
    let force_restart = params
        .get("forceRestart")
        .and_then(|v| v.parse().ok())
        .unwrap_or(false);
    let request = seed_request_from_query(&params, force_restart);
    let started = controller.start_seed(request).await?;
    Ok((StatusCode::ACCEPTED, Json(SnomedSeedStartedResponse::from(started))))
}

async fn post_pause(
    State(controller): State<Arc<JobController>>,
) -> Result<impl IntoResponse, ApiError> {
    controller.pause().await?;
    let job_id = controller
        .status()
        .await
        .map(|status| status.job_id)
        .unwrap_or_default();
    Ok(Json(PauseAcceptedResponse {
        message: "pause requested".to_string(),
        job_id,
    }))
}

async fn post_resume(
    State(controller): State<Arc<JobController>>,
) -> Result<impl IntoResponse, ApiError> {
    let started = controller.resume().await?;
    Ok((StatusCode::ACCEPTED, Json(SnomedSeedStartedResponse::from(started))))
}

async fn post_reseed(
    State(controller): State<Arc<JobController>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, ApiError> {
    let request = seed_request_from_query(&params, true);
    let started = controller.start_seed(request).await?;
    Ok((StatusCode::ACCEPTED, Json(SnomedSeedStartedResponse::from(started))))
}

async fn delete_checkpoint(State(controller): State<Arc<JobController>>) -> impl IntoResponse {
    controller.clear_checkpoint().await;
    StatusCode::NO_CONTENT
}

async fn get_verify(State(controller): State<Arc<JobController>>) -> impl IntoResponse {
    Json(controller.verify().await)
}

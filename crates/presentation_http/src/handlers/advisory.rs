//! JSON advisory API

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use domain::AdvisoryOutcome;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

/// Advisory request body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdvisoryRequest {
    /// Free-form location name
    #[serde(default)]
    pub location: String,
}

/// Run the advisory pipeline for one location
///
/// A missing or blank `location` is rejected by the pipeline itself with
/// `invalid_input`.
#[instrument(skip(state, payload))]
pub async fn create_advisory(
    State(state): State<AppState>,
    payload: Result<Json<AdvisoryRequest>, JsonRejection>,
) -> Result<Json<AdvisoryOutcome>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let outcome = state.pipeline.run(&request.location).await?;
    Ok(Json(outcome))
}

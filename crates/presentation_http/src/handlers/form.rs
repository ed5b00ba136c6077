//! HTML form handlers

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::Html,
};
use infrastructure::AdvisoryPageData;
use serde::Deserialize;
use tracing::{instrument, warn};

use crate::{
    error::{ApiError, status_for},
    state::AppState,
};

/// Submitted form fields
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationForm {
    /// Location typed by the user
    #[serde(default)]
    pub location: String,
}

/// Empty advisory form
pub async fn show_form(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let page = state.templates.render_page(&AdvisoryPageData::blank())?;
    Ok(Html(page))
}

/// Run the pipeline for the submitted location and render the result
///
/// Failures render the form again with an error banner and the entered
/// location, using the same status the JSON API would.
#[instrument(skip(state, form))]
pub async fn submit_form(
    State(state): State<AppState>,
    Form(form): Form<LocationForm>,
) -> Result<(StatusCode, Html<String>), ApiError> {
    let (status, data) = match state.pipeline.run(&form.location).await {
        Ok(outcome) => (
            StatusCode::OK,
            AdvisoryPageData::completed(form.location, &outcome),
        ),
        Err(e) => {
            warn!(error = %e, "Advisory run failed");
            (status_for(&e), AdvisoryPageData::failed(form.location, &e))
        },
    };

    let page = state.templates.render_page(&data)?;
    Ok((status, Html(page)))
}

//! Design upload and query routes.

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use rectscan_parser::ParseError;
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

use crate::services::design::{self, DesignError, DesignSummary};
use crate::state::{AppState, Design};

#[derive(Debug, Default, Deserialize)]
pub struct CreateDesignQuery {
    pub name: Option<String>,
}

/// `POST /api/designs?name=`: parse a raw SVG body and store it.
///
/// The body is taken as bytes so a non-UTF-8 upload gets the JSON error
/// envelope rather than the extractor's plain-text rejection.
pub async fn create_design(
    State(state): State<AppState>,
    Query(query): Query<CreateDesignQuery>,
    body: Bytes,
) -> Result<(StatusCode, Json<Design>), DesignError> {
    let svg = std::str::from_utf8(&body)?;
    let design = design::create_design(&state, query.name.as_deref(), svg).await?;
    Ok((StatusCode::CREATED, Json(design)))
}

/// `GET /api/designs`: list design summaries, newest first.
pub async fn list_designs(State(state): State<AppState>) -> Json<Vec<DesignSummary>> {
    Json(design::list_designs(&state).await)
}

/// `GET /api/designs/:id`: fetch one design with its rectangles.
pub async fn get_design(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<Design>, DesignError> {
    Ok(Json(design::get_design(&state, id).await?))
}

/// `DELETE /api/designs/:id`: remove a design.
pub async fn delete_design(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode, DesignError> {
    design::delete_design(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Parse failures are client errors except storage I/O.
pub(crate) fn design_error_to_status(err: &DesignError) -> StatusCode {
    match err {
        DesignError::NotFound(_) => StatusCode::NOT_FOUND,
        DesignError::InvalidEncoding(_) => StatusCode::BAD_REQUEST,
        DesignError::Parse(ParseError::PayloadTooLarge { .. }) => StatusCode::PAYLOAD_TOO_LARGE,
        DesignError::Parse(e) if e.is_server_side() => StatusCode::INTERNAL_SERVER_ERROR,
        DesignError::Parse(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

impl IntoResponse for DesignError {
    fn into_response(self) -> Response {
        let status = design_error_to_status(&self);
        if status.is_server_error() {
            warn!(error = %self, "design request failed");
        }
        let body = serde_json::json!({
            "error": { "code": self.error_code(), "message": self.to_string() }
        });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
#[path = "designs_test.rs"]
mod tests;

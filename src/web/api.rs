use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use super::AppState;
use crate::models::Activity;
use crate::roster::{ErrorKind, RosterError};

#[derive(Debug, Deserialize)]
pub(crate) struct EmailQuery {
    pub(crate) email: String,
}

/// JSON error body `{"detail": ...}` with the status matching the error kind.
pub(crate) struct ApiError(RosterError);

impl From<RosterError> for ApiError {
    fn from(err: RosterError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0.kind() {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Rejected => StatusCode::BAD_REQUEST,
        };
        (status, Json(json!({ "detail": self.0.to_string() }))).into_response()
    }
}

fn message(text: String) -> Json<serde_json::Value> {
    Json(json!({ "message": text }))
}

pub(crate) async fn list_handler(State(state): State<AppState>) -> Json<IndexMap<String, Activity>> {
    Json(state.roster.list())
}

pub(crate) async fn signup_handler(
    State(state): State<AppState>,
    Path(activity): Path<String>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if let Err(e) = state.roster.signup(&activity, &query.email) {
        warn!("Signup rejected: {}", e);
        return Err(e.into());
    }
    info!("Signed up {} for {}", query.email, activity);
    Ok(message(format!("Signed up {} for {}", query.email, activity)))
}

pub(crate) async fn unregister_handler(
    State(state): State<AppState>,
    Path(activity): Path<String>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if let Err(e) = state.roster.unregister(&activity, &query.email) {
        warn!("Unregister rejected: {}", e);
        return Err(e.into());
    }
    info!("Unregistered {} from {}", query.email, activity);
    Ok(message(format!("Unregistered {} from {}", query.email, activity)))
}

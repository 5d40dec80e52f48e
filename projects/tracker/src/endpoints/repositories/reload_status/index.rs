use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::IntoResponse,
};

use crate::endpoints::repositories::reload::index::ReloadTracker;

/// Axum handler: GET /repositories/reload-repo/status
pub async fn handler(Extension(tracker): Extension<ReloadTracker>) -> impl IntoResponse {
    (StatusCode::OK, Json(tracker.snapshot()))
}

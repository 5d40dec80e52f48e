use axum::{
    extract::{Extension, Json, Path},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::db::{
    repository::queries::{update_repository_comment, UpdateRepositoryCommentError},
    PgPool,
};
use crate::endpoints::repositories::RepositoryResponseBody;

/// JSON payload expected by the endpoint.
#[derive(Deserialize)]
pub struct PutCommentRequestBody {
    pub comment: String,
}

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("GetConnectionFromPool: {source}")]
    GetConnectionFromPool {
        #[from]
        source: r2d2::Error,
    },
    #[error("UpdateRepositoryComment: {source}")]
    UpdateRepositoryComment {
        #[from]
        source: UpdateRepositoryCommentError,
    },
    #[error("RepositoryNotFound: {id}")]
    RepositoryNotFound { id: Uuid },
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> axum::response::Response {
        match self {
            HandlerError::GetConnectionFromPool { source } => {
                (StatusCode::INTERNAL_SERVER_ERROR, source.to_string()).into_response()
            }
            HandlerError::UpdateRepositoryComment { source } => {
                (StatusCode::INTERNAL_SERVER_ERROR, source.to_string()).into_response()
            }
            HandlerError::RepositoryNotFound { .. } => {
                (StatusCode::NOT_FOUND, "Repository not found").into_response()
            }
        }
    }
}

/// Axum handler: PUT /repositories/{id}
pub async fn handler(
    Extension(pool): Extension<PgPool>,
    Path(id): Path<Uuid>,
    Json(input): Json<PutCommentRequestBody>,
) -> impl IntoResponse {
    let mut conn = match pool.get() {
        Ok(c) => c,
        Err(source) => return HandlerError::GetConnectionFromPool { source }.into_response(),
    };

    let record = match update_repository_comment(&mut conn, id, &input.comment) {
        Ok(Some(record)) => record,
        Ok(None) => return HandlerError::RepositoryNotFound { id }.into_response(),
        Err(source) => return HandlerError::UpdateRepositoryComment { source }.into_response(),
    };

    (StatusCode::OK, Json(RepositoryResponseBody::from(record))).into_response()
}

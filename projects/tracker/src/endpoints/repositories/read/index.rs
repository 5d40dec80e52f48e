use axum::{
    extract::{Extension, Json, Path},
    http::StatusCode,
    response::IntoResponse,
};
use thiserror::Error;
use uuid::Uuid;

use crate::db::{
    repository::queries::{get_repository_by_id, GetRepositoryByIdError},
    PgPool,
};
use crate::endpoints::repositories::RepositoryResponseBody;

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("GetConnectionFromPool: {source}")]
    GetConnectionFromPool {
        #[from]
        source: r2d2::Error,
    },
    #[error("GetRepositoryById: {source}")]
    GetRepositoryById {
        #[from]
        source: GetRepositoryByIdError,
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
            HandlerError::GetRepositoryById { source } => {
                (StatusCode::INTERNAL_SERVER_ERROR, source.to_string()).into_response()
            }
            HandlerError::RepositoryNotFound { .. } => {
                (StatusCode::NOT_FOUND, "Repository not found").into_response()
            }
        }
    }
}

/// Axum handler: GET /repositories/{id}
pub async fn handler(
    Extension(pool): Extension<PgPool>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let mut conn = match pool.get() {
        Ok(c) => c,
        Err(source) => return HandlerError::GetConnectionFromPool { source }.into_response(),
    };

    let record = match get_repository_by_id(&mut conn, id) {
        Ok(Some(record)) => record,
        Ok(None) => return HandlerError::RepositoryNotFound { id }.into_response(),
        Err(source) => return HandlerError::GetRepositoryById { source }.into_response(),
    };

    (StatusCode::OK, Json(RepositoryResponseBody::from(record))).into_response()
}

use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::IntoResponse,
};
use thiserror::Error;

use crate::db::{
    repository::queries::{get_repositories, GetRepositoriesError},
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
    #[error("GetRepositories: {source}")]
    GetRepositories {
        #[from]
        source: GetRepositoriesError,
    },
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> axum::response::Response {
        match self {
            HandlerError::GetConnectionFromPool { source } => {
                (StatusCode::INTERNAL_SERVER_ERROR, source.to_string()).into_response()
            }
            HandlerError::GetRepositories { source } => {
                (StatusCode::INTERNAL_SERVER_ERROR, source.to_string()).into_response()
            }
        }
    }
}

/// Axum handler: GET /repositories
pub async fn handler(Extension(pool): Extension<PgPool>) -> impl IntoResponse {
    let mut conn = match pool.get() {
        Ok(c) => c,
        Err(source) => return HandlerError::GetConnectionFromPool { source }.into_response(),
    };

    let records = match get_repositories(&mut conn) {
        Ok(records) => records,
        Err(source) => return HandlerError::GetRepositories { source }.into_response(),
    };

    let body: Vec<RepositoryResponseBody> = records.into_iter().map(Into::into).collect();
    (StatusCode::OK, Json(body)).into_response()
}

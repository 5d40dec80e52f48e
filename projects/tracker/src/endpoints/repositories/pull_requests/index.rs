use axum::{
    extract::{Extension, Json, Path},
    http::StatusCode,
    response::IntoResponse,
};
use reqwest::Client;
use thiserror::Error;
use tracing::error;
use uuid::Uuid;

use interfaces_github_repos::index::{fetch_pull_requests, FetchPullRequestsError};

use crate::config::GithubToken;
use crate::db::{
    repository::queries::{get_repository_by_id, GetRepositoryByIdError},
    PgPool,
};

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
    #[error("FetchPullRequests: {source}")]
    FetchPullRequests { source: FetchPullRequestsError },
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
            HandlerError::FetchPullRequests { .. } => (
                StatusCode::BAD_GATEWAY,
                "An error occurred while fetching pull requests".to_string(),
            )
                .into_response(),
        }
    }
}

/// Axum handler: GET /repositories/pullrequests/{id}
///
/// Same live-refetch contract as the commits endpoint.
pub async fn handler(
    Extension(pool): Extension<PgPool>,
    Extension(client): Extension<Client>,
    Extension(token): Extension<GithubToken>,
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

    let pull_requests =
        match fetch_pull_requests(&client, &record.pull_requests_url, token.as_deref()).await {
            Ok(pull_requests) => pull_requests,
            Err(FetchPullRequestsError::NotFound { .. }) => {
                return HandlerError::RepositoryNotFound { id }.into_response();
            }
            Err(source) => {
                if let FetchPullRequestsError::UnexpectedStatus { status, body } = &source {
                    error!(
                        "error fetching pull requests for {}: {status} {body}",
                        record.link
                    );
                }
                return HandlerError::FetchPullRequests { source }.into_response();
            }
        };

    (
        StatusCode::OK,
        Json(serde_json::Value::Array(pull_requests)),
    )
        .into_response()
}

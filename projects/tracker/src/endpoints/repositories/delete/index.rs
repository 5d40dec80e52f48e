use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
};
use thiserror::Error;
use uuid::Uuid;

use crate::db::{
    repository::queries::{delete_repository, DeleteRepositoryError},
    PgPool,
};

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("GetConnectionFromPool: {source}")]
    GetConnectionFromPool {
        #[from]
        source: r2d2::Error,
    },
    #[error("DeleteRepository: {source}")]
    DeleteRepository {
        #[from]
        source: DeleteRepositoryError,
    },
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> axum::response::Response {
        match self {
            HandlerError::GetConnectionFromPool { source } => {
                (StatusCode::INTERNAL_SERVER_ERROR, source.to_string()).into_response()
            }
            HandlerError::DeleteRepository { source } => {
                (StatusCode::INTERNAL_SERVER_ERROR, source.to_string()).into_response()
            }
        }
    }
}

/// Human-readable outcome for a delete attempt. Snapshots are left in
/// place; only the repository row is removed.
pub fn delete_outcome(removed: usize) -> (StatusCode, &'static str) {
    if removed == 0 {
        (StatusCode::NOT_FOUND, "Repository not found")
    } else {
        (StatusCode::OK, "Repository successfully deleted")
    }
}

/// Axum handler: DELETE /repositories/{id}
pub async fn handler(
    Extension(pool): Extension<PgPool>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let mut conn = match pool.get() {
        Ok(c) => c,
        Err(source) => return HandlerError::GetConnectionFromPool { source }.into_response(),
    };

    let removed = match delete_repository(&mut conn, id) {
        Ok(removed) => removed,
        Err(source) => return HandlerError::DeleteRepository { source }.into_response(),
    };

    delete_outcome(removed).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removed_row_reports_success() {
        let (status, message) = delete_outcome(1);
        assert_eq!(status, StatusCode::OK);
        assert_eq!(message, "Repository successfully deleted");
    }

    #[test]
    fn missing_row_reports_not_found() {
        let (status, message) = delete_outcome(0);
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(message, "Repository not found");
    }
}

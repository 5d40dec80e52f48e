pub mod comment;
pub mod commits;
pub mod create;
pub mod delete;
pub mod list;
pub mod pull_requests;
pub mod read;
pub mod reload;
pub mod reload_status;

use serde::Serialize;
use uuid::Uuid;

use crate::db::repository::models::Repository;

/// Response projection shared by the handlers that return stored records.
#[derive(Debug, Serialize)]
pub struct RepositoryResponseBody {
    pub id: Uuid,
    pub repo_id: i64,
    pub link: String,
    pub api_url: String,
    pub commits_url: String,
    pub commits_count: i32,
    pub pull_requests_url: String,
    pub pull_requests_count: i32,
    pub comment: String,
}

impl From<Repository> for RepositoryResponseBody {
    fn from(repository: Repository) -> Self {
        Self {
            id: repository.id,
            repo_id: repository.repo_id,
            link: repository.link,
            api_url: repository.api_url,
            commits_url: repository.commits_url,
            commits_count: repository.commits_count,
            pull_requests_url: repository.pull_requests_url,
            pull_requests_count: repository.pull_requests_count,
            comment: repository.comment,
        }
    }
}

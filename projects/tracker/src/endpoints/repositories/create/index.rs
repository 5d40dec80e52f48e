use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use diesel::PgConnection;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::error;
use url::Url;
use uuid::Uuid;

use interfaces_github_repos::index::{
    fetch_commits, fetch_pull_requests, fetch_repository, repository_api_url, strip_url_template,
    FetchCommitsError, FetchPullRequestsError, FetchRepositoryError,
};

use crate::config::GithubToken;
use crate::db::{
    commit_snapshot::models::NewCommitSnapshot,
    commit_snapshot::queries::{insert_commit_snapshots, InsertCommitSnapshotsError},
    pull_request_snapshot::models::NewPullRequestSnapshot,
    pull_request_snapshot::queries::{
        insert_pull_request_snapshots, InsertPullRequestSnapshotsError,
    },
    repository::models::{NewRepository, Repository},
    repository::queries::{
        get_repository_by_link, insert_repository, GetRepositoryByLinkError,
        InsertRepositoryError,
    },
    PgPool,
};
use crate::endpoints::repositories::RepositoryResponseBody;

/// JSON payload expected by the endpoint.
#[derive(Deserialize)]
pub struct CreateRepositoriesRequestBody {
    pub links: Vec<String>,
}

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("InvalidLinks")]
    InvalidLinks { details: Vec<String> },
    #[error("GetConnectionFromPool: {source}")]
    GetConnectionFromPool {
        #[from]
        source: r2d2::Error,
    },
    #[error(transparent)]
    ProcessRepositoryLinks {
        #[from]
        source: ProcessRepositoryLinksError,
    },
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> axum::response::Response {
        match self {
            HandlerError::InvalidLinks { details } => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "message": details })),
            )
                .into_response(),
            HandlerError::GetConnectionFromPool { source } => {
                (StatusCode::INTERNAL_SERVER_ERROR, source.to_string()).into_response()
            }
            HandlerError::ProcessRepositoryLinks { source } => source.into_response(),
        }
    }
}

/// Axum handler: POST /repositories
pub async fn handler(
    Extension(pool): Extension<PgPool>,
    Extension(client): Extension<Client>,
    Extension(token): Extension<GithubToken>,
    Json(input): Json<CreateRepositoriesRequestBody>,
) -> impl IntoResponse {
    // Validation happens before any network call.
    if let Err(details) = validate_links(&input.links) {
        return HandlerError::InvalidLinks { details }.into_response();
    }

    let mut conn = match pool.get() {
        Ok(c) => c,
        Err(source) => return HandlerError::GetConnectionFromPool { source }.into_response(),
    };

    let created =
        match process_repository_links(&mut conn, &client, token.as_deref(), &input.links).await {
            Ok(created) => created,
            Err(source) => return HandlerError::ProcessRepositoryLinks { source }.into_response(),
        };

    let body: Vec<RepositoryResponseBody> = created.into_iter().map(Into::into).collect();
    (StatusCode::OK, Json(body)).into_response()
}

/// Checks that the list is non-empty and every entry is an absolute
/// http(s) URL. Returns one message per offending entry.
pub fn validate_links(links: &[String]) -> Result<(), Vec<String>> {
    let mut details = Vec::new();

    if links.is_empty() {
        details.push("links must contain at least 1 element".to_string());
    }

    for current_link in links {
        match Url::parse(current_link) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            _ => details.push(format!("link must be a URL address: {current_link}")),
        }
    }

    if details.is_empty() {
        Ok(())
    } else {
        Err(details)
    }
}

#[derive(Debug, Error)]
pub enum ProcessRepositoryLinksError {
    #[error("RepositoryNotFound: {link}")]
    RepositoryNotFound { link: String },

    #[error("FetchRepository: {source}")]
    FetchRepository { source: FetchRepositoryError },

    #[error("FetchCommits: {source}")]
    FetchCommits { source: FetchCommitsError },

    #[error("FetchPullRequests: {source}")]
    FetchPullRequests { source: FetchPullRequestsError },

    #[error("GetRepositoryByLink: {source}")]
    GetRepositoryByLink {
        #[from]
        source: GetRepositoryByLinkError,
    },

    #[error("InsertRepository: {source}")]
    InsertRepository {
        #[from]
        source: InsertRepositoryError,
    },

    #[error("InsertCommitSnapshots: {source}")]
    InsertCommitSnapshots {
        #[from]
        source: InsertCommitSnapshotsError,
    },

    #[error("InsertPullRequestSnapshots: {source}")]
    InsertPullRequestSnapshots {
        #[from]
        source: InsertPullRequestSnapshotsError,
    },
}

impl IntoResponse for ProcessRepositoryLinksError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ProcessRepositoryLinksError::RepositoryNotFound { link } => (
                StatusCode::NOT_FOUND,
                format!("Invalid repository link: {link}"),
            )
                .into_response(),
            ProcessRepositoryLinksError::FetchRepository { .. }
            | ProcessRepositoryLinksError::FetchCommits { .. }
            | ProcessRepositoryLinksError::FetchPullRequests { .. } => (
                StatusCode::BAD_GATEWAY,
                "An error occurred while processing repository".to_string(),
            )
                .into_response(),
            ProcessRepositoryLinksError::GetRepositoryByLink { source } => {
                (StatusCode::INTERNAL_SERVER_ERROR, source.to_string()).into_response()
            }
            ProcessRepositoryLinksError::InsertRepository { source } => {
                (StatusCode::INTERNAL_SERVER_ERROR, source.to_string()).into_response()
            }
            ProcessRepositoryLinksError::InsertCommitSnapshots { source } => {
                (StatusCode::INTERNAL_SERVER_ERROR, source.to_string()).into_response()
            }
            ProcessRepositoryLinksError::InsertPullRequestSnapshots { source } => {
                (StatusCode::INTERNAL_SERVER_ERROR, source.to_string()).into_response()
            }
        }
    }
}

/// Processes links strictly in order, one at a time. Links whose record
/// already exists are skipped; the first failing link aborts the batch,
/// leaving earlier records in place.
pub async fn process_repository_links(
    conn: &mut PgConnection,
    client: &Client,
    token: Option<&str>,
    links: &[String],
) -> Result<Vec<Repository>, ProcessRepositoryLinksError> {
    let mut created = Vec::new();

    for current_link in links {
        // Idempotency by link rests on this check plus the unique
        // constraint on the column.
        if get_repository_by_link(conn, current_link)?.is_some() {
            continue;
        }

        let api_url = repository_api_url(current_link);

        let lookup = match fetch_repository(client, &api_url, token).await {
            Ok(lookup) => lookup,
            Err(FetchRepositoryError::NotFound { .. }) => {
                return Err(ProcessRepositoryLinksError::RepositoryNotFound {
                    link: current_link.clone(),
                });
            }
            Err(source) => {
                if let FetchRepositoryError::UnexpectedStatus { status, body } = &source {
                    error!("error processing repository {current_link}: {status} {body}");
                }
                return Err(ProcessRepositoryLinksError::FetchRepository { source });
            }
        };

        let commits_url = strip_url_template(&lookup.commits_url);
        let pull_requests_url = strip_url_template(&lookup.pulls_url);

        let commits = match fetch_commits(client, &commits_url, token).await {
            Ok(commits) => commits,
            Err(FetchCommitsError::NotFound { .. }) => {
                return Err(ProcessRepositoryLinksError::RepositoryNotFound {
                    link: current_link.clone(),
                });
            }
            Err(source) => {
                if let FetchCommitsError::UnexpectedStatus { status, body } = &source {
                    error!("error fetching commits for {current_link}: {status} {body}");
                }
                return Err(ProcessRepositoryLinksError::FetchCommits { source });
            }
        };

        let pull_requests = match fetch_pull_requests(client, &pull_requests_url, token).await {
            Ok(pull_requests) => pull_requests,
            Err(FetchPullRequestsError::NotFound { .. }) => {
                return Err(ProcessRepositoryLinksError::RepositoryNotFound {
                    link: current_link.clone(),
                });
            }
            Err(source) => {
                if let FetchPullRequestsError::UnexpectedStatus { status, body } = &source {
                    error!("error fetching pull requests for {current_link}: {status} {body}");
                }
                return Err(ProcessRepositoryLinksError::FetchPullRequests { source });
            }
        };

        let record = insert_repository(
            conn,
            &NewRepository {
                id: Uuid::new_v4(),
                repo_id: lookup.id,
                link: current_link,
                api_url: &api_url,
                commits_url: &commits_url,
                commits_count: commits.len() as i32,
                pull_requests_url: &pull_requests_url,
                pull_requests_count: pull_requests.len() as i32,
                comment: "",
            },
        )?;

        let fetched_at = Utc::now().naive_utc();

        let commit_rows: Vec<NewCommitSnapshot> = commits
            .iter()
            .map(|item| NewCommitSnapshot {
                id: Uuid::new_v4(),
                repository_id: record.id,
                sha: item.get("sha").and_then(|v| v.as_str()).unwrap_or_default(),
                message: item.pointer("/commit/message").and_then(|v| v.as_str()),
                fetched_at,
            })
            .collect();
        insert_commit_snapshots(conn, &commit_rows)?;

        let pull_request_rows: Vec<NewPullRequestSnapshot> = pull_requests
            .iter()
            .map(|item| NewPullRequestSnapshot {
                id: Uuid::new_v4(),
                repository_id: record.id,
                number: item.get("number").and_then(|v| v.as_i64()).unwrap_or_default(),
                title: item.get("title").and_then(|v| v.as_str()),
                fetched_at,
            })
            .collect();
        insert_pull_request_snapshots(conn, &pull_request_rows)?;

        created.push(record);
    }

    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_link_list_is_rejected() {
        let details = validate_links(&[]).unwrap_err();
        assert_eq!(details, vec!["links must contain at least 1 element"]);
    }

    #[test]
    fn malformed_links_are_reported_per_entry() {
        let links = vec![
            "https://github.com/acme/widgets".to_string(),
            "not a url".to_string(),
            "ftp://github.com/acme/widgets".to_string(),
        ];
        let details = validate_links(&links).unwrap_err();
        assert_eq!(
            details,
            vec![
                "link must be a URL address: not a url",
                "link must be a URL address: ftp://github.com/acme/widgets",
            ]
        );
    }

    #[test]
    fn well_formed_links_pass_validation() {
        let links = vec![
            "https://github.com/acme/widgets".to_string(),
            "http://github.com/acme/gadgets".to_string(),
        ];
        assert!(validate_links(&links).is_ok());
    }
}

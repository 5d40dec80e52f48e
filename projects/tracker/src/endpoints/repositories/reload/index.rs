use std::sync::{Arc, Mutex, PoisonError};

use axum::{extract::Extension, http::StatusCode, response::IntoResponse};
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};

use crate::config::GithubToken;
use crate::db::{
    repository::queries::{
        delete_all_repositories, get_repository_links, DeleteAllRepositoriesError,
        GetRepositoryLinksError,
    },
    PgPool,
};
use crate::endpoints::repositories::create::index::process_repository_links;

/// Observable state of the background reload job.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ReloadStatus {
    #[default]
    Idle,
    Running,
    Completed {
        recreated: usize,
    },
    Failed {
        message: String,
    },
}

/// Shared between the reload endpoint (which drives transitions) and the
/// status endpoint (which reads them). At most one job runs at a time.
#[derive(Clone, Default)]
pub struct ReloadTracker {
    status: Arc<Mutex<ReloadStatus>>,
}

impl ReloadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the job as running. Returns false when one is already running.
    pub fn begin(&self) -> bool {
        let mut status = self.lock();
        if matches!(*status, ReloadStatus::Running) {
            return false;
        }
        *status = ReloadStatus::Running;
        true
    }

    pub fn complete(&self, recreated: usize) {
        *self.lock() = ReloadStatus::Completed { recreated };
    }

    pub fn fail(&self, message: String) {
        *self.lock() = ReloadStatus::Failed { message };
    }

    pub fn snapshot(&self) -> ReloadStatus {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ReloadStatus> {
        self.status.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Axum handler: POST /repositories/reload-repo
///
/// Returns immediately; the wipe-and-recreate pass runs in a detached
/// task whose outcome is visible on the status endpoint.
pub async fn handler(
    Extension(pool): Extension<PgPool>,
    Extension(client): Extension<Client>,
    Extension(token): Extension<GithubToken>,
    Extension(tracker): Extension<ReloadTracker>,
) -> impl IntoResponse {
    if !tracker.begin() {
        return (StatusCode::CONFLICT, "Reload already running").into_response();
    }

    tokio::spawn(run_reload(pool, client, token, tracker));

    (StatusCode::OK, "Reload started").into_response()
}

async fn run_reload(pool: PgPool, client: Client, token: GithubToken, tracker: ReloadTracker) {
    match reload_repositories(&pool, &client, token.as_deref()).await {
        Ok(recreated) => {
            info!("done reloading repositories, {recreated} recreated");
            tracker.complete(recreated);
        }
        Err(err) => {
            error!("reload failed: {err}");
            tracker.fail(err.to_string());
        }
    }
}

#[derive(Debug, Error)]
pub enum ReloadRepositoriesError {
    #[error("GetConnectionFromPool: {source}")]
    GetConnectionFromPool {
        #[from]
        source: r2d2::Error,
    },
    #[error("GetRepositoryLinks: {source}")]
    GetRepositoryLinks {
        #[from]
        source: GetRepositoryLinksError,
    },
    #[error("DeleteAllRepositories: {source}")]
    DeleteAllRepositories {
        #[from]
        source: DeleteAllRepositoriesError,
    },
}

/// Captures the stored link list, wipes the repository rows, then
/// re-ingests every captured link. The capture happens before the wipe;
/// a failing link is logged and skipped rather than aborting the pass.
pub async fn reload_repositories(
    pool: &PgPool,
    client: &Client,
    token: Option<&str>,
) -> Result<usize, ReloadRepositoriesError> {
    let mut conn = pool.get()?;

    let links = get_repository_links(&mut conn)?;
    delete_all_repositories(&mut conn)?;

    let mut recreated = 0;
    for link in links {
        match process_repository_links(&mut conn, client, token, std::slice::from_ref(&link)).await
        {
            Ok(records) => recreated += records.len(),
            Err(err) => error!("error reloading repository {link}: {err}"),
        }
    }

    Ok(recreated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracker_starts_idle() {
        let tracker = ReloadTracker::new();
        assert!(matches!(tracker.snapshot(), ReloadStatus::Idle));
    }

    #[test]
    fn second_begin_is_refused_while_running() {
        let tracker = ReloadTracker::new();
        assert!(tracker.begin());
        assert!(!tracker.begin());
    }

    #[test]
    fn begin_is_allowed_again_after_completion() {
        let tracker = ReloadTracker::new();
        assert!(tracker.begin());
        tracker.complete(3);
        assert!(matches!(
            tracker.snapshot(),
            ReloadStatus::Completed { recreated: 3 }
        ));
        assert!(tracker.begin());
    }

    #[test]
    fn failure_is_visible_in_snapshot() {
        let tracker = ReloadTracker::new();
        assert!(tracker.begin());
        tracker.fail("boom".to_string());
        match tracker.snapshot() {
            ReloadStatus::Failed { message } => assert_eq!(message, "boom"),
            other => panic!("expected Failed, got {other:?}"),
        }
    }
}

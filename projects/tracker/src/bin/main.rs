use std::net::SocketAddr;

use anyhow::Result;
use axum::{
	extract::Extension,
	routing::{get, post},
	serve, Router,
};
use thiserror::Error;
use tracing::info;

use projects_tracker::config::{AppConfig, AppConfigError, GithubToken};
use projects_tracker::db::{build_pool, BuildPoolError};
use projects_tracker::endpoints::repositories::comment::index::handler as repositories_comment_handler;
use projects_tracker::endpoints::repositories::commits::index::handler as repositories_commits_handler;
use projects_tracker::endpoints::repositories::create::index::handler as repositories_create_handler;
use projects_tracker::endpoints::repositories::delete::index::handler as repositories_delete_handler;
use projects_tracker::endpoints::repositories::list::index::handler as repositories_list_handler;
use projects_tracker::endpoints::repositories::pull_requests::index::handler as repositories_pull_requests_handler;
use projects_tracker::endpoints::repositories::read::index::handler as repositories_read_handler;
use projects_tracker::endpoints::repositories::reload::index::handler as repositories_reload_handler;
use projects_tracker::endpoints::repositories::reload::index::ReloadTracker;
use projects_tracker::endpoints::repositories::reload_status::index::handler as repositories_reload_status_handler;

#[derive(Debug, Error)]
pub enum MainError {
	#[error("TracingInit: {source}")]
	TracingInit {
		#[source]
		source: utils_trace::TracingInitError,
	},
	#[error("LoadConfig: {source}")]
	LoadConfig {
		#[source]
		source: AppConfigError,
	},
	#[error("BuildPool: {source}")]
	BuildPool {
		#[source]
		source: BuildPoolError,
	},
	#[error("TcpListenerBind: {source}")]
	TcpListenerBind {
		#[source]
		source: std::io::Error,
	},
	#[error("Serve: {source}")]
	Serve {
		#[source]
		source: std::io::Error,
	}
}

#[tokio::main]
async fn main() -> Result<(), MainError> {
	dotenvy::dotenv().ok();

	utils_trace::init("info")
		.map_err(|source| MainError::TracingInit { source })?;

	let config = AppConfig::from_env()
		.map_err(|source| MainError::LoadConfig { source })?;

	let pool = build_pool(&config.database_url)
		.map_err(|source| MainError::BuildPool { source })?;
	let client = reqwest::Client::new();

	// Set up the router
	let app = Router::new()
		.route("/repositories", post(repositories_create_handler).get(repositories_list_handler))
		.route(
			"/repositories/{id}",
			get(repositories_read_handler)
				.put(repositories_comment_handler)
				.delete(repositories_delete_handler),
		)
		.route("/repositories/commits/{id}", get(repositories_commits_handler))
		.route("/repositories/pullrequests/{id}", get(repositories_pull_requests_handler))
		.route("/repositories/reload-repo", post(repositories_reload_handler))
		.route("/repositories/reload-repo/status", get(repositories_reload_status_handler))
		.layer(Extension(pool))
		.layer(Extension(client))
		.layer(Extension(GithubToken::new(config.github_token.clone())))
		.layer(Extension(ReloadTracker::new()));

	let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
	let listener = tokio::net::TcpListener::bind(addr)
		.await
		.map_err(|source| MainError::TcpListenerBind { source })?;

	info!("Server running on addr: {}", addr);

	serve(listener, app)
		.await
		.map_err(|source| MainError::Serve { source })?;

	Ok(())
}

use reqwest::{header, Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

const USER_AGENT: &str = "repo-tracker";

/// Rewrites a repository web link into its REST API endpoint.
///
/// `https://github.com/acme/widgets` becomes
/// `https://api.github.com/repos/acme/widgets`.
pub fn repository_api_url(link: &str) -> String {
    link.replace("github.com", "api.github.com/repos")
}

/// Removes every `{...}` placeholder span from a GitHub URL template,
/// e.g. `.../commits{/sha}` -> `.../commits`.
pub fn strip_url_template(url: &str) -> String {
    let mut stripped = String::with_capacity(url.len());
    let mut depth = 0usize;
    for ch in url.chars() {
        match ch {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            _ if depth == 0 => stripped.push(ch),
            _ => {}
        }
    }
    stripped
}

/// The fields of a repository lookup the service consumes. The listing
/// URLs are templates and still carry their `{/sha}` / `{/number}`
/// placeholders.
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryLookup {
    pub id: i64,
    pub commits_url: String,
    pub pulls_url: String,
}

fn request(client: &Client, url: &str, token: Option<&str>) -> reqwest::RequestBuilder {
    let mut builder = client.get(url).header(header::USER_AGENT, USER_AGENT);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
}

pub async fn fetch_repository(
    client: &Client,
    api_url: &str,
    token: Option<&str>,
) -> Result<RepositoryLookup, FetchRepositoryError> {
    let response = request(client, api_url, token)
        .send()
        .await
        .map_err(|source| FetchRepositoryError::RequestSend { source })?;

    let status = response.status();

    let body = response
        .text()
        .await
        .map_err(|source| FetchRepositoryError::ResponseRead { source })?;

    if status == StatusCode::NOT_FOUND {
        return Err(FetchRepositoryError::NotFound {
            url: api_url.to_string(),
        });
    }
    if !status.is_success() {
        return Err(FetchRepositoryError::UnexpectedStatus { status, body });
    }

    serde_json::from_str(&body)
        .map_err(|source| FetchRepositoryError::DeserializeResponseBody { source })
}

#[derive(Debug, Error)]
pub enum FetchRepositoryError {
    #[error("RequestSend: {source}")]
    RequestSend { source: reqwest::Error },

    #[error("ResponseRead: {source}")]
    ResponseRead { source: reqwest::Error },

    #[error("RepositoryNotFound: {url}")]
    NotFound { url: String },

    #[error("UnexpectedStatus: {status}")]
    UnexpectedStatus { status: StatusCode, body: String },

    #[error("DeserializeResponseBody: {source}")]
    DeserializeResponseBody {
        #[from]
        source: serde_json::Error,
    },
}

pub async fn fetch_commits(
    client: &Client,
    commits_url: &str,
    token: Option<&str>,
) -> Result<Vec<serde_json::Value>, FetchCommitsError> {
    let response = request(client, commits_url, token)
        .send()
        .await
        .map_err(|source| FetchCommitsError::RequestSend { source })?;

    let status = response.status();

    let body = response
        .text()
        .await
        .map_err(|source| FetchCommitsError::ResponseRead { source })?;

    if status == StatusCode::NOT_FOUND {
        return Err(FetchCommitsError::NotFound {
            url: commits_url.to_string(),
        });
    }
    if !status.is_success() {
        return Err(FetchCommitsError::UnexpectedStatus { status, body });
    }

    serde_json::from_str(&body)
        .map_err(|source| FetchCommitsError::DeserializeResponseBody { source })
}

#[derive(Debug, Error)]
pub enum FetchCommitsError {
    #[error("RequestSend: {source}")]
    RequestSend { source: reqwest::Error },

    #[error("ResponseRead: {source}")]
    ResponseRead { source: reqwest::Error },

    #[error("CommitsNotFound: {url}")]
    NotFound { url: String },

    #[error("UnexpectedStatus: {status}")]
    UnexpectedStatus { status: StatusCode, body: String },

    #[error("DeserializeResponseBody: {source}")]
    DeserializeResponseBody {
        #[from]
        source: serde_json::Error,
    },
}

pub async fn fetch_pull_requests(
    client: &Client,
    pulls_url: &str,
    token: Option<&str>,
) -> Result<Vec<serde_json::Value>, FetchPullRequestsError> {
    let response = request(client, pulls_url, token)
        .send()
        .await
        .map_err(|source| FetchPullRequestsError::RequestSend { source })?;

    let status = response.status();

    let body = response
        .text()
        .await
        .map_err(|source| FetchPullRequestsError::ResponseRead { source })?;

    if status == StatusCode::NOT_FOUND {
        return Err(FetchPullRequestsError::NotFound {
            url: pulls_url.to_string(),
        });
    }
    if !status.is_success() {
        return Err(FetchPullRequestsError::UnexpectedStatus { status, body });
    }

    serde_json::from_str(&body)
        .map_err(|source| FetchPullRequestsError::DeserializeResponseBody { source })
}

#[derive(Debug, Error)]
pub enum FetchPullRequestsError {
    #[error("RequestSend: {source}")]
    RequestSend { source: reqwest::Error },

    #[error("ResponseRead: {source}")]
    ResponseRead { source: reqwest::Error },

    #[error("PullRequestsNotFound: {url}")]
    NotFound { url: String },

    #[error("UnexpectedStatus: {status}")]
    UnexpectedStatus { status: StatusCode, body: String },

    #[error("DeserializeResponseBody: {source}")]
    DeserializeResponseBody {
        #[from]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_api_url_rewrites_web_domain() {
        assert_eq!(
            repository_api_url("https://github.com/acme/widgets"),
            "https://api.github.com/repos/acme/widgets"
        );
    }

    #[test]
    fn strip_url_template_removes_placeholders() {
        assert_eq!(
            strip_url_template("https://api.github.com/repos/acme/widgets/commits{/sha}"),
            "https://api.github.com/repos/acme/widgets/commits"
        );
        assert_eq!(
            strip_url_template("https://api.github.com/repos/acme/widgets/pulls{/number}"),
            "https://api.github.com/repos/acme/widgets/pulls"
        );
        assert_eq!(strip_url_template("no-placeholders"), "no-placeholders");
    }

    #[tokio::test]
    async fn fetch_repository_parses_lookup_fields() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/repos/acme/widgets"))
            .respond_with(
                wiremock::ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "id": 42,
                    "full_name": "acme/widgets",
                    "commits_url": "https://api.github.com/repos/acme/widgets/commits{/sha}",
                    "pulls_url": "https://api.github.com/repos/acme/widgets/pulls{/number}"
                })),
            )
            .mount(&server)
            .await;

        let client = Client::new();
        let lookup = fetch_repository(
            &client,
            &format!("{}/repos/acme/widgets", server.uri()),
            None,
        )
        .await
        .unwrap();

        assert_eq!(lookup.id, 42);
        assert!(lookup.commits_url.ends_with("/commits{/sha}"));
        assert!(lookup.pulls_url.ends_with("/pulls{/number}"));
    }

    #[tokio::test]
    async fn fetch_repository_maps_missing_repo_to_not_found() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = Client::new();
        let err = fetch_repository(&client, &format!("{}/repos/gone/gone", server.uri()), None)
            .await
            .unwrap_err();

        assert!(matches!(err, FetchRepositoryError::NotFound { .. }));
    }

    #[tokio::test]
    async fn fetch_repository_keeps_body_of_unexpected_status() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(
                wiremock::ResponseTemplate::new(500).set_body_string("rate limit exceeded"),
            )
            .mount(&server)
            .await;

        let client = Client::new();
        let err = fetch_repository(&client, &format!("{}/repos/acme/widgets", server.uri()), None)
            .await
            .unwrap_err();

        match err {
            FetchRepositoryError::UnexpectedStatus { status, body } => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(body, "rate limit exceeded");
            }
            other => panic!("expected UnexpectedStatus, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn fetch_commits_returns_raw_items() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/repos/acme/widgets/commits"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "sha": "a1", "commit": { "message": "one" } },
                { "sha": "b2", "commit": { "message": "two" } },
                { "sha": "c3", "commit": { "message": "three" } }
            ])))
            .mount(&server)
            .await;

        let client = Client::new();
        let commits = fetch_commits(
            &client,
            &format!("{}/repos/acme/widgets/commits", server.uri()),
            None,
        )
        .await
        .unwrap();

        assert_eq!(commits.len(), 3);
        assert_eq!(commits[0]["sha"], "a1");
    }

    #[tokio::test]
    async fn fetch_pull_requests_returns_raw_items() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/repos/acme/widgets/pulls"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "id": 7, "number": 1, "title": "first" }
            ])))
            .mount(&server)
            .await;

        let client = Client::new();
        let pulls = fetch_pull_requests(
            &client,
            &format!("{}/repos/acme/widgets/pulls", server.uri()),
            None,
        )
        .await
        .unwrap();

        assert_eq!(pulls.len(), 1);
        assert_eq!(pulls[0]["number"], 1);
    }
}

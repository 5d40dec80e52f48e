use std::env;

use thiserror::Error;

/// Service configuration, read once at startup. `.env` files are loaded
/// by the binary via `dotenvy` before this runs.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub github_token: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppConfigError> {
        let database_url =
            env::var("DATABASE_URL").map_err(|_| AppConfigError::MissingDatabaseUrl)?;

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|source| AppConfigError::InvalidPort { raw, source })?,
            Err(_) => 8000,
        };

        let github_token = env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty());

        Ok(Self {
            database_url,
            port,
            github_token,
        })
    }
}

#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error("DATABASE_URL is not set")]
    MissingDatabaseUrl,

    #[error("PORT is not a valid port number: {raw}")]
    InvalidPort {
        raw: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Optional GitHub bearer token, injected into handlers as an extension.
/// Unauthenticated requests work too, at a lower rate limit.
#[derive(Debug, Clone)]
pub struct GithubToken(Option<String>);

impl GithubToken {
    pub fn new(token: Option<String>) -> Self {
        Self(token)
    }

    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

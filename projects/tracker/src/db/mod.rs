pub mod commit_snapshot;
pub mod pull_request_snapshot;
pub mod repository;
pub mod schema;

use diesel::r2d2::{ConnectionManager, Pool};
use diesel::PgConnection;
use thiserror::Error;

pub type PgPool = Pool<ConnectionManager<PgConnection>>;

pub fn build_pool(database_url: &str) -> Result<PgPool, BuildPoolError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder()
        .build(manager)
        .map_err(|source| BuildPoolError::BuildPool { source })
}

#[derive(Debug, Error)]
pub enum BuildPoolError {
    #[error("BuildPool: {source}")]
    BuildPool {
        #[from]
        source: r2d2::Error,
    },
}

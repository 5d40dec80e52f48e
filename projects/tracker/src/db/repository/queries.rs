use diesel::prelude::*;
use uuid::Uuid;

use crate::db::{repository::models::*, schema::repositories::dsl::*};

#[derive(Debug, thiserror::Error)]
pub enum InsertRepositoryError {
    #[error("InsertRepository: {source}")]
    InsertRepository {
        #[from]
        source: diesel::result::Error,
    },
}

pub fn insert_repository(
    conn: &mut PgConnection,
    new: &NewRepository,
) -> Result<Repository, InsertRepositoryError> {
    diesel::insert_into(repositories)
        .values(new)
        .get_result(conn)
        .map_err(|source| InsertRepositoryError::InsertRepository { source })
}

#[derive(Debug, thiserror::Error)]
pub enum GetRepositoriesError {
    #[error("GetRepositories: {source}")]
    GetRepositories {
        #[from]
        source: diesel::result::Error,
    },
}

pub fn get_repositories(conn: &mut PgConnection) -> Result<Vec<Repository>, GetRepositoriesError> {
    repositories
        .order_by(created_at)
        .load::<Repository>(conn)
        .map_err(|source| GetRepositoriesError::GetRepositories { source })
}

#[derive(Debug, thiserror::Error)]
pub enum GetRepositoryByIdError {
    #[error("GetRepositoryById: {source}")]
    GetRepositoryById {
        #[from]
        source: diesel::result::Error,
    },
}

pub fn get_repository_by_id(
    conn: &mut PgConnection,
    id_val: Uuid,
) -> Result<Option<Repository>, GetRepositoryByIdError> {
    repositories
        .find(id_val)
        .first::<Repository>(conn)
        .optional()
        .map_err(|source| GetRepositoryByIdError::GetRepositoryById { source })
}

#[derive(Debug, thiserror::Error)]
pub enum GetRepositoryByLinkError {
    #[error("GetRepositoryByLink: {source}")]
    GetRepositoryByLink {
        #[from]
        source: diesel::result::Error,
    },
}

pub fn get_repository_by_link(
    conn: &mut PgConnection,
    link_val: &str,
) -> Result<Option<Repository>, GetRepositoryByLinkError> {
    repositories
        .filter(link.eq(link_val))
        .first::<Repository>(conn)
        .optional()
        .map_err(|source| GetRepositoryByLinkError::GetRepositoryByLink { source })
}

#[derive(Debug, thiserror::Error)]
pub enum GetRepositoryLinksError {
    #[error("GetRepositoryLinks: {source}")]
    GetRepositoryLinks {
        #[from]
        source: diesel::result::Error,
    },
}

pub fn get_repository_links(
    conn: &mut PgConnection,
) -> Result<Vec<String>, GetRepositoryLinksError> {
    repositories
        .select(link)
        .load::<String>(conn)
        .map_err(|source| GetRepositoryLinksError::GetRepositoryLinks { source })
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateRepositoryCommentError {
    #[error("UpdateRepositoryComment: {source}")]
    UpdateRepositoryComment {
        #[from]
        source: diesel::result::Error,
    },
}

/// Overwrites the comment field. Returns `None` when no row matches the id.
pub fn update_repository_comment(
    conn: &mut PgConnection,
    id_val: Uuid,
    comment_val: &str,
) -> Result<Option<Repository>, UpdateRepositoryCommentError> {
    diesel::update(repositories.find(id_val))
        .set(comment.eq(comment_val))
        .get_result::<Repository>(conn)
        .optional()
        .map_err(|source| UpdateRepositoryCommentError::UpdateRepositoryComment { source })
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteRepositoryError {
    #[error("DeleteRepository: {source}")]
    DeleteRepository {
        #[from]
        source: diesel::result::Error,
    },
}

/// Returns the number of rows removed (0 or 1).
pub fn delete_repository(
    conn: &mut PgConnection,
    id_val: Uuid,
) -> Result<usize, DeleteRepositoryError> {
    diesel::delete(repositories.find(id_val))
        .execute(conn)
        .map_err(|source| DeleteRepositoryError::DeleteRepository { source })
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteAllRepositoriesError {
    #[error("DeleteAllRepositories: {source}")]
    DeleteAllRepositories {
        #[from]
        source: diesel::result::Error,
    },
}

pub fn delete_all_repositories(
    conn: &mut PgConnection,
) -> Result<usize, DeleteAllRepositoriesError> {
    diesel::delete(repositories)
        .execute(conn)
        .map_err(|source| DeleteAllRepositoriesError::DeleteAllRepositories { source })
}

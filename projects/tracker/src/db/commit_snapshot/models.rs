use chrono::NaiveDateTime;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::repository::models::Repository;
use crate::db::schema::commit_snapshots;

/// One commit as captured at ingestion time. Never updated afterwards;
/// live commit queries go back to the GitHub API instead.
#[derive(Debug, Clone, Queryable, Identifiable, Associations)]
#[diesel(belongs_to(Repository))]
#[diesel(table_name = commit_snapshots)]
pub struct CommitSnapshot {
    pub id: Uuid,
    pub repository_id: Uuid,
    pub sha: String,
    pub message: Option<String>,
    pub fetched_at: NaiveDateTime,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = commit_snapshots)]
pub struct NewCommitSnapshot<'a> {
    pub id: Uuid,
    pub repository_id: Uuid,
    pub sha: &'a str,
    pub message: Option<&'a str>,
    pub fetched_at: NaiveDateTime,
}

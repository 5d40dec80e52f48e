use chrono::NaiveDateTime;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::repository::models::Repository;
use crate::db::schema::pull_request_snapshots;

/// One pull request as captured at ingestion time. Same staleness rule
/// as commit snapshots.
#[derive(Debug, Clone, Queryable, Identifiable, Associations)]
#[diesel(belongs_to(Repository))]
#[diesel(table_name = pull_request_snapshots)]
pub struct PullRequestSnapshot {
    pub id: Uuid,
    pub repository_id: Uuid,
    pub number: i64,
    pub title: Option<String>,
    pub fetched_at: NaiveDateTime,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = pull_request_snapshots)]
pub struct NewPullRequestSnapshot<'a> {
    pub id: Uuid,
    pub repository_id: Uuid,
    pub number: i64,
    pub title: Option<&'a str>,
    pub fetched_at: NaiveDateTime,
}

use chrono::NaiveDateTime;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::schema::repositories;

#[derive(Debug, Clone, Queryable, Identifiable)]
#[diesel(table_name = repositories)]
pub struct Repository {
    pub id: Uuid,
    pub repo_id: i64,
    pub link: String,
    pub api_url: String,
    pub commits_url: String,
    pub commits_count: i32,
    pub pull_requests_url: String,
    pub pull_requests_count: i32,
    pub comment: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = repositories)]
pub struct NewRepository<'a> {
    pub id: Uuid,
    pub repo_id: i64,
    pub link: &'a str,
    pub api_url: &'a str,
    pub commits_url: &'a str,
    pub commits_count: i32,
    pub pull_requests_url: &'a str,
    pub pull_requests_count: i32,
    pub comment: &'a str,
}

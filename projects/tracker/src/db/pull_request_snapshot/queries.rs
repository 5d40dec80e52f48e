use diesel::prelude::*;

use crate::db::{pull_request_snapshot::models::*, schema::pull_request_snapshots::dsl::*};

#[derive(Debug, thiserror::Error)]
pub enum InsertPullRequestSnapshotsError {
    #[error("InsertPullRequestSnapshots: {source}")]
    InsertPullRequestSnapshots {
        #[from]
        source: diesel::result::Error,
    },
}

pub fn insert_pull_request_snapshots(
    conn: &mut PgConnection,
    new: &[NewPullRequestSnapshot],
) -> Result<usize, InsertPullRequestSnapshotsError> {
    diesel::insert_into(pull_request_snapshots)
        .values(new)
        .execute(conn)
        .map_err(|source| InsertPullRequestSnapshotsError::InsertPullRequestSnapshots { source })
}

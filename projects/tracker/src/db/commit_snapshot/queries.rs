use diesel::prelude::*;

use crate::db::{commit_snapshot::models::*, schema::commit_snapshots::dsl::*};

#[derive(Debug, thiserror::Error)]
pub enum InsertCommitSnapshotsError {
    #[error("InsertCommitSnapshots: {source}")]
    InsertCommitSnapshots {
        #[from]
        source: diesel::result::Error,
    },
}

pub fn insert_commit_snapshots(
    conn: &mut PgConnection,
    new: &[NewCommitSnapshot],
) -> Result<usize, InsertCommitSnapshotsError> {
    diesel::insert_into(commit_snapshots)
        .values(new)
        .execute(conn)
        .map_err(|source| InsertCommitSnapshotsError::InsertCommitSnapshots { source })
}

//! Progression operation errors.

use questlog_domain::UserId;

use crate::infrastructure::ports::RepoError;

/// Errors that can occur while reading or advancing the stat sheet.
#[derive(Debug, thiserror::Error)]
pub enum ProgressionError {
    #[error("Character stats not found for user: {0}")]
    StatsNotFound(UserId),

    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

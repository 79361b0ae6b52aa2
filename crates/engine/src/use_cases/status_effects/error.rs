//! Status effect operation errors.

use questlog_domain::StatusEffectId;

use crate::infrastructure::ports::RepoError;

#[derive(Debug, thiserror::Error)]
pub enum StatusEffectError {
    #[error("Status effect not found: {0}")]
    NotFound(StatusEffectId),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

//! Account operation errors.

use crate::infrastructure::ports::{AuthError, RepoError};

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

//! Achievement operation errors.

use crate::infrastructure::ports::RepoError;

#[derive(Debug, thiserror::Error)]
pub enum AchievementError {
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

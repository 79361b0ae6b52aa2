//! Quest operation errors.

use questlog_domain::QuestId;

use crate::infrastructure::ports::RepoError;
use crate::use_cases::achievements::AchievementError;
use crate::use_cases::progression::ProgressionError;

#[derive(Debug, thiserror::Error)]
pub enum QuestError {
    #[error("Quest not found: {0}")]
    NotFound(QuestId),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Progression(#[from] ProgressionError),

    #[error(transparent)]
    Achievements(#[from] AchievementError),

    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

//! Habit operation errors.

use questlog_domain::HabitId;

use crate::infrastructure::ports::RepoError;
use crate::use_cases::achievements::AchievementError;
use crate::use_cases::progression::ProgressionError;
use crate::use_cases::status_effects::StatusEffectError;

#[derive(Debug, thiserror::Error)]
pub enum HabitError {
    #[error("Habit not found: {0}")]
    NotFound(HabitId),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Progression(#[from] ProgressionError),

    #[error(transparent)]
    Achievements(#[from] AchievementError),

    #[error(transparent)]
    StatusEffects(#[from] StatusEffectError),

    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

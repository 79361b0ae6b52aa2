//! Repository port traits for database access.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use questlog_domain::{
    Achievement, CharacterStats, Habit, HabitId, Quest, QuestId, SessionId, StatusEffect,
    StatusEffectId, User, UserId,
};

use super::error::RepoError;

// =============================================================================
// Database Ports (one per aggregate)
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsRepo: Send + Sync {
    /// Get the stat sheet for a user, if one exists.
    async fn get(&self, user_id: UserId) -> Result<Option<CharacterStats>, RepoError>;

    /// Write the whole sheet back in one statement.
    async fn save(&self, stats: &CharacterStats) -> Result<(), RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestRepo: Send + Sync {
    async fn get(&self, id: QuestId) -> Result<Option<Quest>, RepoError>;
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Quest>, RepoError>;
    async fn save(&self, quest: &Quest) -> Result<(), RepoError>;
    async fn delete(&self, id: QuestId) -> Result<(), RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HabitRepo: Send + Sync {
    async fn get(&self, id: HabitId) -> Result<Option<Habit>, RepoError>;
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Habit>, RepoError>;
    async fn save(&self, habit: &Habit) -> Result<(), RepoError>;
    async fn delete(&self, id: HabitId) -> Result<(), RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AchievementRepo: Send + Sync {
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Achievement>, RepoError>;

    /// Insert unless a row with the same (user, name) already exists.
    ///
    /// Returns true if the row was inserted. The store also carries a UNIQUE
    /// (user_id, name) constraint so a racing duplicate degrades to a no-op
    /// rather than a second row.
    async fn insert_if_absent(&self, achievement: &Achievement) -> Result<bool, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatusEffectRepo: Send + Sync {
    async fn get(&self, id: StatusEffectId) -> Result<Option<StatusEffect>, RepoError>;

    /// Active effects only, newest application first.
    async fn list_active(&self, user_id: UserId) -> Result<Vec<StatusEffect>, RepoError>;

    async fn save(&self, effect: &StatusEffect) -> Result<(), RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn get(&self, id: UserId) -> Result<Option<User>, RepoError>;
    async fn get_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
    async fn save(&self, user: &User) -> Result<(), RepoError>;
}

// =============================================================================
// Session Storage
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepo: Send + Sync {
    async fn insert(
        &self,
        session: SessionId,
        user_id: UserId,
        created_at: DateTime<Utc>,
    ) -> Result<(), RepoError>;

    async fn find_user(&self, session: SessionId) -> Result<Option<UserId>, RepoError>;
}

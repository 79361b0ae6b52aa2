//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Database access (could swap SQLite -> Postgres)
//! - Identity resolution (could swap bearer sessions -> an external IdP)
//! - Clock (for testing)

mod error;
mod identity;
mod repos;
mod testing;

pub use error::{AuthError, RepoError};
pub use identity::IdentityPort;
pub use repos::{
    AchievementRepo, HabitRepo, QuestRepo, SessionRepo, StatsRepo, StatusEffectRepo, UserRepo,
};
pub use testing::ClockPort;

#[cfg(test)]
pub use identity::MockIdentityPort;
#[cfg(test)]
pub use repos::{
    MockAchievementRepo, MockHabitRepo, MockQuestRepo, MockSessionRepo, MockStatsRepo,
    MockStatusEffectRepo, MockUserRepo,
};
#[cfg(test)]
pub use testing::MockClockPort;

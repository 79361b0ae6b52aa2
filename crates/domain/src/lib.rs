pub mod achievements;
pub mod entities;
pub mod error;
pub mod ids;
pub mod progression;
pub mod streak;
pub mod value_objects;

// Re-export entities
pub use entities::{Achievement, CharacterStats, Habit, HabitType, Quest, QuestType, StatusEffect, User};

pub use error::DomainError;

// Re-export ID types
pub use ids::{AchievementId, HabitId, QuestId, SessionId, StatusEffectId, UserId};

// Re-export value objects
pub use value_objects::{parse_stat_changes, Attribute, StatChange};

// Re-export rule types
pub use achievements::{AchievementContext, AchievementRule};
pub use streak::StreakUpdate;

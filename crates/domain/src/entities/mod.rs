//! Domain entities, one file per aggregate.

mod achievement;
mod character_stats;
mod habit;
mod quest;
mod status_effect;
mod user;

pub use achievement::Achievement;
pub use character_stats::CharacterStats;
pub use habit::{Habit, HabitType};
pub use quest::{Quest, QuestType};
pub use status_effect::StatusEffect;
pub use user::User;

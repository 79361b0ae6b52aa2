//! Use cases - one container struct per feature area, holding the ports it
//! needs behind `Arc<dyn Trait>`.

pub mod account;
pub mod achievements;
pub mod habits;
pub mod progression;
pub mod quests;
pub mod status_effects;

pub use account::{AccountError, AccountUseCases, AuthSession, Credentials};
pub use achievements::{AchievementError, AchievementUseCases};
pub use habits::{
    CompleteHabitResult, CreateHabit, HabitError, HabitUseCases, UpdateHabit,
};
pub use progression::{ProgressionError, ProgressionUseCases, StatsUpdate};
pub use quests::{
    CompleteQuestResult, CreateQuest, QuestError, QuestUseCases, UpdateQuest,
};
pub use status_effects::{ApplyStatusEffect, StatusEffectError, StatusEffectUseCases};

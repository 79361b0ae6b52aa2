//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    clock::SystemClock,
    ports::{
        AchievementRepo, ClockPort, HabitRepo, IdentityPort, QuestRepo, SessionRepo, StatsRepo,
        StatusEffectRepo, UserRepo,
    },
    sqlite::SqliteRepositories,
};
use crate::use_cases;

/// Main application state.
///
/// Holds all repository ports and use cases.
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
    pub identity: Arc<dyn IdentityPort>,
}

/// Container for all repository ports, injected directly as `Arc<dyn Trait>`.
pub struct Repositories {
    pub stats: Arc<dyn StatsRepo>,
    pub quests: Arc<dyn QuestRepo>,
    pub habits: Arc<dyn HabitRepo>,
    pub achievements: Arc<dyn AchievementRepo>,
    pub status_effects: Arc<dyn StatusEffectRepo>,
    pub users: Arc<dyn UserRepo>,
    pub sessions: Arc<dyn SessionRepo>,
}

/// Container for all use cases.
pub struct UseCases {
    pub account: use_cases::AccountUseCases,
    pub progression: Arc<use_cases::ProgressionUseCases>,
    pub quests: use_cases::QuestUseCases,
    pub habits: use_cases::HabitUseCases,
    pub achievements: Arc<use_cases::AchievementUseCases>,
    pub status_effects: Arc<use_cases::StatusEffectUseCases>,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(repos: SqliteRepositories) -> Self {
        let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());

        let stats_repo: Arc<dyn StatsRepo> = repos.stats.clone();
        let quest_repo: Arc<dyn QuestRepo> = repos.quests.clone();
        let habit_repo: Arc<dyn HabitRepo> = repos.habits.clone();
        let achievement_repo: Arc<dyn AchievementRepo> = repos.achievements.clone();
        let status_effect_repo: Arc<dyn StatusEffectRepo> = repos.status_effects.clone();
        let user_repo: Arc<dyn UserRepo> = repos.users.clone();
        let session_repo: Arc<dyn SessionRepo> = repos.sessions.clone();
        let identity: Arc<dyn IdentityPort> = repos.sessions.clone();

        let progression = Arc::new(use_cases::ProgressionUseCases::new(stats_repo.clone()));
        let achievements = Arc::new(use_cases::AchievementUseCases::new(
            achievement_repo.clone(),
            quest_repo.clone(),
            habit_repo.clone(),
            clock.clone(),
        ));
        let status_effects = Arc::new(use_cases::StatusEffectUseCases::new(
            status_effect_repo.clone(),
            clock.clone(),
        ));

        let quests = use_cases::QuestUseCases::new(
            quest_repo.clone(),
            progression.clone(),
            achievements.clone(),
        );
        let habits = use_cases::HabitUseCases::new(
            habit_repo.clone(),
            progression.clone(),
            achievements.clone(),
            status_effects.clone(),
            clock.clone(),
        );
        let account = use_cases::AccountUseCases::new(
            user_repo.clone(),
            session_repo.clone(),
            stats_repo.clone(),
            clock,
        );

        let repositories = Repositories {
            stats: stats_repo,
            quests: quest_repo,
            habits: habit_repo,
            achievements: achievement_repo,
            status_effects: status_effect_repo,
            users: user_repo,
            sessions: session_repo,
        };

        let use_cases = UseCases {
            account,
            progression,
            quests,
            habits,
            achievements,
            status_effects,
        };

        Self {
            repositories,
            use_cases,
            identity,
        }
    }
}

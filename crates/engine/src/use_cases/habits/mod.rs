//! Habit use cases - CRUD and the daily check-off flow.
//!
//! Checking off a habit advances its streak (date-only comparison), then
//! awards XP and stat changes when the habit carries a reward, and attaches a
//! 24-hour status effect when the habit is a bad one. A second check-off on
//! the same day is a no-op.

mod error;

pub use error::HabitError;

use std::sync::Arc;

use chrono::Duration;
use questlog_domain::{streak, Habit, HabitId, HabitType, StatusEffect, UserId};
use serde::Deserialize;

use crate::infrastructure::ports::{ClockPort, HabitRepo};
use crate::use_cases::achievements::AchievementUseCases;
use crate::use_cases::progression::ProgressionUseCases;
use crate::use_cases::status_effects::{ApplyStatusEffect, StatusEffectUseCases};

/// Fields for a new habit.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHabit {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub habit_type: HabitType,
    #[serde(default)]
    pub xp_reward: Option<i64>,
    #[serde(default)]
    pub stats_affected: Option<String>,
    #[serde(default)]
    pub hp_affected: Option<i64>,
}

/// Field updates for an existing habit. Absent fields are left alone;
/// streak bookkeeping is never editable this way.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHabit {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub habit_type: Option<HabitType>,
    pub xp_reward: Option<i64>,
    pub stats_affected: Option<String>,
    pub hp_affected: Option<i64>,
}

/// Result of the daily check-off flow.
#[derive(Debug, Clone)]
pub struct CompleteHabitResult {
    pub habit: Habit,
    /// True when the habit had already been checked off today and nothing
    /// was changed or awarded.
    pub already_done_today: bool,
    pub unlocked_achievements: Vec<String>,
    /// The penalty effect attached when a bad habit was checked off.
    pub status_effect: Option<StatusEffect>,
}

/// Container for habit use cases.
pub struct HabitUseCases {
    habit_repo: Arc<dyn HabitRepo>,
    progression: Arc<ProgressionUseCases>,
    achievements: Arc<AchievementUseCases>,
    status_effects: Arc<StatusEffectUseCases>,
    clock: Arc<dyn ClockPort>,
}

impl HabitUseCases {
    pub fn new(
        habit_repo: Arc<dyn HabitRepo>,
        progression: Arc<ProgressionUseCases>,
        achievements: Arc<AchievementUseCases>,
        status_effects: Arc<StatusEffectUseCases>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            habit_repo,
            progression,
            achievements,
            status_effects,
            clock,
        }
    }

    /// Load a habit and check it belongs to the caller. Foreign-owned habits
    /// surface as NotFound.
    async fn get_owned(&self, id: HabitId, user_id: UserId) -> Result<Habit, HabitError> {
        self.habit_repo
            .get(id)
            .await?
            .filter(|h| h.user_id == user_id)
            .ok_or(HabitError::NotFound(id))
    }

    pub async fn list(&self, user_id: UserId) -> Result<Vec<Habit>, HabitError> {
        Ok(self.habit_repo.list_for_user(user_id).await?)
    }

    pub async fn create(&self, user_id: UserId, fields: CreateHabit) -> Result<Habit, HabitError> {
        if fields.title.trim().is_empty() {
            return Err(HabitError::Validation("title cannot be empty".to_string()));
        }

        let mut habit = Habit::new(user_id, fields.title, fields.habit_type);
        habit.description = fields.description;
        habit.xp_reward = fields.xp_reward;
        habit.stats_affected = fields.stats_affected;
        habit.hp_affected = fields.hp_affected;

        self.habit_repo.save(&habit).await?;
        Ok(habit)
    }

    pub async fn update(
        &self,
        id: HabitId,
        user_id: UserId,
        fields: UpdateHabit,
    ) -> Result<Habit, HabitError> {
        let mut habit = self.get_owned(id, user_id).await?;

        if let Some(title) = fields.title {
            if title.trim().is_empty() {
                return Err(HabitError::Validation("title cannot be empty".to_string()));
            }
            habit.title = title;
        }
        if let Some(description) = fields.description {
            habit.description = Some(description);
        }
        if let Some(habit_type) = fields.habit_type {
            habit.habit_type = habit_type;
        }
        if let Some(xp_reward) = fields.xp_reward {
            habit.xp_reward = Some(xp_reward);
        }
        if let Some(stats_affected) = fields.stats_affected {
            habit.stats_affected = Some(stats_affected);
        }
        if let Some(hp_affected) = fields.hp_affected {
            habit.hp_affected = Some(hp_affected);
        }

        self.habit_repo.save(&habit).await?;
        Ok(habit)
    }

    pub async fn delete(&self, id: HabitId, user_id: UserId) -> Result<(), HabitError> {
        self.get_owned(id, user_id).await?;
        Ok(self.habit_repo.delete(id).await?)
    }

    /// Check off a habit for today.
    ///
    /// Same-day repeats are detected before anything is written and short
    /// circuit the whole flow. Otherwise the streak advances and is saved,
    /// rewards are applied when `xp_reward` is present and non-zero, and a
    /// bad habit additionally earns a "Bad Habit" status effect that expires
    /// 24 hours out.
    pub async fn complete(
        &self,
        id: HabitId,
        user_id: UserId,
    ) -> Result<CompleteHabitResult, HabitError> {
        let mut habit = self.get_owned(id, user_id).await?;

        let now = self.clock.now();
        let update = streak::advance(now.date_naive(), habit.last_completed, habit.streak);
        if update.already_done_today {
            return Ok(CompleteHabitResult {
                habit,
                already_done_today: true,
                unlocked_achievements: Vec::new(),
                status_effect: None,
            });
        }

        habit.streak = update.streak;
        habit.last_completed = Some(update.last_completed);
        self.habit_repo.save(&habit).await?;

        let mut unlocked_achievements = Vec::new();
        if habit.xp_reward.is_some_and(|xp| xp != 0) {
            self.progression
                .apply(
                    user_id,
                    habit.xp_reward.unwrap_or(0),
                    habit.stats_affected.as_deref(),
                    habit.hp_affected,
                )
                .await?;
            unlocked_achievements = self.achievements.check(user_id).await?;
        }

        let mut status_effect = None;
        if habit.habit_type == HabitType::Bad {
            let effect = self
                .status_effects
                .apply(
                    user_id,
                    ApplyStatusEffect {
                        name: format!("Bad Habit: {}", habit.title),
                        description: Some(format!("Penalty for {}", habit.title)),
                        cause: Some(habit.title.clone()),
                        duration: Some("24 hours".to_string()),
                        penalty: Some("-1 WIL".to_string()),
                        expires_at: Some(now + Duration::hours(24)),
                    },
                )
                .await?;
            status_effect = Some(effect);
        }

        Ok(CompleteHabitResult {
            habit,
            already_done_today: false,
            unlocked_achievements,
            status_effect,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{
        MockAchievementRepo, MockClockPort, MockHabitRepo, MockQuestRepo, MockStatsRepo,
        MockStatusEffectRepo,
    };
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};
    use mockall::predicate::*;
    use questlog_domain::CharacterStats;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 10, 0, 0)
            .single()
            .expect("time")
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    struct Fixture {
        habit_repo: MockHabitRepo,
        stats_repo: MockStatsRepo,
        achievement_repo: MockAchievementRepo,
        achievement_quest_repo: MockQuestRepo,
        achievement_habit_repo: MockHabitRepo,
        status_effect_repo: MockStatusEffectRepo,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                habit_repo: MockHabitRepo::new(),
                stats_repo: MockStatsRepo::new(),
                achievement_repo: MockAchievementRepo::new(),
                achievement_quest_repo: MockQuestRepo::new(),
                achievement_habit_repo: MockHabitRepo::new(),
                status_effect_repo: MockStatusEffectRepo::new(),
            }
        }

        fn build(self) -> HabitUseCases {
            let mut clock = MockClockPort::new();
            clock.expect_now().returning(fixed_now);
            let clock: Arc<dyn ClockPort> = Arc::new(clock);
            let progression = Arc::new(ProgressionUseCases::new(Arc::new(self.stats_repo)));
            let achievements = Arc::new(AchievementUseCases::new(
                Arc::new(self.achievement_repo),
                Arc::new(self.achievement_quest_repo),
                Arc::new(self.achievement_habit_repo),
                clock.clone(),
            ));
            let status_effects = Arc::new(StatusEffectUseCases::new(
                Arc::new(self.status_effect_repo),
                clock.clone(),
            ));
            HabitUseCases::new(
                Arc::new(self.habit_repo),
                progression,
                achievements,
                status_effects,
                clock,
            )
        }
    }

    #[tokio::test]
    async fn first_completion_starts_a_streak_and_awards_xp() {
        let user_id = UserId::new();
        let habit = Habit::new(user_id, "Morning run", HabitType::Good).with_xp_reward(20);
        let habit_id = habit.id;

        let mut fx = Fixture::new();
        let stored = habit.clone();
        fx.habit_repo
            .expect_get()
            .with(eq(habit_id))
            .returning(move |_| Ok(Some(stored.clone())));
        fx.habit_repo
            .expect_save()
            .withf(|h| h.streak == 1 && h.last_completed == Some(date(2025, 6, 15)))
            .times(1)
            .returning(|_| Ok(()));
        fx.stats_repo
            .expect_get()
            .returning(move |_| Ok(Some(CharacterStats::starting(user_id))));
        fx.stats_repo
            .expect_save()
            .withf(|s| s.xp == 20 && s.level == 1)
            .times(1)
            .returning(|_| Ok(()));
        fx.achievement_quest_repo
            .expect_list_for_user()
            .returning(|_| Ok(vec![]));
        fx.achievement_habit_repo
            .expect_list_for_user()
            .returning(|_| Ok(vec![]));

        let result = fx
            .build()
            .complete(habit_id, user_id)
            .await
            .expect("complete");
        assert!(!result.already_done_today);
        assert_eq!(result.habit.streak, 1);
        assert!(result.status_effect.is_none());
    }

    #[tokio::test]
    async fn yesterday_completion_continues_the_streak() {
        let user_id = UserId::new();
        let mut habit = Habit::new(user_id, "Read", HabitType::Good);
        habit.streak = 4;
        habit.last_completed = Some(date(2025, 6, 14));
        let habit_id = habit.id;

        let mut fx = Fixture::new();
        let stored = habit.clone();
        fx.habit_repo
            .expect_get()
            .returning(move |_| Ok(Some(stored.clone())));
        fx.habit_repo
            .expect_save()
            .withf(|h| h.streak == 5 && h.last_completed == Some(date(2025, 6, 15)))
            .times(1)
            .returning(|_| Ok(()));
        // No xp_reward, so no progression or achievement calls

        let result = fx
            .build()
            .complete(habit_id, user_id)
            .await
            .expect("complete");
        assert_eq!(result.habit.streak, 5);
        assert!(result.unlocked_achievements.is_empty());
    }

    #[tokio::test]
    async fn same_day_completion_is_a_no_op() {
        let user_id = UserId::new();
        let mut habit = Habit::new(user_id, "Read", HabitType::Good).with_xp_reward(20);
        habit.streak = 2;
        habit.last_completed = Some(date(2025, 6, 15));
        let habit_id = habit.id;

        let mut fx = Fixture::new();
        let stored = habit.clone();
        fx.habit_repo
            .expect_get()
            .returning(move |_| Ok(Some(stored.clone())));
        // No saves, no rewards

        let result = fx
            .build()
            .complete(habit_id, user_id)
            .await
            .expect("complete");
        assert!(result.already_done_today);
        assert_eq!(result.habit.streak, 2);
        assert!(result.unlocked_achievements.is_empty());
        assert!(result.status_effect.is_none());
    }

    #[tokio::test]
    async fn bad_habit_completion_attaches_a_penalty_effect() {
        let user_id = UserId::new();
        let habit = Habit::new(user_id, "Doomscrolling", HabitType::Bad);
        let habit_id = habit.id;

        let mut fx = Fixture::new();
        let stored = habit.clone();
        fx.habit_repo
            .expect_get()
            .returning(move |_| Ok(Some(stored.clone())));
        fx.habit_repo
            .expect_save()
            .times(1)
            .returning(|_| Ok(()));
        fx.status_effect_repo
            .expect_save()
            .withf(|e| {
                e.name == "Bad Habit: Doomscrolling"
                    && e.description.as_deref() == Some("Penalty for Doomscrolling")
                    && e.cause.as_deref() == Some("Doomscrolling")
                    && e.duration.as_deref() == Some("24 hours")
                    && e.penalty.as_deref() == Some("-1 WIL")
                    && e.expires_at == Some(fixed_now() + Duration::hours(24))
                    && e.is_active
            })
            .times(1)
            .returning(|_| Ok(()));

        let result = fx
            .build()
            .complete(habit_id, user_id)
            .await
            .expect("complete");
        let effect = result.status_effect.expect("effect");
        assert_eq!(effect.name, "Bad Habit: Doomscrolling");
    }

    #[tokio::test]
    async fn foreign_habits_surface_as_not_found() {
        let owner = UserId::new();
        let habit = Habit::new(owner, "Read", HabitType::Good);
        let habit_id = habit.id;

        let mut fx = Fixture::new();
        let stored = habit.clone();
        fx.habit_repo
            .expect_get()
            .returning(move |_| Ok(Some(stored.clone())));

        let err = fx
            .build()
            .complete(habit_id, UserId::new())
            .await
            .expect_err("foreign");
        assert!(matches!(err, HabitError::NotFound(_)));
    }
}

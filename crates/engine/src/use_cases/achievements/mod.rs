//! Achievement use cases - listing and the unlock evaluator.
//!
//! The evaluator re-runs the whole fixed rule list against the user's full
//! quest and habit collections on every check; nothing is incremental.
//! Duplicate prevention rides on the conflict-ignoring insert, so a rule
//! firing twice creates one row and reports the unlock once.

mod error;

pub use error::AchievementError;

use std::sync::Arc;

use questlog_domain::{achievements, Achievement, AchievementContext, UserId};

use crate::infrastructure::ports::{AchievementRepo, ClockPort, HabitRepo, QuestRepo};

/// Container for achievement use cases.
pub struct AchievementUseCases {
    achievement_repo: Arc<dyn AchievementRepo>,
    quest_repo: Arc<dyn QuestRepo>,
    habit_repo: Arc<dyn HabitRepo>,
    clock: Arc<dyn ClockPort>,
}

impl AchievementUseCases {
    pub fn new(
        achievement_repo: Arc<dyn AchievementRepo>,
        quest_repo: Arc<dyn QuestRepo>,
        habit_repo: Arc<dyn HabitRepo>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            achievement_repo,
            quest_repo,
            habit_repo,
            clock,
        }
    }

    /// List every achievement the user has unlocked.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<Achievement>, AchievementError> {
        Ok(self.achievement_repo.list_for_user(user_id).await?)
    }

    /// Run all rules and unlock any that newly qualify.
    ///
    /// Returns the names unlocked by this invocation, possibly empty. Rules
    /// already unlocked in an earlier run insert nothing and report nothing.
    pub async fn check(&self, user_id: UserId) -> Result<Vec<String>, AchievementError> {
        let quests = self.quest_repo.list_for_user(user_id).await?;
        let habits = self.habit_repo.list_for_user(user_id).await?;
        let ctx = AchievementContext {
            quests: &quests,
            habits: &habits,
        };

        let mut unlocked = Vec::new();
        for rule in achievements::rules() {
            if !(rule.satisfied)(&ctx) {
                continue;
            }

            let record = Achievement::unlocked_now(
                user_id,
                rule.name,
                rule.description,
                rule.condition,
                rule.reward,
                self.clock.now(),
            );
            if self.achievement_repo.insert_if_absent(&record).await? {
                tracing::info!(user_id = %user_id, name = rule.name, "Achievement unlocked");
                unlocked.push(rule.name.to_string());
            }
        }

        Ok(unlocked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{
        MockAchievementRepo, MockClockPort, MockHabitRepo, MockQuestRepo,
    };
    use chrono::{TimeZone, Utc};
    use questlog_domain::{Quest, QuestType};

    fn completed_quest(user_id: UserId) -> Quest {
        let mut quest = Quest::new(user_id, "done", QuestType::Major, 10);
        quest.completed = true;
        quest
    }

    fn fixed_clock() -> MockClockPort {
        let mut clock = MockClockPort::new();
        clock.expect_now().returning(|| {
            Utc.with_ymd_and_hms(2025, 6, 15, 10, 0, 0)
                .single()
                .expect("time")
        });
        clock
    }

    #[tokio::test]
    async fn first_completed_quest_unlocks_first_steps() {
        let user_id = UserId::new();
        let mut achievement_repo = MockAchievementRepo::new();
        let mut quest_repo = MockQuestRepo::new();
        let mut habit_repo = MockHabitRepo::new();

        quest_repo
            .expect_list_for_user()
            .returning(move |_| Ok(vec![completed_quest(user_id)]));
        habit_repo.expect_list_for_user().returning(|_| Ok(vec![]));
        achievement_repo
            .expect_insert_if_absent()
            .withf(|a| a.name == "First Steps" && a.unlocked && a.unlocked_at.is_some())
            .times(1)
            .returning(|_| Ok(true));

        let use_cases = AchievementUseCases::new(
            Arc::new(achievement_repo),
            Arc::new(quest_repo),
            Arc::new(habit_repo),
            Arc::new(fixed_clock()),
        );

        let unlocked = use_cases.check(user_id).await.expect("check");
        assert_eq!(unlocked, vec!["First Steps".to_string()]);
    }

    #[tokio::test]
    async fn second_check_reports_nothing_new() {
        let user_id = UserId::new();
        let mut achievement_repo = MockAchievementRepo::new();
        let mut quest_repo = MockQuestRepo::new();
        let mut habit_repo = MockHabitRepo::new();

        quest_repo
            .expect_list_for_user()
            .returning(move |_| Ok(vec![completed_quest(user_id)]));
        habit_repo.expect_list_for_user().returning(|_| Ok(vec![]));
        // The row already exists; the conflict-ignoring insert reports it
        achievement_repo
            .expect_insert_if_absent()
            .returning(|_| Ok(false));

        let use_cases = AchievementUseCases::new(
            Arc::new(achievement_repo),
            Arc::new(quest_repo),
            Arc::new(habit_repo),
            Arc::new(fixed_clock()),
        );

        let unlocked = use_cases.check(user_id).await.expect("check");
        assert!(unlocked.is_empty());
    }

    #[tokio::test]
    async fn no_qualifying_rules_insert_nothing() {
        let user_id = UserId::new();
        let achievement_repo = MockAchievementRepo::new();
        let mut quest_repo = MockQuestRepo::new();
        let mut habit_repo = MockHabitRepo::new();

        quest_repo.expect_list_for_user().returning(|_| Ok(vec![]));
        habit_repo.expect_list_for_user().returning(|_| Ok(vec![]));

        let use_cases = AchievementUseCases::new(
            Arc::new(achievement_repo),
            Arc::new(quest_repo),
            Arc::new(habit_repo),
            Arc::new(fixed_clock()),
        );

        let unlocked = use_cases.check(user_id).await.expect("check");
        assert!(unlocked.is_empty());
    }
}

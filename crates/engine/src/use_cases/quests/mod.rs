//! Quest use cases - CRUD and the completion flow.
//!
//! Completing a quest is the orchestrated flow: flip the completed flag,
//! then (only on the false-to-true transition) run progression with the
//! quest's rewards and sweep the achievement rules. Each step commits on its
//! own; a failure later in the sequence leaves the earlier writes in place.

mod error;

pub use error::QuestError;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use questlog_domain::{Quest, QuestId, QuestType, UserId};
use serde::Deserialize;

use crate::infrastructure::ports::QuestRepo;
use crate::use_cases::achievements::AchievementUseCases;
use crate::use_cases::progression::ProgressionUseCases;

/// Fields for a new quest.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub quest_type: QuestType,
    #[serde(default)]
    pub xp_reward: i64,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub stats_affected: Option<String>,
    #[serde(default)]
    pub hp_affected: Option<i64>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default)]
    pub recurrence_pattern: Option<String>,
}

/// Field updates for an existing quest. Absent fields are left alone.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub quest_type: Option<QuestType>,
    pub xp_reward: Option<i64>,
    pub difficulty: Option<String>,
    pub stats_affected: Option<String>,
    pub hp_affected: Option<i64>,
    pub due_date: Option<DateTime<Utc>>,
    pub is_recurring: Option<bool>,
    pub recurrence_pattern: Option<String>,
}

/// Result of the completion flow.
#[derive(Debug, Clone)]
pub struct CompleteQuestResult {
    pub quest: Quest,
    /// Achievement names newly unlocked by this completion.
    pub unlocked_achievements: Vec<String>,
}

/// Container for quest use cases.
pub struct QuestUseCases {
    quest_repo: Arc<dyn QuestRepo>,
    progression: Arc<ProgressionUseCases>,
    achievements: Arc<AchievementUseCases>,
}

impl QuestUseCases {
    pub fn new(
        quest_repo: Arc<dyn QuestRepo>,
        progression: Arc<ProgressionUseCases>,
        achievements: Arc<AchievementUseCases>,
    ) -> Self {
        Self {
            quest_repo,
            progression,
            achievements,
        }
    }

    /// Load a quest and check it belongs to the caller.
    ///
    /// Foreign-owned quests surface as NotFound, never as a permission error,
    /// so ids cannot be probed across users.
    async fn get_owned(&self, id: QuestId, user_id: UserId) -> Result<Quest, QuestError> {
        self.quest_repo
            .get(id)
            .await?
            .filter(|q| q.user_id == user_id)
            .ok_or(QuestError::NotFound(id))
    }

    pub async fn list(&self, user_id: UserId) -> Result<Vec<Quest>, QuestError> {
        Ok(self.quest_repo.list_for_user(user_id).await?)
    }

    pub async fn create(&self, user_id: UserId, fields: CreateQuest) -> Result<Quest, QuestError> {
        if fields.title.trim().is_empty() {
            return Err(QuestError::Validation("title cannot be empty".to_string()));
        }
        if fields.xp_reward < 0 {
            return Err(QuestError::Validation(
                "xpReward cannot be negative".to_string(),
            ));
        }

        let mut quest = Quest::new(user_id, fields.title, fields.quest_type, fields.xp_reward);
        quest.description = fields.description;
        quest.difficulty = fields.difficulty;
        quest.stats_affected = fields.stats_affected;
        quest.hp_affected = fields.hp_affected;
        quest.due_date = fields.due_date;
        quest.is_recurring = fields.is_recurring;
        quest.recurrence_pattern = fields.recurrence_pattern;

        self.quest_repo.save(&quest).await?;
        Ok(quest)
    }

    pub async fn update(
        &self,
        id: QuestId,
        user_id: UserId,
        fields: UpdateQuest,
    ) -> Result<Quest, QuestError> {
        let mut quest = self.get_owned(id, user_id).await?;

        if let Some(title) = fields.title {
            if title.trim().is_empty() {
                return Err(QuestError::Validation("title cannot be empty".to_string()));
            }
            quest.title = title;
        }
        if let Some(description) = fields.description {
            quest.description = Some(description);
        }
        if let Some(quest_type) = fields.quest_type {
            quest.quest_type = quest_type;
        }
        if let Some(xp_reward) = fields.xp_reward {
            if xp_reward < 0 {
                return Err(QuestError::Validation(
                    "xpReward cannot be negative".to_string(),
                ));
            }
            quest.xp_reward = xp_reward;
        }
        if let Some(difficulty) = fields.difficulty {
            quest.difficulty = Some(difficulty);
        }
        if let Some(stats_affected) = fields.stats_affected {
            quest.stats_affected = Some(stats_affected);
        }
        if let Some(hp_affected) = fields.hp_affected {
            quest.hp_affected = Some(hp_affected);
        }
        if let Some(due_date) = fields.due_date {
            quest.due_date = Some(due_date);
        }
        if let Some(is_recurring) = fields.is_recurring {
            quest.is_recurring = is_recurring;
        }
        if let Some(recurrence_pattern) = fields.recurrence_pattern {
            quest.recurrence_pattern = Some(recurrence_pattern);
        }

        self.quest_repo.save(&quest).await?;
        Ok(quest)
    }

    pub async fn delete(&self, id: QuestId, user_id: UserId) -> Result<(), QuestError> {
        self.get_owned(id, user_id).await?;
        Ok(self.quest_repo.delete(id).await?)
    }

    /// Set the completed flag and, on the false-to-true transition only,
    /// award the quest's rewards and sweep the achievement rules.
    ///
    /// Setting an already-completed quest to completed awards nothing, and
    /// un-completing never claws rewards back.
    pub async fn complete(
        &self,
        id: QuestId,
        user_id: UserId,
        completed: bool,
    ) -> Result<CompleteQuestResult, QuestError> {
        let mut quest = self.get_owned(id, user_id).await?;

        let newly_completed = completed && !quest.completed;
        quest.completed = completed;
        self.quest_repo.save(&quest).await?;

        let mut unlocked_achievements = Vec::new();
        if newly_completed {
            self.progression
                .apply(
                    user_id,
                    quest.xp_reward,
                    quest.stats_affected.as_deref(),
                    quest.hp_affected,
                )
                .await?;
            unlocked_achievements = self.achievements.check(user_id).await?;
        }

        Ok(CompleteQuestResult {
            quest,
            unlocked_achievements,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{
        MockAchievementRepo, MockClockPort, MockHabitRepo, MockQuestRepo, MockStatsRepo,
    };
    use chrono::TimeZone;
    use mockall::predicate::*;
    use questlog_domain::CharacterStats;

    struct Fixture {
        quest_repo: MockQuestRepo,
        stats_repo: MockStatsRepo,
        achievement_repo: MockAchievementRepo,
        achievement_quest_repo: MockQuestRepo,
        habit_repo: MockHabitRepo,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                quest_repo: MockQuestRepo::new(),
                stats_repo: MockStatsRepo::new(),
                achievement_repo: MockAchievementRepo::new(),
                achievement_quest_repo: MockQuestRepo::new(),
                habit_repo: MockHabitRepo::new(),
            }
        }

        fn build(self) -> QuestUseCases {
            let mut clock = MockClockPort::new();
            clock.expect_now().returning(|| {
                Utc.with_ymd_and_hms(2025, 6, 15, 10, 0, 0)
                    .single()
                    .expect("time")
            });
            let progression = Arc::new(ProgressionUseCases::new(Arc::new(self.stats_repo)));
            let achievements = Arc::new(AchievementUseCases::new(
                Arc::new(self.achievement_repo),
                Arc::new(self.achievement_quest_repo),
                Arc::new(self.habit_repo),
                Arc::new(clock),
            ));
            QuestUseCases::new(Arc::new(self.quest_repo), progression, achievements)
        }
    }

    fn reward_quest(user_id: UserId) -> Quest {
        Quest::new(user_id, "Ship the feature", QuestType::Major, 150)
            .with_stats_affected("+3 INT")
            .with_hp_affected(-5)
    }

    #[tokio::test]
    async fn completing_a_quest_awards_and_checks_achievements() {
        let user_id = UserId::new();
        let quest = reward_quest(user_id);
        let quest_id = quest.id;

        let mut fx = Fixture::new();
        let stored = quest.clone();
        fx.quest_repo
            .expect_get()
            .with(eq(quest_id))
            .returning(move |_| Ok(Some(stored.clone())));
        fx.quest_repo
            .expect_save()
            .withf(|q| q.completed)
            .times(1)
            .returning(|_| Ok(()));

        // Progression: level 1 / xp 0 sheet crosses the 120 threshold
        fx.stats_repo
            .expect_get()
            .returning(move |_| Ok(Some(CharacterStats::starting(user_id))));
        fx.stats_repo
            .expect_save()
            .withf(|s| s.xp == 150 && s.level == 2 && s.intelligence == 8 && s.hp == 95)
            .times(1)
            .returning(|_| Ok(()));

        // Achievement sweep sees the now-completed quest
        let mut swept = quest.clone();
        swept.completed = true;
        fx.achievement_quest_repo
            .expect_list_for_user()
            .returning(move |_| Ok(vec![swept.clone()]));
        fx.habit_repo.expect_list_for_user().returning(|_| Ok(vec![]));
        fx.achievement_repo
            .expect_insert_if_absent()
            .withf(|a| a.name == "First Steps")
            .times(1)
            .returning(|_| Ok(true));

        let result = fx
            .build()
            .complete(quest_id, user_id, true)
            .await
            .expect("complete");
        assert!(result.quest.completed);
        assert_eq!(result.unlocked_achievements, vec!["First Steps".to_string()]);
    }

    #[tokio::test]
    async fn re_completing_an_already_completed_quest_awards_nothing() {
        let user_id = UserId::new();
        let mut quest = reward_quest(user_id);
        quest.completed = true;
        let quest_id = quest.id;

        let mut fx = Fixture::new();
        let stored = quest.clone();
        fx.quest_repo
            .expect_get()
            .returning(move |_| Ok(Some(stored.clone())));
        fx.quest_repo
            .expect_save()
            .times(1)
            .returning(|_| Ok(()));
        // No progression or achievement calls expected

        let result = fx
            .build()
            .complete(quest_id, user_id, true)
            .await
            .expect("complete");
        assert!(result.unlocked_achievements.is_empty());
    }

    #[tokio::test]
    async fn un_completing_claws_nothing_back() {
        let user_id = UserId::new();
        let mut quest = reward_quest(user_id);
        quest.completed = true;
        let quest_id = quest.id;

        let mut fx = Fixture::new();
        let stored = quest.clone();
        fx.quest_repo
            .expect_get()
            .returning(move |_| Ok(Some(stored.clone())));
        fx.quest_repo
            .expect_save()
            .withf(|q| !q.completed)
            .times(1)
            .returning(|_| Ok(()));

        let result = fx
            .build()
            .complete(quest_id, user_id, false)
            .await
            .expect("complete");
        assert!(!result.quest.completed);
        assert!(result.unlocked_achievements.is_empty());
    }

    #[tokio::test]
    async fn foreign_quests_surface_as_not_found() {
        let owner = UserId::new();
        let quest = reward_quest(owner);
        let quest_id = quest.id;

        let mut fx = Fixture::new();
        let stored = quest.clone();
        fx.quest_repo
            .expect_get()
            .returning(move |_| Ok(Some(stored.clone())));

        let err = fx
            .build()
            .complete(quest_id, UserId::new(), true)
            .await
            .expect_err("foreign");
        assert!(matches!(err, QuestError::NotFound(_)));
    }

    #[tokio::test]
    async fn create_rejects_an_empty_title() {
        let fx = Fixture::new();
        let fields = CreateQuest {
            title: "  ".to_string(),
            description: None,
            quest_type: QuestType::Daily,
            xp_reward: 10,
            difficulty: None,
            stats_affected: None,
            hp_affected: None,
            due_date: None,
            is_recurring: false,
            recurrence_pattern: None,
        };
        let err = fx
            .build()
            .create(UserId::new(), fields)
            .await
            .expect_err("empty title");
        assert!(matches!(err, QuestError::Validation(_)));
    }
}

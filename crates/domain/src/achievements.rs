//! Achievement rules - the fixed, ordered rule list the evaluator runs.
//!
//! Each rule is a predicate over the user's full quest and habit collections;
//! evaluation is recomputed from scratch on every invocation rather than
//! incrementally. New rules follow the identical shape: add an entry to
//! [`rules`] with a predicate.

use crate::entities::{Habit, Quest, QuestType};

/// Everything a rule predicate may look at.
#[derive(Debug, Clone, Copy)]
pub struct AchievementContext<'a> {
    pub quests: &'a [Quest],
    pub habits: &'a [Habit],
}

/// One named unlock rule.
///
/// The reward text is descriptive only; XP for quest completion is awarded by
/// the progression rules at completion time, never by a rule firing.
pub struct AchievementRule {
    pub name: &'static str,
    pub description: &'static str,
    pub condition: &'static str,
    pub reward: &'static str,
    pub satisfied: fn(&AchievementContext<'_>) -> bool,
}

/// The fixed rule list, in evaluation order.
pub fn rules() -> &'static [AchievementRule] {
    &[
        AchievementRule {
            name: "First Steps",
            description: "Complete your first quest.",
            condition: "Complete 1 quest",
            reward: "+50 XP",
            satisfied: |ctx| ctx.quests.iter().filter(|q| q.completed).count() >= 1,
        },
        AchievementRule {
            name: "Week Warrior",
            description: "Complete 7 daily quests.",
            condition: "Complete 7 daily quests",
            reward: "+1 to all stats",
            satisfied: |ctx| {
                ctx.quests
                    .iter()
                    .filter(|q| q.quest_type == QuestType::Daily && q.completed)
                    .count()
                    >= 7
            },
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::UserId;

    fn completed_quest(user_id: UserId, quest_type: QuestType) -> Quest {
        let mut quest = Quest::new(user_id, "done", quest_type, 10);
        quest.completed = true;
        quest
    }

    fn satisfied_names(quests: &[Quest]) -> Vec<&'static str> {
        let ctx = AchievementContext {
            quests,
            habits: &[],
        };
        rules()
            .iter()
            .filter(|rule| (rule.satisfied)(&ctx))
            .map(|rule| rule.name)
            .collect()
    }

    #[test]
    fn test_no_quests_satisfies_nothing() {
        assert!(satisfied_names(&[]).is_empty());
    }

    #[test]
    fn test_one_completed_quest_unlocks_first_steps() {
        let user_id = UserId::new();
        let quests = vec![completed_quest(user_id, QuestType::Major)];
        assert_eq!(satisfied_names(&quests), vec!["First Steps"]);
    }

    #[test]
    fn test_incomplete_quests_do_not_count() {
        let quests = vec![Quest::new(UserId::new(), "pending", QuestType::Daily, 10)];
        assert!(satisfied_names(&quests).is_empty());
    }

    #[test]
    fn test_seven_completed_dailies_unlock_week_warrior() {
        let user_id = UserId::new();
        let quests: Vec<Quest> = (0..7)
            .map(|_| completed_quest(user_id, QuestType::Daily))
            .collect();
        assert_eq!(satisfied_names(&quests), vec!["First Steps", "Week Warrior"]);
    }

    #[test]
    fn test_weekly_quests_do_not_count_toward_week_warrior() {
        let user_id = UserId::new();
        let quests: Vec<Quest> = (0..7)
            .map(|_| completed_quest(user_id, QuestType::Weekly))
            .collect();
        assert_eq!(satisfied_names(&quests), vec!["First Steps"]);
    }
}

//! Quest entity - a one-off or recurring task with a reward attached.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::{QuestId, UserId};

/// Cadence of a quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestType {
    Daily,
    Weekly,
    Major,
}

impl QuestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Major => "major",
        }
    }
}

impl fmt::Display for QuestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for QuestType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "major" => Ok(Self::Major),
            _ => Err(DomainError::parse(format!("Unknown quest type: {}", s))),
        }
    }
}

/// A task the user has set for themselves, with the XP/stat/HP reward that
/// firing its completion feeds into the progression rules.
///
/// Recurrence fields are stored but inert: no server-side regeneration exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    pub id: QuestId,
    pub user_id: UserId,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub quest_type: QuestType,
    pub xp_reward: i64,
    pub difficulty: Option<String>,
    /// Free-text stat-change annotation, e.g. "+2 STR, -1 WIL".
    pub stats_affected: Option<String>,
    pub hp_affected: Option<i64>,
    pub completed: bool,
    pub due_date: Option<DateTime<Utc>>,
    pub is_recurring: bool,
    pub recurrence_pattern: Option<String>,
}

impl Quest {
    pub fn new(
        user_id: UserId,
        title: impl Into<String>,
        quest_type: QuestType,
        xp_reward: i64,
    ) -> Self {
        Self {
            id: QuestId::new(),
            user_id,
            title: title.into(),
            description: None,
            quest_type,
            xp_reward,
            difficulty: None,
            stats_affected: None,
            hp_affected: None,
            completed: false,
            due_date: None,
            is_recurring: false,
            recurrence_pattern: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_stats_affected(mut self, annotation: impl Into<String>) -> Self {
        self.stats_affected = Some(annotation.into());
        self
    }

    pub fn with_hp_affected(mut self, hp_affected: i64) -> Self {
        self.hp_affected = Some(hp_affected);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quest_type_round_trip() {
        for quest_type in [QuestType::Daily, QuestType::Weekly, QuestType::Major] {
            assert_eq!(
                quest_type.as_str().parse::<QuestType>().ok(),
                Some(quest_type)
            );
        }
        assert!("hourly".parse::<QuestType>().is_err());
    }

    #[test]
    fn test_serializes_type_under_wire_name() {
        let quest = Quest::new(UserId::new(), "Slay the inbox", QuestType::Daily, 10);
        let json = serde_json::to_value(&quest).expect("serialize");
        assert_eq!(json["type"], "daily");
        assert_eq!(json["xpReward"], 10);
        assert_eq!(json["completed"], false);
    }
}

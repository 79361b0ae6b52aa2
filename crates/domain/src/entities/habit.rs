//! Habit entity - a repeatable behavior with a streak counter.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::{HabitId, UserId};

/// Whether completing the habit is something to reward or to penalize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HabitType {
    Good,
    Bad,
}

impl HabitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Bad => "bad",
        }
    }
}

impl fmt::Display for HabitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HabitType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "good" => Ok(Self::Good),
            "bad" => Ok(Self::Bad),
            _ => Err(DomainError::parse(format!("Unknown habit type: {}", s))),
        }
    }
}

/// A repeatable behavior the user checks off day by day.
///
/// `streak` and `last_completed` are only ever written by the habit-completion
/// flow; checking off a bad habit additionally earns a status effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: HabitId,
    pub user_id: UserId,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub habit_type: HabitType,
    pub xp_reward: Option<i64>,
    /// Free-text stat-change annotation, e.g. "+1 WIS".
    pub stats_affected: Option<String>,
    pub hp_affected: Option<i64>,
    pub streak: i64,
    pub last_completed: Option<NaiveDate>,
}

impl Habit {
    pub fn new(user_id: UserId, title: impl Into<String>, habit_type: HabitType) -> Self {
        Self {
            id: HabitId::new(),
            user_id,
            title: title.into(),
            description: None,
            habit_type,
            xp_reward: None,
            stats_affected: None,
            hp_affected: None,
            streak: 0,
            last_completed: None,
        }
    }

    pub fn with_xp_reward(mut self, xp_reward: i64) -> Self {
        self.xp_reward = Some(xp_reward);
        self
    }

    pub fn with_stats_affected(mut self, annotation: impl Into<String>) -> Self {
        self.stats_affected = Some(annotation.into());
        self
    }
}

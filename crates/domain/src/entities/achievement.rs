//! Achievement entity - a per-user unlock record.
//!
//! Rows are only ever inserted once their rule is satisfied, so `unlocked`
//! is always true at creation time. At most one row exists per (user, name).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{AchievementId, UserId};

/// A named unlock earned by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: AchievementId,
    pub user_id: UserId,
    pub name: String,
    pub description: Option<String>,
    /// Human-readable unlock condition, e.g. "Complete 1 quest".
    pub condition: String,
    /// Descriptive reward text; never mechanically applied by the evaluator.
    pub reward: Option<String>,
    pub unlocked: bool,
    pub unlocked_at: Option<DateTime<Utc>>,
}

impl Achievement {
    /// Build the record for a rule that has just been satisfied.
    pub fn unlocked_now(
        user_id: UserId,
        name: impl Into<String>,
        description: impl Into<String>,
        condition: impl Into<String>,
        reward: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: AchievementId::new(),
            user_id,
            name: name.into(),
            description: Some(description.into()),
            condition: condition.into(),
            reward: Some(reward.into()),
            unlocked: true,
            unlocked_at: Some(now),
        }
    }
}

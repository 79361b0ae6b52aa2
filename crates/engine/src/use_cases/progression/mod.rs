//! Progression use cases - the stat sheet and the rules that advance it.
//!
//! Completion rewards funnel through [`ProgressionUseCases::apply`]: it loads
//! the sheet, runs the pure progression rules, and writes the whole sheet
//! back in one statement so no partial update is ever visible.

mod error;

pub use error::ProgressionError;

use std::sync::Arc;

use questlog_domain::{parse_stat_changes, progression, CharacterStats, UserId};
use serde::Deserialize;

use crate::infrastructure::ports::StatsRepo;

/// Direct field overwrites for the stats endpoint.
///
/// Every field is optional; absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsUpdate {
    pub level: Option<i64>,
    pub xp: Option<i64>,
    pub hp: Option<i64>,
    pub strength: Option<i64>,
    pub endurance: Option<i64>,
    pub intelligence: Option<i64>,
    pub wisdom: Option<i64>,
    pub charisma: Option<i64>,
    pub willpower: Option<i64>,
}

/// Container for progression use cases.
pub struct ProgressionUseCases {
    stats_repo: Arc<dyn StatsRepo>,
}

impl ProgressionUseCases {
    pub fn new(stats_repo: Arc<dyn StatsRepo>) -> Self {
        Self { stats_repo }
    }

    /// Get the sheet for a user.
    pub async fn get(&self, user_id: UserId) -> Result<CharacterStats, ProgressionError> {
        self.stats_repo
            .get(user_id)
            .await?
            .ok_or(ProgressionError::StatsNotFound(user_id))
    }

    /// Apply one completion's rewards to the sheet and persist the result.
    ///
    /// `stats_affected` is the free-text annotation from the completed quest
    /// or habit; it is decoded into structured deltas here, at the boundary.
    pub async fn apply(
        &self,
        user_id: UserId,
        xp_gained: i64,
        stats_affected: Option<&str>,
        hp_delta: Option<i64>,
    ) -> Result<CharacterStats, ProgressionError> {
        let current = self.get(user_id).await?;

        let changes = parse_stat_changes(stats_affected);
        let next = progression::apply_completion(&current, xp_gained, &changes, hp_delta);

        self.stats_repo.save(&next).await?;

        if next.level > current.level {
            tracing::info!(user_id = %user_id, level = next.level, "Level up");
        }

        Ok(next)
    }

    /// Overwrite individual sheet fields (the direct stats endpoint).
    pub async fn overwrite(
        &self,
        user_id: UserId,
        update: StatsUpdate,
    ) -> Result<CharacterStats, ProgressionError> {
        let mut stats = self.get(user_id).await?;

        if let Some(level) = update.level {
            stats.level = level;
        }
        if let Some(xp) = update.xp {
            stats.xp = xp;
        }
        if let Some(hp) = update.hp {
            stats.hp = hp;
        }
        if let Some(strength) = update.strength {
            stats.strength = strength;
        }
        if let Some(endurance) = update.endurance {
            stats.endurance = endurance;
        }
        if let Some(intelligence) = update.intelligence {
            stats.intelligence = intelligence;
        }
        if let Some(wisdom) = update.wisdom {
            stats.wisdom = wisdom;
        }
        if let Some(charisma) = update.charisma {
            stats.charisma = charisma;
        }
        if let Some(willpower) = update.willpower {
            stats.willpower = willpower;
        }

        self.stats_repo.save(&stats).await?;
        Ok(stats)
    }
}

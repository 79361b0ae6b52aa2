//! SQLite-backed character stats storage.

use async_trait::async_trait;
use questlog_domain::{CharacterStats, UserId};
use sqlx::{Row, SqlitePool};

use crate::infrastructure::ports::{RepoError, StatsRepo};

/// SQLite implementation for the per-user stat sheet.
pub struct SqliteStatsRepo {
    pool: SqlitePool,
}

impl SqliteStatsRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatsRepo for SqliteStatsRepo {
    async fn get(&self, user_id: UserId) -> Result<Option<CharacterStats>, RepoError> {
        let row = sqlx::query(
            r#"
            SELECT user_id, level, xp, hp,
                   strength, endurance, intelligence, wisdom, charisma, willpower
            FROM character_stats WHERE user_id = ?
            "#,
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("stats.get", e))?;

        match row {
            Some(row) => Ok(Some(CharacterStats {
                user_id,
                level: row.get("level"),
                xp: row.get("xp"),
                hp: row.get("hp"),
                strength: row.get("strength"),
                endurance: row.get("endurance"),
                intelligence: row.get("intelligence"),
                wisdom: row.get("wisdom"),
                charisma: row.get("charisma"),
                willpower: row.get("willpower"),
            })),
            None => Ok(None),
        }
    }

    async fn save(&self, stats: &CharacterStats) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO character_stats
                (user_id, level, xp, hp,
                 strength, endurance, intelligence, wisdom, charisma, willpower)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(user_id) DO UPDATE SET
                level = excluded.level,
                xp = excluded.xp,
                hp = excluded.hp,
                strength = excluded.strength,
                endurance = excluded.endurance,
                intelligence = excluded.intelligence,
                wisdom = excluded.wisdom,
                charisma = excluded.charisma,
                willpower = excluded.willpower
            "#,
        )
        .bind(stats.user_id.to_string())
        .bind(stats.level)
        .bind(stats.xp)
        .bind(stats.hp)
        .bind(stats.strength)
        .bind(stats.endurance)
        .bind(stats.intelligence)
        .bind(stats.wisdom)
        .bind(stats.charisma)
        .bind(stats.willpower)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("stats.save", e))?;

        Ok(())
    }
}

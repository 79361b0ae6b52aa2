//! SQLite-backed achievement storage.
//!
//! The (user_id, name) pair carries a UNIQUE constraint so duplicate unlocks
//! degrade to a conflict-ignore no-op even if two evaluations race.

use async_trait::async_trait;
use questlog_domain::{Achievement, AchievementId, UserId};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::{parse_datetime_opt, parse_uuid};
use crate::infrastructure::ports::{AchievementRepo, RepoError};

/// SQLite implementation for achievement storage.
pub struct SqliteAchievementRepo {
    pool: SqlitePool,
}

impl SqliteAchievementRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn achievement_from_row(row: &SqliteRow) -> Result<Achievement, RepoError> {
    Ok(Achievement {
        id: AchievementId::from_uuid(parse_uuid(row.get("id"))?),
        user_id: UserId::from_uuid(parse_uuid(row.get("user_id"))?),
        name: row.get("name"),
        description: row.get("description"),
        condition: row.get("condition"),
        reward: row.get("reward"),
        unlocked: row.get("unlocked"),
        unlocked_at: parse_datetime_opt(row.get("unlocked_at"))?,
    })
}

#[async_trait]
impl AchievementRepo for SqliteAchievementRepo {
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Achievement>, RepoError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, name, description, condition, reward, unlocked, unlocked_at
            FROM achievements WHERE user_id = ?
            "#,
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("achievements.list", e))?;

        rows.iter().map(achievement_from_row).collect()
    }

    async fn insert_if_absent(&self, achievement: &Achievement) -> Result<bool, RepoError> {
        let result = sqlx::query(
            r#"
            INSERT INTO achievements
                (id, user_id, name, description, condition, reward, unlocked, unlocked_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(user_id, name) DO NOTHING
            "#,
        )
        .bind(achievement.id.to_string())
        .bind(achievement.user_id.to_string())
        .bind(&achievement.name)
        .bind(&achievement.description)
        .bind(&achievement.condition)
        .bind(&achievement.reward)
        .bind(achievement.unlocked)
        .bind(achievement.unlocked_at.map(|d| d.to_rfc3339()))
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("achievements.insert", e))?;

        Ok(result.rows_affected() > 0)
    }
}

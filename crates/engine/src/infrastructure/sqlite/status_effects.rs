//! SQLite-backed status effect storage.

use async_trait::async_trait;
use questlog_domain::{StatusEffect, StatusEffectId, UserId};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::{parse_datetime, parse_datetime_opt, parse_uuid};
use crate::infrastructure::ports::{RepoError, StatusEffectRepo};

/// SQLite implementation for status effect storage.
pub struct SqliteStatusEffectRepo {
    pool: SqlitePool,
}

impl SqliteStatusEffectRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn effect_from_row(row: &SqliteRow) -> Result<StatusEffect, RepoError> {
    Ok(StatusEffect {
        id: StatusEffectId::from_uuid(parse_uuid(row.get("id"))?),
        user_id: UserId::from_uuid(parse_uuid(row.get("user_id"))?),
        name: row.get("name"),
        description: row.get("description"),
        cause: row.get("cause"),
        duration: row.get("duration"),
        penalty: row.get("penalty"),
        is_active: row.get("is_active"),
        applied_at: parse_datetime(row.get("applied_at"))?,
        expires_at: parse_datetime_opt(row.get("expires_at"))?,
    })
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, user_id, name, description, cause, duration, penalty,
           is_active, applied_at, expires_at
    FROM status_effects
"#;

#[async_trait]
impl StatusEffectRepo for SqliteStatusEffectRepo {
    async fn get(&self, id: StatusEffectId) -> Result<Option<StatusEffect>, RepoError> {
        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("status_effects.get", e))?;

        row.map(|row| effect_from_row(&row)).transpose()
    }

    async fn list_active(&self, user_id: UserId) -> Result<Vec<StatusEffect>, RepoError> {
        let rows = sqlx::query(&format!(
            "{} WHERE user_id = ? AND is_active = 1 ORDER BY applied_at DESC",
            SELECT_COLUMNS
        ))
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("status_effects.list_active", e))?;

        rows.iter().map(effect_from_row).collect()
    }

    async fn save(&self, effect: &StatusEffect) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO status_effects
                (id, user_id, name, description, cause, duration, penalty,
                 is_active, applied_at, expires_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                description = excluded.description,
                cause = excluded.cause,
                duration = excluded.duration,
                penalty = excluded.penalty,
                is_active = excluded.is_active,
                applied_at = excluded.applied_at,
                expires_at = excluded.expires_at
            "#,
        )
        .bind(effect.id.to_string())
        .bind(effect.user_id.to_string())
        .bind(&effect.name)
        .bind(&effect.description)
        .bind(&effect.cause)
        .bind(&effect.duration)
        .bind(&effect.penalty)
        .bind(effect.is_active)
        .bind(effect.applied_at.to_rfc3339())
        .bind(effect.expires_at.map(|d| d.to_rfc3339()))
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("status_effects.save", e))?;

        Ok(())
    }
}

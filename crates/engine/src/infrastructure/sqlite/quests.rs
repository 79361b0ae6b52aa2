//! SQLite-backed quest storage.

use async_trait::async_trait;
use questlog_domain::{Quest, QuestId, UserId};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::{parse_datetime_opt, parse_uuid};
use crate::infrastructure::ports::{QuestRepo, RepoError};

/// SQLite implementation for quest storage.
pub struct SqliteQuestRepo {
    pool: SqlitePool,
}

impl SqliteQuestRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn quest_from_row(row: &SqliteRow) -> Result<Quest, RepoError> {
    let quest_type: String = row.get("quest_type");
    Ok(Quest {
        id: QuestId::from_uuid(parse_uuid(row.get("id"))?),
        user_id: UserId::from_uuid(parse_uuid(row.get("user_id"))?),
        title: row.get("title"),
        description: row.get("description"),
        quest_type: quest_type
            .parse()
            .map_err(|e: questlog_domain::DomainError| RepoError::serialization(e))?,
        xp_reward: row.get("xp_reward"),
        difficulty: row.get("difficulty"),
        stats_affected: row.get("stats_affected"),
        hp_affected: row.get("hp_affected"),
        completed: row.get("completed"),
        due_date: parse_datetime_opt(row.get("due_date"))?,
        is_recurring: row.get("is_recurring"),
        recurrence_pattern: row.get("recurrence_pattern"),
    })
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, user_id, title, description, quest_type, xp_reward, difficulty,
           stats_affected, hp_affected, completed, due_date, is_recurring,
           recurrence_pattern
    FROM quests
"#;

#[async_trait]
impl QuestRepo for SqliteQuestRepo {
    async fn get(&self, id: QuestId) -> Result<Option<Quest>, RepoError> {
        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("quests.get", e))?;

        row.map(|row| quest_from_row(&row)).transpose()
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Quest>, RepoError> {
        let rows = sqlx::query(&format!("{} WHERE user_id = ?", SELECT_COLUMNS))
            .bind(user_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("quests.list", e))?;

        rows.iter().map(quest_from_row).collect()
    }

    async fn save(&self, quest: &Quest) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO quests
                (id, user_id, title, description, quest_type, xp_reward, difficulty,
                 stats_affected, hp_affected, completed, due_date, is_recurring,
                 recurrence_pattern)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                description = excluded.description,
                quest_type = excluded.quest_type,
                xp_reward = excluded.xp_reward,
                difficulty = excluded.difficulty,
                stats_affected = excluded.stats_affected,
                hp_affected = excluded.hp_affected,
                completed = excluded.completed,
                due_date = excluded.due_date,
                is_recurring = excluded.is_recurring,
                recurrence_pattern = excluded.recurrence_pattern
            "#,
        )
        .bind(quest.id.to_string())
        .bind(quest.user_id.to_string())
        .bind(&quest.title)
        .bind(&quest.description)
        .bind(quest.quest_type.as_str())
        .bind(quest.xp_reward)
        .bind(&quest.difficulty)
        .bind(&quest.stats_affected)
        .bind(quest.hp_affected)
        .bind(quest.completed)
        .bind(quest.due_date.map(|d| d.to_rfc3339()))
        .bind(quest.is_recurring)
        .bind(&quest.recurrence_pattern)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("quests.save", e))?;

        Ok(())
    }

    async fn delete(&self, id: QuestId) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM quests WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("quests.delete", e))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::not_found("Quest", id));
        }
        Ok(())
    }
}

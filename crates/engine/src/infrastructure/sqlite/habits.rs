//! SQLite-backed habit storage.

use async_trait::async_trait;
use questlog_domain::{Habit, HabitId, UserId};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::{parse_date_opt, parse_uuid, DATE_FORMAT};
use crate::infrastructure::ports::{HabitRepo, RepoError};

/// SQLite implementation for habit storage.
pub struct SqliteHabitRepo {
    pool: SqlitePool,
}

impl SqliteHabitRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn habit_from_row(row: &SqliteRow) -> Result<Habit, RepoError> {
    let habit_type: String = row.get("habit_type");
    Ok(Habit {
        id: HabitId::from_uuid(parse_uuid(row.get("id"))?),
        user_id: UserId::from_uuid(parse_uuid(row.get("user_id"))?),
        title: row.get("title"),
        description: row.get("description"),
        habit_type: habit_type
            .parse()
            .map_err(|e: questlog_domain::DomainError| RepoError::serialization(e))?,
        xp_reward: row.get("xp_reward"),
        stats_affected: row.get("stats_affected"),
        hp_affected: row.get("hp_affected"),
        streak: row.get("streak"),
        last_completed: parse_date_opt(row.get("last_completed"))?,
    })
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, user_id, title, description, habit_type, xp_reward,
           stats_affected, hp_affected, streak, last_completed
    FROM habits
"#;

#[async_trait]
impl HabitRepo for SqliteHabitRepo {
    async fn get(&self, id: HabitId) -> Result<Option<Habit>, RepoError> {
        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("habits.get", e))?;

        row.map(|row| habit_from_row(&row)).transpose()
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Habit>, RepoError> {
        let rows = sqlx::query(&format!("{} WHERE user_id = ?", SELECT_COLUMNS))
            .bind(user_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("habits.list", e))?;

        rows.iter().map(habit_from_row).collect()
    }

    async fn save(&self, habit: &Habit) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO habits
                (id, user_id, title, description, habit_type, xp_reward,
                 stats_affected, hp_affected, streak, last_completed)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                description = excluded.description,
                habit_type = excluded.habit_type,
                xp_reward = excluded.xp_reward,
                stats_affected = excluded.stats_affected,
                hp_affected = excluded.hp_affected,
                streak = excluded.streak,
                last_completed = excluded.last_completed
            "#,
        )
        .bind(habit.id.to_string())
        .bind(habit.user_id.to_string())
        .bind(&habit.title)
        .bind(&habit.description)
        .bind(habit.habit_type.as_str())
        .bind(habit.xp_reward)
        .bind(&habit.stats_affected)
        .bind(habit.hp_affected)
        .bind(habit.streak)
        .bind(habit.last_completed.map(|d| d.format(DATE_FORMAT).to_string()))
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("habits.save", e))?;

        Ok(())
    }

    async fn delete(&self, id: HabitId) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM habits WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("habits.delete", e))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::not_found("Habit", id));
        }
        Ok(())
    }
}

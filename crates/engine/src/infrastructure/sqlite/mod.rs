//! SQLite adapters for the repository ports.
//!
//! One repo struct per aggregate, all sharing a single pool. Timestamps are
//! stored as RFC 3339 text, dates as `YYYY-MM-DD`, IDs as UUID text.

mod achievements;
mod habits;
mod identity;
mod quests;
mod stats;
mod status_effects;

pub use achievements::SqliteAchievementRepo;
pub use habits::SqliteHabitRepo;
pub use identity::{SqliteSessionRepo, SqliteUserRepo};
pub use quests::SqliteQuestRepo;
pub use stats::SqliteStatsRepo;
pub use status_effects::SqliteStatusEffectRepo;

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::infrastructure::ports::RepoError;

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

pub(crate) fn parse_uuid(value: String) -> Result<Uuid, RepoError> {
    Uuid::parse_str(&value).map_err(RepoError::serialization)
}

pub(crate) fn parse_datetime(value: String) -> Result<DateTime<Utc>, RepoError> {
    DateTime::parse_from_rfc3339(&value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(RepoError::serialization)
}

pub(crate) fn parse_datetime_opt(value: Option<String>) -> Result<Option<DateTime<Utc>>, RepoError> {
    value.map(parse_datetime).transpose()
}

pub(crate) fn parse_date_opt(value: Option<String>) -> Result<Option<NaiveDate>, RepoError> {
    value
        .map(|v| NaiveDate::parse_from_str(&v, DATE_FORMAT).map_err(RepoError::serialization))
        .transpose()
}

/// Open (or create) the database file and ensure the schema exists.
pub async fn connect(db_path: &str) -> Result<SqlitePool, RepoError> {
    let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path))
        .await
        .map_err(|e| RepoError::database("connect", e))?;
    ensure_schema(&pool).await?;
    Ok(pool)
}

/// Create all tables if they do not exist yet.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), RepoError> {
    let statements = [
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            username TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS character_stats (
            user_id TEXT PRIMARY KEY,
            level INTEGER NOT NULL,
            xp INTEGER NOT NULL,
            hp INTEGER NOT NULL,
            strength INTEGER NOT NULL,
            endurance INTEGER NOT NULL,
            intelligence INTEGER NOT NULL,
            wisdom INTEGER NOT NULL,
            charisma INTEGER NOT NULL,
            willpower INTEGER NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS quests (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            title TEXT NOT NULL,
            description TEXT,
            quest_type TEXT NOT NULL,
            xp_reward INTEGER NOT NULL DEFAULT 0,
            difficulty TEXT,
            stats_affected TEXT,
            hp_affected INTEGER,
            completed INTEGER NOT NULL DEFAULT 0,
            due_date TEXT,
            is_recurring INTEGER NOT NULL DEFAULT 0,
            recurrence_pattern TEXT
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS habits (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            title TEXT NOT NULL,
            description TEXT,
            habit_type TEXT NOT NULL,
            xp_reward INTEGER,
            stats_affected TEXT,
            hp_affected INTEGER,
            streak INTEGER NOT NULL DEFAULT 0,
            last_completed TEXT
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS achievements (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            name TEXT NOT NULL,
            description TEXT,
            condition TEXT NOT NULL,
            reward TEXT,
            unlocked INTEGER NOT NULL DEFAULT 1,
            unlocked_at TEXT,
            UNIQUE (user_id, name)
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS status_effects (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            name TEXT NOT NULL,
            description TEXT,
            cause TEXT,
            duration TEXT,
            penalty TEXT,
            is_active INTEGER NOT NULL DEFAULT 1,
            applied_at TEXT NOT NULL,
            expires_at TEXT
        )
        "#,
    ];

    for statement in statements {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| RepoError::database("ensure_schema", e))?;
    }

    Ok(())
}

/// All SQLite-backed repositories, sharing one pool.
pub struct SqliteRepositories {
    pub stats: Arc<SqliteStatsRepo>,
    pub quests: Arc<SqliteQuestRepo>,
    pub habits: Arc<SqliteHabitRepo>,
    pub achievements: Arc<SqliteAchievementRepo>,
    pub status_effects: Arc<SqliteStatusEffectRepo>,
    pub users: Arc<SqliteUserRepo>,
    pub sessions: Arc<SqliteSessionRepo>,
}

impl SqliteRepositories {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            stats: Arc::new(SqliteStatsRepo::new(pool.clone())),
            quests: Arc::new(SqliteQuestRepo::new(pool.clone())),
            habits: Arc::new(SqliteHabitRepo::new(pool.clone())),
            achievements: Arc::new(SqliteAchievementRepo::new(pool.clone())),
            status_effects: Arc::new(SqliteStatusEffectRepo::new(pool.clone())),
            users: Arc::new(SqliteUserRepo::new(pool.clone())),
            sessions: Arc::new(SqliteSessionRepo::new(pool)),
        }
    }
}

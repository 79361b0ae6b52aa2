//! SQLite-backed user and session storage.
//!
//! Sessions are opaque bearer tokens (UUIDs); resolving one is the identity
//! provider for the whole API.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use questlog_domain::{SessionId, User, UserId};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::{parse_datetime, parse_uuid};
use crate::infrastructure::ports::{AuthError, IdentityPort, RepoError, SessionRepo, UserRepo};

/// SQLite implementation for user accounts.
pub struct SqliteUserRepo {
    pool: SqlitePool,
}

impl SqliteUserRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn user_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<User, RepoError> {
    Ok(User {
        id: UserId::from_uuid(parse_uuid(row.get("id"))?),
        username: row.get("username"),
        password_hash: row.get("password_hash"),
        created_at: parse_datetime(row.get("created_at"))?,
    })
}

#[async_trait]
impl UserRepo for SqliteUserRepo {
    async fn get(&self, id: UserId) -> Result<Option<User>, RepoError> {
        let row = sqlx::query("SELECT id, username, password_hash, created_at FROM users WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("users.get", e))?;

        row.map(|row| user_from_row(&row)).transpose()
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let row = sqlx::query(
            "SELECT id, username, password_hash, created_at FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("users.get_by_username", e))?;

        row.map(|row| user_from_row(&row)).transpose()
    }

    async fn save(&self, user: &User) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username, password_hash, created_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                username = excluded.username,
                password_hash = excluded.password_hash
            "#,
        )
        .bind(user.id.to_string())
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("users.save", e))?;

        Ok(())
    }
}

/// SQLite implementation for bearer sessions; doubles as the identity port.
pub struct SqliteSessionRepo {
    pool: SqlitePool,
}

impl SqliteSessionRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepo for SqliteSessionRepo {
    async fn insert(
        &self,
        session: SessionId,
        user_id: UserId,
        created_at: DateTime<Utc>,
    ) -> Result<(), RepoError> {
        sqlx::query("INSERT INTO sessions (id, user_id, created_at) VALUES (?, ?, ?)")
            .bind(session.to_string())
            .bind(user_id.to_string())
            .bind(created_at.to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("sessions.insert", e))?;

        Ok(())
    }

    async fn find_user(&self, session: SessionId) -> Result<Option<UserId>, RepoError> {
        let row = sqlx::query("SELECT user_id FROM sessions WHERE id = ?")
            .bind(session.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("sessions.find_user", e))?;

        match row {
            Some(row) => Ok(Some(UserId::from_uuid(parse_uuid(row.get("user_id"))?))),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl IdentityPort for SqliteSessionRepo {
    async fn resolve(&self, token: &str) -> Result<UserId, AuthError> {
        let session = Uuid::parse_str(token)
            .map(SessionId::from_uuid)
            .map_err(|_| AuthError::Unauthorized)?;

        self.find_user(session)
            .await?
            .ok_or(AuthError::Unauthorized)
    }
}

//! Account use cases - registration and login.
//!
//! Passwords are hashed with Argon2 and never stored or logged in the clear.
//! A successful register or login mints a fresh opaque session token; the
//! token is the session id itself, resolved back to a user by the identity
//! adapter on every request.

mod error;

pub use error::AccountError;

use std::sync::Arc;

use argon2::Argon2;
use password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use questlog_domain::{CharacterStats, SessionId, User};
use serde::Deserialize;

use crate::infrastructure::ports::{AuthError, ClockPort, SessionRepo, StatsRepo, UserRepo};

const MIN_USERNAME_LEN: usize = 3;
const MIN_PASSWORD_LEN: usize = 8;

/// Credentials for register and login.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// A freshly minted session for a user.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub token: SessionId,
}

/// Container for account use cases.
pub struct AccountUseCases {
    user_repo: Arc<dyn UserRepo>,
    session_repo: Arc<dyn SessionRepo>,
    stats_repo: Arc<dyn StatsRepo>,
    clock: Arc<dyn ClockPort>,
}

impl AccountUseCases {
    pub fn new(
        user_repo: Arc<dyn UserRepo>,
        session_repo: Arc<dyn SessionRepo>,
        stats_repo: Arc<dyn StatsRepo>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            user_repo,
            session_repo,
            stats_repo,
            clock,
        }
    }

    /// Create a user with a starting stat sheet and log them in.
    pub async fn register(&self, credentials: Credentials) -> Result<AuthSession, AccountError> {
        let username = credentials.username.trim().to_string();
        if username.len() < MIN_USERNAME_LEN {
            return Err(AccountError::Validation(format!(
                "username must be at least {} characters",
                MIN_USERNAME_LEN
            )));
        }
        if credentials.password.len() < MIN_PASSWORD_LEN {
            return Err(AccountError::Validation(format!(
                "password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }

        if self.user_repo.get_by_username(&username).await?.is_some() {
            return Err(AuthError::UsernameTaken(username).into());
        }

        let salt = SaltString::generate(&mut rand::thread_rng());
        let hash = Argon2::default()
            .hash_password(credentials.password.as_bytes(), &salt)
            .map_err(|e| AuthError::Credential(e.to_string()))?;

        let now = self.clock.now();
        let user = User::new(username, hash.to_string(), now);
        self.user_repo.save(&user).await?;
        self.stats_repo
            .save(&CharacterStats::starting(user.id))
            .await?;

        let token = self.issue_session(&user).await?;
        tracing::info!(user_id = %user.id, username = %user.username, "user registered");
        Ok(AuthSession { user, token })
    }

    /// Verify credentials and mint a new session.
    ///
    /// Unknown usernames and wrong passwords both come back as Unauthorized.
    pub async fn login(&self, credentials: Credentials) -> Result<AuthSession, AccountError> {
        let username = credentials.username.trim();
        let user = self
            .user_repo
            .get_by_username(username)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let parsed = PasswordHash::new(&user.password_hash)
            .map_err(|e| AuthError::Credential(e.to_string()))?;
        Argon2::default()
            .verify_password(credentials.password.as_bytes(), &parsed)
            .map_err(|_| AuthError::Unauthorized)?;

        let token = self.issue_session(&user).await?;
        tracing::debug!(user_id = %user.id, "user logged in");
        Ok(AuthSession { user, token })
    }

    async fn issue_session(&self, user: &User) -> Result<SessionId, AccountError> {
        let token = SessionId::new();
        self.session_repo
            .insert(token, user.id, self.clock.now())
            .await?;
        Ok(token)
    }
}

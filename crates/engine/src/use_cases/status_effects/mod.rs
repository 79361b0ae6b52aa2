//! Status effect use cases - apply, list active, remove.
//!
//! Removal deactivates the row rather than deleting it, so the history stays
//! auditable. Expiry is informational: nothing auto-deactivates an effect
//! whose `expires_at` has passed.

mod error;

pub use error::StatusEffectError;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use questlog_domain::{StatusEffect, StatusEffectId, UserId};
use serde::Deserialize;

use crate::infrastructure::ports::{ClockPort, StatusEffectRepo};

/// Fields for a new status effect.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyStatusEffect {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cause: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub penalty: Option<String>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Container for status effect use cases.
pub struct StatusEffectUseCases {
    status_effect_repo: Arc<dyn StatusEffectRepo>,
    clock: Arc<dyn ClockPort>,
}

impl StatusEffectUseCases {
    pub fn new(status_effect_repo: Arc<dyn StatusEffectRepo>, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            status_effect_repo,
            clock,
        }
    }

    /// Attach a new active effect to the user, applied as of now.
    pub async fn apply(
        &self,
        user_id: UserId,
        fields: ApplyStatusEffect,
    ) -> Result<StatusEffect, StatusEffectError> {
        if fields.name.trim().is_empty() {
            return Err(StatusEffectError::Validation(
                "name cannot be empty".to_string(),
            ));
        }

        let mut effect = StatusEffect::new(user_id, fields.name, self.clock.now());
        effect.description = fields.description;
        effect.cause = fields.cause;
        effect.duration = fields.duration;
        effect.penalty = fields.penalty;
        effect.expires_at = fields.expires_at;

        self.status_effect_repo.save(&effect).await?;
        Ok(effect)
    }

    /// Active effects for the user, newest application first.
    pub async fn list_active(&self, user_id: UserId) -> Result<Vec<StatusEffect>, StatusEffectError> {
        Ok(self.status_effect_repo.list_active(user_id).await?)
    }

    /// Deactivate an effect owned by the user.
    ///
    /// Missing, foreign-owned, and already-inactive effects all surface as
    /// NotFound; the caller cannot distinguish them.
    pub async fn remove(
        &self,
        id: StatusEffectId,
        user_id: UserId,
    ) -> Result<(), StatusEffectError> {
        let effect = self
            .status_effect_repo
            .get(id)
            .await?
            .filter(|e| e.user_id == user_id && e.is_active)
            .ok_or(StatusEffectError::NotFound(id))?;

        let deactivated = StatusEffect {
            is_active: false,
            ..effect
        };
        self.status_effect_repo.save(&deactivated).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockClockPort, MockStatusEffectRepo};
    use chrono::TimeZone;
    use mockall::predicate::*;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 10, 0, 0)
            .single()
            .expect("time")
    }

    fn fields(name: &str) -> ApplyStatusEffect {
        ApplyStatusEffect {
            name: name.to_string(),
            description: None,
            cause: None,
            duration: None,
            penalty: None,
            expires_at: None,
        }
    }

    #[tokio::test]
    async fn apply_stamps_the_current_time() {
        let mut repo = MockStatusEffectRepo::new();
        let mut clock = MockClockPort::new();
        clock.expect_now().returning(fixed_now);
        repo.expect_save()
            .withf(|e| e.is_active && e.applied_at == fixed_now())
            .times(1)
            .returning(|_| Ok(()));

        let use_cases = StatusEffectUseCases::new(Arc::new(repo), Arc::new(clock));
        let effect = use_cases
            .apply(UserId::new(), fields("Fatigue"))
            .await
            .expect("apply");
        assert!(effect.is_active);
        assert_eq!(effect.name, "Fatigue");
    }

    #[tokio::test]
    async fn apply_rejects_an_empty_name() {
        let repo = MockStatusEffectRepo::new();
        let clock = MockClockPort::new();

        let use_cases = StatusEffectUseCases::new(Arc::new(repo), Arc::new(clock));
        let err = use_cases
            .apply(UserId::new(), fields("  "))
            .await
            .expect_err("empty name");
        assert!(matches!(err, StatusEffectError::Validation(_)));
    }

    #[tokio::test]
    async fn remove_deactivates_an_owned_active_effect() {
        let user_id = UserId::new();
        let effect = StatusEffect::new(user_id, "Fatigue", fixed_now());
        let id = effect.id;

        let mut repo = MockStatusEffectRepo::new();
        let clock = MockClockPort::new();
        let stored = effect.clone();
        repo.expect_get()
            .with(eq(id))
            .returning(move |_| Ok(Some(stored.clone())));
        repo.expect_save()
            .withf(|e| !e.is_active)
            .times(1)
            .returning(|_| Ok(()));

        let use_cases = StatusEffectUseCases::new(Arc::new(repo), Arc::new(clock));
        use_cases.remove(id, user_id).await.expect("remove");
    }

    #[tokio::test]
    async fn remove_of_a_missing_effect_is_not_found() {
        let mut repo = MockStatusEffectRepo::new();
        let clock = MockClockPort::new();
        repo.expect_get().returning(|_| Ok(None));

        let use_cases = StatusEffectUseCases::new(Arc::new(repo), Arc::new(clock));
        let err = use_cases
            .remove(StatusEffectId::new(), UserId::new())
            .await
            .expect_err("missing");
        assert!(matches!(err, StatusEffectError::NotFound(_)));
    }

    #[tokio::test]
    async fn remove_of_a_foreign_or_inactive_effect_is_not_found() {
        let owner = UserId::new();
        let effect = StatusEffect::new(owner, "Fatigue", fixed_now());
        let id = effect.id;

        let mut repo = MockStatusEffectRepo::new();
        let clock = MockClockPort::new();
        let stored = effect.clone();
        repo.expect_get().returning(move |_| Ok(Some(stored.clone())));

        let use_cases = StatusEffectUseCases::new(Arc::new(repo), Arc::new(clock));

        // Someone else's effect
        let err = use_cases
            .remove(id, UserId::new())
            .await
            .expect_err("foreign");
        assert!(matches!(err, StatusEffectError::NotFound(_)));

        // Already removed
        let mut inactive = effect;
        inactive.is_active = false;
        let mut repo = MockStatusEffectRepo::new();
        repo.expect_get().returning(move |_| Ok(Some(inactive.clone())));
        let use_cases = StatusEffectUseCases::new(Arc::new(repo), Arc::new(MockClockPort::new()));
        let err = use_cases.remove(id, owner).await.expect_err("inactive");
        assert!(matches!(err, StatusEffectError::NotFound(_)));
    }
}

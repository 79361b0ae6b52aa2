//! Status effect entity - a timed debuff or condition attached to a user.
//!
//! Effects are deactivated rather than deleted so the history stays auditable.
//! The `penalty` text is descriptive only; nothing re-applies it to the sheet.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{StatusEffectId, UserId};

/// A condition currently (or formerly) afflicting the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusEffect {
    pub id: StatusEffectId,
    pub user_id: UserId,
    pub name: String,
    pub description: Option<String>,
    /// What earned the effect, e.g. the title of a bad habit.
    pub cause: Option<String>,
    /// Free-text duration label, e.g. "24 hours".
    pub duration: Option<String>,
    /// Free-text penalty label, e.g. "-1 WIL". Descriptive only.
    pub penalty: Option<String>,
    pub is_active: bool,
    pub applied_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl StatusEffect {
    pub fn new(user_id: UserId, name: impl Into<String>, applied_at: DateTime<Utc>) -> Self {
        Self {
            id: StatusEffectId::new(),
            user_id,
            name: name.into(),
            description: None,
            cause: None,
            duration: None,
            penalty: None,
            is_active: true,
            applied_at,
            expires_at: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    pub fn with_penalty(mut self, penalty: impl Into<String>) -> Self {
        self.penalty = Some(penalty.into());
        self
    }

    pub fn with_expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }
}

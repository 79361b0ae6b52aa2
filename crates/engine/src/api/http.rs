//! HTTP routes.

use axum::{
    extract::{FromRequestParts, Path, State},
    http::{header, request::Parts},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use uuid::Uuid;

use questlog_domain::{
    Achievement, CharacterStats, Habit, HabitId, Quest, QuestId, StatusEffect, StatusEffectId,
    UserId,
};

use crate::app::App;
use crate::infrastructure::ports::AuthError;
use crate::use_cases::{
    AccountError, AchievementError, ApplyStatusEffect, CreateHabit, CreateQuest, Credentials,
    HabitError, ProgressionError, QuestError, StatsUpdate, StatusEffectError, UpdateHabit,
    UpdateQuest,
};

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/stats", get(get_stats).put(update_stats))
        .route("/api/quests", get(list_quests).post(create_quest))
        .route(
            "/api/quests/{id}",
            axum::routing::put(update_quest).delete(delete_quest),
        )
        .route("/api/quests/{id}/complete", post(complete_quest))
        .route("/api/habits", get(list_habits).post(create_habit))
        .route(
            "/api/habits/{id}",
            axum::routing::put(update_habit).delete(delete_habit),
        )
        .route("/api/habits/{id}/complete", post(complete_habit))
        .route("/api/achievements", get(list_achievements))
        .route("/api/achievements/check", post(check_achievements))
        .route("/api/status-effects", get(list_status_effects))
        .route("/api/status-effects/apply", post(apply_status_effect))
        .route("/api/status-effects/{id}/remove", post(remove_status_effect))
}

async fn health() -> &'static str {
    "OK"
}

/// The authenticated caller, resolved from the `Authorization: Bearer` header.
pub struct AuthUser(pub UserId);

impl FromRequestParts<Arc<App>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<App>,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or(ApiError::Unauthorized)?;

        let user_id = state
            .identity
            .resolve(token)
            .await
            .map_err(|_| ApiError::Unauthorized)?;
        Ok(AuthUser(user_id))
    }
}

// =============================================================================
// Auth
// =============================================================================

#[derive(serde::Serialize)]
struct AuthResponse {
    token: String,
    user: questlog_domain::User,
}

async fn register(
    State(app): State<Arc<App>>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<AuthResponse>, ApiError> {
    let session = app.use_cases.account.register(credentials).await?;
    Ok(Json(AuthResponse {
        token: session.token.to_string(),
        user: session.user,
    }))
}

async fn login(
    State(app): State<Arc<App>>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<AuthResponse>, ApiError> {
    let session = app.use_cases.account.login(credentials).await?;
    Ok(Json(AuthResponse {
        token: session.token.to_string(),
        user: session.user,
    }))
}

// =============================================================================
// Stats
// =============================================================================

async fn get_stats(
    State(app): State<Arc<App>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<CharacterStats>, ApiError> {
    let stats = app.use_cases.progression.get(user_id).await?;
    Ok(Json(stats))
}

async fn update_stats(
    State(app): State<Arc<App>>,
    AuthUser(user_id): AuthUser,
    Json(update): Json<StatsUpdate>,
) -> Result<Json<CharacterStats>, ApiError> {
    let stats = app.use_cases.progression.overwrite(user_id, update).await?;
    Ok(Json(stats))
}

// =============================================================================
// Quests
// =============================================================================

async fn list_quests(
    State(app): State<Arc<App>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<Quest>>, ApiError> {
    let quests = app.use_cases.quests.list(user_id).await?;
    Ok(Json(quests))
}

async fn create_quest(
    State(app): State<Arc<App>>,
    AuthUser(user_id): AuthUser,
    Json(fields): Json<CreateQuest>,
) -> Result<Json<Quest>, ApiError> {
    let quest = app.use_cases.quests.create(user_id, fields).await?;
    Ok(Json(quest))
}

async fn update_quest(
    State(app): State<Arc<App>>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(fields): Json<UpdateQuest>,
) -> Result<Json<Quest>, ApiError> {
    let quest = app
        .use_cases
        .quests
        .update(QuestId::from_uuid(id), user_id, fields)
        .await?;
    Ok(Json(quest))
}

async fn delete_quest(
    State(app): State<Arc<App>>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    app.use_cases
        .quests
        .delete(QuestId::from_uuid(id), user_id)
        .await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

#[derive(serde::Deserialize)]
struct CompleteQuestBody {
    completed: bool,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct CompleteQuestResponse {
    quest: Quest,
    unlocked_achievements: Vec<String>,
}

async fn complete_quest(
    State(app): State<Arc<App>>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<CompleteQuestBody>,
) -> Result<Json<CompleteQuestResponse>, ApiError> {
    let result = app
        .use_cases
        .quests
        .complete(QuestId::from_uuid(id), user_id, body.completed)
        .await?;
    Ok(Json(CompleteQuestResponse {
        quest: result.quest,
        unlocked_achievements: result.unlocked_achievements,
    }))
}

// =============================================================================
// Habits
// =============================================================================

async fn list_habits(
    State(app): State<Arc<App>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<Habit>>, ApiError> {
    let habits = app.use_cases.habits.list(user_id).await?;
    Ok(Json(habits))
}

async fn create_habit(
    State(app): State<Arc<App>>,
    AuthUser(user_id): AuthUser,
    Json(fields): Json<CreateHabit>,
) -> Result<Json<Habit>, ApiError> {
    let habit = app.use_cases.habits.create(user_id, fields).await?;
    Ok(Json(habit))
}

async fn update_habit(
    State(app): State<Arc<App>>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(fields): Json<UpdateHabit>,
) -> Result<Json<Habit>, ApiError> {
    let habit = app
        .use_cases
        .habits
        .update(HabitId::from_uuid(id), user_id, fields)
        .await?;
    Ok(Json(habit))
}

async fn delete_habit(
    State(app): State<Arc<App>>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    app.use_cases
        .habits
        .delete(HabitId::from_uuid(id), user_id)
        .await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct CompleteHabitResponse {
    habit: Habit,
    already_done_today: bool,
    unlocked_achievements: Vec<String>,
    status_effect: Option<StatusEffect>,
}

async fn complete_habit(
    State(app): State<Arc<App>>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<CompleteHabitResponse>, ApiError> {
    let result = app
        .use_cases
        .habits
        .complete(HabitId::from_uuid(id), user_id)
        .await?;
    Ok(Json(CompleteHabitResponse {
        habit: result.habit,
        already_done_today: result.already_done_today,
        unlocked_achievements: result.unlocked_achievements,
        status_effect: result.status_effect,
    }))
}

// =============================================================================
// Achievements
// =============================================================================

async fn list_achievements(
    State(app): State<Arc<App>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<Achievement>>, ApiError> {
    let achievements = app.use_cases.achievements.list(user_id).await?;
    Ok(Json(achievements))
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckAchievementsResponse {
    unlocked_achievements: Vec<String>,
}

async fn check_achievements(
    State(app): State<Arc<App>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<CheckAchievementsResponse>, ApiError> {
    let unlocked_achievements = app.use_cases.achievements.check(user_id).await?;
    Ok(Json(CheckAchievementsResponse {
        unlocked_achievements,
    }))
}

// =============================================================================
// Status Effects
// =============================================================================

async fn list_status_effects(
    State(app): State<Arc<App>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<StatusEffect>>, ApiError> {
    let effects = app.use_cases.status_effects.list_active(user_id).await?;
    Ok(Json(effects))
}

async fn apply_status_effect(
    State(app): State<Arc<App>>,
    AuthUser(user_id): AuthUser,
    Json(fields): Json<ApplyStatusEffect>,
) -> Result<Json<StatusEffect>, ApiError> {
    let effect = app
        .use_cases
        .status_effects
        .apply(user_id, fields)
        .await?;
    Ok(Json(effect))
}

async fn remove_status_effect(
    State(app): State<Arc<App>>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    app.use_cases
        .status_effects
        .remove(StatusEffectId::from_uuid(id), user_id)
        .await?;
    Ok(Json(serde_json::json!({ "removed": true })))
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    Unauthorized,
    NotFound,
    BadRequest(String),
    Internal(String),
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::Unauthorized => {
                (axum::http::StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
            }
            ApiError::NotFound => {
                (axum::http::StatusCode::NOT_FOUND, "Not found").into_response()
            }
            ApiError::BadRequest(msg) => {
                (axum::http::StatusCode::BAD_REQUEST, msg).into_response()
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "request failed");
                (
                    axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal error",
                )
                    .into_response()
            }
        }
    }
}

impl From<AccountError> for ApiError {
    fn from(e: AccountError) -> Self {
        match e {
            AccountError::Validation(msg) => ApiError::BadRequest(msg),
            AccountError::Auth(AuthError::Unauthorized) => ApiError::Unauthorized,
            AccountError::Auth(AuthError::UsernameTaken(name)) => {
                ApiError::BadRequest(format!("Username already taken: {}", name))
            }
            AccountError::Auth(other) => ApiError::Internal(other.to_string()),
            AccountError::Repo(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<ProgressionError> for ApiError {
    fn from(e: ProgressionError) -> Self {
        match e {
            ProgressionError::StatsNotFound(_) => ApiError::NotFound,
            ProgressionError::Repo(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<QuestError> for ApiError {
    fn from(e: QuestError) -> Self {
        match e {
            QuestError::NotFound(_) => ApiError::NotFound,
            QuestError::Validation(msg) => ApiError::BadRequest(msg),
            QuestError::Progression(e) => e.into(),
            QuestError::Achievements(e) => e.into(),
            QuestError::Repo(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<HabitError> for ApiError {
    fn from(e: HabitError) -> Self {
        match e {
            HabitError::NotFound(_) => ApiError::NotFound,
            HabitError::Validation(msg) => ApiError::BadRequest(msg),
            HabitError::Progression(e) => e.into(),
            HabitError::Achievements(e) => e.into(),
            HabitError::StatusEffects(e) => e.into(),
            HabitError::Repo(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<AchievementError> for ApiError {
    fn from(e: AchievementError) -> Self {
        match e {
            AchievementError::Repo(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<StatusEffectError> for ApiError {
    fn from(e: StatusEffectError) -> Self {
        match e {
            StatusEffectError::NotFound(_) => ApiError::NotFound,
            StatusEffectError::Validation(msg) => ApiError::BadRequest(msg),
            StatusEffectError::Repo(e) => ApiError::Internal(e.to_string()),
        }
    }
}

use axum::{extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::auth::{AuthUser, MaybeUser};
use crate::constants::SESSION_USER_KEY;
use crate::db::users;
use crate::error::{AppError, Result};
use crate::models::CurrentUser;
use crate::routes::{ApiMessage, AppJson};
use crate::security::{hash_password, validate_password, verify_password};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub status: &'static str,
    pub message: String,
    pub user: CurrentUser,
}

#[derive(Debug, Serialize)]
pub struct SessionStatusResponse {
    pub status: &'static str,
    pub loggedin: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<CurrentUser>,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Log in with username and password, establishing the session.
///
/// Attempts are rate-limited per username so one account cannot be brute
/// forced; the session id is cycled on success to prevent fixation.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let username = payload.username.trim();
    if username.is_empty() || payload.password.is_empty() {
        return Err(AppError::InvalidInput(
            "Invalid input. Username and password are required.".to_string(),
        ));
    }

    state
        .login_limiter
        .check_and_increment(username, Utc::now().timestamp())?;

    let credentials = users::find_credentials_by_username(&state.pool, username)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !verify_password(&payload.password, &credentials.password_hash)? {
        tracing::warn!("Failed login attempt for {}", username);
        return Err(AppError::InvalidCredentials);
    }

    let user = CurrentUser {
        id: credentials.id,
        username: credentials.username,
        role: credentials.role,
    };

    session.cycle_id().await?;
    session.insert(SESSION_USER_KEY, user.clone()).await?;

    tracing::info!("User {} logged in", user.username);

    Ok(Json(LoginResponse {
        status: "success",
        message: "Login successful.".to_string(),
        user,
    }))
}

/// Destroy the session
pub async fn logout(session: Session) -> Result<Json<ApiMessage>> {
    session.flush().await?;
    Ok(Json(ApiMessage::success("Logged out successfully.")))
}

/// Report whether the caller holds a live session, and for whom
pub async fn session_status(MaybeUser(user): MaybeUser) -> Json<SessionStatusResponse> {
    Json(SessionStatusResponse {
        status: "success",
        loggedin: user.is_some(),
        user,
    })
}

/// Change the caller's own password after re-verifying the current one
pub async fn change_password(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    AppJson(payload): AppJson<ChangePasswordRequest>,
) -> Result<Json<ApiMessage>> {
    validate_password(&payload.new_password)?;

    let stored_hash = users::get_password_hash(&state.pool, user.id)
        .await?
        .ok_or(AppError::Unauthenticated)?;

    if !verify_password(&payload.current_password, &stored_hash)? {
        return Err(AppError::IncorrectPassword);
    }

    let new_hash = hash_password(&payload.new_password)?;
    users::update_password_hash(&state.pool, user.id, &new_hash).await?;

    tracing::info!("User {} changed their password", user.username);

    Ok(Json(ApiMessage::success("Password changed successfully.")))
}

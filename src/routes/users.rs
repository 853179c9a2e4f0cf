use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use crate::auth::Executive;
use crate::db::users;
use crate::error::{AppError, Result};
use crate::models::{Role, User};
use crate::routes::{ApiData, ApiMessage, AppJson};
use crate::security::{hash_password, validate_password};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteUserRequest {
    pub id: i64,
}

/// List all accounts, credentials omitted. Executive only.
pub async fn list_users(
    State(state): State<AppState>,
    Executive(_user): Executive,
) -> Result<Json<ApiData<Vec<User>>>> {
    let data = users::list(&state.pool).await?;
    Ok(Json(ApiData::success(data)))
}

/// Register a new employee account. Executive only; 409 on a taken username.
pub async fn register_user(
    State(state): State<AppState>,
    Executive(current): Executive,
    AppJson(payload): AppJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiMessage>)> {
    if !User::validate_username(&payload.username) {
        return Err(AppError::InvalidInput(
            "Username cannot be empty.".to_string(),
        ));
    }
    validate_password(&payload.password)?;

    let hash = hash_password(&payload.password)?;
    users::create(&state.pool, payload.username.trim(), &hash, Role::Employee).await?;

    tracing::info!(
        "Executive {} registered user {}",
        current.username,
        payload.username.trim()
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiMessage::success("User registered successfully.")),
    ))
}

/// Delete an account. Executive only; self-deletion is blocked outright.
pub async fn delete_user(
    State(state): State<AppState>,
    Executive(current): Executive,
    AppJson(payload): AppJson<DeleteUserRequest>,
) -> Result<Json<ApiMessage>> {
    if payload.id == current.id {
        return Err(AppError::SelfDelete);
    }

    let removed = users::delete(&state.pool, payload.id).await?;
    if removed == 0 {
        return Err(AppError::NotFound("User"));
    }

    tracing::info!("Executive {} deleted user {}", current.username, payload.id);

    Ok(Json(ApiMessage::success(
        "User and all associated data deleted successfully.",
    )))
}

//! Session-based authentication extractors.
//!
//! Every protected operation declares its required capability by taking one of
//! these extractors; the check runs before any other validation. Missing
//! session yields 401, insufficient role yields 403.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use crate::constants::SESSION_USER_KEY;
use crate::error::AppError;
use crate::models::CurrentUser;

/// Extractor that requires a logged-in user
///
/// ```rust,ignore
/// async fn handler(AuthUser(user): AuthUser) -> impl IntoResponse {
///     format!("Hello, {}!", user.username)
/// }
/// ```
pub struct AuthUser(pub CurrentUser);

/// Extractor that requires a logged-in executive
pub struct Executive(pub CurrentUser);

/// Extractor that optionally reads the current user without rejecting
pub struct MaybeUser(pub Option<CurrentUser>);

async fn current_user(parts: &mut Parts) -> Option<CurrentUser> {
    // The session is placed in request extensions by SessionManagerLayer
    let session = parts.extensions.get::<Session>()?;
    session
        .get::<CurrentUser>(SESSION_USER_KEY)
        .await
        .ok()
        .flatten()
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = current_user(parts)
            .await
            .ok_or(AppError::Unauthenticated)?;
        Ok(Self(user))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Executive
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = current_user(parts)
            .await
            .ok_or(AppError::Unauthenticated)?;
        if !user.is_executive() {
            tracing::warn!("Non-executive {} hit an executive endpoint", user.username);
            return Err(AppError::Forbidden(
                "You do not have permission to perform this action.".to_string(),
            ));
        }
        Ok(Self(user))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(current_user(parts).await))
    }
}

pub mod auth;
pub mod health;
pub mod inventory;
pub mod products;
pub mod reports;
pub mod sales;
pub mod users;

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::AppError;

pub use auth::{change_password, login, logout, session_status};
pub use health::health_check;
pub use inventory::{get_inventory, post_inventory};
pub use products::{add_product, delete_product, list_products, update_product};
pub use reports::{executive_report, summary};
pub use sales::record_sale;
pub use users::{delete_user, list_users, register_user};

/// JSON body extractor whose rejection carries the standard error envelope.
/// A missing or malformed body is a 400, not axum's plain-text 422.
pub struct AppJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| AppError::InvalidInput(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// Standard success envelope carrying a human-readable message
#[derive(Debug, Serialize)]
pub struct ApiMessage {
    pub status: &'static str,
    pub message: String,
}

impl ApiMessage {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "success",
            message: message.into(),
        }
    }
}

/// Standard success envelope carrying a data payload
#[derive(Debug, Serialize)]
pub struct ApiData<T> {
    pub status: &'static str,
    pub data: T,
}

impl<T: Serialize> ApiData<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success",
            data,
        }
    }
}

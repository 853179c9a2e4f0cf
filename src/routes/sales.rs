use axum::{extract::State, Json};

use crate::auth::AuthUser;
use crate::constants::ERR_NON_POSITIVE_QUANTITY;
use crate::db::sales;
use crate::error::{AppError, Result};
use crate::models::NewSale;
use crate::routes::{ApiMessage, AppJson};
use crate::AppState;

/// Record a sale for the calling user.
///
/// The heavy lifting (atomic stock decrement plus sale append) lives in
/// [`crate::db::sales::record_sale`]; insufficient stock surfaces as a 400
/// with both tables untouched.
pub async fn record_sale(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    AppJson(payload): AppJson<NewSale>,
) -> Result<Json<ApiMessage>> {
    if payload.quantity_sold <= 0 {
        return Err(AppError::InvalidInput(ERR_NON_POSITIVE_QUANTITY.to_string()));
    }
    if payload.unit_price < 0.0 {
        return Err(AppError::InvalidInput(
            "Unit price cannot be negative.".to_string(),
        ));
    }

    sales::record_sale(&state.pool, user.id, &payload).await?;

    tracing::info!(
        "User {} sold {} of product {} at {}",
        user.username,
        payload.quantity_sold,
        payload.tea_product_id,
        payload.unit_price
    );

    Ok(Json(ApiMessage::success("Sale recorded successfully.")))
}

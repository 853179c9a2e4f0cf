use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::constants::ERR_NON_POSITIVE_QUANTITY;
use crate::db::inventory;
use crate::error::{AppError, Result};
use crate::models::{InventoryRow, PurchaseEntry};
use crate::routes::{ApiData, ApiMessage, AppJson};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct DateParam {
    pub date: Option<NaiveDate>,
}

impl DateParam {
    /// The requested market date, defaulting to today
    pub fn resolve(&self) -> NaiveDate {
        self.date
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

/// Fetch the inventory ledger for a date. Employees see their own rows,
/// executives see everyone's.
pub async fn get_inventory(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(params): Query<DateParam>,
) -> Result<Json<ApiData<Vec<InventoryRow>>>> {
    let user_filter = if user.is_executive() {
        None
    } else {
        Some(user.id)
    };
    let rows = inventory::list_for_date(&state.pool, params.resolve(), user_filter).await?;
    Ok(Json(ApiData::success(rows)))
}

/// Record (or re-base) a day's purchase for the calling user
pub async fn post_inventory(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    AppJson(payload): AppJson<PurchaseEntry>,
) -> Result<Json<ApiMessage>> {
    if payload.quantity_purchased <= 0 {
        return Err(AppError::InvalidInput(ERR_NON_POSITIVE_QUANTITY.to_string()));
    }

    inventory::upsert_purchase(&state.pool, user.id, &payload).await?;

    Ok(Json(ApiMessage::success("Inventory updated successfully.")))
}

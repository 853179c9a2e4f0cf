use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::constants::ERR_NO_UPDATE_FIELDS;
use crate::db::products;
use crate::error::{AppError, Result};
use crate::models::{NewProduct, ProductPatch, TeaProduct};
use crate::routes::{ApiData, ApiMessage, AppJson};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateProductParams {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct DeleteProductRequest {
    pub id: i64,
}

/// List the active catalog. The catalog is global; any authenticated user
/// sees (and may edit) it.
pub async fn list_products(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
) -> Result<Json<ApiData<Vec<TeaProduct>>>> {
    let data = products::list_active(&state.pool).await?;
    Ok(Json(ApiData::success(data)))
}

/// Add a catalog entry
pub async fn add_product(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    AppJson(payload): AppJson<NewProduct>,
) -> Result<(StatusCode, Json<ApiMessage>)> {
    payload
        .validate()
        .map_err(|m| AppError::InvalidInput(m.to_string()))?;

    products::create(&state.pool, &payload).await?;

    tracing::info!("User {} added product {}", user.username, payload.name);

    Ok((
        StatusCode::CREATED,
        Json(ApiMessage::success("Tea product added successfully.")),
    ))
}

/// Apply a partial update to a catalog entry. Only supplied fields change.
/// An unknown id (or identical data) still reports success with a
/// "no changes" message.
pub async fn update_product(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    Query(params): Query<UpdateProductParams>,
    AppJson(patch): AppJson<ProductPatch>,
) -> Result<Json<ApiMessage>> {
    if patch.is_empty() {
        return Err(AppError::InvalidInput(ERR_NO_UPDATE_FIELDS.to_string()));
    }
    if patch.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Err(AppError::InvalidInput(
            "Product name cannot be empty.".to_string(),
        ));
    }
    if patch.vendor_cost.is_some_and(|c| c < 0.0)
        || patch.selling_price.is_some_and(|p| p < 0.0)
    {
        return Err(AppError::InvalidInput(
            "Costs and prices cannot be negative.".to_string(),
        ));
    }

    let changed = products::update(&state.pool, params.id, &patch).await?;

    let message = if changed > 0 {
        "Tea product updated successfully."
    } else {
        "No changes were made to the product."
    };
    Ok(Json(ApiMessage::success(message)))
}

/// Hard-delete a catalog entry
pub async fn delete_product(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    AppJson(payload): AppJson<DeleteProductRequest>,
) -> Result<Json<ApiMessage>> {
    products::delete(&state.pool, payload.id).await?;

    tracing::info!("User {} deleted product {}", user.username, payload.id);

    Ok(Json(ApiMessage::success(
        "The product has successfully been deleted.",
    )))
}

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;

use crate::auth::{AuthUser, Executive};
use crate::db::reports;
use crate::error::Result;
use crate::models::{DailySummary, ExecutiveReport};
use crate::routes::inventory::DateParam;
use crate::routes::ApiData;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct SummaryData {
    pub summary: DailySummary,
}

/// Daily summary for the caller (executives aggregate over all users)
pub async fn summary(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(params): Query<DateParam>,
) -> Result<Json<ApiData<SummaryData>>> {
    let user_filter = if user.is_executive() {
        None
    } else {
        Some(user.id)
    };
    let summary = reports::daily_summary(&state.pool, params.resolve(), user_filter).await?;
    Ok(Json(ApiData::success(SummaryData { summary })))
}

/// Executive dashboard: per-user breakdown plus grand totals for one date
pub async fn executive_report(
    State(state): State<AppState>,
    Executive(user): Executive,
    Query(params): Query<DateParam>,
) -> Result<Json<ApiData<ExecutiveReport>>> {
    let rows = reports::executive_breakdown(&state.pool, params.resolve(), user.id).await?;
    Ok(Json(ApiData::success(ExecutiveReport::from_rows(rows))))
}

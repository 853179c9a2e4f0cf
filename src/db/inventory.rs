use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::constants::ERR_REBASE_BELOW_SOLD;
use crate::db::products;
use crate::error::{AppError, Result};
use crate::models::{InventoryRow, PurchaseEntry};

/// Record a day's purchase for (product, user, date), inserting a fresh ledger
/// row or re-basing the existing one.
///
/// The update path adds the delta between the new and old purchased quantity
/// to quantity_remaining instead of overwriting it, so units already sold that
/// day stay deducted. Submitting the same quantity twice changes nothing.
pub async fn upsert_purchase(
    pool: &SqlitePool,
    user_id: i64,
    entry: &PurchaseEntry,
) -> Result<()> {
    let vendor_cost = products::vendor_cost(pool, entry.tea_product_id)
        .await?
        .ok_or(AppError::NotFound("Tea product"))?;

    let total_cost = entry.quantity_purchased as f64 * vendor_cost;

    sqlx::query(
        "INSERT INTO daily_inventory
            (tea_product_id, user_id, quantity_purchased, total_cost, quantity_remaining, market_date)
         VALUES (?1, ?2, ?3, ?4, ?3, ?5)
         ON CONFLICT (tea_product_id, user_id, market_date) DO UPDATE SET
            quantity_remaining = quantity_remaining + (excluded.quantity_purchased - quantity_purchased),
            total_cost = excluded.total_cost,
            quantity_purchased = excluded.quantity_purchased",
    )
    .bind(entry.tea_product_id)
    .bind(user_id)
    .bind(entry.quantity_purchased)
    .bind(total_cost)
    .bind(entry.market_date)
    .execute(pool)
    .await
    .map_err(|e| match e.as_database_error() {
        // Re-basing below the quantity already sold trips the
        // quantity_remaining >= 0 check
        Some(dbe) if dbe.is_check_violation() => {
            AppError::InvalidInput(ERR_REBASE_BELOW_SOLD.to_string())
        }
        _ => AppError::Database(e),
    })?;

    Ok(())
}

/// Ledger rows for one market date. `user_filter` scopes employees to their
/// own rows; executives pass None and see everyone's.
pub async fn list_for_date(
    pool: &SqlitePool,
    date: NaiveDate,
    user_filter: Option<i64>,
) -> Result<Vec<InventoryRow>> {
    let rows = match user_filter {
        Some(user_id) => {
            sqlx::query_as::<_, InventoryRow>(
                "SELECT id, tea_product_id, user_id, market_date,
                        quantity_purchased, total_cost, quantity_remaining
                 FROM daily_inventory WHERE market_date = ? AND user_id = ?",
            )
            .bind(date)
            .bind(user_id)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, InventoryRow>(
                "SELECT id, tea_product_id, user_id, market_date,
                        quantity_purchased, total_cost, quantity_remaining
                 FROM daily_inventory WHERE market_date = ?",
            )
            .bind(date)
            .fetch_all(pool)
            .await?
        }
    };
    Ok(rows)
}

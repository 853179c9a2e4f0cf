use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::{DailySummary, UserBreakdownRow};

/// Single-day totals. `user_filter` scopes employees to their own activity;
/// executives pass None and aggregate over everyone.
///
/// Inventory cost is derived from the current vendor cost via the catalog
/// join; every aggregate coalesces to 0 so zero-activity days report zeros
/// rather than nulls.
pub async fn daily_summary(
    pool: &SqlitePool,
    date: NaiveDate,
    user_filter: Option<i64>,
) -> Result<DailySummary> {
    let (total_inventory_cost, (total_revenue, total_units_sold)) = match user_filter {
        Some(user_id) => {
            let cost = sqlx::query_scalar::<_, f64>(
                "SELECT CAST(COALESCE(SUM(i.quantity_purchased * p.vendor_cost), 0) AS REAL)
                 FROM daily_inventory i
                 JOIN tea_products p ON i.tea_product_id = p.id
                 WHERE i.market_date = ? AND i.user_id = ?",
            )
            .bind(date)
            .bind(user_id)
            .fetch_one(pool)
            .await?;
            let revenue = sqlx::query_as::<_, (f64, i64)>(
                "SELECT CAST(COALESCE(SUM(unit_price * quantity_sold), 0) AS REAL),
                        COALESCE(SUM(quantity_sold), 0)
                 FROM sales WHERE market_date = ? AND user_id = ?",
            )
            .bind(date)
            .bind(user_id)
            .fetch_one(pool)
            .await?;
            (cost, revenue)
        }
        None => {
            let cost = sqlx::query_scalar::<_, f64>(
                "SELECT CAST(COALESCE(SUM(i.quantity_purchased * p.vendor_cost), 0) AS REAL)
                 FROM daily_inventory i
                 JOIN tea_products p ON i.tea_product_id = p.id
                 WHERE i.market_date = ?",
            )
            .bind(date)
            .fetch_one(pool)
            .await?;
            let revenue = sqlx::query_as::<_, (f64, i64)>(
                "SELECT CAST(COALESCE(SUM(unit_price * quantity_sold), 0) AS REAL),
                        COALESCE(SUM(quantity_sold), 0)
                 FROM sales WHERE market_date = ?",
            )
            .bind(date)
            .fetch_one(pool)
            .await?;
            (cost, revenue)
        }
    };

    Ok(DailySummary::new(
        total_inventory_cost,
        total_revenue,
        total_units_sold,
    ))
}

/// Per-user rows for the executive dashboard: every employee (plus the
/// requesting executive) left-joined against that day's inventory and sales
/// aggregates, so inactive users appear with zeroed totals.
pub async fn executive_breakdown(
    pool: &SqlitePool,
    date: NaiveDate,
    current_user_id: i64,
) -> Result<Vec<UserBreakdownRow>> {
    let rows = sqlx::query_as::<_, UserBreakdownRow>(
        "SELECT
            u.id,
            u.username,
            COALESCE(inv.total_units_purchased, 0) AS total_units_purchased,
            CAST(COALESCE(inv.total_inventory_cost, 0) AS REAL) AS total_inventory_cost,
            COALESCE(sal.total_units_sold, 0) AS total_units_sold,
            CAST(COALESCE(sal.total_revenue, 0) AS REAL) AS total_revenue,
            CAST(COALESCE(sal.total_revenue, 0) - COALESCE(inv.total_inventory_cost, 0) AS REAL) AS profit
         FROM users u
         LEFT JOIN (
            SELECT di.user_id,
                   SUM(di.quantity_purchased) AS total_units_purchased,
                   SUM(di.quantity_purchased * tp.vendor_cost) AS total_inventory_cost
            FROM daily_inventory di
            JOIN tea_products tp ON di.tea_product_id = tp.id
            WHERE di.market_date = ?1
            GROUP BY di.user_id
         ) AS inv ON u.id = inv.user_id
         LEFT JOIN (
            SELECT s.user_id,
                   SUM(s.quantity_sold) AS total_units_sold,
                   SUM(s.unit_price * s.quantity_sold) AS total_revenue
            FROM sales s
            WHERE s.market_date = ?1
            GROUP BY s.user_id
         ) AS sal ON u.id = sal.user_id
         WHERE u.role = 'employee' OR u.id = ?2
         ORDER BY u.username",
    )
    .bind(date)
    .bind(current_user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

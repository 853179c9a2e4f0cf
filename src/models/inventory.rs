use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Ledger row: one product, one user, one market day
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct InventoryRow {
    pub id: i64,
    pub tea_product_id: i64,
    pub user_id: i64,
    pub market_date: NaiveDate,
    pub quantity_purchased: i64,
    pub total_cost: f64,
    pub quantity_remaining: i64,
}

/// Payload for recording (or re-basing) a day's purchase
#[derive(Debug, Deserialize)]
pub struct PurchaseEntry {
    pub tea_product_id: i64,
    pub quantity_purchased: i64,
    pub market_date: NaiveDate,
}

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Append-only sale record. Immutable once written; unit_cost snapshots the
/// vendor cost at sale time.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Sale {
    pub id: i64,
    pub tea_product_id: i64,
    pub user_id: i64,
    pub quantity_sold: i64,
    pub unit_price: f64,
    pub total_revenue: f64,
    pub unit_cost: f64,
    pub market_date: NaiveDate,
    pub created_at: NaiveDateTime,
}

/// Payload for recording a sale. unit_price is seller-entered and may differ
/// from the catalog selling price (discounting).
#[derive(Debug, Deserialize)]
pub struct NewSale {
    pub tea_product_id: i64,
    pub quantity_sold: i64,
    pub unit_price: f64,
    pub market_date: NaiveDate,
}

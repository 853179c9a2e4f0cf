use sqlx::SqlitePool;

use crate::db::products;
use crate::error::{AppError, Result};
use crate::models::NewSale;

/// Record a sale atomically across the inventory ledger and the sales table.
///
/// Everything runs inside one transaction:
/// 1. the vendor cost is snapshotted (missing product aborts),
/// 2. the ledger row is decremented with the stock check folded into the same
///    statement (`AND quantity_remaining >= ?`), so there is no window between
///    checking stock and taking it,
/// 3. the sale row is appended.
///
/// If the conditional decrement touches no row the whole transaction rolls
/// back and the caller sees an insufficient-stock error; no partial state is
/// ever observable.
pub async fn record_sale(pool: &SqlitePool, user_id: i64, sale: &NewSale) -> Result<()> {
    let mut tx = pool.begin().await?;

    let unit_cost = products::vendor_cost(&mut *tx, sale.tea_product_id)
        .await?
        .ok_or(AppError::NotFound("Tea product"))?;

    // The seller-entered unit price stands, not the catalog price; discounts
    // are allowed.
    let total_revenue = sale.quantity_sold as f64 * sale.unit_price;

    let updated = sqlx::query(
        "UPDATE daily_inventory
         SET quantity_remaining = quantity_remaining - ?1
         WHERE tea_product_id = ?2 AND user_id = ?3 AND market_date = ?4
           AND quantity_remaining >= ?1",
    )
    .bind(sale.quantity_sold)
    .bind(sale.tea_product_id)
    .bind(user_id)
    .bind(sale.market_date)
    .execute(&mut *tx)
    .await?;

    if updated.rows_affected() == 0 {
        // Dropping the transaction rolls it back
        return Err(AppError::InsufficientStock);
    }

    sqlx::query(
        "INSERT INTO sales
            (tea_product_id, user_id, quantity_sold, unit_price, total_revenue, unit_cost, market_date)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(sale.tea_product_id)
    .bind(user_id)
    .bind(sale.quantity_sold)
    .bind(sale.unit_price)
    .bind(total_revenue)
    .bind(unit_cost)
    .bind(sale.market_date)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{inventory, test_pool, users};
    use crate::models::{NewProduct, PurchaseEntry, Role, Sale};
    use chrono::NaiveDate;

    async fn setup(pool: &SqlitePool) -> (i64, i64) {
        let user_id = users::create(pool, "emp_user", "h", Role::Employee)
            .await
            .unwrap();
        let product_id = crate::db::products::create(
            pool,
            &NewProduct {
                name: "Sencha".to_string(),
                description: None,
                vendor_cost: 2.0,
                selling_price: 5.0,
            },
        )
        .await
        .unwrap();
        inventory::upsert_purchase(
            pool,
            user_id,
            &PurchaseEntry {
                tea_product_id: product_id,
                quantity_purchased: 10,
                market_date: date(),
            },
        )
        .await
        .unwrap();
        (user_id, product_id)
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn sale_of(product_id: i64, quantity: i64, unit_price: f64) -> NewSale {
        NewSale {
            tea_product_id: product_id,
            quantity_sold: quantity,
            unit_price,
            market_date: date(),
        }
    }

    async fn remaining(pool: &SqlitePool, user_id: i64) -> i64 {
        sqlx::query_scalar("SELECT quantity_remaining FROM daily_inventory WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    async fn sales_rows(pool: &SqlitePool) -> Vec<Sale> {
        sqlx::query_as("SELECT * FROM sales ORDER BY id")
            .fetch_all(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_successful_sale_decrements_and_appends() {
        let pool = test_pool().await;
        let (user_id, product_id) = setup(&pool).await;

        record_sale(&pool, user_id, &sale_of(product_id, 3, 5.0))
            .await
            .unwrap();

        assert_eq!(remaining(&pool, user_id).await, 7);

        let sales = sales_rows(&pool).await;
        assert_eq!(sales.len(), 1);
        assert_eq!(sales[0].quantity_sold, 3);
        assert_eq!(sales[0].total_revenue, 15.0);
        assert_eq!(sales[0].unit_cost, 2.0);
    }

    #[tokio::test]
    async fn test_overselling_leaves_both_tables_unchanged() {
        let pool = test_pool().await;
        let (user_id, product_id) = setup(&pool).await;

        record_sale(&pool, user_id, &sale_of(product_id, 3, 5.0))
            .await
            .unwrap();

        // 7 remain; selling 8 must fail without touching either table
        let err = record_sale(&pool, user_id, &sale_of(product_id, 8, 5.0))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InsufficientStock));

        assert_eq!(remaining(&pool, user_id).await, 7);
        assert_eq!(sales_rows(&pool).await.len(), 1);
    }

    #[tokio::test]
    async fn test_exact_stock_sells_out() {
        let pool = test_pool().await;
        let (user_id, product_id) = setup(&pool).await;

        record_sale(&pool, user_id, &sale_of(product_id, 10, 5.0))
            .await
            .unwrap();
        assert_eq!(remaining(&pool, user_id).await, 0);

        let err = record_sale(&pool, user_id, &sale_of(product_id, 1, 5.0))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InsufficientStock));
    }

    #[tokio::test]
    async fn test_discounted_price_drives_revenue() {
        let pool = test_pool().await;
        let (user_id, product_id) = setup(&pool).await;

        record_sale(&pool, user_id, &sale_of(product_id, 2, 3.5))
            .await
            .unwrap();

        let sales = sales_rows(&pool).await;
        assert_eq!(sales[0].unit_price, 3.5);
        assert_eq!(sales[0].total_revenue, 7.0);
    }

    #[tokio::test]
    async fn test_unknown_product_is_not_found() {
        let pool = test_pool().await;
        let (user_id, _) = setup(&pool).await;

        let err = record_sale(&pool, user_id, &sale_of(999, 1, 5.0))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(sales_rows(&pool).await.is_empty());
    }

    #[tokio::test]
    async fn test_no_ledger_row_for_date_is_insufficient_stock() {
        let pool = test_pool().await;
        let (user_id, product_id) = setup(&pool).await;

        let other_day = NewSale {
            market_date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            ..sale_of(product_id, 1, 5.0)
        };
        let err = record_sale(&pool, user_id, &other_day).await.unwrap_err();
        assert!(matches!(err, AppError::InsufficientStock));
    }

    #[tokio::test]
    async fn test_sales_are_scoped_per_user() {
        let pool = test_pool().await;
        let (user_id, product_id) = setup(&pool).await;
        let other_id = users::create(&pool, "emp_other", "h", Role::Employee)
            .await
            .unwrap();

        // The other user has no ledger row, so they cannot sell this stock
        let err = record_sale(&pool, other_id, &sale_of(product_id, 1, 5.0))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InsufficientStock));
        assert_eq!(remaining(&pool, user_id).await, 10);
    }
}

use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::error::Result;
use crate::models::{NewProduct, ProductPatch, TeaProduct};

/// List the active catalog
pub async fn list_active(pool: &SqlitePool) -> Result<Vec<TeaProduct>> {
    let products = sqlx::query_as::<_, TeaProduct>(
        "SELECT id, name, description, vendor_cost, selling_price, is_active
         FROM tea_products WHERE is_active = 1 ORDER BY name",
    )
    .fetch_all(pool)
    .await?;
    Ok(products)
}

/// Insert a new catalog entry
pub async fn create(pool: &SqlitePool, product: &NewProduct) -> Result<i64> {
    let result = sqlx::query(
        "INSERT INTO tea_products (name, description, vendor_cost, selling_price)
         VALUES (?, ?, ?, ?)",
    )
    .bind(product.name.trim())
    .bind(product.description.as_deref().unwrap_or("").trim())
    .bind(product.vendor_cost)
    .bind(product.selling_price)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Current vendor cost for a product, if it exists. Generic over the executor
/// so the sales path can call it inside its transaction.
pub async fn vendor_cost<'e, E>(executor: E, product_id: i64) -> Result<Option<f64>>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let cost = sqlx::query_scalar::<_, f64>("SELECT vendor_cost FROM tea_products WHERE id = ?")
        .bind(product_id)
        .fetch_optional(executor)
        .await?;
    Ok(cost)
}

/// Apply a partial update: only supplied fields are written. The caller is
/// responsible for rejecting an empty patch. Returns the number of rows
/// changed; zero means the id did not exist (or nothing differed).
pub async fn update(pool: &SqlitePool, product_id: i64, patch: &ProductPatch) -> Result<u64> {
    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE tea_products SET ");
    let mut fields = builder.separated(", ");

    if let Some(name) = &patch.name {
        fields.push("name = ").push_bind_unseparated(name.trim());
    }
    if let Some(description) = &patch.description {
        fields
            .push("description = ")
            .push_bind_unseparated(description.trim());
    }
    if let Some(vendor_cost) = patch.vendor_cost {
        fields
            .push("vendor_cost = ")
            .push_bind_unseparated(vendor_cost);
    }
    if let Some(selling_price) = patch.selling_price {
        fields
            .push("selling_price = ")
            .push_bind_unseparated(selling_price);
    }
    if let Some(is_active) = patch.is_active {
        fields
            .push("is_active = ")
            .push_bind_unseparated(is_active);
    }

    builder.push(" WHERE id = ").push_bind(product_id);

    let result = builder.build().execute(pool).await?;
    Ok(result.rows_affected())
}

/// Hard-delete a catalog entry
pub async fn delete(pool: &SqlitePool, product_id: i64) -> Result<u64> {
    let result = sqlx::query("DELETE FROM tea_products WHERE id = ?")
        .bind(product_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    fn sencha() -> NewProduct {
        NewProduct {
            name: "Sencha".to_string(),
            description: Some("Steamed green tea".to_string()),
            vendor_cost: 2.0,
            selling_price: 5.0,
        }
    }

    #[tokio::test]
    async fn test_create_and_list_active() {
        let pool = test_pool().await;

        let id = create(&pool, &sencha()).await.unwrap();
        let products = list_active(&pool).await.unwrap();

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, id);
        assert_eq!(products[0].vendor_cost, 2.0);
        assert!(products[0].is_active);
    }

    #[tokio::test]
    async fn test_deactivated_products_are_hidden() {
        let pool = test_pool().await;

        let id = create(&pool, &sencha()).await.unwrap();
        let patch = ProductPatch {
            is_active: Some(false),
            ..ProductPatch::default()
        };
        assert_eq!(update(&pool, id, &patch).await.unwrap(), 1);

        assert!(list_active(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_partial_update_leaves_other_fields() {
        let pool = test_pool().await;

        let id = create(&pool, &sencha()).await.unwrap();
        let patch = ProductPatch {
            selling_price: Some(6.5),
            ..ProductPatch::default()
        };
        update(&pool, id, &patch).await.unwrap();

        let products = list_active(&pool).await.unwrap();
        assert_eq!(products[0].selling_price, 6.5);
        assert_eq!(products[0].vendor_cost, 2.0);
        assert_eq!(products[0].name, "Sencha");
    }

    #[tokio::test]
    async fn test_update_unknown_id_changes_nothing() {
        let pool = test_pool().await;

        let patch = ProductPatch {
            name: Some("Ghost".to_string()),
            ..ProductPatch::default()
        };
        assert_eq!(update(&pool, 999, &patch).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_vendor_cost_lookup() {
        let pool = test_pool().await;

        let id = create(&pool, &sencha()).await.unwrap();
        assert_eq!(vendor_cost(&pool, id).await.unwrap(), Some(2.0));
        assert_eq!(vendor_cost(&pool, 999).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete() {
        let pool = test_pool().await;

        let id = create(&pool, &sencha()).await.unwrap();
        assert_eq!(delete(&pool, id).await.unwrap(), 1);
        assert_eq!(delete(&pool, id).await.unwrap(), 0);
    }
}

pub mod inventory;
pub mod pool;
pub mod products;
pub mod reports;
pub mod sales;
pub mod seed;
pub mod users;

pub use pool::create_pool;

/// Embedded migrations, also used by tests against in-memory databases
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

#[cfg(test)]
pub(crate) async fn test_pool() -> sqlx::SqlitePool {
    // A single connection keeps every test statement on the same in-memory
    // database.
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory database");
    MIGRATOR.run(&pool).await.expect("migrations");
    pool
}

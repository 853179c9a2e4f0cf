use sqlx::SqlitePool;

use crate::config::Config;
use crate::db::users;
use crate::error::Result;
use crate::models::Role;
use crate::security::hash_password;

/// Seed a bootstrap executive into an empty database so a fresh instance can
/// be logged into. Safe to call on every startup; an already-populated users
/// table is left alone.
pub async fn bootstrap_executive(pool: &SqlitePool, config: &Config) -> Result<()> {
    if users::count(pool).await? > 0 {
        return Ok(());
    }

    let hash = hash_password(&config.bootstrap_password)?;
    users::create(pool, &config.bootstrap_username, &hash, Role::Executive).await?;

    tracing::info!(
        "Seeded bootstrap executive account '{}'",
        config.bootstrap_username
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    fn test_config() -> Config {
        Config {
            server_host: "127.0.0.1".to_string(),
            server_port: 0,
            database_url: "sqlite::memory:".to_string(),
            allowed_origins: vec![],
            login_rate_limit_requests: 100,
            login_rate_limit_window_secs: 60,
            session_expiry_secs: 3600,
            environment: "test".to_string(),
            bootstrap_username: "exec_user".to_string(),
            bootstrap_password: "password123".to_string(),
        }
    }

    #[tokio::test]
    async fn test_seeds_empty_database_once() {
        let pool = test_pool().await;
        let config = test_config();

        bootstrap_executive(&pool, &config).await.unwrap();
        bootstrap_executive(&pool, &config).await.unwrap();

        let all = users::list(&pool).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].username, "exec_user");
        assert_eq!(all[0].role, Role::Executive);
    }

    #[tokio::test]
    async fn test_populated_database_is_untouched() {
        let pool = test_pool().await;
        users::create(&pool, "existing", "h", Role::Employee)
            .await
            .unwrap();

        bootstrap_executive(&pool, &test_config()).await.unwrap();

        let all = users::list(&pool).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].username, "existing");
    }
}

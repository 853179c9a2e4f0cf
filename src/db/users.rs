use sqlx::SqlitePool;

use crate::error::{AppError, Result};
use crate::models::{Role, User, UserCredentials};

/// Look up a user with their stored credential by username, for login
pub async fn find_credentials_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<UserCredentials>> {
    let user = sqlx::query_as::<_, UserCredentials>(
        "SELECT id, username, password_hash, role FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

/// Fetch the stored password hash for a user id
pub async fn get_password_hash(pool: &SqlitePool, user_id: i64) -> Result<Option<String>> {
    let hash = sqlx::query_scalar::<_, String>("SELECT password_hash FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(hash)
}

/// Replace a user's password hash
pub async fn update_password_hash(pool: &SqlitePool, user_id: i64, hash: &str) -> Result<()> {
    sqlx::query("UPDATE users SET password_hash = ? WHERE id = ?")
        .bind(hash)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// List all users, without credentials
pub async fn list(pool: &SqlitePool) -> Result<Vec<User>> {
    let users = sqlx::query_as::<_, User>(
        "SELECT id, username, role, created_at FROM users ORDER BY username",
    )
    .fetch_all(pool)
    .await?;
    Ok(users)
}

/// Create a user. A duplicate username is a conflict.
pub async fn create(
    pool: &SqlitePool,
    username: &str,
    password_hash: &str,
    role: Role,
) -> Result<i64> {
    let result = sqlx::query("INSERT INTO users (username, password_hash, role) VALUES (?, ?, ?)")
        .bind(username)
        .bind(password_hash)
        .bind(role)
        .execute(pool)
        .await
        .map_err(|e| match e.as_database_error() {
            Some(dbe) if dbe.is_unique_violation() => AppError::UsernameTaken,
            _ => AppError::Database(e),
        })?;
    Ok(result.last_insert_rowid())
}

/// Delete a user by id, returning how many rows were removed
pub async fn delete(pool: &SqlitePool, user_id: i64) -> Result<u64> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Count all user accounts
pub async fn count(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    #[tokio::test]
    async fn test_create_and_find() {
        let pool = test_pool().await;

        let id = create(&pool, "emp_user", "hash-a", Role::Employee)
            .await
            .unwrap();
        let found = find_credentials_by_username(&pool, "emp_user")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(found.id, id);
        assert_eq!(found.password_hash, "hash-a");
        assert_eq!(found.role, Role::Employee);

        assert!(find_credentials_by_username(&pool, "nobody")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_is_conflict() {
        let pool = test_pool().await;

        create(&pool, "emp_user", "hash-a", Role::Employee)
            .await
            .unwrap();
        let err = create(&pool, "emp_user", "hash-b", Role::Executive)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UsernameTaken));
    }

    #[tokio::test]
    async fn test_list_omits_credentials_and_orders_by_username() {
        let pool = test_pool().await;

        create(&pool, "zeta", "h", Role::Employee).await.unwrap();
        create(&pool, "alpha", "h", Role::Executive).await.unwrap();

        let users = list(&pool).await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].username, "alpha");
        assert_eq!(users[1].username, "zeta");
    }

    #[tokio::test]
    async fn test_password_hash_roundtrip() {
        let pool = test_pool().await;

        let id = create(&pool, "emp_user", "old-hash", Role::Employee)
            .await
            .unwrap();
        update_password_hash(&pool, id, "new-hash").await.unwrap();

        assert_eq!(
            get_password_hash(&pool, id).await.unwrap().as_deref(),
            Some("new-hash")
        );
    }

    #[tokio::test]
    async fn test_delete_reports_rows() {
        let pool = test_pool().await;

        let id = create(&pool, "emp_user", "h", Role::Employee).await.unwrap();
        assert_eq!(delete(&pool, id).await.unwrap(), 1);
        assert_eq!(delete(&pool, id).await.unwrap(), 0);
        assert_eq!(count(&pool).await.unwrap(), 0);
    }
}

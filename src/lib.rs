//! Tea Tracker Server Library
//!
//! This module exports the core types and functions for testing and reuse.

pub mod auth;
pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod security;

pub use config::Config;
pub use error::{AppError, Result};

use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use sqlx::SqlitePool;

use models::RateLimiter;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Config,
    pub login_limiter: Arc<RateLimiter>,
}

impl AppState {
    /// Create a new AppState with the given pool and configuration
    pub fn new(pool: SqlitePool, config: Config) -> Self {
        let login_limiter = Arc::new(RateLimiter::new(
            config.login_rate_limit_requests,
            config.login_rate_limit_window_secs,
        ));
        Self {
            pool,
            config,
            login_limiter,
        }
    }
}

/// Build the application router. Session and CORS layers are added by the
/// caller so tests can swap in their own session store.
pub fn router(state: AppState) -> Router {
    use routes::*;

    Router::new()
        .route("/health", get(health_check))
        .route("/api/login", post(login))
        .route("/api/logout", post(logout))
        .route("/api/session_status", get(session_status))
        .route("/api/change_password", post(change_password))
        .route("/api/products", get(list_products))
        .route("/api/add_product", post(add_product))
        .route("/api/update_product", post(update_product))
        .route("/api/delete_product", delete(delete_product))
        .route("/api/inventory", get(get_inventory).post(post_inventory))
        .route("/api/sales", post(record_sale))
        .route("/api/summary", get(summary))
        .route("/api/executive_report", get(executive_report))
        .route("/api/users", get(list_users))
        .route("/api/register", post(register_user))
        .route("/api/delete_user", delete(delete_user))
        .with_state(state)
}

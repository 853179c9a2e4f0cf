use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_url: String,
    pub allowed_origins: Vec<String>,
    pub login_rate_limit_requests: u64,
    pub login_rate_limit_window_secs: u64,
    pub session_expiry_secs: i64,
    pub environment: String,
    pub bootstrap_username: String,
    pub bootstrap_password: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if it exists (development)
        dotenvy::dotenv().ok();

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| "Invalid SERVER_PORT")?;

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://./data/tea_tracker.db".to_string());

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let login_rate_limit_requests = env::var("LOGIN_RATE_LIMIT_REQUESTS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .map_err(|_| "Invalid LOGIN_RATE_LIMIT_REQUESTS")?;

        let login_rate_limit_window_secs = env::var("LOGIN_RATE_LIMIT_WINDOW_SECS")
            .unwrap_or_else(|_| "60".to_string())
            .parse()
            .map_err(|_| "Invalid LOGIN_RATE_LIMIT_WINDOW_SECS")?;

        let session_expiry_secs = env::var("SESSION_EXPIRY_SECS")
            .unwrap_or_else(|_| "3600".to_string())
            .parse()
            .map_err(|_| "Invalid SESSION_EXPIRY_SECS")?;

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        // Credentials for the executive account seeded into an empty database.
        let bootstrap_username =
            env::var("BOOTSTRAP_USERNAME").unwrap_or_else(|_| "exec_user".to_string());
        let bootstrap_password = match env::var("BOOTSTRAP_PASSWORD") {
            Ok(p) => p,
            Err(_) if environment == "development" => "password123".to_string(),
            Err(_) => return Err("BOOTSTRAP_PASSWORD must be set outside development".to_string()),
        };

        Ok(Config {
            server_host,
            server_port,
            database_url,
            allowed_origins,
            login_rate_limit_requests,
            login_rate_limit_window_secs,
            session_expiry_secs,
            environment,
            bootstrap_username,
            bootstrap_password,
        })
    }

    /// Get server address as string
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

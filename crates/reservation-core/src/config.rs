//! Runtime configuration loaded from environment variables.
//!
//! Mirrors `tmf620_catalog::db::init_db`'s `std::env::var(..).expect(..)`
//! style for required values and `server::main`'s `unwrap_or_else` style for
//! everything with a documented default — no config-parsing crate.

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,

    pub db_max_connections: u32,
    pub db_idle_timeout_seconds: u64,
    pub db_connect_timeout_seconds: u64,
    pub db_statement_timeout_ms: u64,
    pub db_lock_timeout_ms: u64,
    pub db_max_connection_lifetime_seconds: u64,

    pub cache_ttl_ms: u64,
    pub cache_max_size: usize,

    pub maintenance_flag_ttl_ms: u64,

    /// When true (default), REJECTED rows are written inside the commit
    /// transaction. When false, they are persisted best-effort after commit.
    pub durable_rejections: bool,

    pub cors_origins: Vec<String>,
    pub api_key: Option<String>,
    pub admin_api_key: Option<String>,

    pub host: String,
    pub port: u16,
    pub shutdown_timeout_seconds: u64,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from the process environment. Panics if
    /// `DATABASE_URL` is unset — matching `tmf620_catalog::db::init_db`'s
    /// `expect("DATABASE_URL must be set")`.
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL must be set"),

            db_max_connections: env_parsed("DB_MAX_CONNECTIONS", 50),
            db_idle_timeout_seconds: env_parsed("DB_IDLE_TIMEOUT_SECONDS", 600),
            db_connect_timeout_seconds: env_parsed("DB_CONNECT_TIMEOUT_SECONDS", 10),
            db_statement_timeout_ms: env_parsed("DB_STATEMENT_TIMEOUT_MS", 30_000),
            db_lock_timeout_ms: env_parsed("DB_LOCK_TIMEOUT_MS", 10_000),
            db_max_connection_lifetime_seconds: env_parsed(
                "DB_MAX_CONNECTION_LIFETIME_SECONDS",
                1800,
            ),

            cache_ttl_ms: env_parsed("CACHE_TTL_MS", 3000),
            cache_max_size: env_parsed("CACHE_MAX_SIZE", 10_000),

            maintenance_flag_ttl_ms: env_parsed("MAINTENANCE_FLAG_TTL_MS", 2000),

            durable_rejections: env_parsed("DURABLE_REJECTIONS", true),

            cors_origins: env_or("CORS_ORIGINS", "*")
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            api_key: std::env::var("API_KEY").ok(),
            admin_api_key: std::env::var("ADMIN_API_KEY").ok(),

            host: env_or("HOST", "0.0.0.0"),
            port: env_parsed("PORT", 8080),
            shutdown_timeout_seconds: env_parsed("SHUTDOWN_TIMEOUT_SECONDS", 30),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_parsed_falls_back_on_missing_or_bad_value() {
        std::env::remove_var("RESERVATION_CORE_TEST_KEY");
        assert_eq!(env_parsed::<u32>("RESERVATION_CORE_TEST_KEY", 7), 7);

        std::env::set_var("RESERVATION_CORE_TEST_KEY", "not-a-number");
        assert_eq!(env_parsed::<u32>("RESERVATION_CORE_TEST_KEY", 7), 7);
        std::env::remove_var("RESERVATION_CORE_TEST_KEY");
    }
}

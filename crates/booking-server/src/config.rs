//! Server configuration from environment.

use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub database_path: String,
    pub database_max_connections: u32,
    pub database_busy_timeout_ms: u64,
    /// Insert the demo users, drones and bookings into an empty database.
    pub seed_demo: bool,
    /// Delete every stored record before serving.
    pub reset_on_start: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("BOOKING_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8000),
            database_path: env::var("BOOKING_DB_PATH")
                .unwrap_or_else(|_| "data/bookings.db".to_string()),
            database_max_connections: env::var("BOOKING_DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(5),
            database_busy_timeout_ms: env::var("BOOKING_DB_BUSY_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5_000),
            seed_demo: env_flag("BOOKING_SEED_DEMO"),
            reset_on_start: env_flag("BOOKING_RESET_ON_START"),
        }
    }

    pub fn database_busy_timeout(&self) -> Duration {
        Duration::from_millis(self.database_busy_timeout_ms)
    }
}

fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|value| parse_flag(&value))
        .unwrap_or(false)
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

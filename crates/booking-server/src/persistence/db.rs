//! Database connection and initialization.

use anyhow::Result;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Database connection wrapper.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Get the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Clear all persisted state (bookings, slots, drones, users).
pub async fn clear_all(pool: &SqlitePool) -> Result<()> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM bookings").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM booking_slots").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM drones").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM users").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM sqlite_sequence").execute(&mut *tx).await?;
    tx.commit().await?;
    info!("Cleared all persisted bookings, drones and users");
    Ok(())
}

/// Initialize the SQLite database.
///
/// Creates the database file if it doesn't exist, runs migrations,
/// and returns a connection pool.
pub async fn init_database(
    db_path: &str,
    max_connections: u32,
    busy_timeout: Duration,
) -> Result<Database> {
    // Ensure parent directory exists
    if let Some(parent) = Path::new(db_path).parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite:{}?mode=rwc", db_path);

    info!("Connecting to database: {}", db_path);

    let options = SqliteConnectOptions::from_str(&db_url)?
        .foreign_keys(true)
        .busy_timeout(busy_timeout);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;

    Ok(Database { pool })
}

/// Run database migrations.
async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    let migration_sql = include_str!("../../migrations/001_init.sql");

    info!("Running database migrations...");

    for statement in migration_sql.split(';') {
        // Remove comment lines and trim whitespace
        let statement: String = statement
            .lines()
            .filter(|line| !line.trim().starts_with("--"))
            .collect::<Vec<_>>()
            .join("\n");
        let statement = statement.trim();
        if statement.is_empty() {
            continue;
        }

        if let Err(e) = sqlx::query(statement).execute(pool).await {
            let err_str = e.to_string();
            // "already exists" is expected on re-runs
            if err_str.contains("already exists") {
                continue;
            }
            if statement.to_uppercase().starts_with("CREATE") {
                anyhow::bail!("Migration failed on CREATE statement: {}", e);
            }
            warn!("Migration statement failed: {}", e);
        }
    }

    info!("Database migrations complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_database() {
        let db = init_database(":memory:", 1, Duration::from_secs(1)).await.unwrap();

        for name in ["users", "drones", "bookings", "booking_slots"] {
            let result: (i32,) = sqlx::query_as(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
            )
            .bind(name)
            .fetch_one(db.pool())
            .await
            .unwrap();
            assert_eq!(result.0, 1, "missing table {name}");
        }

        let view: (i32,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='view' AND name='v_bookings'",
        )
        .fetch_one(db.pool())
        .await
        .unwrap();
        assert_eq!(view.0, 1);
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let db = init_database(":memory:", 1, Duration::from_secs(1)).await.unwrap();
        run_migrations(db.pool()).await.unwrap();
    }

    #[tokio::test]
    async fn clear_all_resets_ids() {
        let db = init_database(":memory:", 1, Duration::from_secs(1)).await.unwrap();
        sqlx::query("INSERT INTO users (name) VALUES ('Mickey Mouse')")
            .execute(db.pool())
            .await
            .unwrap();
        clear_all(db.pool()).await.unwrap();

        let id = sqlx::query("INSERT INTO users (name) VALUES ('Donald Duck')")
            .execute(db.pool())
            .await
            .unwrap()
            .last_insert_rowid();
        assert_eq!(id, 1);
    }
}

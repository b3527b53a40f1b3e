//! Demo data for a fresh database.

use anyhow::Result;
use sqlx::SqlitePool;
use tracing::info;

const USERS: &[(i64, &str, Option<&str>)] = &[
    (1, "Mickey Mouse", Some("mickey.mouse@example.com")),
    (2, "Donald Duck", Some("donald.duck@example.com")),
    (3, "Kermit the Frog", None),
];

const DRONES: &[(i64, &str, Option<&str>)] = &[
    (1, "Drone A", Some("South Street Seaport")),
    (2, "Drone B", Some("Hudson Yards")),
    (3, "Drone C", Some("UN Building")),
];

// (drone_id, user_id, booked_on, booked_from, booked_to)
const BOOKINGS: &[(i64, i64, &str, Option<&str>, Option<&str>)] = &[
    (1, 1, "2014-09-25", Some("09:00"), Some("10:00")),
    (3, 1, "2015-09-25", None, None),
    (2, 3, "2014-09-22", Some("12:00"), None),
    (1, 2, "2015-02-14", Some("09:30"), Some("10:00")),
];

/// Insert the demo users, drones and bookings. Does nothing if any user exists.
pub async fn seed_demo_data(pool: &SqlitePool) -> Result<()> {
    let (existing,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        info!("Database already has {} users, skipping demo seed", existing);
        return Ok(());
    }

    let mut tx = pool.begin().await?;

    for (id, name, email_address) in USERS {
        sqlx::query("INSERT INTO users (id, name, email_address) VALUES (?1, ?2, ?3)")
            .bind(id)
            .bind(name)
            .bind(email_address)
            .execute(&mut *tx)
            .await?;
    }

    for (id, name, location) in DRONES {
        sqlx::query("INSERT INTO drones (id, name, location) VALUES (?1, ?2, ?3)")
            .bind(id)
            .bind(name)
            .bind(location)
            .execute(&mut *tx)
            .await?;
    }

    for (drone_id, user_id, booked_on, booked_from, booked_to) in BOOKINGS {
        sqlx::query(
            r#"
            INSERT INTO bookings (drone_id, user_id, booked_on, booked_from, booked_to)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(drone_id)
        .bind(user_id)
        .bind(booked_on)
        .bind(booked_from)
        .bind(booked_to)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    info!(
        "Seeded {} users, {} drones, {} bookings",
        USERS.len(),
        DRONES.len(),
        BOOKINGS.len()
    );
    Ok(())
}

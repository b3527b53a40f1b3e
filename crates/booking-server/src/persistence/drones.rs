//! Drone persistence operations.

use booking_core::Drone;
use sqlx::SqliteExecutor;

/// Insert a drone and return it with its assigned id.
pub async fn insert_drone<'e, E>(
    executor: E,
    name: &str,
    location: Option<&str>,
) -> Result<Drone, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query("INSERT INTO drones (name, location) VALUES (?1, ?2)")
        .bind(name)
        .bind(location)
        .execute(executor)
        .await?;

    Ok(Drone {
        id: result.last_insert_rowid(),
        name: name.to_string(),
        location: location.map(str::to_string),
    })
}

pub async fn load_drone<'e, E>(executor: E, id: i64) -> Result<Option<Drone>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let row = sqlx::query_as::<_, DroneRow>("SELECT id, name, location FROM drones WHERE id = ?1")
        .bind(id)
        .fetch_optional(executor)
        .await?;

    Ok(row.map(Drone::from))
}

/// Load all drones in insertion order.
pub async fn load_all_drones<'e, E>(executor: E) -> Result<Vec<Drone>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let rows = sqlx::query_as::<_, DroneRow>("SELECT id, name, location FROM drones ORDER BY id")
        .fetch_all(executor)
        .await?;

    Ok(rows.into_iter().map(Drone::from).collect())
}

#[derive(sqlx::FromRow)]
struct DroneRow {
    id: i64,
    name: String,
    location: Option<String>,
}

impl From<DroneRow> for Drone {
    fn from(row: DroneRow) -> Self {
        Drone {
            id: row.id,
            name: row.name,
            location: row.location,
        }
    }
}

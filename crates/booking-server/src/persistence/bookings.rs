//! Booking persistence operations.
//!
//! Nothing here checks for overlaps. Callers that write bookings must go
//! through [`crate::state::Store::open_slot`], which serializes writers of the
//! same drone and date.

use booking_core::models::DATE_FORMAT;
use booking_core::{Booking, BookingFilter, BookingWindow, EnrichedBooking, TimeOfDay};
use chrono::NaiveDate;
use sqlx::SqliteExecutor;

use crate::error::{BookingError, BookingResult};

/// Take the write lock for a (drone, date) slot by bumping its revision.
///
/// Must be the first statement of the transaction so SQLite grants the
/// write lock before any existing windows are read.
pub async fn claim_slot<'e, E>(executor: E, drone_id: i64, booked_on: NaiveDate) -> BookingResult<()>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query(
        r#"
        INSERT INTO booking_slots (drone_id, booked_on, revision)
        VALUES (?1, ?2, 1)
        ON CONFLICT(drone_id, booked_on) DO UPDATE SET revision = revision + 1
        "#,
    )
    .bind(drone_id)
    .bind(format_date(booked_on))
    .execute(executor)
    .await?;

    Ok(())
}

/// Load the time windows of every booking for a drone on a date.
pub async fn load_windows<'e, E>(
    executor: E,
    drone_id: i64,
    booked_on: NaiveDate,
) -> BookingResult<Vec<BookingWindow>>
where
    E: SqliteExecutor<'e>,
{
    let rows = sqlx::query_as::<_, WindowRow>(
        r#"
        SELECT id, booked_from, booked_to
        FROM bookings
        WHERE drone_id = ?1 AND booked_on = ?2
        ORDER BY id
        "#,
    )
    .bind(drone_id)
    .bind(format_date(booked_on))
    .fetch_all(executor)
    .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
}

/// Insert a booking unconditionally.
pub async fn insert_booking<'e, E>(
    executor: E,
    user_id: i64,
    drone_id: i64,
    booked_on: NaiveDate,
    window: BookingWindow,
) -> BookingResult<Booking>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query(
        r#"
        INSERT INTO bookings (user_id, drone_id, booked_on, booked_from, booked_to)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(user_id)
    .bind(drone_id)
    .bind(format_date(booked_on))
    .bind(window.booked_from().map(|t| t.to_string()))
    .bind(window.booked_to().map(|t| t.to_string()))
    .execute(executor)
    .await?;

    Ok(Booking {
        id: result.last_insert_rowid(),
        user_id,
        drone_id,
        booked_on,
        booked_from: window.booked_from(),
        booked_to: window.booked_to(),
    })
}

/// Load bookings joined with user and drone names, in insertion order.
pub async fn load_bookings<'e, E>(
    executor: E,
    filter: BookingFilter,
) -> BookingResult<Vec<EnrichedBooking>>
where
    E: SqliteExecutor<'e>,
{
    let rows = sqlx::query_as::<_, EnrichedBookingRow>(
        r#"
        SELECT id, user_id, user_name, drone_id, drone_name, booked_on, booked_from, booked_to
        FROM v_bookings
        WHERE (?1 IS NULL OR user_id = ?1)
          AND (?2 IS NULL OR drone_id = ?2)
        ORDER BY id
        "#,
    )
    .bind(filter.user_id)
    .bind(filter.drone_id)
    .fetch_all(executor)
    .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn decode_date(id: i64, value: &str) -> BookingResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| BookingError::CorruptRow {
        entity: "booking",
        id,
        reason: format!("booked_on '{}': {}", value, e),
    })
}

fn decode_time(id: i64, value: Option<&str>) -> BookingResult<Option<TimeOfDay>> {
    TimeOfDay::parse_optional(value).map_err(|e| BookingError::CorruptRow {
        entity: "booking",
        id,
        reason: e.to_string(),
    })
}

// Internal row types for SQLx
#[derive(sqlx::FromRow)]
struct WindowRow {
    id: i64,
    booked_from: Option<String>,
    booked_to: Option<String>,
}

impl TryFrom<WindowRow> for BookingWindow {
    type Error = BookingError;

    fn try_from(row: WindowRow) -> BookingResult<Self> {
        let from = decode_time(row.id, row.booked_from.as_deref())?;
        let to = decode_time(row.id, row.booked_to.as_deref())?;
        BookingWindow::new(from, to).map_err(|e| BookingError::CorruptRow {
            entity: "booking",
            id: row.id,
            reason: e.to_string(),
        })
    }
}

#[derive(sqlx::FromRow)]
struct EnrichedBookingRow {
    id: i64,
    user_id: i64,
    user_name: String,
    drone_id: i64,
    drone_name: String,
    booked_on: String,
    booked_from: Option<String>,
    booked_to: Option<String>,
}

impl TryFrom<EnrichedBookingRow> for EnrichedBooking {
    type Error = BookingError;

    fn try_from(row: EnrichedBookingRow) -> BookingResult<Self> {
        Ok(EnrichedBooking {
            booked_on: decode_date(row.id, &row.booked_on)?,
            booked_from: decode_time(row.id, row.booked_from.as_deref())?,
            booked_to: decode_time(row.id, row.booked_to.as_deref())?,
            id: row.id,
            user_id: row.user_id,
            user_name: row.user_name,
            drone_id: row.drone_id,
            drone_name: row.drone_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{drones, init_database, users};
    use std::time::Duration;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[tokio::test]
    async fn stored_windows_keep_absent_bounds() {
        let db = init_database(":memory:", 1, Duration::from_secs(1)).await.unwrap();
        let user = users::insert_user(db.pool(), "Kermit the Frog", None).await.unwrap();
        let drone = drones::insert_drone(db.pool(), "Drone B", Some("Hudson Yards"))
            .await
            .unwrap();

        let window = BookingWindow::new("12:00".parse().ok(), None).unwrap();
        insert_booking(db.pool(), user.id, drone.id, date("2014-09-22"), window)
            .await
            .unwrap();

        let windows = load_windows(db.pool(), drone.id, date("2014-09-22")).await.unwrap();
        assert_eq!(windows, vec![window]);
        assert!(load_windows(db.pool(), drone.id, date("2014-09-23"))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn corrupt_time_is_reported() {
        let db = init_database(":memory:", 1, Duration::from_secs(1)).await.unwrap();
        let user = users::insert_user(db.pool(), "Mickey Mouse", None).await.unwrap();
        let drone = drones::insert_drone(db.pool(), "Drone A", None).await.unwrap();
        sqlx::query(
            "INSERT INTO bookings (user_id, drone_id, booked_on, booked_from) VALUES (?1, ?2, '2014-09-25', 'noon')",
        )
        .bind(user.id)
        .bind(drone.id)
        .execute(db.pool())
        .await
        .unwrap();

        let err = load_windows(db.pool(), drone.id, date("2014-09-25")).await.unwrap_err();
        assert!(matches!(err, BookingError::CorruptRow { entity: "booking", .. }));
    }

    #[tokio::test]
    async fn inverted_stored_window_is_reported() {
        let db = init_database(":memory:", 1, Duration::from_secs(1)).await.unwrap();
        let user = users::insert_user(db.pool(), "Donald Duck", None).await.unwrap();
        let drone = drones::insert_drone(db.pool(), "Drone A", None).await.unwrap();
        sqlx::query(
            "INSERT INTO bookings (user_id, drone_id, booked_on, booked_from, booked_to) VALUES (?1, ?2, '2014-09-25', '11:00', '09:00')",
        )
        .bind(user.id)
        .bind(drone.id)
        .execute(db.pool())
        .await
        .unwrap();

        let err = load_windows(db.pool(), drone.id, date("2014-09-25")).await.unwrap_err();
        assert!(matches!(err, BookingError::CorruptRow { entity: "booking", .. }));
    }

    #[tokio::test]
    async fn claim_slot_bumps_revision() {
        let db = init_database(":memory:", 1, Duration::from_secs(1)).await.unwrap();
        claim_slot(db.pool(), 1, date("2014-09-25")).await.unwrap();
        claim_slot(db.pool(), 1, date("2014-09-25")).await.unwrap();

        let (revision,): (i64,) = sqlx::query_as(
            "SELECT revision FROM booking_slots WHERE drone_id = 1 AND booked_on = '2014-09-25'",
        )
        .fetch_one(db.pool())
        .await
        .unwrap();
        assert_eq!(revision, 2);
    }
}

//! User persistence operations.

use booking_core::User;
use sqlx::SqliteExecutor;

/// Insert a user and return it with its assigned id.
pub async fn insert_user<'e, E>(
    executor: E,
    name: &str,
    email_address: Option<&str>,
) -> Result<User, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query("INSERT INTO users (name, email_address) VALUES (?1, ?2)")
        .bind(name)
        .bind(email_address)
        .execute(executor)
        .await?;

    Ok(User {
        id: result.last_insert_rowid(),
        name: name.to_string(),
        email_address: email_address.map(str::to_string),
    })
}

/// Load a single user by id.
pub async fn load_user<'e, E>(executor: E, id: i64) -> Result<Option<User>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, name, email_address FROM users WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(row.map(User::from))
}

/// Load all users in insertion order.
pub async fn load_all_users<'e, E>(executor: E) -> Result<Vec<User>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let rows = sqlx::query_as::<_, UserRow>("SELECT id, name, email_address FROM users ORDER BY id")
        .fetch_all(executor)
        .await?;

    Ok(rows.into_iter().map(User::from).collect())
}

// Internal row type for SQLx
#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email_address: Option<String>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.name,
            email_address: row.email_address,
        }
    }
}

//! SQLite-backed document store.
//!
//! Each module owns one table. Ids are UUID v4 strings, timestamps are UTC.
//! Schema lives in `api/migrations/` and is applied on connect.

pub mod admins;
pub mod alumni;
pub mod announcements;
pub mod events;
pub mod feedback;
pub mod gallery;
pub mod users;

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

/// Open the pool and bring the schema up to date.
///
/// An in-memory database lives only as long as its connection, so it gets a
/// single connection that never idles out.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let in_memory = database_url.contains(":memory:");

    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
    } else {
        SqlitePoolOptions::new()
            .max_connections(5)
            .idle_timeout(Duration::from_secs(600))
    };

    let pool = pool_options.connect_with(options).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::debug!(in_memory, "database ready");
    Ok(pool)
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

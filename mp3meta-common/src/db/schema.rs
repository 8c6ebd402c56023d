//! `meta` table schema
//!
//! Creating the table is idempotent and happens on every run. Dropping it is a
//! separate operation the operator asks for explicitly.

use crate::Result;
use sqlx::SqlitePool;
use tracing::{info, warn};

/// Name of the table holding one row per ingested MP3 file
pub const META_TABLE: &str = "meta";

/// Column names in insert order
pub const META_COLUMNS: [&str; 7] = [
    "title", "artist", "album", "genre", "date", "length", "bitrate",
];

/// Create the `meta` table if it does not already exist
pub async fn ensure_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS meta (
            title VARCHAR(100),
            artist VARCHAR(100),
            album VARCHAR(100),
            genre VARCHAR(50),
            date VARCHAR(20),
            length FLOAT,
            bitrate INT
        )
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database table ensured ({})", META_TABLE);
    Ok(())
}

/// Drop the `meta` table (discarding every row) and create it again
pub async fn reset_schema(pool: &SqlitePool) -> Result<()> {
    warn!("Dropping table {} and all of its rows", META_TABLE);

    sqlx::query("DROP TABLE IF EXISTS meta")
        .execute(pool)
        .await?;

    ensure_schema(pool).await
}

/// Number of rows currently in the `meta` table
pub async fn count_songs(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM meta")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

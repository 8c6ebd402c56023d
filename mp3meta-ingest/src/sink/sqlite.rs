//! SQLite sink for the `meta` table

use super::{SinkError, SongSink};
use crate::record::SongRecord;
use async_trait::async_trait;
use sqlx::SqlitePool;

/// Writes each record as one row of `meta`, one transaction per row
#[derive(Debug, Clone)]
pub struct SqliteSink {
    pool: SqlitePool,
}

impl SqliteSink {
    /// The `meta` table must already exist, see `mp3meta_common::db::ensure_schema`
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SongSink for SqliteSink {
    async fn append(&mut self, record: &SongRecord) -> Result<(), SinkError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO meta (title, artist, album, genre, date, length, bitrate)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.title)
        .bind(&record.artist)
        .bind(&record.album)
        .bind(&record.genre)
        .bind(&record.date)
        .bind(record.length)
        .bind(i64::from(record.bitrate))
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }
}

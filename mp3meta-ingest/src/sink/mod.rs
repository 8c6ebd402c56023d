//! Record sinks
//!
//! A sink durably stores each record before `append` returns.

pub mod log;
pub mod memory;
pub mod sqlite;

pub use self::log::LogSink;
pub use memory::MemorySink;
pub use sqlite::SqliteSink;

use crate::record::SongRecord;
use async_trait::async_trait;
use thiserror::Error;

/// Sink write errors
#[derive(Debug, Error)]
pub enum SinkError {
    /// Database write or commit failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Sink refused the record
    #[error("Record rejected: {0}")]
    Rejected(String),
}

/// Destination for assembled records
#[async_trait]
pub trait SongSink: Send {
    /// Store one record, committing it before returning
    async fn append(&mut self, record: &SongRecord) -> Result<(), SinkError>;
}

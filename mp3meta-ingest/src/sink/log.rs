//! Dry-run sink: logs records instead of storing them

use super::{SinkError, SongSink};
use crate::record::SongRecord;
use async_trait::async_trait;
use tracing::info;

#[derive(Debug, Default)]
pub struct LogSink {
    appended: usize,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records logged so far
    pub fn appended(&self) -> usize {
        self.appended
    }
}

#[async_trait]
impl SongSink for LogSink {
    async fn append(&mut self, record: &SongRecord) -> Result<(), SinkError> {
        self.appended += 1;
        info!(
            title = %record.title,
            artist = %record.artist,
            album = %record.album,
            genre = %record.genre,
            date = %record.date,
            length = record.length,
            bitrate = record.bitrate,
            "Dry run: would insert record"
        );
        Ok(())
    }
}

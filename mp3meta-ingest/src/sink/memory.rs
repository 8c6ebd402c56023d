//! Sink collecting records in memory

use super::{SinkError, SongSink};
use crate::record::SongRecord;
use async_trait::async_trait;

#[derive(Debug, Default)]
pub struct MemorySink {
    records: Vec<SongRecord>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records in append order
    pub fn records(&self) -> &[SongRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<SongRecord> {
        self.records
    }
}

#[async_trait]
impl SongSink for MemorySink {
    async fn append(&mut self, record: &SongRecord) -> Result<(), SinkError> {
        self.records.push(record.clone());
        Ok(())
    }
}

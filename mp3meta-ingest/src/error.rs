//! Error types for mp3meta-ingest

use crate::scanner::ScanError;
use crate::sink::SinkError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop an ingestion run
#[derive(Debug, Error)]
pub enum IngestError {
    /// Library root cannot be scanned
    #[error("Scan failed: {0}")]
    Scan(#[from] ScanError),

    /// Sink failed and the policy is to abort
    #[error("Failed to store record for {path}: {source}")]
    Sink {
        path: PathBuf,
        #[source]
        source: SinkError,
    },
}

//! Ingestion pipeline
//!
//! Scan → decode → assemble → append, one file at a time. A file that cannot
//! be decoded is logged and skipped. A sink failure aborts the run or is
//! skipped, depending on [`SinkErrorPolicy`].

use crate::assembler::assemble;
use crate::decode::TagDecoder;
use crate::error::IngestError;
use crate::scanner::FileScanner;
use crate::sink::SongSink;
use mp3meta_common::config::SinkErrorPolicy;
use std::path::Path;
use tracing::{debug, error, info, warn};

/// Outcome counts for one run
///
/// Each discovered file lands in exactly one of the other counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    /// Candidate files found by the scanner
    pub discovered: usize,
    /// Records appended to the sink
    pub inserted: usize,
    /// Files skipped because they could not be decoded
    pub decode_failures: usize,
    /// Records the sink rejected (only with [`SinkErrorPolicy::Skip`])
    pub sink_failures: usize,
}

/// Ingestion pipeline over a decoder
pub struct IngestPipeline<D> {
    scanner: FileScanner,
    decoder: D,
    on_sink_error: SinkErrorPolicy,
}

impl<D: TagDecoder> IngestPipeline<D> {
    pub fn new(decoder: D) -> Self {
        Self {
            scanner: FileScanner::new(),
            decoder,
            on_sink_error: SinkErrorPolicy::default(),
        }
    }

    pub fn with_sink_error_policy(mut self, policy: SinkErrorPolicy) -> Self {
        self.on_sink_error = policy;
        self
    }

    /// Ingest every MP3 file under `root` into `sink`
    pub async fn ingest<S>(&self, root: &Path, sink: &mut S) -> Result<IngestStats, IngestError>
    where
        S: SongSink + ?Sized,
    {
        info!(root = %root.display(), "Starting ingestion");

        let files = self.scanner.scan(root)?;
        let mut stats = IngestStats {
            discovered: files.len(),
            ..Default::default()
        };

        for path in files {
            let source = match self.decoder.decode(&path) {
                Ok(source) => source,
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "Skipping file that could not be decoded");
                    stats.decode_failures += 1;
                    continue;
                }
            };

            let record = assemble(&source);
            debug!(file = %path.display(), record = ?record, "Assembled record");

            match sink.append(&record).await {
                Ok(()) => stats.inserted += 1,
                Err(e) => match self.on_sink_error {
                    SinkErrorPolicy::Abort => {
                        error!(file = %path.display(), error = %e, "Sink failed, aborting run");
                        return Err(IngestError::Sink { path, source: e });
                    }
                    SinkErrorPolicy::Skip => {
                        error!(file = %path.display(), error = %e, "Sink failed, skipping record");
                        stats.sink_failures += 1;
                    }
                },
            }
        }

        info!(
            discovered = stats.discovered,
            inserted = stats.inserted,
            decode_failures = stats.decode_failures,
            sink_failures = stats.sink_failures,
            "Ingestion complete"
        );

        Ok(stats)
    }
}

//! mp3meta-ingest library interface
//!
//! Walks an MP3 library, extracts one normalized [`SongRecord`] per file and
//! appends it to a [`SongSink`].

pub mod assembler;
pub mod decode;
pub mod error;
pub mod extractor;
pub mod pipeline;
pub mod record;
pub mod sanitizer;
pub mod scanner;
pub mod sink;

pub use crate::assembler::assemble;
pub use crate::decode::{TagDecoder, TagSource};
pub use crate::error::IngestError;
pub use crate::pipeline::{IngestPipeline, IngestStats};
pub use crate::record::SongRecord;
pub use crate::sink::{SinkError, SongSink};

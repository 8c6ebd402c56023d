//! Decoded-file abstraction
//!
//! The extractor never touches tag libraries directly. A [`TagDecoder`] turns a
//! path into a [`TagSource`], which exposes frame values, the tag-format
//! version and the audio properties of one file.

pub mod memory;
pub mod mp3;

pub use memory::{MemoryDecoder, MemorySource};
pub use mp3::{Mp3Decoder, Mp3Source};

use std::path::Path;
use thiserror::Error;

/// File decoding errors
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Cannot open or read the file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// ID3v2 tag block is present but unreadable
    #[error("Failed to read ID3 tag: {0}")]
    Tag(#[from] id3::Error),

    /// Audio stream could not be parsed
    #[error("Failed to read audio stream: {0}")]
    Audio(#[from] lofty::error::LoftyError),

    /// File was rejected for another reason
    #[error("Invalid file: {0}")]
    Invalid(String),
}

/// Value of one tag frame
#[derive(Debug, Clone, PartialEq)]
pub enum FrameValue {
    /// Plain text values, the first one is primary
    Text(Vec<String>),
    /// Parsed timestamps; the extractor reads their text form
    Timestamp(Vec<id3::Timestamp>),
    /// Frame present but its content is not textual
    Other,
}

/// Tag-format version pair, e.g. `(2, 4)` for ID3v2.4
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TagVersion {
    pub major: u8,
    pub minor: u8,
}

impl TagVersion {
    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }

    /// ID3v2.4 or later
    pub fn is_modern(&self) -> bool {
        (self.major == 2 && self.minor >= 4) || self.major > 2
    }
}

impl std::fmt::Display for TagVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Decoder-reported audio stream properties
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AudioInfo {
    /// Duration in seconds
    pub length: Option<f64>,
    /// Bits per second
    pub bitrate: Option<u32>,
}

/// One decoded file
pub trait TagSource {
    /// Value of the frame with identifier `frame_id`, if present
    fn frame(&self, frame_id: &str) -> Option<&FrameValue>;

    /// Tag-format version of the embedded tag block
    fn version(&self) -> TagVersion;

    /// Audio stream properties
    fn audio_info(&self) -> AudioInfo;
}

/// Turns a file path into a [`TagSource`]
pub trait TagDecoder {
    type Source: TagSource;

    fn decode(&self, path: &Path) -> Result<Self::Source, DecodeError>;
}

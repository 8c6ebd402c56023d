//! In-memory decoder
//!
//! Serves pre-built [`MemorySource`] values keyed by file name, so the
//! pipeline can run over a real directory tree without real MP3 payloads.

use super::{AudioInfo, DecodeError, FrameValue, TagDecoder, TagSource, TagVersion};
use std::collections::HashMap;
use std::ffi::{OsStr, OsString};
use std::path::Path;

/// A decoded file assembled by hand
#[derive(Debug, Clone, PartialEq)]
pub struct MemorySource {
    frames: HashMap<String, FrameValue>,
    version: TagVersion,
    audio_info: AudioInfo,
}

impl MemorySource {
    pub fn new(version: TagVersion) -> Self {
        Self {
            frames: HashMap::new(),
            version,
            audio_info: AudioInfo::default(),
        }
    }

    /// Add a single-valued text frame
    pub fn with_text(self, frame_id: &str, text: &str) -> Self {
        self.with_frame(frame_id, FrameValue::Text(vec![text.to_string()]))
    }

    pub fn with_frame(mut self, frame_id: &str, value: FrameValue) -> Self {
        self.frames.insert(frame_id.to_string(), value);
        self
    }

    pub fn with_length(mut self, seconds: f64) -> Self {
        self.audio_info.length = Some(seconds);
        self
    }

    pub fn with_bitrate(mut self, bits_per_second: u32) -> Self {
        self.audio_info.bitrate = Some(bits_per_second);
        self
    }
}

impl TagSource for MemorySource {
    fn frame(&self, frame_id: &str) -> Option<&FrameValue> {
        self.frames.get(frame_id)
    }

    fn version(&self) -> TagVersion {
        self.version
    }

    fn audio_info(&self) -> AudioInfo {
        self.audio_info
    }
}

/// Decoder answering from a table of file names
///
/// Names that were never registered fail with [`DecodeError::Invalid`], as do
/// names registered with [`MemoryDecoder::fail`].
#[derive(Debug, Clone, Default)]
pub struct MemoryDecoder {
    sources: HashMap<OsString, Option<MemorySource>>,
}

impl MemoryDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode files named `file_name` to `source`
    pub fn insert(&mut self, file_name: impl AsRef<OsStr>, source: MemorySource) {
        self.sources
            .insert(file_name.as_ref().to_os_string(), Some(source));
    }

    /// Make decoding of files named `file_name` fail
    pub fn fail(&mut self, file_name: impl AsRef<OsStr>) {
        self.sources.insert(file_name.as_ref().to_os_string(), None);
    }
}

impl TagDecoder for MemoryDecoder {
    type Source = MemorySource;

    fn decode(&self, path: &Path) -> Result<MemorySource, DecodeError> {
        let name = path.file_name().unwrap_or_default();
        match self.sources.get(name) {
            Some(Some(source)) => Ok(source.clone()),
            Some(None) => Err(DecodeError::Invalid(format!(
                "decoding disabled for {}",
                path.display()
            ))),
            None => Err(DecodeError::Invalid(format!(
                "no source registered for {}",
                path.display()
            ))),
        }
    }
}

//! MP3 decoder
//!
//! Frames and the tag version come from the `id3` crate; duration and bitrate
//! come from `lofty`'s audio properties.

use super::{AudioInfo, DecodeError, FrameValue, TagDecoder, TagSource, TagVersion};
use id3::frame::Content;
use id3::{ErrorKind, Tag, Version};
use lofty::config::{ParseOptions, ParsingMode};
use lofty::prelude::*;
use lofty::probe::Probe;
use lofty::properties::FileProperties;
use std::collections::HashMap;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, warn};

/// Version reported for files without an ID3v2 tag block
pub const DEFAULT_VERSION: TagVersion = TagVersion::new(2, 4);

/// ID3v2.4 frames whose text is a timestamp
const TIMESTAMP_FRAMES: [&str; 5] = ["TDRC", "TDOR", "TDRL", "TDEN", "TDTG"];

/// ID3v2.4 separator between multiple values of one text frame
const MULTI_VALUE_SEPARATOR: char = '\0';

const ID3V2_HEADER_LEN: usize = 10;
const ID3V2_FOOTER_FLAG: u8 = 0x10;

/// One decoded MP3 file
#[derive(Debug, Clone)]
pub struct Mp3Source {
    frames: HashMap<String, FrameValue>,
    version: TagVersion,
    audio_info: AudioInfo,
}

impl TagSource for Mp3Source {
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

/// Decoder for MP3 files with ID3v2 tags
#[derive(Debug, Clone, Copy, Default)]
pub struct Mp3Decoder;

impl Mp3Decoder {
    pub fn new() -> Self {
        Self
    }
}

impl TagDecoder for Mp3Decoder {
    type Source = Mp3Source;

    /// Decode one file
    ///
    /// A malformed tag frame costs only the frames it damages: whatever the
    /// `id3` crate recovered before the bad frame is kept. The file fails only
    /// when no audio stream can be read from it.
    fn decode(&self, path: &Path) -> Result<Mp3Source, DecodeError> {
        let audio_info = read_audio_info(path)?;

        let (frames, version) = match Tag::read_from_path(path) {
            Ok(tag) => (collect_frames(&tag), version_pair(tag.version())),
            Err(id3::Error {
                partial_tag: Some(tag),
                description,
                ..
            }) => {
                warn!(
                    file = %path.display(),
                    "Keeping partial ID3v2 tag: {}", description
                );
                (collect_frames(&tag), version_pair(tag.version()))
            }
            Err(e) if matches!(e.kind, ErrorKind::NoTag) => {
                debug!(file = %path.display(), "No ID3v2 tag found");
                (HashMap::new(), DEFAULT_VERSION)
            }
            Err(e) => {
                warn!(file = %path.display(), "Unreadable ID3v2 tag: {}", e);
                (HashMap::new(), DEFAULT_VERSION)
            }
        };

        Ok(Mp3Source {
            frames,
            version,
            audio_info,
        })
    }
}

fn parse_options() -> ParseOptions {
    ParseOptions::new().parsing_mode(ParsingMode::Relaxed)
}

/// Duration and bitrate of the audio stream
///
/// lofty parses the tag block along with the stream and rejects the whole
/// file on a frame it cannot decode, so on failure the stream is read again
/// starting past the ID3v2 block.
fn read_audio_info(path: &Path) -> Result<AudioInfo, DecodeError> {
    let first_error = match Probe::open(path)?.options(parse_options()).read() {
        Ok(tagged_file) => return Ok(audio_info_from(tagged_file.properties())),
        Err(e) => e,
    };

    let data = fs::read(path)?;
    let tag_len = id3v2_block_len(&data);
    if tag_len == 0 {
        return Err(first_error.into());
    }

    debug!(
        file = %path.display(),
        "Reading audio past the {} byte tag block: {}", tag_len, first_error
    );
    let tagged_file = Probe::new(Cursor::new(&data[tag_len..]))
        .options(parse_options())
        .guess_file_type()?
        .read()?;
    Ok(audio_info_from(tagged_file.properties()))
}

fn audio_info_from(properties: &FileProperties) -> AudioInfo {
    AudioInfo {
        length: Some(properties.duration().as_secs_f64()),
        // lofty reports kbit/s
        bitrate: properties
            .audio_bitrate()
            .and_then(|kbps| kbps.checked_mul(1000)),
    }
}

/// Size of a leading ID3v2 block (header, frames and footer), 0 if there is none
fn id3v2_block_len(data: &[u8]) -> usize {
    if data.len() < ID3V2_HEADER_LEN || !data.starts_with(b"ID3") {
        return 0;
    }

    // Synchsafe: 7 significant bits per byte
    let body = data[6..10]
        .iter()
        .fold(0usize, |acc, byte| (acc << 7) | usize::from(byte & 0x7F));
    let footer = if data[5] & ID3V2_FOOTER_FLAG != 0 {
        ID3V2_HEADER_LEN
    } else {
        0
    };

    (ID3V2_HEADER_LEN + body + footer).min(data.len())
}

fn version_pair(version: Version) -> TagVersion {
    match version {
        Version::Id3v22 => TagVersion::new(2, 2),
        Version::Id3v23 => TagVersion::new(2, 3),
        Version::Id3v24 => TagVersion::new(2, 4),
    }
}

/// Map every frame id to its value; the first frame with a given id wins
fn collect_frames(tag: &Tag) -> HashMap<String, FrameValue> {
    let mut frames = HashMap::new();
    for frame in tag.frames() {
        frames
            .entry(frame.id().to_string())
            .or_insert_with(|| frame_value(frame.id(), frame.content()));
    }
    frames
}

fn frame_value(frame_id: &str, content: &Content) -> FrameValue {
    let Content::Text(text) = content else {
        return FrameValue::Other;
    };

    let values: Vec<String> = text
        .split(MULTI_VALUE_SEPARATOR)
        .map(str::to_owned)
        .collect();

    if TIMESTAMP_FRAMES.contains(&frame_id) {
        let timestamps: Option<Vec<id3::Timestamp>> =
            values.iter().map(|v| v.trim().parse().ok()).collect();
        if let Some(timestamps) = timestamps {
            return FrameValue::Timestamp(timestamps);
        }
    }

    FrameValue::Text(values)
}

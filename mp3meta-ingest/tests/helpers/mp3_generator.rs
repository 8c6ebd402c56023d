//! Synthetic MP3 files
//!
//! Writes constant-bitrate MPEG-1 Layer III frames (128 kbit/s, 44.1 kHz)
//! with silent payloads, optionally preceded by an ID3v2 tag.

use id3::{Tag, TagLike, Version};
use std::io;
use std::path::Path;

/// MPEG-1 Layer III, no CRC, 128 kbit/s, 44.1 kHz, no padding, stereo
const FRAME_HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0x00];

/// 144 * 128000 / 44100, rounded down
const FRAME_LEN: usize = 417;

/// Tag contents for a generated file
#[derive(Debug, Clone)]
pub struct Mp3Config {
    pub version: Version,
    /// (frame id, text) pairs written as text frames
    pub frames: Vec<(&'static str, String)>,
    pub frame_count: usize,
}

impl Default for Mp3Config {
    fn default() -> Self {
        Self {
            version: Version::Id3v24,
            frames: Vec::new(),
            frame_count: 200,
        }
    }
}

fn mpeg_frames(count: usize) -> Vec<u8> {
    let mut frame = vec![0u8; FRAME_LEN];
    frame[..4].copy_from_slice(&FRAME_HEADER);

    let mut data = Vec::with_capacity(FRAME_LEN * count);
    for _ in 0..count {
        data.extend_from_slice(&frame);
    }
    data
}

/// Write `count` audio frames and nothing else
pub fn write_mpeg_frames(path: &Path, count: usize) -> io::Result<()> {
    std::fs::write(path, mpeg_frames(count))
}

fn synchsafe(value: usize) -> [u8; 4] {
    let value = value as u32;
    [
        ((value >> 21) & 0x7F) as u8,
        ((value >> 14) & 0x7F) as u8,
        ((value >> 7) & 0x7F) as u8,
        (value & 0x7F) as u8,
    ]
}

/// One raw ID3v2.4 text frame: `encoding` byte followed by `text`
///
/// Bytes are written as given, so an encoding byte outside 0..=3 produces a
/// frame the `id3` crate cannot decode.
pub fn raw_text_frame(frame_id: &str, encoding: u8, text: &str) -> Vec<u8> {
    let mut payload = vec![encoding];
    payload.extend_from_slice(text.as_bytes());

    let mut frame = frame_id.as_bytes().to_vec();
    frame.extend_from_slice(&synchsafe(payload.len()));
    frame.extend_from_slice(&[0, 0]);
    frame.extend_from_slice(&payload);
    frame
}

/// Write an ID3v2.4 header around pre-built `frames`, then `count` audio frames
pub fn write_raw_id3v24(path: &Path, frames: &[Vec<u8>], count: usize) -> io::Result<()> {
    let body: Vec<u8> = frames.concat();

    let mut data = b"ID3".to_vec();
    data.extend_from_slice(&[0x04, 0x00, 0x00]);
    data.extend_from_slice(&synchsafe(body.len()));
    data.extend_from_slice(&body);
    data.extend_from_slice(&mpeg_frames(count));
    std::fs::write(path, data)
}

/// Write audio frames, then prepend an ID3v2 tag built from `config`
pub fn write_mp3(path: &Path, config: &Mp3Config) -> Result<(), Box<dyn std::error::Error>> {
    write_mpeg_frames(path, config.frame_count)?;

    let mut tag = Tag::new();
    for (frame_id, text) in &config.frames {
        tag.set_text(*frame_id, text.clone());
    }
    tag.write_to_path(path, config.version)?;
    Ok(())
}

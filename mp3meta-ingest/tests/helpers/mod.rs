//! Test Helper Utilities
//!
//! Shared utilities for testing mp3meta-ingest

#![allow(dead_code, unused_imports)]

pub mod log_capture;
pub mod mp3_generator;

pub use log_capture::LogCapture;
pub use mp3_generator::{
    raw_text_frame, write_mp3, write_mpeg_frames, write_raw_id3v24, Mp3Config,
};

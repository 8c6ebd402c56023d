//! Tag extractor
//!
//! Reads one field at a time from a [`TagSource`]. Every field is isolated: a
//! missing or malformed value is logged and replaced by its default, and never
//! stops the remaining fields from being read.

use crate::decode::{FrameValue, TagSource, TagVersion};
use crate::record::MISSING_TEXT;
use crate::sanitizer::sanitize;
use thiserror::Error;
use tracing::debug;

/// Title frame
pub const TITLE_FRAME: &str = "TIT2";
/// Lead artist frame
pub const ARTIST_FRAME: &str = "TPE1";
/// Album frame
pub const ALBUM_FRAME: &str = "TALB";
/// Genre frame
pub const GENRE_FRAME: &str = "TCON";
/// Recording time frame, ID3v2.4 and later
pub const MODERN_DATE_FRAME: &str = "TDRC";
/// Date (DDMM) frame, before ID3v2.4
pub const LEGACY_DATE_FRAME: &str = "TDAT";

/// Why a field fell back to its default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldMiss {
    #[error("not present")]
    Absent,
    #[error("unexpected value type")]
    WrongType,
    #[error("empty value")]
    Empty,
    #[error("invalid value")]
    Invalid,
}

/// Numeric audio properties
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    Length,
    Bitrate,
}

impl NumericField {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Length => "length",
            Self::Bitrate => "bitrate",
        }
    }
}

/// Frame holding the date for a tag of the given version
pub fn date_frame_for(version: TagVersion) -> &'static str {
    if version.is_modern() {
        MODERN_DATE_FRAME
    } else {
        LEGACY_DATE_FRAME
    }
}

/// Sanitized text of `frame_id`, or [`MISSING_TEXT`]
///
/// `field` names the record field, for logging only.
pub fn extract_text_field(field: &str, frame_id: &str, source: &impl TagSource) -> String {
    match read_text(frame_id, source) {
        Ok(text) => sanitize(&text),
        Err(miss) => {
            report_miss(field, frame_id, miss);
            MISSING_TEXT.to_string()
        }
    }
}

/// Duration in seconds, or `0.0`
pub fn extract_length(source: &impl TagSource) -> f64 {
    let length = source
        .audio_info()
        .length
        .ok_or(FieldMiss::Absent)
        .and_then(|secs| {
            if secs.is_finite() && secs >= 0.0 {
                Ok(secs)
            } else {
                Err(FieldMiss::Invalid)
            }
        });

    numeric_or_default(NumericField::Length, length)
}

/// Bitrate in bits per second, or `0`
pub fn extract_bitrate(source: &impl TagSource) -> u32 {
    let bitrate = source.audio_info().bitrate.ok_or(FieldMiss::Absent);
    numeric_or_default(NumericField::Bitrate, bitrate)
}

fn read_text(frame_id: &str, source: &impl TagSource) -> Result<String, FieldMiss> {
    let text = match source.frame(frame_id).ok_or(FieldMiss::Absent)? {
        FrameValue::Text(values) => values.first().cloned(),
        FrameValue::Timestamp(timestamps) => timestamps.first().map(|t| t.to_string()),
        FrameValue::Other => return Err(FieldMiss::WrongType),
    }
    .ok_or(FieldMiss::Empty)?;

    if text.is_empty() {
        return Err(FieldMiss::Empty);
    }
    Ok(text)
}

fn numeric_or_default<T: Default>(field: NumericField, value: Result<T, FieldMiss>) -> T {
    value.unwrap_or_else(|miss| {
        debug!(field = field.name(), reason = %miss, "{} field not found", field.name());
        T::default()
    })
}

fn report_miss(field: &str, frame_id: &str, miss: FieldMiss) {
    debug!(field, frame = frame_id, reason = %miss, "{} field not found", field);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::MemorySource;

    fn empty_source() -> MemorySource {
        MemorySource::new(TagVersion::new(2, 4))
    }

    #[test]
    fn test_absent_text_frames_default() {
        let source = empty_source();
        for frame in [TITLE_FRAME, ARTIST_FRAME, ALBUM_FRAME, GENRE_FRAME, MODERN_DATE_FRAME] {
            assert_eq!(extract_text_field("field", frame, &source), MISSING_TEXT);
        }
    }

    #[test]
    fn test_empty_text_frames_default() {
        let source = empty_source()
            .with_text(TITLE_FRAME, "")
            .with_frame(ARTIST_FRAME, FrameValue::Text(Vec::new()))
            .with_frame(MODERN_DATE_FRAME, FrameValue::Timestamp(Vec::new()));

        assert_eq!(extract_text_field("title", TITLE_FRAME, &source), MISSING_TEXT);
        assert_eq!(extract_text_field("artist", ARTIST_FRAME, &source), MISSING_TEXT);
        assert_eq!(extract_text_field("date", MODERN_DATE_FRAME, &source), MISSING_TEXT);
    }

    #[test]
    fn test_wrong_type_defaults() {
        let source = empty_source().with_frame(GENRE_FRAME, FrameValue::Other);
        assert_eq!(extract_text_field("genre", GENRE_FRAME, &source), MISSING_TEXT);
    }

    #[test]
    fn test_first_value_is_taken_and_sanitized() {
        let source = empty_source().with_frame(
            ARTIST_FRAME,
            FrameValue::Text(vec!["Guns N' Roses".to_string(), "Other".to_string()]),
        );
        assert_eq!(
            extract_text_field("artist", ARTIST_FRAME, &source),
            r"Guns N\' Roses"
        );
    }

    #[test]
    fn test_timestamp_text_is_read() {
        let timestamp: id3::Timestamp = "2004-11-02".parse().unwrap();
        let source = empty_source()
            .with_frame(MODERN_DATE_FRAME, FrameValue::Timestamp(vec![timestamp]));
        assert_eq!(
            extract_text_field("date", MODERN_DATE_FRAME, &source),
            "2004-11-02"
        );
    }

    #[test]
    fn test_unicode_text_passes_through() {
        let source = empty_source().with_text(ALBUM_FRAME, "Sgt. Pepper’s ♪ 夜");
        assert_eq!(
            extract_text_field("album", ALBUM_FRAME, &source),
            "Sgt. Pepper’s ♪ 夜"
        );
    }

    #[test]
    fn test_absent_numbers_are_zero() {
        let source = empty_source();
        assert_eq!(extract_length(&source), 0.0);
        assert_eq!(extract_bitrate(&source), 0);
    }

    #[test]
    fn test_invalid_length_is_zero() {
        assert_eq!(extract_length(&empty_source().with_length(f64::NAN)), 0.0);
        assert_eq!(extract_length(&empty_source().with_length(-3.0)), 0.0);
        assert_eq!(extract_length(&empty_source().with_length(f64::INFINITY)), 0.0);
    }

    #[test]
    fn test_present_numbers_are_kept() {
        let source = empty_source().with_length(213.4).with_bitrate(320_000);
        assert_eq!(extract_length(&source), 213.4);
        assert_eq!(extract_bitrate(&source), 320_000);
    }

    #[test]
    fn test_date_frame_selection_boundary() {
        assert_eq!(date_frame_for(TagVersion::new(2, 3)), LEGACY_DATE_FRAME);
        assert_eq!(date_frame_for(TagVersion::new(2, 4)), MODERN_DATE_FRAME);
        assert_eq!(date_frame_for(TagVersion::new(3, 0)), MODERN_DATE_FRAME);
        assert_eq!(date_frame_for(TagVersion::new(2, 2)), LEGACY_DATE_FRAME);
    }
}

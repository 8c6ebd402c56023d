//! Normalized song record

/// Stored in a text field whose tag frame is absent, malformed or empty
pub const MISSING_TEXT: &str = "N/A";

/// One row of the `meta` table, built fresh for every ingested file
///
/// Every field is always populated: missing text becomes [`MISSING_TEXT`],
/// missing numbers become zero. Text fields hold sanitized text.
#[derive(Debug, Clone, PartialEq)]
pub struct SongRecord {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub genre: String,
    pub date: String,
    /// Duration in seconds
    pub length: f64,
    /// Bits per second
    pub bitrate: u32,
}

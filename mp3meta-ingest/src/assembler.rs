//! Record assembler

use crate::decode::TagSource;
use crate::extractor::{
    date_frame_for, extract_bitrate, extract_length, extract_text_field, ALBUM_FRAME,
    ARTIST_FRAME, GENRE_FRAME, TITLE_FRAME,
};
use crate::record::SongRecord;

/// Build the record for one decoded file
///
/// The tag version is classified once, before the date is read, so exactly
/// one date frame is consulted.
pub fn assemble(source: &impl TagSource) -> SongRecord {
    let date_frame = date_frame_for(source.version());

    SongRecord {
        title: extract_text_field("title", TITLE_FRAME, source),
        artist: extract_text_field("artist", ARTIST_FRAME, source),
        album: extract_text_field("album", ALBUM_FRAME, source),
        genre: extract_text_field("genre", GENRE_FRAME, source),
        date: extract_text_field("date", date_frame, source),
        length: extract_length(source),
        bitrate: extract_bitrate(source),
    }
}

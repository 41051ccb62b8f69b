//! Ogg container disambiguation (Opus vs. generic Ogg).

use super::types::FormatTag;
use super::utils::contains_within;

/// Bytes scanned for the Opus identification header.
const OPUS_HEAD_WINDOW: usize = 64;

/// Opus when the first page carries an `OpusHead` packet, otherwise Ogg.
pub fn detect_ogg_format(sample: &[u8]) -> FormatTag {
    if contains_within(sample, OPUS_HEAD_WINDOW, b"OpusHead") {
        FormatTag::Opus
    } else {
        FormatTag::Ogg
    }
}

//! RIFF container disambiguation (WAV, AVI, WebP).

use super::types::FormatTag;
use super::utils::contains_within;

/// Bytes scanned for the RIFF form type.
const FORM_TYPE_WINDOW: usize = 64;
/// Bytes scanned for the `WEBPVP8` chunk marker.
const WEBP_CHUNK_WINDOW: usize = 256;

/// Resolve a `RIFF` sample to its concrete format.
///
/// Returns `None` when no known form type is present; the caller decides
/// what to do with an unrecognised RIFF file.
pub fn detect_riff_format(sample: &[u8]) -> Option<FormatTag> {
    if contains_within(sample, FORM_TYPE_WINDOW, b"WAVE") {
        return Some(FormatTag::Wav);
    }
    if contains_within(sample, FORM_TYPE_WINDOW, b"AVI ") {
        return Some(FormatTag::Avi);
    }
    if contains_within(sample, FORM_TYPE_WINDOW, b"WEBP")
        || contains_within(sample, WEBP_CHUNK_WINDOW, b"WEBPVP8")
    {
        return Some(FormatTag::Webp);
    }
    None
}

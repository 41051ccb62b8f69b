//! ISO base media file format (MP4/HEIF) detection.
//!
//! The `ftyp` box is not at offset zero (it follows a 4-byte box size), so
//! these checks run before the prefix table.

use memchr::memmem;

use super::types::FormatTag;
use super::utils::FTYP_MARKER;

/// Range the `ftyp` marker has to fall in, as `start..end` byte offsets.
const FTYP_SEARCH_START: usize = 4;
const FTYP_SEARCH_END: usize = 16;

/// Major brands that mark a HEIF/HEIC still image or image sequence.
const HEIF_BRANDS: [&[u8; 4]; 4] = [b"heic", b"heif", b"mif1", b"msf1"];

/// Offset of `ftyp` inside bytes 4..16, if present.
fn ftyp_offset(sample: &[u8]) -> Option<usize> {
    if sample.len() < FTYP_SEARCH_START + FTYP_MARKER.len() {
        return None;
    }
    let end = sample.len().min(FTYP_SEARCH_END);
    memmem::find(&sample[FTYP_SEARCH_START..end], FTYP_MARKER).map(|pos| FTYP_SEARCH_START + pos)
}

/// HEIC when `ftyp` is followed by one of the HEIF brands.
pub fn detect_heif(sample: &[u8]) -> Option<FormatTag> {
    let brand_start = ftyp_offset(sample)? + FTYP_MARKER.len();
    let brand = sample.get(brand_start..brand_start + 4)?;
    HEIF_BRANDS
        .iter()
        .any(|known| brand == known.as_slice())
        .then_some(FormatTag::Heic)
}

/// MP4 for any other `ftyp` box.
pub fn detect_mp4(sample: &[u8]) -> Option<FormatTag> {
    ftyp_offset(sample).map(|_| FormatTag::Mp4)
}

/// HEIF brands take precedence over the generic MP4 classification.
pub fn detect_iso_bmff(sample: &[u8]) -> Option<FormatTag> {
    detect_heif(sample).or_else(|| detect_mp4(sample))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ftyp_box(brand: &[u8; 4]) -> Vec<u8> {
        let mut data = vec![0x00, 0x00, 0x00, 0x18];
        data.extend_from_slice(b"ftyp");
        data.extend_from_slice(brand);
        data.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
        data.extend_from_slice(b"isommp42");
        data
    }

    #[test]
    fn test_heic_brands() {
        for brand in [b"heic", b"heif", b"mif1", b"msf1"] {
            assert_eq!(detect_iso_bmff(&ftyp_box(brand)), Some(FormatTag::Heic));
        }
    }

    #[test]
    fn test_mp4_brands() {
        assert_eq!(detect_iso_bmff(&ftyp_box(b"isom")), Some(FormatTag::Mp4));
        assert_eq!(detect_iso_bmff(&ftyp_box(b"M4A ")), Some(FormatTag::Mp4));
    }

    #[test]
    fn test_ftyp_at_offset_zero_is_ignored() {
        assert_eq!(detect_iso_bmff(b"ftypisom\x00\x00\x00\x00"), None);
    }

    #[test]
    fn test_ftyp_past_offset_sixteen_is_ignored() {
        let mut data = vec![0u8; 16];
        data.extend_from_slice(b"ftypheic");
        assert_eq!(detect_iso_bmff(&data), None);
    }

    #[test]
    fn test_truncated_brand_is_mp4() {
        // ftyp present but the brand is cut off by the end of the sample
        assert_eq!(detect_iso_bmff(b"\x00\x00\x00\x18ftyphe"), Some(FormatTag::Mp4));
    }

    #[test]
    fn test_short_sample() {
        assert_eq!(detect_iso_bmff(b"\x00\x00\x00"), None);
        assert_eq!(detect_iso_bmff(b""), None);
    }
}

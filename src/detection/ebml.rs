//! EBML container disambiguation (Matroska, WebM).

use tracing::trace;

use super::types::FormatTag;
use super::utils::{SAMPLE_SIZE, find_in_buffer, window};

/// DocType markers, tested in order against the lowercased sample.
const DOC_TYPES: [(&[u8], FormatTag); 2] = [
    (b"webm", FormatTag::Webm),
    (b"matroska", FormatTag::Mkv),
];

/// Resolve an EBML sample by its DocType string.
///
/// `webm` is checked first, then `matroska`. A sample carrying neither
/// marker is still an EBML stream and is reported as Matroska.
pub fn detect_ebml_format(sample: &[u8]) -> FormatTag {
    let head = window(sample, SAMPLE_SIZE).to_ascii_lowercase();
    match DOC_TYPES
        .iter()
        .find(|(marker, _)| find_in_buffer(&head, marker))
    {
        Some(&(_, format)) => format,
        None => {
            trace!("no EBML DocType marker, defaulting to mkv");
            FormatTag::Mkv
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EBML_MAGIC: [u8; 4] = [0x1A, 0x45, 0xDF, 0xA3];

    fn ebml(doc_type: &[u8]) -> Vec<u8> {
        let mut data = EBML_MAGIC.to_vec();
        data.extend_from_slice(&[0x9F, 0x42, 0x86, 0x81, 0x01, 0x42, 0x82, 0x84]);
        data.extend_from_slice(doc_type);
        data
    }

    #[test]
    fn test_detect_webm() {
        assert_eq!(detect_ebml_format(&ebml(b"webm")), FormatTag::Webm);
    }

    #[test]
    fn test_detect_webm_case_insensitive() {
        assert_eq!(detect_ebml_format(&ebml(b"WebM")), FormatTag::Webm);
    }

    #[test]
    fn test_detect_matroska() {
        assert_eq!(detect_ebml_format(&ebml(b"matroska")), FormatTag::Mkv);
    }

    #[test]
    fn test_doc_type_order() {
        assert_eq!(DOC_TYPES[0], (&b"webm"[..], FormatTag::Webm));
        assert_eq!(DOC_TYPES[1], (&b"matroska"[..], FormatTag::Mkv));
    }

    #[test]
    fn test_defaults_to_mkv() {
        assert_eq!(detect_ebml_format(&EBML_MAGIC), FormatTag::Mkv);
    }

    #[test]
    fn test_webm_wins_over_matroska() {
        assert_eq!(detect_ebml_format(&ebml(b"matroska webm")), FormatTag::Webm);
    }

    #[test]
    fn test_marker_past_sample_size_is_ignored() {
        let mut data = ebml(b"");
        data.resize(SAMPLE_SIZE, 0);
        data.extend_from_slice(b"webm");
        assert_eq!(detect_ebml_format(&data), FormatTag::Mkv);
    }
}

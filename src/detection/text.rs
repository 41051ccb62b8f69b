//! Text-content fallback (JSON, HTML, XML, plain text).
//!
//! Only consulted when no binary signature matched. Invalid UTF-8 is never
//! an error here; the check that needed it simply does not match.

use super::types::FormatTag;

const HTML_DOCTYPE: &[u8] = b"<!doctype html";
const HTML_TAG: &[u8] = b"<html";
const XML_DECLARATION: &[u8] = b"<?xml";

/// Strip leading ASCII whitespace (space, tab, LF, VT, FF, CR).
fn trim_leading_whitespace(data: &[u8]) -> &[u8] {
    let start = data
        .iter()
        .position(|&b| !matches!(b, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r'))
        .unwrap_or(data.len());
    &data[start..]
}

#[inline]
fn starts_with_ignore_case(data: &[u8], prefix: &[u8]) -> bool {
    data.len() >= prefix.len() && data[..prefix.len()].eq_ignore_ascii_case(prefix)
}

/// Printable ASCII (32..=126) plus tab, CR and LF.
#[inline]
fn is_plain_text_char(c: char) -> bool {
    matches!(c, ' '..='~' | '\t' | '\r' | '\n')
}

/// Whether the whole sample decodes as UTF-8 made only of printable ASCII,
/// tab, CR and LF.
pub fn is_plain_text(data: &[u8]) -> bool {
    std::str::from_utf8(data).is_ok_and(|text| text.chars().all(is_plain_text_char))
}

/// Classify a sample that matched no binary signature.
pub fn detect_text_format(sample: &[u8]) -> Option<FormatTag> {
    let head = trim_leading_whitespace(sample);

    if matches!(head.first(), Some(b'{' | b'[')) && std::str::from_utf8(head).is_ok() {
        return Some(FormatTag::Json);
    }

    if starts_with_ignore_case(head, HTML_DOCTYPE) || starts_with_ignore_case(head, HTML_TAG) {
        return Some(FormatTag::Html);
    }

    if head.starts_with(XML_DECLARATION) {
        return Some(FormatTag::Xml);
    }

    if is_plain_text(sample) {
        return Some(FormatTag::Txt);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_json_object_and_array() {
        assert_eq!(detect_text_format(br#"{"a":1}"#), Some(FormatTag::Json));
        assert_eq!(detect_text_format(b"  \n[1, 2, 3]"), Some(FormatTag::Json));
    }

    #[test]
    fn test_json_accepts_non_ascii_utf8() {
        assert_eq!(
            detect_text_format("{\"nome\": \"João\"}".as_bytes()),
            Some(FormatTag::Json)
        );
    }

    #[test]
    fn test_invalid_utf8_brace_falls_through() {
        // Not JSON, not HTML/XML, and not text either
        assert_eq!(detect_text_format(b"{\xFF\xFE}"), None);
    }

    #[test]
    fn test_detect_html() {
        assert_eq!(
            detect_text_format(b"<!DOCTYPE html><html></html>"),
            Some(FormatTag::Html)
        );
        assert_eq!(detect_text_format(b"\n<HTML><body/></HTML>"), Some(FormatTag::Html));
    }

    #[test]
    fn test_detect_xml() {
        assert_eq!(detect_text_format(br#"<?xml version="1.0"?>"#), Some(FormatTag::Xml));
    }

    #[test]
    fn test_xml_declaration_is_case_sensitive() {
        // Uppercase declaration is still printable text
        assert_eq!(detect_text_format(b"<?XML version=\"1.0\"?>"), Some(FormatTag::Txt));
    }

    #[test]
    fn test_detect_plain_text() {
        assert_eq!(detect_text_format(b"hello\nworld"), Some(FormatTag::Txt));
        assert_eq!(detect_text_format(b"a\tb\r\nc"), Some(FormatTag::Txt));
    }

    #[test]
    fn test_non_ascii_text_is_not_plain() {
        assert_eq!(detect_text_format("olá mundo".as_bytes()), None);
    }

    #[test]
    fn test_control_bytes_are_not_plain() {
        assert_eq!(detect_text_format(b"abc\x00def"), None);
        assert_eq!(detect_text_format(b"bell\x07"), None);
    }

    #[test]
    fn test_binary_is_undetected() {
        assert_eq!(detect_text_format(&[0xC3, 0x28, 0xA0, 0xA1]), None);
    }

    #[test]
    fn test_empty_sample_is_text() {
        assert_eq!(detect_text_format(b""), Some(FormatTag::Txt));
    }

    #[test]
    fn test_trim_leading_whitespace() {
        assert_eq!(trim_leading_whitespace(b" \t\x0b\x0c\r\nx "), b"x ");
        assert_eq!(trim_leading_whitespace(b"   "), b"");
    }
}

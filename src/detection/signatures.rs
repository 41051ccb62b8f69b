//! Ordered table of binary signatures.
//!
//! Entries are tested in declaration order and the first literal prefix
//! match wins. Shorter generic prefixes earlier in the table shadow more
//! specific ones further down (`BM` is tested long before anything else
//! starting with those two bytes), so the order below is part of the
//! detection contract and must not be sorted or regrouped.

use super::types::FormatTag;

/// Container families that need a second look before they can be named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerFamily {
    /// `RIFF` chunks: WAV, AVI or WebP
    Riff,
    /// EBML header: Matroska or WebM
    Ebml,
    /// `OggS` pages: Opus or generic Ogg
    Ogg,
    /// ZIP local file header: Office, ODF, EPUB, APK, JAR or plain ZIP
    Zip,
}

/// What a matched prefix resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureLabel {
    /// The prefix alone names the format.
    Format(FormatTag),
    /// The prefix names a container family that must be disambiguated.
    Family(ContainerFamily),
}

/// A single magic-number entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureEntry {
    /// Bytes the sample has to start with
    pub prefix: &'static [u8],
    /// Result of a match
    pub label: SignatureLabel,
}

impl SignatureEntry {
    const fn format(prefix: &'static [u8], tag: FormatTag) -> Self {
        Self {
            prefix,
            label: SignatureLabel::Format(tag),
        }
    }

    const fn family(prefix: &'static [u8], family: ContainerFamily) -> Self {
        Self {
            prefix,
            label: SignatureLabel::Family(family),
        }
    }

    /// Whether `sample` starts with this entry's prefix.
    #[inline]
    pub fn matches(&self, sample: &[u8]) -> bool {
        sample.starts_with(self.prefix)
    }
}

/// Immutable, ordered signature table.
#[derive(Debug)]
pub struct SignatureTable {
    entries: &'static [SignatureEntry],
}

impl SignatureTable {
    /// First entry whose prefix is a literal prefix of `sample`.
    pub fn lookup(&self, sample: &[u8]) -> Option<&'static SignatureEntry> {
        self.entries.iter().find(|entry| entry.matches(sample))
    }

    /// All entries in priority order.
    pub fn entries(&self) -> &'static [SignatureEntry] {
        self.entries
    }
}

static ENTRIES: [SignatureEntry; 29] = [
    // Images
    SignatureEntry::format(b"\xFF\xD8\xFF", FormatTag::Jpg),
    SignatureEntry::format(b"\x89PNG\r\n\x1a\n", FormatTag::Png),
    SignatureEntry::format(b"GIF87a", FormatTag::Gif),
    SignatureEntry::format(b"GIF89a", FormatTag::Gif),
    SignatureEntry::format(b"BM", FormatTag::Bmp),
    SignatureEntry::format(b"\x49\x49\x2A\x00", FormatTag::Tiff),
    SignatureEntry::format(b"\x4D\x4D\x00\x2A", FormatTag::Tiff),
    SignatureEntry::format(b"8BPS", FormatTag::Psd),
    // Audio/video
    SignatureEntry::format(b"fLaC", FormatTag::Flac),
    SignatureEntry::format(b"ID3", FormatTag::Mp3),
    SignatureEntry::family(b"OggS", ContainerFamily::Ogg),
    SignatureEntry::family(b"RIFF", ContainerFamily::Riff),
    SignatureEntry::family(b"\x1A\x45\xDF\xA3", ContainerFamily::Ebml),
    // Documents and archives
    SignatureEntry::format(b"%PDF", FormatTag::Pdf),
    SignatureEntry::family(b"\x50\x4B\x03\x04", ContainerFamily::Zip),
    SignatureEntry::format(b"\x37\x7A\xBC\xAF\x27\x1C", FormatTag::SevenZip),
    SignatureEntry::format(b"\x1F\x8B\x08", FormatTag::Gz),
    SignatureEntry::format(b"BZh", FormatTag::Bz2),
    SignatureEntry::format(b"\xFD7zXZ\x00", FormatTag::Xz),
    SignatureEntry::format(b"Rar!\x1A\x07\x00", FormatTag::Rar),
    SignatureEntry::format(b"Rar!\x1A\x07\x01\x00", FormatTag::Rar),
    // Executables
    SignatureEntry::format(b"\x7FELF", FormatTag::Elf),
    SignatureEntry::format(b"MZ", FormatTag::Exe),
    // Fonts
    SignatureEntry::format(b"wOFF", FormatTag::Woff),
    SignatureEntry::format(b"wOF2", FormatTag::Woff2),
    SignatureEntry::format(b"\x00\x01\x00\x00", FormatTag::Ttf),
    SignatureEntry::format(b"OTTO", FormatTag::Otf),
    // Catalogued formats appended last; neither prefix overlaps an earlier entry
    SignatureEntry::format(b"SQLite format 3\x00", FormatTag::Sqlite),
    SignatureEntry::format(b"\x00\x00\x01\x00", FormatTag::Ico),
];

/// The process-wide signature table.
pub static SIGNATURE_TABLE: SignatureTable = SignatureTable { entries: &ENTRIES };

/// Look `sample` up in [`SIGNATURE_TABLE`].
#[inline]
pub fn lookup(sample: &[u8]) -> Option<&'static SignatureEntry> {
    SIGNATURE_TABLE.lookup(sample)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_png() {
        let sample = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR";
        let entry = lookup(sample).unwrap();
        assert_eq!(entry.label, SignatureLabel::Format(FormatTag::Png));
    }

    #[test]
    fn test_lookup_families() {
        assert_eq!(
            lookup(b"RIFF\x00\x00\x00\x00WAVE").unwrap().label,
            SignatureLabel::Family(ContainerFamily::Riff)
        );
        assert_eq!(
            lookup(b"PK\x03\x04garbage").unwrap().label,
            SignatureLabel::Family(ContainerFamily::Zip)
        );
        assert_eq!(
            lookup(b"OggS\x00\x02").unwrap().label,
            SignatureLabel::Family(ContainerFamily::Ogg)
        );
        assert_eq!(
            lookup(&[0x1A, 0x45, 0xDF, 0xA3, 0x01]).unwrap().label,
            SignatureLabel::Family(ContainerFamily::Ebml)
        );
    }

    #[test]
    fn test_lookup_no_match() {
        assert!(lookup(b"hello world").is_none());
        assert!(lookup(b"").is_none());
    }

    #[test]
    fn test_prefix_longer_than_sample_does_not_match() {
        // "GIF8" is a prefix of both GIF entries but shorter than either
        assert!(lookup(b"GIF8").is_none());
    }

    #[test]
    fn test_first_match_wins_over_later_entries() {
        // Both RAR entries share "Rar!\x1A\x07"; each resolves on its own byte
        assert_eq!(
            lookup(b"Rar!\x1A\x07\x01\x00").unwrap().prefix,
            b"Rar!\x1A\x07\x01\x00"
        );
        // "BM" shadows anything further down that starts the same way
        let entry = lookup(b"BMW brochure").unwrap();
        assert_eq!(entry.label, SignatureLabel::Format(FormatTag::Bmp));
    }

    #[test]
    fn test_table_order_is_stable() {
        let entries = SIGNATURE_TABLE.entries();
        assert_eq!(entries.len(), 29);
        assert_eq!(entries[0].label, SignatureLabel::Format(FormatTag::Jpg));
        let zip_pos = entries
            .iter()
            .position(|e| e.label == SignatureLabel::Family(ContainerFamily::Zip))
            .unwrap();
        let exe_pos = entries
            .iter()
            .position(|e| e.label == SignatureLabel::Format(FormatTag::Exe))
            .unwrap();
        assert!(zip_pos < exe_pos);
    }
}
